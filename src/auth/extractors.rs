use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::validate_token;
use crate::config::Config;
use crate::error::AppError;
use crate::models::User;

/// Extracts the authenticated user for protected routes.
///
/// Resolution order: bearer token from the `Authorization` header, token
/// validation, subject claim parsed as an integer id, then a live lookup of
/// the user record. Every failure along the way is the same 401.
///
/// Handlers receive the persisted `User` row rather than the token claims,
/// so a user deleted after the token was issued is locked out immediately
/// even though the token itself still verifies.
#[derive(Debug)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError is converted into ActixError via ResponseError
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = req
                .headers()
                .get(actix_web::http::header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;

            let config = req
                .app_data::<web::Data<Config>>()
                .ok_or_else(|| AppError::Internal("Config not registered in app data".into()))?;

            let claims = validate_token(token, &config.auth)?;

            let user_id: i32 = claims
                .sub
                .parse()
                .map_err(|_| AppError::Unauthorized("Invalid token payload".into()))?;

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .ok_or_else(|| AppError::Internal("Pool not registered in app data".into()))?;

            let user = sqlx::query_as::<_, User>(
                "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
            )
            .bind(user_id)
            .fetch_optional(pool.get_ref())
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

            Ok(AuthenticatedUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            cors_origins: vec!["*".to_string()],
            auth: AuthConfig {
                jwt_secret: "extractor-test-secret".to_string(),
                token_ttl_hours: 24,
            },
        }
    }

    #[actix_rt::test]
    async fn test_missing_authorization_header_is_unauthorized() {
        let req = test::TestRequest::default()
            .app_data(web::Data::new(test_config()))
            .to_http_request();

        let mut payload = Payload::None;
        let result = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let response = result.unwrap_err().error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_garbage_token_is_unauthorized() {
        let req = test::TestRequest::default()
            .append_header(("Authorization", "Bearer not-a-real-token"))
            .app_data(web::Data::new(test_config()))
            .to_http_request();

        let mut payload = Payload::None;
        let result = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let response = result.unwrap_err().error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let req = test::TestRequest::default()
            .append_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .app_data(web::Data::new(test_config()))
            .to_http_request();

        let mut payload = Payload::None;
        let result = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let response = result.unwrap_err().error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
