use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthResponse, LoginRequest,
        RegisterRequest, RegisterResponse,
    },
    config::Config,
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns the created record.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Check if email already exists
    let existing_user = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE email = $1")
        .bind(&register_data.email)
        .fetch_optional(&**pool)
        .await?;

    if existing_user.is_some() {
        return Err(AppError::Registration("Email already registered".into()));
    }

    // Hash the password before touching the pool again; bcrypt is CPU-bound
    // and must not sit on a connection while it runs
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2)
         RETURNING id, email, password_hash, created_at",
    )
    .bind(&register_data.email)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await?;

    log::info!("registered user {}", user.id);

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".into(),
        user,
    }))
}

/// Login user
///
/// Authenticates a user and returns an access token alongside the user
/// record. A missing account and a wrong password produce the identical
/// response so the endpoint never reveals which one it was.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Get user from database
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) => user,
        None => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    // Verify password
    if !verify_password(&login_data.password, &user.password_hash) {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    // Generate token with the user id as the (stringified) subject
    let token = generate_token(user.id, &user.email, &config.auth)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "bearer".into(),
        user,
    }))
}

/// Logout
///
/// Stateless acknowledgement: there is no server-side session to invalidate,
/// so issued tokens remain valid until they expire on their own.
#[post("/logout")]
pub async fn logout() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Logged out successfully"
    }))
}
