pub mod extractors;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, validate_token, Claims};

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account.
    /// Must be a valid email format, at most 255 characters.
    #[validate(email, length(max = 255))]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 8 characters long.
    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

/// Represents the payload for a user login request.
///
/// No format rules here: a malformed email or password simply fails the
/// credential check, which responds the same way for every failure cause.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The JWT bearer token for session authentication.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// The authenticated user (public fields only).
    pub user: User,
}

/// Response structure after a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_email_register = RegisterRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_register.validate().is_err());

        // 7 characters: one short of the minimum
        let short_password_register = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "1234567".to_string(),
        };
        assert!(short_password_register.validate().is_err());

        let long_email_register = RegisterRequest {
            email: format!("{}@example.com", "a".repeat(250)),
            password: "password123".to_string(),
        };
        assert!(long_email_register.validate().is_err());
    }
}
