use serde::{Deserialize, Serialize};

use crate::{auth::repo::User, error::ApiError};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    /// All three fields must be present and non-empty. No format validation
    /// beyond that.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(ApiError::Validation(
                "username, email and password are required".into(),
            ));
        }
        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after registration. The serialized user never includes
/// the password hash.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
