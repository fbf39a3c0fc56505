use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Closed set of request failures. Every handler returns one of these;
/// the status code and client-visible message are decided here and nowhere
/// else. Internal sources are logged, never serialized.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("duplicate username or email")]
    DuplicateIdentity,
    #[error("User not found")]
    IdentityNotFound,
    #[error("Incorrect password")]
    InvalidCredentials,
    #[error("Missing authorization token")]
    Unauthenticated,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Transaction not found")]
    TransactionNotFound,
    #[error("You are not authorized to delete this transaction")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Malformed input and duplicates came back as 500 in the original
            // service; clients depend on that mapping.
            ApiError::Validation(_) | ApiError::DuplicateIdentity | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::IdentityNotFound | ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken | ApiError::TokenExpired | ApiError::Forbidden => {
                StatusCode::FORBIDDEN
            }
            ApiError::TransactionNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::DuplicateIdentity => "Error registering user".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.client_message() }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // SQLSTATE 23505: unique constraint violation. The unique indexes on
        // users.username / users.email are the arbiter for racing registrations.
        if let sqlx::Error::Database(db) = &e {
            if db.code().as_deref() == Some("23505") {
                return ApiError::DuplicateIdentity;
            }
        }
        ApiError::Internal(e.into())
    }
}
