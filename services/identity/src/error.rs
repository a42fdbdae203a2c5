use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hearth_core::error::error_response;

use crate::domain::types::ValidationError;

/// Identity service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("user not found")]
    UserNotFound,
    #[error("role not found")]
    RoleNotFound,
    #[error("user name or email already taken")]
    UserAlreadyExists,
    #[error("role already exists")]
    RoleAlreadyExists,
    #[error("invalid user name, email or password")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::RoleAlreadyExists => "ROLE_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::RoleNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::RoleAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
