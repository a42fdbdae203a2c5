use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hearth_core::error::error_response;

use crate::domain::types::ValidationError;

/// Hydration service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum HydrationError {
    #[error("intake not found")]
    IntakeNotFound,
    #[error("goal not found")]
    GoalNotFound,
    #[error("reminder not found")]
    ReminderNotFound,
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl HydrationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IntakeNotFound => "INTAKE_NOT_FOUND",
            Self::GoalNotFound => "GOAL_NOT_FOUND",
            Self::ReminderNotFound => "REMINDER_NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for HydrationError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::IntakeNotFound | Self::GoalNotFound | Self::ReminderNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
