use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hearth_core::error::error_response;

use crate::domain::types::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum GolfError {
    #[error("course not found")]
    CourseNotFound,
    #[error("a course with this name already exists")]
    CourseAlreadyExists,
    #[error("course has recorded rounds")]
    CourseInUse,
    #[error("round not found")]
    RoundNotFound,
    #[error("hole score not found")]
    HoleScoreNotFound,
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GolfError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::CourseAlreadyExists => "COURSE_ALREADY_EXISTS",
            Self::CourseInUse => "COURSE_IN_USE",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::HoleScoreNotFound => "HOLE_SCORE_NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for GolfError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CourseNotFound | Self::RoundNotFound | Self::HoleScoreNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::CourseAlreadyExists | Self::CourseInUse => StatusCode::CONFLICT,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
