use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hearth_core::error::error_response;

use crate::domain::types::ValidationError;

/// Fuel service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum FuelError {
    #[error("vehicle not found")]
    VehicleNotFound,
    #[error("vehicle is inactive")]
    VehicleInactive,
    #[error("fill-up not found")]
    FillUpNotFound,
    #[error("efficiency report not found")]
    ReportNotFound,
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FuelError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VehicleNotFound => "VEHICLE_NOT_FOUND",
            Self::VehicleInactive => "VEHICLE_INACTIVE",
            Self::FillUpNotFound => "FILL_UP_NOT_FOUND",
            Self::ReportNotFound => "REPORT_NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for FuelError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::VehicleNotFound | Self::FillUpNotFound | Self::ReportNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::VehicleInactive => StatusCode::CONFLICT,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
