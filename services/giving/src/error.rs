use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hearth_core::error::error_response;

use crate::domain::types::ValidationError;

/// Giving service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum GivingError {
    #[error("organization not found")]
    OrganizationNotFound,
    #[error("organization still has donations")]
    OrganizationHasDonations,
    #[error("donation not found")]
    DonationNotFound,
    #[error("tax report not found")]
    TaxReportNotFound,
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GivingError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrganizationNotFound => "ORGANIZATION_NOT_FOUND",
            Self::OrganizationHasDonations => "ORGANIZATION_HAS_DONATIONS",
            Self::DonationNotFound => "DONATION_NOT_FOUND",
            Self::TaxReportNotFound => "TAX_REPORT_NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for GivingError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::OrganizationNotFound | Self::DonationNotFound | Self::TaxReportNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::OrganizationHasDonations => StatusCode::CONFLICT,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
