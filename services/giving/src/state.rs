use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbDonationRepository, DbOrganizationRepository, DbTaxReportRepository};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn organization_repo(&self) -> DbOrganizationRepository {
        DbOrganizationRepository {
            db: self.db.clone(),
        }
    }

    pub fn donation_repo(&self) -> DbDonationRepository {
        DbDonationRepository {
            db: self.db.clone(),
        }
    }

    pub fn tax_report_repo(&self) -> DbTaxReportRepository {
        DbTaxReportRepository {
            db: self.db.clone(),
        }
    }
}
