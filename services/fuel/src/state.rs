use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbFillUpRepository, DbReportRepository, DbVehicleRepository};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn vehicle_repo(&self) -> DbVehicleRepository {
        DbVehicleRepository {
            db: self.db.clone(),
        }
    }

    pub fn fill_up_repo(&self) -> DbFillUpRepository {
        DbFillUpRepository {
            db: self.db.clone(),
        }
    }

    pub fn report_repo(&self) -> DbReportRepository {
        DbReportRepository {
            db: self.db.clone(),
        }
    }
}
