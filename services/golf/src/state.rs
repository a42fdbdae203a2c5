use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbCourseRepository, DbRoundRepository};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn round_repo(&self) -> DbRoundRepository {
        DbRoundRepository {
            db: self.db.clone(),
        }
    }
}
