use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbGoalRepository, DbIntakeRepository, DbReminderRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn intake_repo(&self) -> DbIntakeRepository {
        DbIntakeRepository {
            db: self.db.clone(),
        }
    }

    pub fn goal_repo(&self) -> DbGoalRepository {
        DbGoalRepository {
            db: self.db.clone(),
        }
    }

    pub fn reminder_repo(&self) -> DbReminderRepository {
        DbReminderRepository {
            db: self.db.clone(),
        }
    }
}
