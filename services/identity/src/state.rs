use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbRoleRepository, DbUserRepository};
use crate::infra::password::Argon2PasswordHasher;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub hasher: Argon2PasswordHasher,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }
}
