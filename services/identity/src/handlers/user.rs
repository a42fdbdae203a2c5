use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hearth_auth_types::identity::Identity;
use hearth_core::tenant::TenantContext;
use hearth_domain::id::UserId;

use crate::domain::types::UserProfile;
use crate::error::IdentityError;
use crate::state::AppState;
use crate::usecase::user::{GetMeUseCase, RegisterUserInput, RegisterUserUseCase};

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    pub roles: Vec<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        let user = profile.user;
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            roles: profile.roles,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

pub async fn register_user(
    tenant: TenantContext,
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), IdentityError> {
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
        hasher: state.hasher.clone(),
    };
    let profile = usecase
        .execute(
            tenant.tenant_id,
            RegisterUserInput {
                user_name: body.user_name,
                email: body.email,
                password: body.password,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, IdentityError> {
    let usecase = GetMeUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    let profile = usecase
        .execute(identity.tenant_id, identity.user_id)
        .await?;
    Ok(Json(profile.into()))
}
