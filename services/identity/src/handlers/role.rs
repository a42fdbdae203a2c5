use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_auth_types::identity::Identity;
use hearth_core::tenant::TenantContext;
use hearth_domain::id::UserId;

use crate::domain::types::Role;
use crate::error::IdentityError;
use crate::state::AppState;
use crate::usecase::role::{
    AssignRoleUseCase, CreateRoleUseCase, ListRolesUseCase, RevokeRoleUseCase,
};

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            created_at: role.created_at,
        }
    }
}

fn require_admin(identity: &Identity) -> Result<(), IdentityError> {
    if !identity.is_admin() {
        return Err(IdentityError::Forbidden);
    }
    Ok(())
}

// ── GET /roles ───────────────────────────────────────────────────────────────

pub async fn get_roles(
    tenant: TenantContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleResponse>>, IdentityError> {
    let usecase = ListRolesUseCase {
        repo: state.role_repo(),
    };
    let roles = usecase.execute(tenant.tenant_id).await?;
    Ok(Json(roles.into_iter().map(Into::into).collect()))
}

// ── POST /roles ──────────────────────────────────────────────────────────────

pub async fn create_role(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), IdentityError> {
    require_admin(&identity)?;
    let usecase = CreateRoleUseCase {
        repo: state.role_repo(),
    };
    let role = usecase.execute(identity.tenant_id, &body.name).await?;
    Ok((StatusCode::CREATED, Json(role.into())))
}

// ── PUT /users/{user_id}/roles/{role_id} ─────────────────────────────────────

pub async fn assign_role(
    identity: Identity,
    State(state): State<AppState>,
    Path((user_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, IdentityError> {
    require_admin(&identity)?;
    let usecase = AssignRoleUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    usecase
        .execute(identity.tenant_id, UserId(user_id), role_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/{user_id}/roles/{role_id} ──────────────────────────────────

pub async fn revoke_role(
    identity: Identity,
    State(state): State<AppState>,
    Path((user_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, IdentityError> {
    require_admin(&identity)?;
    let usecase = RevokeRoleUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    usecase
        .execute(identity.tenant_id, UserId(user_id), role_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
