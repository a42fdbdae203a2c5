use chrono::Utc;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};

use crate::domain::events::{RoleAssigned, RoleCreated, RoleRevoked, outbox};
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::types::{Role, validate_role_name};
use crate::error::IdentityError;

// ── ListRoles ────────────────────────────────────────────────────────────────

pub struct ListRolesUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> ListRolesUseCase<R> {
    pub async fn execute(&self, tenant_id: TenantId) -> Result<Vec<Role>, IdentityError> {
        self.repo.list(tenant_id).await
    }
}

// ── CreateRole ───────────────────────────────────────────────────────────────

pub struct CreateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> CreateRoleUseCase<R> {
    pub async fn execute(&self, tenant_id: TenantId, name: &str) -> Result<Role, IdentityError> {
        let role = Role::new(tenant_id, validate_role_name(name)?);
        let event = outbox(tenant_id, &RoleCreated::new(&role))?;
        self.repo.create(&role, &event).await?;
        Ok(role)
    }
}

/// Load the user and role an assignment refers to, both within `tenant_id`.
async fn require_pair<U: UserRepository, R: RoleRepository>(
    users: &U,
    roles: &R,
    tenant_id: TenantId,
    user_id: UserId,
    role_id: Uuid,
) -> Result<Role, IdentityError> {
    users
        .find_by_id(tenant_id, user_id)
        .await?
        .ok_or(IdentityError::UserNotFound)?;
    roles
        .find_by_id(tenant_id, role_id)
        .await?
        .ok_or(IdentityError::RoleNotFound)
}

// ── AssignRole ───────────────────────────────────────────────────────────────

pub struct AssignRoleUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> AssignRoleUseCase<U, R> {
    /// Assigning a role the user already holds succeeds without a new event.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: Uuid,
    ) -> Result<(), IdentityError> {
        let role = require_pair(&self.users, &self.roles, tenant_id, user_id, role_id).await?;
        let event = outbox(
            tenant_id,
            &RoleAssigned {
                event_id: Uuid::now_v7(),
                user_id,
                role_id,
                role_name: role.name,
                occurred_at: Utc::now(),
            },
        )?;
        self.roles
            .assign(tenant_id, user_id, role_id, &event)
            .await?;
        Ok(())
    }
}

// ── RevokeRole ───────────────────────────────────────────────────────────────

pub struct RevokeRoleUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> RevokeRoleUseCase<U, R> {
    /// Revoking a role the user does not hold succeeds without an event.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: Uuid,
    ) -> Result<(), IdentityError> {
        let role = require_pair(&self.users, &self.roles, tenant_id, user_id, role_id).await?;
        let event = outbox(
            tenant_id,
            &RoleRevoked {
                event_id: Uuid::now_v7(),
                user_id,
                role_id,
                role_name: role.name,
                occurred_at: Utc::now(),
            },
        )?;
        self.roles
            .revoke(tenant_id, user_id, role_id, &event)
            .await?;
        Ok(())
    }
}
