#![allow(async_fn_in_trait)]

use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_outbox::OutboxEvent;

use crate::domain::types::{Role, User};
use crate::error::IdentityError;

/// Repository for tenant user accounts.
pub trait UserRepository: Send + Sync {
    async fn count(&self, tenant_id: TenantId) -> Result<u64, IdentityError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: UserId,
    ) -> Result<Option<User>, IdentityError>;

    /// Match `login` against the user name, or the email when it contains '@'.
    async fn find_by_login(
        &self,
        tenant_id: TenantId,
        login: &str,
    ) -> Result<Option<User>, IdentityError>;

    /// Insert the user holding `role_id`. `UserAlreadyExists` on a duplicate user
    /// name or email.
    async fn create(
        &self,
        user: &User,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<(), IdentityError>;
}

/// Repository for tenant roles and their assignment to users.
pub trait RoleRepository: Send + Sync {
    /// Ordered by name.
    async fn list(&self, tenant_id: TenantId) -> Result<Vec<Role>, IdentityError>;

    async fn find_by_id(&self, tenant_id: TenantId, id: Uuid)
    -> Result<Option<Role>, IdentityError>;

    /// Create any of `names` the tenant lacks and return all of them.
    async fn ensure(&self, tenant_id: TenantId, names: &[&str])
    -> Result<Vec<Role>, IdentityError>;

    /// `RoleAlreadyExists` on a duplicate name.
    async fn create(&self, role: &Role, event: &OutboxEvent) -> Result<(), IdentityError>;

    async fn roles_of(&self, tenant_id: TenantId, user_id: UserId)
    -> Result<Vec<Role>, IdentityError>;

    /// `false` if the user already held the role; the event is then dropped.
    async fn assign(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, IdentityError>;

    /// `false` if the user did not hold the role; the event is then dropped.
    async fn revoke(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, IdentityError>;
}

/// One-way password hashing. Calls are CPU-bound; use cases run them on the
/// blocking pool, so implementations are cloned into the task.
pub trait PasswordHasher: Clone + Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, IdentityError>;

    /// `Ok(false)` on mismatch; `Err` only when `hash` is unreadable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, IdentityError>;
}
