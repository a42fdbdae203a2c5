use chrono::Utc;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};

use crate::domain::events::{UserRegistered, outbox};
use crate::domain::repository::{PasswordHasher, RoleRepository, UserRepository};
use crate::domain::types::{
    DEFAULT_ROLES, User, UserProfile, initial_role, validate_email, validate_password,
    validate_user_name,
};
use crate::error::IdentityError;
use crate::usecase::hash_password;

pub struct RegisterUserInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserUseCase<U: UserRepository, R: RoleRepository, H: PasswordHasher> {
    pub users: U,
    pub roles: R,
    pub hasher: H,
}

impl<U: UserRepository, R: RoleRepository, H: PasswordHasher> RegisterUserUseCase<U, R, H> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        input: RegisterUserInput,
    ) -> Result<UserProfile, IdentityError> {
        let user_name = validate_user_name(&input.user_name)?;
        let email = validate_email(&input.email)?;
        validate_password(&input.password)?;

        let role_name = initial_role(self.users.count(tenant_id).await?);
        let role = self
            .roles
            .ensure(tenant_id, &DEFAULT_ROLES)
            .await?
            .into_iter()
            .find(|r| r.name == role_name)
            .ok_or_else(|| anyhow::anyhow!("default role {role_name} missing after ensure"))?;

        let now = Utc::now();
        let user = User {
            id: UserId(Uuid::now_v7()),
            tenant_id,
            user_name,
            email,
            password_hash: hash_password(&self.hasher, &input.password).await?,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &UserRegistered::new(&user, &role.name))?;
        self.users.create(&user, role.id, &event).await?;

        tracing::info!(tenant_id = %tenant_id, user_id = %user.id, role = %role.name, "user registered");
        Ok(UserProfile::new(user, std::slice::from_ref(&role)))
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> GetMeUseCase<U, R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<UserProfile, IdentityError> {
        let user = self
            .users
            .find_by_id(tenant_id, user_id)
            .await?
            .ok_or(IdentityError::UserNotFound)?;
        let roles = self.roles.roles_of(tenant_id, user_id).await?;
        Ok(UserProfile::new(user, &roles))
    }
}
