use std::time::{SystemTime, UNIX_EPOCH};

use hearth_auth_types::token::{JwtClaims, TokenInfo, encode_access_token, validate_access_token};
use hearth_domain::id::TenantId;

use crate::domain::repository::{PasswordHasher, RoleRepository, UserRepository};
use crate::domain::types::UserProfile;
use crate::error::IdentityError;
use crate::usecase::verify_password;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign an access token for `profile`, returning it with its `exp` (seconds since epoch).
pub fn issue_access_token(
    profile: &UserProfile,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), IdentityError> {
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: profile.user.id.to_string(),
        tenant: profile.user.tenant_id.to_string(),
        roles: profile.roles.clone(),
        exp,
    };
    let token =
        encode_access_token(&claims, secret).map_err(|e| IdentityError::Internal(e.into()))?;
    Ok((token, exp))
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    /// User name or email.
    pub login: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub profile: UserProfile,
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct LoginUseCase<U: UserRepository, R: RoleRepository, H: PasswordHasher> {
    pub users: U,
    pub roles: R,
    pub hasher: H,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U: UserRepository, R: RoleRepository, H: PasswordHasher> LoginUseCase<U, R, H> {
    /// Unknown user and wrong password fail the same way.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        input: LoginInput,
    ) -> Result<LoginOutput, IdentityError> {
        let login = input.login.trim();
        if login.is_empty() {
            return Err(IdentityError::InvalidCredentials);
        }
        let user = self
            .users
            .find_by_login(tenant_id, login)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;
        if !verify_password(&self.hasher, &input.password, &user.password_hash).await? {
            return Err(IdentityError::InvalidCredentials);
        }

        let roles = self.roles.roles_of(tenant_id, user.id).await?;
        let profile = UserProfile::new(user, &roles);
        let (access_token, access_token_exp) =
            issue_access_token(&profile, &self.jwt_secret, self.token_ttl_secs)?;
        Ok(LoginOutput {
            profile,
            access_token,
            access_token_exp,
        })
    }
}

// ── IntrospectToken ──────────────────────────────────────────────────────────

pub struct IntrospectTokenUseCase {
    pub jwt_secret: String,
}

impl IntrospectTokenUseCase {
    pub fn execute(&self, token: &str) -> Result<TokenInfo, IdentityError> {
        validate_access_token(token, &self.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "access token rejected");
            IdentityError::InvalidToken
        })
    }
}
