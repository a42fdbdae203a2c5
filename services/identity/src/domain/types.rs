use chrono::{DateTime, Utc};
use uuid::Uuid;

use hearth_auth_types::identity::{ADMIN_ROLE, USER_ROLE};
use hearth_domain::field::{FieldError, required};
use hearth_domain::id::{TenantId, UserId};

pub const USER_NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const ROLE_NAME_MAX: usize = 100;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

/// Roles every tenant gets on its first registration.
pub const DEFAULT_ROLES: [&str; 2] = [ADMIN_ROLE, USER_ROLE];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub user_name: String,
    /// Stored lowercased.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Role {
    pub fn new(tenant_id: TenantId, name: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            tenant_id,
            name,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.name.eq_ignore_ascii_case(ADMIN_ROLE)
    }
}

/// A user together with the names of the roles it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub roles: Vec<String>,
}

impl UserProfile {
    pub fn new(user: User, roles: &[Role]) -> Self {
        let mut roles: Vec<String> = roles.iter().map(|r| r.name.clone()).collect();
        roles.sort();
        Self { user, roles }
    }
}

/// The first account of a tenant administers it; everyone after is a plain user.
pub fn initial_role(existing_users: u64) -> &'static str {
    if existing_users == 0 {
        ADMIN_ROLE
    } else {
        USER_ROLE
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("user_name may only contain letters, digits, '-', '_' and '.'")]
    UserName,
    #[error("email must contain exactly one '@' with text on both sides")]
    Email,
    #[error("password must be 8 to 128 characters and contain a letter and a digit")]
    Password,
}

pub fn validate_user_name(value: &str) -> Result<String, ValidationError> {
    let name = required("user_name", value, USER_NAME_MAX)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '-' | '_' | '.');
    if !name.chars().all(allowed) {
        return Err(ValidationError::UserName);
    }
    Ok(name)
}

/// Trimmed and lowercased so lookups and the unique index ignore case.
pub fn validate_email(value: &str) -> Result<String, ValidationError> {
    let email = required("email", value, EMAIL_MAX)?.to_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(email)
        }
        _ => Err(ValidationError::Email),
    }
}

/// Passwords are taken verbatim; surrounding whitespace counts.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    let has_letter = value.chars().any(char::is_alphabetic);
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) || !has_letter || !has_digit {
        return Err(ValidationError::Password);
    }
    Ok(())
}

pub fn validate_role_name(value: &str) -> Result<String, ValidationError> {
    Ok(required("name", value, ROLE_NAME_MAX)?)
}

/// User names cannot contain '@', so the login string alone tells which column to match.
pub fn is_email_login(login: &str) -> bool {
    login.contains('@')
}
