//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;

use hearth_core::error::AppError;
use hearth_core::tenant::tenant_from_parts;
use hearth_domain::id::{TenantId, UserId};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLES_HEADER: &str = "x-user-roles";

/// Role granted to the first user of every tenant.
pub const ADMIN_ROLE: &str = "Admin";
/// Role granted to every later user.
pub const USER_ROLE: &str = "User";

/// Caller identity injected by the gateway after it validated the access token.
///
/// - `x-tenant-id`: tenant UUID (400 `MISSING_TENANT` when absent or invalid)
/// - `x-user-id`: user UUID (401 when absent or invalid)
/// - `x-user-roles`: comma-separated role names, optional
///
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

fn parse_roles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_owned)
        .collect()
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let tenant_id = tenant_from_parts(parts);

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<UserId>().ok());

        let roles = parts
            .headers
            .get(USER_ROLES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(parse_roles)
            .unwrap_or_default();

        async move {
            let tenant_id = tenant_id?;
            let user_id = user_id.ok_or(AppError::Unauthorized)?;
            Ok(Self {
                tenant_id,
                user_id,
                roles,
            })
        }
    }
}
