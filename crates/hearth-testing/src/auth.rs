//! Mock gateway headers for tests.
//!
//! Services behind the gateway receive `x-tenant-id`, `x-user-id` and `x-user-roles`
//! after the gateway validated the caller's access token. `MockIdentity` builds the same
//! headers so tests need neither a gateway nor a JWT.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};

/// Configurable identity injected into test requests.
pub struct MockIdentity {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub roles: Vec<String>,
}

impl MockIdentity {
    pub fn new(tenant_id: TenantId, user_id: UserId) -> Self {
        Self {
            tenant_id,
            user_id,
            roles: vec!["User".to_owned()],
        }
    }

    /// A fresh tenant with one plain user.
    pub fn random() -> Self {
        Self::new(TenantId(Uuid::new_v4()), UserId(Uuid::new_v4()))
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.roles.push(role.to_owned());
        self
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = tenant_headers(self.tenant_id);
        map.insert(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static("x-user-roles"),
            HeaderValue::from_str(&self.roles.join(",")).unwrap(),
        );
        map
    }
}

/// Only the tenant header, for tenant-scoped endpoints without a user.
pub fn tenant_headers(tenant_id: TenantId) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(
        HeaderName::from_static("x-tenant-id"),
        HeaderValue::from_str(&tenant_id.to_string()).unwrap(),
    );
    map
}
