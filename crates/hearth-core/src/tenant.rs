//! Request-scoped tenant context.
//!
//! Every request names its tenant in the `x-tenant-id` header. Handlers take
//! [`TenantContext`] as an extractor and pass the id down to use cases; nothing in the
//! process holds a default tenant.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use hearth_domain::id::TenantId;

use crate::error::AppError;

pub const TENANT_HEADER: &str = "x-tenant-id";

/// Tenant the current request acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: TenantId,
}

/// Read and parse `x-tenant-id`. Absent, non-UTF-8 or non-UUID values are rejected.
pub fn tenant_from_parts(parts: &Parts) -> Result<TenantId, AppError> {
    parts
        .headers
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<TenantId>().ok())
        .ok_or(AppError::MissingTenant)
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // Header values are read synchronously so the returned future borrows nothing
    // from `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let tenant = tenant_from_parts(parts);
        async move {
            Ok(Self {
                tenant_id: tenant?,
            })
        }
    }
}
