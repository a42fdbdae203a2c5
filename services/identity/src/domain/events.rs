//! Integration events raised by the identity service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use hearth_domain::event::IntegrationEvent;
use hearth_domain::id::{TenantId, UserId};
use hearth_outbox::OutboxEvent;

use crate::domain::types::{Role, User};
use crate::error::IdentityError;

pub fn outbox<E: IntegrationEvent>(
    tenant_id: TenantId,
    event: &E,
) -> Result<OutboxEvent, IdentityError> {
    OutboxEvent::from_event(tenant_id, event).map_err(|e| IdentityError::Internal(e.into()))
}

macro_rules! integration_event {
    ($ty:ty, $kind:literal, $aggregate:ident) => {
        impl IntegrationEvent for $ty {
            const KIND: &'static str = $kind;

            fn event_id(&self) -> Uuid {
                self.event_id
            }

            fn aggregate_id(&self) -> Uuid {
                self.$aggregate.into()
            }
        }
    };
}

/// Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: String,
    pub occurred_at: DateTime<Utc>,
}

impl UserRegistered {
    pub fn new(user: &User, role: &str) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            user_id: user.id,
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            role: role.to_owned(),
            occurred_at: user.created_at,
        }
    }
}

integration_event!(UserRegistered, "user.registered", user_id);

#[derive(Debug, Clone, Serialize)]
pub struct RoleCreated {
    pub event_id: Uuid,
    pub role_id: Uuid,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

impl RoleCreated {
    pub fn new(role: &Role) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            role_id: role.id,
            name: role.name.clone(),
            occurred_at: role.created_at,
        }
    }
}

integration_event!(RoleCreated, "role.created", role_id);

#[derive(Debug, Clone, Serialize)]
pub struct RoleAssigned {
    pub event_id: Uuid,
    pub user_id: UserId,
    pub role_id: Uuid,
    pub role_name: String,
    pub occurred_at: DateTime<Utc>,
}

integration_event!(RoleAssigned, "user_role.assigned", user_id);

#[derive(Debug, Clone, Serialize)]
pub struct RoleRevoked {
    pub event_id: Uuid,
    pub user_id: UserId,
    pub role_id: Uuid,
    pub role_name: String,
    pub occurred_at: DateTime<Utc>,
}

integration_event!(RoleRevoked, "user_role.revoked", user_id);
