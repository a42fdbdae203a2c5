use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_identity::domain::repository::{PasswordHasher, RoleRepository, UserRepository};
use hearth_identity::domain::types::{Role, User, is_email_login};
use hearth_identity::error::IdentityError;
use hearth_outbox::OutboxEvent;

pub const SECRET: &str = "integration-test-secret";

pub fn tenant() -> TenantId {
    TenantId(Uuid::new_v4())
}

/// Membership row: `(tenant, user, role)`.
pub type Membership = (TenantId, UserId, Uuid);

/// In-memory tables shared by the user and role mocks.
#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub memberships: Vec<Membership>,
    pub events: Vec<OutboxEvent>,
}

#[derive(Clone, Default)]
pub struct MockStore(pub Arc<Mutex<Store>>);

impl MockStore {
    pub fn users(&self) -> MockUserRepo {
        MockUserRepo(self.clone())
    }

    pub fn roles(&self) -> MockRoleRepo {
        MockRoleRepo(self.clone())
    }

    pub fn event_kinds(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .events
            .iter()
            .map(|e| e.kind.clone())
            .collect()
    }

    pub fn add_role(&self, tenant_id: TenantId, name: &str) -> Role {
        let role = Role::new(tenant_id, name.to_owned());
        self.0.lock().unwrap().roles.push(role.clone());
        role
    }

    /// Insert a user directly, bypassing registration.
    pub fn add_user(&self, tenant_id: TenantId, user_name: &str, password: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: UserId(Uuid::now_v7()),
            tenant_id,
            user_name: user_name.to_owned(),
            email: format!("{user_name}@example.com"),
            password_hash: PlainHasher.hash(password).unwrap(),
            created_at: now,
            updated_at: now,
        };
        self.0.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn grant(&self, user: &User, role: &Role) {
        self.0
            .lock()
            .unwrap()
            .memberships
            .push((user.tenant_id, user.id, role.id));
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo(pub MockStore);

impl UserRepository for MockUserRepo {
    async fn count(&self, tenant_id: TenantId) -> Result<u64, IdentityError> {
        let store = self.0.0.lock().unwrap();
        Ok(store.users.iter().filter(|u| u.tenant_id == tenant_id).count() as u64)
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: UserId,
    ) -> Result<Option<User>, IdentityError> {
        let store = self.0.0.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|u| u.tenant_id == tenant_id && u.id == id)
            .cloned())
    }

    async fn find_by_login(
        &self,
        tenant_id: TenantId,
        login: &str,
    ) -> Result<Option<User>, IdentityError> {
        let store = self.0.0.lock().unwrap();
        let email = is_email_login(login);
        Ok(store
            .users
            .iter()
            .filter(|u| u.tenant_id == tenant_id)
            .find(|u| {
                if email {
                    u.email == login.to_lowercase()
                } else {
                    u.user_name == login
                }
            })
            .cloned())
    }

    async fn create(
        &self,
        user: &User,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<(), IdentityError> {
        let mut store = self.0.0.lock().unwrap();
        let taken = store.users.iter().any(|u| {
            u.tenant_id == user.tenant_id
                && (u.user_name == user.user_name || u.email == user.email)
        });
        if taken {
            return Err(IdentityError::UserAlreadyExists);
        }
        store.users.push(user.clone());
        store.memberships.push((user.tenant_id, user.id, role_id));
        store.events.push(event.clone());
        Ok(())
    }
}

// ── MockRoleRepo ─────────────────────────────────────────────────────────────

pub struct MockRoleRepo(pub MockStore);

impl RoleRepository for MockRoleRepo {
    async fn list(&self, tenant_id: TenantId) -> Result<Vec<Role>, IdentityError> {
        let store = self.0.0.lock().unwrap();
        let mut roles: Vec<Role> = store
            .roles
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<Role>, IdentityError> {
        let store = self.0.0.lock().unwrap();
        Ok(store
            .roles
            .iter()
            .find(|r| r.tenant_id == tenant_id && r.id == id)
            .cloned())
    }

    async fn ensure(
        &self,
        tenant_id: TenantId,
        names: &[&str],
    ) -> Result<Vec<Role>, IdentityError> {
        let mut store = self.0.0.lock().unwrap();
        for name in names {
            let exists = store
                .roles
                .iter()
                .any(|r| r.tenant_id == tenant_id && r.name == *name);
            if !exists {
                store.roles.push(Role::new(tenant_id, (*name).to_owned()));
            }
        }
        Ok(store
            .roles
            .iter()
            .filter(|r| r.tenant_id == tenant_id && names.contains(&r.name.as_str()))
            .cloned()
            .collect())
    }

    async fn create(&self, role: &Role, event: &OutboxEvent) -> Result<(), IdentityError> {
        let mut store = self.0.0.lock().unwrap();
        if store
            .roles
            .iter()
            .any(|r| r.tenant_id == role.tenant_id && r.name == role.name)
        {
            return Err(IdentityError::RoleAlreadyExists);
        }
        store.roles.push(role.clone());
        store.events.push(event.clone());
        Ok(())
    }

    async fn roles_of(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<Role>, IdentityError> {
        let store = self.0.0.lock().unwrap();
        Ok(store
            .roles
            .iter()
            .filter(|r| {
                store
                    .memberships
                    .contains(&(tenant_id, user_id, r.id))
            })
            .cloned()
            .collect())
    }

    async fn assign(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, IdentityError> {
        let mut store = self.0.0.lock().unwrap();
        let membership = (tenant_id, user_id, role_id);
        if store.memberships.contains(&membership) {
            return Ok(false);
        }
        store.memberships.push(membership);
        store.events.push(event.clone());
        Ok(true)
    }

    async fn revoke(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, IdentityError> {
        let mut store = self.0.0.lock().unwrap();
        let before = store.memberships.len();
        store
            .memberships
            .retain(|m| *m != (tenant_id, user_id, role_id));
        if store.memberships.len() == before {
            return Ok(false);
        }
        store.events.push(event.clone());
        Ok(true)
    }
}

// ── PlainHasher ──────────────────────────────────────────────────────────────

/// Reversible stand-in so use-case tests skip Argon2's cost.
#[derive(Clone, Copy)]
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, IdentityError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, IdentityError> {
        Ok(hash.strip_prefix("plain:") == Some(password))
    }
}

/// `PlainHasher` that notes which thread each call ran on.
#[derive(Clone, Default)]
pub struct ThreadTrackingHasher {
    pub threads: Arc<Mutex<Vec<std::thread::ThreadId>>>,
}

impl PasswordHasher for ThreadTrackingHasher {
    fn hash(&self, password: &str) -> Result<String, IdentityError> {
        self.threads.lock().unwrap().push(std::thread::current().id());
        PlainHasher.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, IdentityError> {
        self.threads.lock().unwrap().push(std::thread::current().id());
        PlainHasher.verify(password, hash)
    }
}
