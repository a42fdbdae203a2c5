use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionError, TransactionTrait, sea_query::OnConflict,
};
use uuid::Uuid;

use hearth_core::sea_ext::{SelectExt, is_unique_violation};
use hearth_domain::id::{TenantId, UserId};
use hearth_identity_schema::{roles, user_roles, users};
use hearth_outbox::{OutboxEvent, store::record};

use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::types::{Role, User, is_email_login};
use crate::error::IdentityError;

/// Map a unique-index violation to `conflict`, anything else to `Internal`.
fn write_error(
    err: TransactionError<DbErr>,
    conflict: IdentityError,
    context: &'static str,
) -> IdentityError {
    match err {
        TransactionError::Transaction(ref db) if is_unique_violation(db) => conflict,
        other => IdentityError::Internal(anyhow::Error::new(other).context(context)),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn count(&self, tenant_id: TenantId) -> Result<u64, IdentityError> {
        let count = users::Entity::find()
            .tenant_scoped(users::Column::TenantId, tenant_id)
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: UserId,
    ) -> Result<Option<User>, IdentityError> {
        let model = users::Entity::find_by_id(id.0)
            .tenant_scoped(users::Column::TenantId, tenant_id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_login(
        &self,
        tenant_id: TenantId,
        login: &str,
    ) -> Result<Option<User>, IdentityError> {
        let query = users::Entity::find().tenant_scoped(users::Column::TenantId, tenant_id);
        let query = if is_email_login(login) {
            query.filter(users::Column::Email.eq(login.to_lowercase()))
        } else {
            query.filter(users::Column::UserName.eq(login))
        };
        let model = query.one(&self.db).await.context("find user by login")?;
        Ok(model.map(user_from_model))
    }

    async fn create(
        &self,
        user: &User,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<(), IdentityError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = user_to_active_model(user);
                let membership = user_roles::ActiveModel {
                    user_id: Set(user.id.0),
                    role_id: Set(role_id),
                    tenant_id: Set(user.tenant_id.0),
                };
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    membership.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| write_error(e, IdentityError::UserAlreadyExists, "create user"))
    }
}

fn user_to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id.0),
        tenant_id: Set(user.tenant_id.0),
        user_name: Set(user.user_name.clone()),
        email: Set(user.email.clone()),
        password_hash: Set(user.password_hash.clone()),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        tenant_id: TenantId(model.tenant_id),
        user_name: model.user_name,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn list(&self, tenant_id: TenantId) -> Result<Vec<Role>, IdentityError> {
        let models = roles::Entity::find()
            .tenant_scoped(roles::Column::TenantId, tenant_id)
            .order_by_asc(roles::Column::Name)
            .all(&self.db)
            .await
            .context("list roles")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<Role>, IdentityError> {
        let model = roles::Entity::find_by_id(id)
            .tenant_scoped(roles::Column::TenantId, tenant_id)
            .one(&self.db)
            .await
            .context("find role by id")?;
        Ok(model.map(role_from_model))
    }

    async fn ensure(
        &self,
        tenant_id: TenantId,
        names: &[&str],
    ) -> Result<Vec<Role>, IdentityError> {
        let models = names.iter().map(|name| {
            role_to_active_model(&Role::new(tenant_id, (*name).to_owned()))
        });
        // racing registrations collide on the unique index; the later insert is a no-op
        roles::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([roles::Column::TenantId, roles::Column::Name])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert default roles")?;

        let models = roles::Entity::find()
            .tenant_scoped(roles::Column::TenantId, tenant_id)
            .filter(roles::Column::Name.is_in(names.iter().copied()))
            .all(&self.db)
            .await
            .context("load default roles")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn create(&self, role: &Role, event: &OutboxEvent) -> Result<(), IdentityError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = role_to_active_model(role);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| write_error(e, IdentityError::RoleAlreadyExists, "create role"))
    }

    async fn roles_of(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<Role>, IdentityError> {
        let models = roles::Entity::find()
            .join(JoinType::InnerJoin, roles::Relation::UserRole.def())
            .tenant_scoped(roles::Column::TenantId, tenant_id)
            .filter(user_roles::Column::UserId.eq(user_id.0))
            .order_by_asc(roles::Column::Name)
            .all(&self.db)
            .await
            .context("list roles of user")?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn assign(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, IdentityError> {
        let assigned = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let model = user_roles::ActiveModel {
                    user_id: Set(user_id.0),
                    role_id: Set(role_id),
                    tenant_id: Set(tenant_id.0),
                };
                let event = event.clone();
                Box::pin(async move {
                    let inserted = user_roles::Entity::insert(model)
                        .on_conflict(
                            OnConflict::columns([
                                user_roles::Column::UserId,
                                user_roles::Column::RoleId,
                            ])
                            .do_nothing()
                            .to_owned(),
                        )
                        .exec_without_returning(txn)
                        .await?;
                    if inserted == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("assign role with outbox")?;
        Ok(assigned)
    }

    async fn revoke(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, IdentityError> {
        let revoked = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = user_roles::Entity::delete_many()
                        .filter(user_roles::Column::UserId.eq(user_id.0))
                        .filter(user_roles::Column::RoleId.eq(role_id))
                        .filter(user_roles::Column::TenantId.eq(tenant_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("revoke role with outbox")?;
        Ok(revoked)
    }
}

fn role_to_active_model(role: &Role) -> roles::ActiveModel {
    roles::ActiveModel {
        id: Set(role.id),
        tenant_id: Set(role.tenant_id.0),
        name: Set(role.name.clone()),
        created_at: Set(role.created_at),
    }
}

fn role_from_model(model: roles::Model) -> Role {
    Role {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        name: model.name,
        created_at: model.created_at,
    }
}
