use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, QueryFilter, QuerySelect, Select, SqlErr,
};

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;

/// Tenant partitioning and paging for `Select` queries.
pub trait SelectExt: Sized {
    /// Restrict rows to one tenant.
    fn tenant_scoped<C: ColumnTrait>(self, column: C, tenant: TenantId) -> Self;

    /// Restrict rows to one user (always combined with [`SelectExt::tenant_scoped`]).
    fn owned_by<C: ColumnTrait>(self, column: C, user: UserId) -> Self;

    /// Apply clamped `LIMIT`/`OFFSET` for a page request.
    fn in_page(self, page: PageRequest) -> Self;
}

impl<E> SelectExt for Select<E>
where
    E: EntityTrait,
{
    fn tenant_scoped<C: ColumnTrait>(self, column: C, tenant: TenantId) -> Self {
        self.filter(column.eq(tenant.0))
    }

    fn owned_by<C: ColumnTrait>(self, column: C, user: UserId) -> Self {
        self.filter(column.eq(user.0))
    }

    fn in_page(self, page: PageRequest) -> Self {
        self.offset(page.offset()).limit(page.limit())
    }
}

/// `true` when the statement failed on a unique index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// `true` when the statement failed on a foreign key.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
