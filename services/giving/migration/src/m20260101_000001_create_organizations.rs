use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Organizations::Name).string_len(500).not_null())
                    .col(ColumnDef::new(Organizations::Ein).string_len(20))
                    .col(ColumnDef::new(Organizations::Address).string_len(1000))
                    .col(ColumnDef::new(Organizations::Website).string_len(500))
                    .col(
                        ColumnDef::new(Organizations::Is501c3)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Organizations::Notes).string_len(2000))
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Organizations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_tenant_name")
                    .table(Organizations::Table)
                    .col(Organizations::TenantId)
                    .col(Organizations::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_tenant_ein")
                    .table(Organizations::Table)
                    .col(Organizations::TenantId)
                    .col(Organizations::Ein)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
    TenantId,
    Name,
    Ein,
    Address,
    Website,
    #[iden = "is_501c3"]
    Is501c3,
    Notes,
    CreatedAt,
    UpdatedAt,
}
