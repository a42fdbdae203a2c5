use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Donations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Donations::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Donations::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Donations::Amount).decimal_len(18, 2).not_null())
                    .col(ColumnDef::new(Donations::DonationDate).date().not_null())
                    .col(ColumnDef::new(Donations::DonationType).string_len(20).not_null())
                    .col(ColumnDef::new(Donations::ReceiptNumber).string_len(100))
                    .col(
                        ColumnDef::new(Donations::IsTaxDeductible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Donations::Notes).string_len(2000))
                    .col(
                        ColumnDef::new(Donations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Donations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Donations::Table, Donations::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donations_tenant_date")
                    .table(Donations::Table)
                    .col(Donations::TenantId)
                    .col(Donations::DonationDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donations_organization")
                    .table(Donations::Table)
                    .col(Donations::OrganizationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Donations {
    Table,
    Id,
    TenantId,
    OrganizationId,
    Amount,
    DonationDate,
    DonationType,
    ReceiptNumber,
    IsTaxDeductible,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
}
