use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Intakes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Intakes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Intakes::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Intakes::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Intakes::BeverageType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Intakes::AmountMl)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Intakes::IntakeTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Intakes::Notes).string_len(500))
                    .col(
                        ColumnDef::new(Intakes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Intakes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Daily summaries and range listings.
        manager
            .create_index(
                Index::create()
                    .name("idx_intakes_tenant_user_intake_time")
                    .table(Intakes::Table)
                    .col(Intakes::TenantId)
                    .col(Intakes::UserId)
                    .col(Intakes::IntakeTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Intakes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Intakes {
    Table,
    Id,
    TenantId,
    UserId,
    BeverageType,
    AmountMl,
    IntakeTime,
    Notes,
    CreatedAt,
    UpdatedAt,
}
