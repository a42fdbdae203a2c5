use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Goals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Goals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Goals::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Goals::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Goals::DailyGoalMl)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Goals::StartDate).date().not_null())
                    .col(ColumnDef::new(Goals::EndDate).date())
                    .col(
                        ColumnDef::new(Goals::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Goals::Notes).string_len(500))
                    .col(
                        ColumnDef::new(Goals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Goals::UpdatedAt)
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
                    .name("idx_goals_tenant_user_start_date")
                    .table(Goals::Table)
                    .col(Goals::TenantId)
                    .col(Goals::UserId)
                    .col(Goals::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Goals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Goals {
    Table,
    Id,
    TenantId,
    UserId,
    DailyGoalMl,
    StartDate,
    EndDate,
    IsActive,
    Notes,
    CreatedAt,
    UpdatedAt,
}
