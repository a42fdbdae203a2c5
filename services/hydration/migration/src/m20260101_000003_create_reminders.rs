use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reminders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reminders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reminders::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Reminders::UserId).uuid().not_null())
                    .col(ColumnDef::new(Reminders::ReminderTime).time().not_null())
                    .col(ColumnDef::new(Reminders::Message).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Reminders::IsEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Reminders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Reminders::UpdatedAt)
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
                    .name("idx_reminders_tenant_user")
                    .table(Reminders::Table)
                    .col(Reminders::TenantId)
                    .col(Reminders::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reminders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reminders {
    Table,
    Id,
    TenantId,
    UserId,
    ReminderTime,
    Message,
    IsEnabled,
    CreatedAt,
    UpdatedAt,
}
