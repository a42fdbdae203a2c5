use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rounds::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rounds::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Rounds::UserId).uuid().not_null())
                    .col(ColumnDef::new(Rounds::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Rounds::PlayedDate).date().not_null())
                    .col(
                        ColumnDef::new(Rounds::TotalScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Rounds::TotalPar).integer().not_null())
                    .col(ColumnDef::new(Rounds::Weather).string_len(100))
                    .col(ColumnDef::new(Rounds::Notes).string_len(1000))
                    .col(
                        ColumnDef::new(Rounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Rounds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // a course in use cannot be deleted
                    .foreign_key(
                        ForeignKey::create()
                            .from(Rounds::Table, Rounds::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rounds_tenant_user_played")
                    .table(Rounds::Table)
                    .col(Rounds::TenantId)
                    .col(Rounds::UserId)
                    .col(Rounds::PlayedDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    TenantId,
    UserId,
    CourseId,
    PlayedDate,
    TotalScore,
    TotalPar,
    Weather,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
