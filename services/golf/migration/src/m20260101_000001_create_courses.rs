use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Courses::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Courses::Location).string_len(300))
                    .col(ColumnDef::new(Courses::NumberOfHoles).integer().not_null())
                    .col(ColumnDef::new(Courses::TotalPar).integer().not_null())
                    .col(ColumnDef::new(Courses::CourseRating).decimal_len(4, 1))
                    .col(ColumnDef::new(Courses::SlopeRating).integer())
                    .col(ColumnDef::new(Courses::Notes).string_len(1000))
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Courses::UpdatedAt)
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
                    .name("uq_courses_tenant_name")
                    .table(Courses::Table)
                    .col(Courses::TenantId)
                    .col(Courses::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    TenantId,
    Name,
    Location,
    NumberOfHoles,
    TotalPar,
    CourseRating,
    SlopeRating,
    Notes,
    CreatedAt,
    UpdatedAt,
}
