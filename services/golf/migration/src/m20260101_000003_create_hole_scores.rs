use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HoleScores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HoleScores::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(HoleScores::TenantId).uuid().not_null())
                    .col(ColumnDef::new(HoleScores::RoundId).uuid().not_null())
                    .col(ColumnDef::new(HoleScores::HoleNumber).integer().not_null())
                    .col(ColumnDef::new(HoleScores::Par).integer().not_null())
                    .col(ColumnDef::new(HoleScores::Score).integer().not_null())
                    .col(ColumnDef::new(HoleScores::Putts).integer())
                    .col(
                        ColumnDef::new(HoleScores::FairwayHit)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(HoleScores::GreenInRegulation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(HoleScores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(HoleScores::Table, HoleScores::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_hole_scores_round_hole")
                    .table(HoleScores::Table)
                    .col(HoleScores::RoundId)
                    .col(HoleScores::HoleNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HoleScores::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HoleScores {
    Table,
    Id,
    TenantId,
    RoundId,
    HoleNumber,
    Par,
    Score,
    Putts,
    FairwayHit,
    GreenInRegulation,
    CreatedAt,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
}
