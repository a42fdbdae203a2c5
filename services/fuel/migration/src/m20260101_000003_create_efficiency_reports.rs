use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EfficiencyReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EfficiencyReports::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EfficiencyReports::TenantId).uuid().not_null())
                    .col(ColumnDef::new(EfficiencyReports::UserId).uuid().not_null())
                    .col(ColumnDef::new(EfficiencyReports::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(EfficiencyReports::StartDate).date().not_null())
                    .col(ColumnDef::new(EfficiencyReports::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(EfficiencyReports::TotalMiles)
                            .decimal_len(10, 1)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EfficiencyReports::TotalGallons)
                            .decimal_len(10, 3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EfficiencyReports::AverageMpg)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EfficiencyReports::TotalFuelCost)
                            .decimal_len(18, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EfficiencyReports::CostPerMile)
                            .decimal_len(10, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EfficiencyReports::NumberOfFillUps)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EfficiencyReports::BestMpg).decimal_len(10, 2))
                    .col(ColumnDef::new(EfficiencyReports::WorstMpg).decimal_len(10, 2))
                    .col(ColumnDef::new(EfficiencyReports::Notes).string_len(1000))
                    .col(
                        ColumnDef::new(EfficiencyReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EfficiencyReports::Table, EfficiencyReports::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_efficiency_reports_tenant_vehicle")
                    .table(EfficiencyReports::Table)
                    .col(EfficiencyReports::TenantId)
                    .col(EfficiencyReports::VehicleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EfficiencyReports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EfficiencyReports {
    Table,
    Id,
    TenantId,
    UserId,
    VehicleId,
    StartDate,
    EndDate,
    TotalMiles,
    TotalGallons,
    AverageMpg,
    TotalFuelCost,
    CostPerMile,
    NumberOfFillUps,
    BestMpg,
    WorstMpg,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
}
