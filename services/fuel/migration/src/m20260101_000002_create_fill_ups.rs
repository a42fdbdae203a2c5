use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FillUps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FillUps::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FillUps::TenantId).uuid().not_null())
                    .col(ColumnDef::new(FillUps::UserId).uuid().not_null())
                    .col(ColumnDef::new(FillUps::VehicleId).uuid().not_null())
                    .col(
                        ColumnDef::new(FillUps::FillUpDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FillUps::Odometer).decimal_len(10, 1).not_null())
                    .col(ColumnDef::new(FillUps::Gallons).decimal_len(10, 3).not_null())
                    .col(
                        ColumnDef::new(FillUps::PricePerGallon)
                            .decimal_len(10, 3)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FillUps::TotalCost).decimal_len(18, 2).not_null())
                    .col(
                        ColumnDef::new(FillUps::IsFullTank)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(FillUps::FuelGrade).string_len(50))
                    .col(ColumnDef::new(FillUps::GasStation).string_len(200))
                    .col(ColumnDef::new(FillUps::MilesPerGallon).decimal_len(10, 2))
                    .col(ColumnDef::new(FillUps::Notes).string_len(1000))
                    .col(
                        ColumnDef::new(FillUps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FillUps::Table, FillUps::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fill_ups_tenant_vehicle_odometer")
                    .table(FillUps::Table)
                    .col(FillUps::TenantId)
                    .col(FillUps::VehicleId)
                    .col(FillUps::Odometer)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FillUps::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FillUps {
    Table,
    Id,
    TenantId,
    UserId,
    VehicleId,
    FillUpDate,
    Odometer,
    Gallons,
    PricePerGallon,
    TotalCost,
    IsFullTank,
    FuelGrade,
    GasStation,
    MilesPerGallon,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
}
