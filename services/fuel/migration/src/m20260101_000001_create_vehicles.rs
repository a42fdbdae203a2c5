use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vehicles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Vehicles::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Vehicles::UserId).uuid().not_null())
                    .col(ColumnDef::new(Vehicles::Make).string_len(100).not_null())
                    .col(ColumnDef::new(Vehicles::Model).string_len(100).not_null())
                    .col(ColumnDef::new(Vehicles::Year).integer().not_null())
                    .col(ColumnDef::new(Vehicles::Vin).string_len(17))
                    .col(ColumnDef::new(Vehicles::LicensePlate).string_len(20))
                    .col(ColumnDef::new(Vehicles::TankCapacity).decimal_len(10, 2))
                    .col(ColumnDef::new(Vehicles::EpaCityMpg).decimal_len(10, 2))
                    .col(ColumnDef::new(Vehicles::EpaHighwayMpg).decimal_len(10, 2))
                    .col(
                        ColumnDef::new(Vehicles::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
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
                    .name("idx_vehicles_tenant_user")
                    .table(Vehicles::Table)
                    .col(Vehicles::TenantId)
                    .col(Vehicles::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
    TenantId,
    UserId,
    Make,
    Model,
    Year,
    Vin,
    LicensePlate,
    TankCapacity,
    EpaCityMpg,
    EpaHighwayMpg,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
