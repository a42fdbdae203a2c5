use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TaxReports::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TaxReports::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TaxReports::TenantId).uuid().not_null())
                    .col(ColumnDef::new(TaxReports::TaxYear).integer().not_null())
                    .col(
                        ColumnDef::new(TaxReports::TotalCashDonations)
                            .decimal_len(18, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaxReports::TotalNonCashDonations)
                            .decimal_len(18, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaxReports::TotalDeductibleAmount)
                            .decimal_len(18, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TaxReports::GeneratedDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(TaxReports::Notes).string_len(2000))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_tax_reports_tenant_year")
                    .table(TaxReports::Table)
                    .col(TaxReports::TenantId)
                    .col(TaxReports::TaxYear)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaxReports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TaxReports {
    Table,
    Id,
    TenantId,
    TaxYear,
    TotalCashDonations,
    TotalNonCashDonations,
    TotalDeductibleAmount,
    GeneratedDate,
    Notes,
}
