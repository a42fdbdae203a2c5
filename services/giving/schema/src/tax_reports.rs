use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tax_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub tax_year: i32,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_cash_donations: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_non_cash_donations: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_deductible_amount: Decimal,
    pub generated_date: chrono::DateTime<chrono::Utc>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
