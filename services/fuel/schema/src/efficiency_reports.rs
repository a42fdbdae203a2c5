use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "efficiency_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[sea_orm(column_type = "Decimal(Some((10, 1)))")]
    pub total_miles: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub total_gallons: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub average_mpg: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_fuel_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 4)))")]
    pub cost_per_mile: Decimal,
    pub number_of_fill_ups: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub best_mpg: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub worst_mpg: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id"
    )]
    Vehicle,
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
