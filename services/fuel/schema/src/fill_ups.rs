use sea_orm::entity::prelude::*;

/// One refuelling. `miles_per_gallon` is filled in when a lower odometer reading exists.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fill_ups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub fill_up_date: chrono::DateTime<chrono::Utc>,
    #[sea_orm(column_type = "Decimal(Some((10, 1)))")]
    pub odometer: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub gallons: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 3)))")]
    pub price_per_gallon: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_cost: Decimal,
    pub is_full_tank: bool,
    pub fuel_grade: Option<String>,
    pub gas_station: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub miles_per_gallon: Option<Decimal>,
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
