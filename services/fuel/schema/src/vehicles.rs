use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub tank_capacity: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub epa_city_mpg: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub epa_highway_mpg: Option<Decimal>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fill_ups::Entity")]
    FillUp,
    #[sea_orm(has_many = "super::efficiency_reports::Entity")]
    EfficiencyReport,
}

impl Related<super::fill_ups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FillUp.def()
    }
}

impl Related<super::efficiency_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EfficiencyReport.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
