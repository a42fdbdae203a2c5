use sea_orm_migration::prelude::*;

use hearth_outbox::migration::m20260101_000000_create_outbox_events;

mod m20260101_000001_create_vehicles;
mod m20260101_000002_create_fill_ups;
mod m20260101_000003_create_efficiency_reports;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000000_create_outbox_events::Migration),
            Box::new(m20260101_000001_create_vehicles::Migration),
            Box::new(m20260101_000002_create_fill_ups::Migration),
            Box::new(m20260101_000003_create_efficiency_reports::Migration),
        ]
    }
}
