use sea_orm_migration::prelude::*;

use hearth_outbox::migration::m20260101_000000_create_outbox_events;

mod m20260101_000001_create_intakes;
mod m20260101_000002_create_goals;
mod m20260101_000003_create_reminders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000000_create_outbox_events::Migration),
            Box::new(m20260101_000001_create_intakes::Migration),
            Box::new(m20260101_000002_create_goals::Migration),
            Box::new(m20260101_000003_create_reminders::Migration),
        ]
    }
}
