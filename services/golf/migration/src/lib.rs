use sea_orm_migration::prelude::*;

use hearth_outbox::migration::m20260101_000000_create_outbox_events;

mod m20260101_000001_create_courses;
mod m20260101_000002_create_rounds;
mod m20260101_000003_create_hole_scores;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000000_create_outbox_events::Migration),
            Box::new(m20260101_000001_create_courses::Migration),
            Box::new(m20260101_000002_create_rounds::Migration),
            Box::new(m20260101_000003_create_hole_scores::Migration),
        ]
    }
}
