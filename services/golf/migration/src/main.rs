use sea_orm_migration::prelude::*;

use hearth_golf_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
