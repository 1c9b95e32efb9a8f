//! Schema migrations for the live weather and archive tables.
//!
//! Usage: `DATABASE_URL=... cargo run -p migration -- up`

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(migration::Migrator).await;
}
