use sea_orm_migration::prelude::*;

use emporium_store_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
