//! Migrate command - applies the schema and exits

use tracing::info;

use crate::infrastructure::storage;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let pool = storage::connect(&config.database).await?;
    storage::run_migrations(&pool).await?;
    pool.close().await;

    info!("Migrations complete");

    Ok(())
}
