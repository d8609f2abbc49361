use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Opens the Postgres pool the repositories run on.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}
