//! Database pool setup. The Any driver picks PostgreSQL or SQLite from the URL scheme.

use crate::config::PoolSettings;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

/// Open a bounded pool. Connections are recycled after `max_lifetime`; `acquire_timeout` bounds
/// how long a request waits for a free connection.
pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<AnyPool, sqlx::Error> {
    sqlx::any::install_default_drivers();
    let pool = AnyPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .idle_timeout(settings.idle_timeout)
        .max_lifetime(settings.max_lifetime)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await?;
    tracing::info!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        "database pool ready"
    );
    Ok(pool)
}
