#[cfg(test)]
use sqlx::SqlitePool;

#[cfg(test)]
use crate::core::config::DatabaseConfig;
#[cfg(test)]
use crate::core::database;

/// In-memory database with the uploads schema applied.
///
/// A single connection is required: every pooled connection to
/// `sqlite::memory:` would otherwise open its own empty database.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        acquire_timeout_secs: 5,
        busy_timeout_ms: 5000,
    };

    let pool = database::create_pool(&config)
        .await
        .expect("in-memory pool should connect");
    database::init_schema(&pool)
        .await
        .expect("schema init should succeed");
    pool
}
