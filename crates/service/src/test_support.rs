#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use configs::DatabaseConfig;
use models::db::{connect_with_config, DATABASE_URL};
use models::product::create_table_if_missing;

// Ensure the table is created only once across the entire test process
static SCHEMA_READY: OnceCell<()> = OnceCell::const_new();

/// Connection to the test database, or `None` when no database was provided.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }

    let cfg = DatabaseConfig {
        url: DATABASE_URL.clone(),
        min_connections: 1,
        max_connections: 20,
        acquire_timeout_secs: 10,
        ..DatabaseConfig::default()
    };

    SCHEMA_READY
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            create_table_if_missing(&db).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}
