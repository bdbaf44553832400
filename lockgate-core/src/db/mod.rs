use std::time::Duration;

use anyhow::Result;
use lockgate_common::helpers::fs::{ensure_parent_directory, secure_file};
use lockgate_common::LockgateConfig;
use lockgate_db_migrations::migrate_database;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, TransactionTrait};
use tracing::*;

/// Connects to the configured database and brings its schema up to date.
///
/// SQLite paths are resolved relative to the config file, and the database
/// file is created with owner-only permissions.
pub async fn connect_to_db(config: &LockgateConfig) -> Result<DatabaseConnection> {
    let mut url = url::Url::parse(&config.store.database_url.expose_secret()[..])?;
    if url.scheme() == "sqlite" && url.path() != ":memory:" {
        let path = url.path();
        let mut abs_path = config.paths_relative_to.clone();
        abs_path.push(path);
        abs_path.push("db.sqlite3");

        ensure_parent_directory(&abs_path)?;

        url.set_path(
            abs_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Failed to convert database path to string"))?,
        );

        url.set_query(Some("mode=rwc"));

        let db = Database::connect(ConnectOptions::new(url.to_string())).await?;
        db.begin().await?.commit().await?;
        drop(db);

        secure_file(&abs_path)?;
        debug!(path = ?abs_path, "Using SQLite database");
    }

    let mut opt = ConnectOptions::new(url.to_string());
    opt.max_connections(16)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(false);

    let connection = Database::connect(opt).await?;

    migrate_database(&connection).await?;
    Ok(connection)
}
