//! Opening the scenario store from a connection string.
//!
//! | connection string          | database                                  |
//! |----------------------------|-------------------------------------------|
//! | `:memory:`                 | private in-memory database, one connection |
//! | `sqlite:roi.db?mode=rwc`   | passed to sqlx unchanged                  |
//! | anything else              | file path, created if missing             |

use roi_core::RepositoryError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::repository::SqliteRepository;

pub const MEMORY: &str = ":memory:";

/// Pool settings for `:memory:`.
///
/// Every connection to `sqlite::memory:` is its own database, so the pool
/// holds exactly one connection and never retires it.
fn memory_pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

async fn open_pool(connection_string: &str) -> Result<SqlitePool, sqlx::Error> {
    if connection_string == MEMORY {
        return memory_pool_options().connect("sqlite::memory:").await;
    }

    if connection_string.starts_with("sqlite:") {
        return SqlitePool::connect(connection_string).await;
    }

    let options = SqliteConnectOptions::new()
        .filename(connection_string)
        .create_if_missing(true);
    SqlitePool::connect_with(options).await
}

/// Open the database named by `connection_string` and bring its schema up
/// to date.
pub async fn open_repository(connection_string: &str) -> Result<SqliteRepository, RepositoryError> {
    let pool = open_pool(connection_string).await.map_err(|e| {
        RepositoryError::Connection(format!("Failed to open '{}': {}", connection_string, e))
    })?;

    let repo = SqliteRepository::new_with_pool(pool).await;
    repo.run_migrations()
        .await
        .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;

    info!(database = %connection_string, "sqlite repository ready");
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use roi_core::ScenarioRepository;

    use super::*;

    #[test]
    fn memory_pool_keeps_its_only_connection() {
        let options = memory_pool_options();

        assert_eq!(options.get_max_connections(), 1);
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), None);
    }

    #[tokio::test]
    async fn opens_in_memory_repository_with_schema() {
        let repo = open_repository(MEMORY)
            .await
            .expect("Should open in-memory repository");

        let scenarios = repo.list_scenarios().await.expect("Should list scenarios");
        assert!(scenarios.is_empty());
    }

    #[tokio::test]
    async fn creates_missing_database_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roi_simulator.db");

        let repo = open_repository(path.to_str().expect("utf-8 path"))
            .await
            .expect("Should create database file");

        assert!(path.exists());
        assert!(repo.list_scenarios().await.expect("Should list").is_empty());
    }

    #[tokio::test]
    async fn unreachable_path_is_connection_error() {
        let result = open_repository("/nonexistent-dir/roi/roi_simulator.db").await;

        assert!(matches!(
            result,
            Err(RepositoryError::Connection(msg)) if msg.contains("nonexistent-dir")
        ));
    }
}
