use crate::config::DatabaseConfig;
use crate::error::{AppError, Result};
use sqlx::{
    postgres::PgPoolOptions,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    PgPool, SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

const POSTGRES_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS weather_data (
        id BIGSERIAL PRIMARY KEY,
        entry_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        temperature_celsius DOUBLE PRECISION NOT NULL
    )
"#;

const SQLITE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS weather_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        entry_time DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%f+00:00', 'now')),
        temperature_celsius REAL NOT NULL
    )
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            Err(AppError::Config(format!(
                "unsupported database url scheme: {}",
                url.split(':').next().unwrap_or_default()
            )))
        }
    }
}

/// Handle to the reading store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        match Backend::from_url(&config.url)? {
            Backend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(&config.url)
                    .await?;
                Ok(Database::Postgres(pool))
            }
            Backend::Sqlite => {
                let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

                // Every connection to sqlite::memory: opens its own empty database,
                // so in-memory stores are pinned to a single connection that never expires.
                let pool = if config.url.contains(":memory:") {
                    SqlitePoolOptions::new()
                        .max_connections(1)
                        .min_connections(1)
                        .idle_timeout(None::<Duration>)
                        .max_lifetime(None::<Duration>)
                        .connect_with(options)
                        .await?
                } else {
                    SqlitePoolOptions::new()
                        .max_connections(config.max_connections)
                        .connect_with(options)
                        .await?
                };
                Ok(Database::Sqlite(pool))
            }
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            Database::Postgres(_) => Backend::Postgres,
            Database::Sqlite(_) => Backend::Sqlite,
        }
    }

    /// Create `weather_data` if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        match self {
            Database::Postgres(pool) => {
                sqlx::query(POSTGRES_SCHEMA).execute(pool).await?;
            }
            Database::Sqlite(pool) => {
                sqlx::query(SQLITE_SCHEMA).execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Round trip `SELECT 1` against the backend.
    pub async fn ping(&self) -> Result<()> {
        let value: i32 = match self {
            Database::Postgres(pool) => sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?,
            Database::Sqlite(pool) => sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?,
        };

        if value != 1 {
            return Err(AppError::Health(format!("SELECT 1 returned {}", value)));
        }
        Ok(())
    }

    pub async fn close(&self) {
        match self {
            Database::Postgres(pool) => pool.close().await,
            Database::Sqlite(pool) => pool.close().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        assert_eq!(
            Backend::from_url("postgres://u:p@localhost/db").unwrap(),
            Backend::Postgres
        );
        assert_eq!(
            Backend::from_url("postgresql://u:p@localhost/db").unwrap(),
            Backend::Postgres
        );
        assert_eq!(
            Backend::from_url("sqlite://Weather.sqlite3").unwrap(),
            Backend::Sqlite
        );
        assert_eq!(Backend::from_url("sqlite::memory:").unwrap(), Backend::Sqlite);
        assert!(Backend::from_url("mysql://localhost/db").is_err());
    }

    #[tokio::test]
    async fn test_memory_database_survives_between_queries() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
        };
        let db = Database::connect(&config).await.unwrap();
        assert_eq!(db.backend(), Backend::Sqlite);

        db.ensure_schema().await.unwrap();
        // Second call is a no-op against the same in-memory database.
        db.ensure_schema().await.unwrap();
        db.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_fails_on_closed_pool() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let db = Database::connect(&config).await.unwrap();
        db.close().await;

        assert!(db.ping().await.is_err());
    }
}
