use crate::db::Database;
use crate::error::Result;
use crate::models::WeatherReading;

// entry_time is stamped by the column default.
const INSERT_POSTGRES: &str = r#"
    INSERT INTO weather_data (temperature_celsius)
    VALUES ($1)
    RETURNING id, entry_time, temperature_celsius
"#;

const INSERT_SQLITE: &str = r#"
    INSERT INTO weather_data (temperature_celsius)
    VALUES (?)
    RETURNING id, entry_time, temperature_celsius
"#;

const RECENT_POSTGRES: &str = r#"
    SELECT id, entry_time, temperature_celsius
    FROM weather_data
    ORDER BY entry_time DESC, id DESC
    LIMIT $1
"#;

// Older rows may hold "YYYY-MM-DD HH:MM:SS" text; compare instants, not strings.
const RECENT_SQLITE: &str = r#"
    SELECT id, entry_time, temperature_celsius
    FROM weather_data
    ORDER BY julianday(entry_time) DESC, id DESC
    LIMIT ?
"#;

const COUNT: &str = "SELECT COUNT(*) FROM weather_data";

#[derive(Debug, Clone)]
pub struct ReadingRepository {
    db: Database,
}

impl ReadingRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Store one reading stamped with the current UTC time.
    ///
    /// Runs in its own transaction; if the insert or commit fails the
    /// transaction is rolled back when it is dropped and nothing is stored.
    pub async fn insert(&self, temperature_celsius: f64) -> Result<WeatherReading> {
        let reading = match &self.db {
            Database::Postgres(pool) => {
                let mut tx = pool.begin().await?;
                let reading = sqlx::query_as::<_, WeatherReading>(INSERT_POSTGRES)
                    .bind(temperature_celsius)
                    .fetch_one(&mut *tx)
                    .await?;
                tx.commit().await?;
                reading
            }
            Database::Sqlite(pool) => {
                let mut tx = pool.begin().await?;
                let reading = sqlx::query_as::<_, WeatherReading>(INSERT_SQLITE)
                    .bind(temperature_celsius)
                    .fetch_one(&mut *tx)
                    .await?;
                tx.commit().await?;
                reading
            }
        };

        tracing::debug!(id = reading.id, temperature_celsius, "inserted weather reading");
        Ok(reading)
    }

    pub async fn latest(&self) -> Result<Option<WeatherReading>> {
        Ok(self.recent(1).await?.into_iter().next())
    }

    /// The `limit` newest readings, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<WeatherReading>> {
        let readings = match &self.db {
            Database::Postgres(pool) => {
                sqlx::query_as::<_, WeatherReading>(RECENT_POSTGRES)
                    .bind(limit)
                    .fetch_all(pool)
                    .await?
            }
            Database::Sqlite(pool) => {
                sqlx::query_as::<_, WeatherReading>(RECENT_SQLITE)
                    .bind(limit)
                    .fetch_all(pool)
                    .await?
            }
        };
        Ok(readings)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = match &self.db {
            Database::Postgres(pool) => {
                sqlx::query_scalar::<_, i64>(COUNT).fetch_one(pool).await?
            }
            Database::Sqlite(pool) => {
                sqlx::query_scalar::<_, i64>(COUNT).fetch_one(pool).await?
            }
        };
        Ok(count)
    }

    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use chrono::Utc;

    async fn memory_repository() -> ReadingRepository {
        let db = Database::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        db.ensure_schema().await.unwrap();
        ReadingRepository::new(db)
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let repository = memory_repository().await;

        let before = Utc::now() - chrono::Duration::seconds(1);
        let reading = repository.insert(27.4).await.unwrap();
        let after = Utc::now() + chrono::Duration::seconds(1);

        assert_eq!(reading.temperature_celsius, 27.4);
        assert!(reading.entry_time >= before && reading.entry_time <= after);
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ids_increase() {
        let repository = memory_repository().await;

        let first = repository.insert(20.0).await.unwrap();
        let second = repository.insert(21.0).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_insert_matches_column_default_format() {
        let repository = memory_repository().await;
        repository.insert(12.0).await.unwrap();

        let Database::Sqlite(pool) = repository.db.clone() else {
            panic!("expected SQLite");
        };
        let raw: String = sqlx::query_scalar("SELECT CAST(entry_time AS TEXT) FROM weather_data")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(raw.len(), "2024-05-01T12:00:00.000+00:00".len(), "raw: {}", raw);
        assert_eq!(&raw[10..11], "T");
        assert!(raw.ends_with("+00:00"));
    }

    #[tokio::test]
    async fn test_latest_on_empty_table() {
        let repository = memory_repository().await;

        assert_eq!(repository.latest().await.unwrap(), None);
        assert!(repository.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_without_table_fails() {
        let db = Database::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        let repository = ReadingRepository::new(db);

        assert!(repository.insert(10.0).await.is_err());
    }
}
