use crate::models::WeatherReading;
use crate::repositories::ReadingRepository;
use crate::weather::OpenMeteoClient;
use tracing::{error, info, warn};

/// What a single collection run did.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectOutcome {
    Stored(WeatherReading),
    FetchFailed,
    StoreFailed,
}

pub struct Collector {
    client: OpenMeteoClient,
    repository: ReadingRepository,
}

impl Collector {
    pub fn new(client: OpenMeteoClient, repository: ReadingRepository) -> Self {
        Self { client, repository }
    }

    /// Fetch the current temperature once and store it.
    ///
    /// Failures are logged and reported through the outcome; nothing is
    /// retried and at most one row is written.
    pub async fn run_once(&self) -> CollectOutcome {
        let temperature = match self.client.current_temperature().await {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "failed to fetch temperature, not saving to database");
                return CollectOutcome::FetchFailed;
            }
        };

        match self.repository.insert(temperature).await {
            Ok(reading) => {
                info!(
                    id = reading.id,
                    temperature_celsius = reading.temperature_celsius,
                    entry_time = %reading.entry_time.format("%Y-%m-%d %H:%M:%S"),
                    "stored weather reading"
                );
                CollectOutcome::Stored(reading)
            }
            Err(e) => {
                error!(error = %e, temperature, "failed to save reading, transaction rolled back");
                CollectOutcome::StoreFailed
            }
        }
    }
}
