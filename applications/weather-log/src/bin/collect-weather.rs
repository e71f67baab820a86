//! Fetch the current temperature once and store it. Meant to be run by an
//! external scheduler such as cron.

use tracing::info;
use weather_log::{
    repositories::ReadingRepository,
    services::{CollectOutcome, Collector},
    telemetry,
    weather::OpenMeteoClient,
    Config, Database,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env()?;

    let db = Database::connect(&config.database).await?;
    db.ensure_schema().await?;

    let client = OpenMeteoClient::new(&config.collector)?;
    let collector = Collector::new(client, ReadingRepository::new(db.clone()));

    match collector.run_once().await {
        CollectOutcome::Stored(_) => info!("collection run finished"),
        CollectOutcome::FetchFailed | CollectOutcome::StoreFailed => {
            info!("collection run finished without storing a reading")
        }
    }

    db.close().await;
    Ok(())
}
