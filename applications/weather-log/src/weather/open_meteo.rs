use crate::config::CollectorConfig;
use crate::error::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
}

/// Fetches the current temperature for one fixed coordinate.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    api_url: String,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoClient {
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
        })
    }

    pub async fn current_temperature(&self) -> Result<f64> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus(status));
        }

        let body = response.bytes().await?;
        let forecast: ForecastResponse = serde_json::from_slice(&body)?;

        Ok(forecast.current_weather.temperature)
    }
}
