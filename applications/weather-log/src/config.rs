use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://Weather.sqlite3";
pub const DEFAULT_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where and how the collector polls the weather API.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    pub api_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timeout_secs: u64,
}

impl CollectorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Environment variable -> config key.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("DATABASE_MAX_CONNECTIONS", "database.max_connections"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("WEATHER_API_URL", "collector.api_url"),
    ("WEATHER_LATITUDE", "collector.latitude"),
    ("WEATHER_LONGITUDE", "collector.longitude"),
    ("WEATHER_TIMEOUT_SECS", "collector.timeout_secs"),
];

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_vars(env::vars())
    }

    /// Build the configuration from defaults overlaid with the given
    /// `(name, value)` pairs. Unknown names are ignored.
    pub fn from_vars<I>(vars: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();

        let mut builder = config::Config::builder()
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .set_default("database.max_connections", 5_i64)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("collector.api_url", DEFAULT_API_URL)?
            .set_default("collector.latitude", 13.0827_f64)?
            .set_default("collector.longitude", 80.2707_f64)?
            .set_default("collector.timeout_secs", 10_i64)?;

        for (var, key) in ENV_OVERRIDES {
            let value = vars
                .get(*var)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            builder = builder.set_override_option(*key, value)?;
        }

        let cfg: Config = builder.build()?.try_deserialize()?;

        if cfg.database.max_connections == 0 {
            return Err(config::ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(cfg)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
