pub mod reading;

pub use reading::{average_temperature, DashboardSummary, TemperatureAverage, WeatherReading};
