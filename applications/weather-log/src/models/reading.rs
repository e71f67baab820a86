use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `weather_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WeatherReading {
    pub id: i64,
    pub entry_time: DateTime<Utc>,
    pub temperature_celsius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureAverage {
    pub celsius: f64,
    pub sample_size: usize,
}

/// Everything the dashboard page shows, read at request time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub current: Option<WeatherReading>,
    pub average: Option<TemperatureAverage>,
    pub recent: Vec<WeatherReading>,
}

/// Arithmetic mean of the readings, rounded to two decimals with ties to even.
pub fn average_temperature(readings: &[WeatherReading]) -> Option<TemperatureAverage> {
    if readings.is_empty() {
        return None;
    }

    let sum: f64 = readings.iter().map(|r| r.temperature_celsius).sum();
    let mean = sum / readings.len() as f64;

    Some(TemperatureAverage {
        celsius: round_to_hundredths(mean),
        sample_size: readings.len(),
    })
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(id: i64, temperature_celsius: f64) -> WeatherReading {
        WeatherReading {
            id,
            entry_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                + chrono::Duration::minutes(id),
            temperature_celsius,
        }
    }

    #[test]
    fn test_average_of_empty_is_none() {
        assert_eq!(average_temperature(&[]), None);
    }

    #[test]
    fn test_average_of_single_reading() {
        let avg = average_temperature(&[reading(1, 27.4)]).unwrap();
        assert_eq!(avg.celsius, 27.4);
        assert_eq!(avg.sample_size, 1);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let readings = vec![reading(1, 30.0), reading(2, 31.0), reading(3, 31.0)];
        let avg = average_temperature(&readings).unwrap();

        // 92 / 3 = 30.666...
        assert_eq!(avg.celsius, 30.67);
        assert_eq!(avg.sample_size, 3);
    }

    #[test]
    fn test_average_handles_negative_values() {
        let readings = vec![reading(1, -2.5), reading(2, -3.5)];
        let avg = average_temperature(&readings).unwrap();

        assert_eq!(avg.celsius, -3.0);
    }

    #[test]
    fn test_average_exact_tie_rounds_to_even() {
        // (7 * 27.0 + 28.0) / 8 = 27.125 exactly.
        let mut readings: Vec<WeatherReading> = (1..=7).map(|id| reading(id, 27.0)).collect();
        readings.push(reading(8, 28.0));

        let avg = average_temperature(&readings).unwrap();
        assert_eq!(avg.celsius, 27.12);
        assert_eq!(avg.sample_size, 8);
    }

    #[test]
    fn test_average_exact_tie_rounds_up_to_even() {
        // (27.25 + 27.5) / 2 = 27.375 exactly.
        let readings = vec![reading(1, 27.25), reading(2, 27.5)];
        let avg = average_temperature(&readings).unwrap();

        assert_eq!(avg.celsius, 27.38);
    }

    #[test]
    fn test_average_negative_tie_rounds_to_even() {
        // (-2.5 + -3.25) / 2 = -2.875 exactly.
        let readings = vec![reading(1, -2.5), reading(2, -3.25)];
        let avg = average_temperature(&readings).unwrap();

        assert_eq!(avg.celsius, -2.88);
    }
}
