use axum::{extract::State, response::Html};
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::DashboardSummary;
use crate::services::DashboardService;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NOT_AVAILABLE: &str = "N/A";
const NO_DATA_ITEM: &str =
    "<li>No historical data available. Run the data collection script!</li>";

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; background-color: #f4f4f4; color: #333; }
        .container { max-width: 800px; margin: auto; background: #fff; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        h1 { color: #0056b3; text-align: center; margin-bottom: 30px; }
        h2 { color: #0056b3; border-bottom: 1px solid #eee; padding-bottom: 5px; margin-top: 25px; }
        .current-temp-section { text-align: center; margin-bottom: 25px; }
        .current-temp { font-size: 3em; color: #dc3545; font-weight: bold; }
        .timestamp { font-size: 0.9em; color: #6c757d; display: block; margin-top: 5px; }
        .analysis { font-size: 1.2em; color: #28a745; margin-top: 15px; text-align: center; border: 1px solid #e9ecef; padding: 10px; border-radius: 5px; background-color: #eafbea; }
        ul { list-style-type: none; padding: 0; }
        li { margin-bottom: 8px; padding: 10px; border: 1px solid #e9ecef; background-color: #f8f9fa; border-radius: 4px; display: flex; justify-content: space-between; align-items: center; }
        li span.temp { font-weight: bold; color: #007bff; }
        .health-link { margin-top: 25px; display: block; text-align: center; color: #007bff; text-decoration: none; }
        .health-link:hover { text-decoration: underline; }
"#;

pub async fn dashboard(State(service): State<DashboardService>) -> Result<Html<String>> {
    let summary = service.summary().await?;
    Ok(Html(render_dashboard(&summary)))
}

/// Whole degrees keep one decimal so 27 renders as "27.0".
pub fn format_celsius(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format(TIME_FORMAT).to_string()
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let (current_temp, current_time) = match &summary.current {
        Some(reading) => (
            format_celsius(reading.temperature_celsius),
            format_time(&reading.entry_time),
        ),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };

    let (average, sample_size) = match &summary.average {
        Some(avg) => (format_celsius(avg.celsius), avg.sample_size),
        None => (NOT_AVAILABLE.to_string(), 0),
    };

    let items: String = if summary.recent.is_empty() {
        NO_DATA_ITEM.to_string()
    } else {
        summary
            .recent
            .iter()
            .map(|reading| {
                format!(
                    r#"<li><span>{}</span><span class="temp">{}°C</span></li>"#,
                    format_time(&reading.entry_time),
                    format_celsius(reading.temperature_celsius)
                )
            })
            .collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Simple Weather Dashboard</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h1>Simple Weather Dashboard</h1>
        <div class="current-temp-section">
            <h2>Current Temperature:</h2>
            <p class="current-temp">{current_temp}°C</p>
            <p class="timestamp">As of: {current_time} (UTC)</p>
        </div>
        <div class="analysis">
            <h2>Analysis:</h2>
            <p>Average of last {sample_size} recorded temperatures: {average}°C</p>
        </div>
        <div>
            <h2>Recent Readings:</h2>
            <ul>
                {items}
            </ul>
        </div>
        <a href="/health" class="health-link">Check Application Health</a>
    </div>
</body>
</html>
"#,
        style = STYLE,
    )
}
