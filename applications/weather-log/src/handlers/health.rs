use axum::extract::State;

use crate::error::Result;
use crate::services::DashboardService;

/// Liveness probe: 200 "OK" when the store answers `SELECT 1`.
pub async fn health(State(service): State<DashboardService>) -> Result<&'static str> {
    service.health().await?;
    Ok("OK")
}
