use crate::error::Result;
use crate::models::{average_temperature, DashboardSummary};
use crate::repositories::ReadingRepository;

/// Readings averaged on the dashboard.
pub const AVERAGE_WINDOW: i64 = 50;
/// Readings listed individually on the dashboard.
pub const RECENT_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct DashboardService {
    repository: ReadingRepository,
}

impl DashboardService {
    pub fn new(repository: ReadingRepository) -> Self {
        Self { repository }
    }

    pub async fn summary(&self) -> Result<DashboardSummary> {
        let current = self.repository.latest().await?;
        let window = self.repository.recent(AVERAGE_WINDOW).await?;
        let recent = self.repository.recent(RECENT_LIMIT).await?;

        Ok(DashboardSummary {
            current,
            average: average_temperature(&window),
            recent,
        })
    }

    pub async fn health(&self) -> Result<()> {
        self.repository.ping().await
    }
}
