pub mod collector;
pub mod dashboard;

pub use collector::{CollectOutcome, Collector};
pub use dashboard::DashboardService;
