pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod weather;

pub use config::Config;
pub use db::Database;
pub use error::{AppError, Result};
