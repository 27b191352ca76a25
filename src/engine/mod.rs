mod dashboard;
mod error;

pub use dashboard::DashboardEngine;
pub use error::EngineError;
