//! Configuration module for the asset-cycle dashboard.

// Can all be private now because we have a public re-export.
mod assets;
mod dashboard;
mod debug;
mod quotes;

// Re-export commonly used items
pub use assets::{ASSETS, AssetClass, AssetSpec, find_asset, rate_like_names};
pub use dashboard::{DASHBOARD, DashboardConfig, RATE_SCALE, RateScale, WindowDefaults};
pub use debug::{DF, LogFlags};
pub use quotes::{QUOTES, QuoteConfig};
