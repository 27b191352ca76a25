//! Viewport and pipeline defaults.

use crate::domain::Granularity;

/// Fixed linear remap applied to rate-like series.
/// Values in `[domain_min, domain_max]` land in `[range_min, range_max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateScale {
    pub domain_min: f64,
    pub domain_max: f64,
    pub range_min: f64,
    pub range_max: f64,
}

pub const RATE_SCALE: RateScale = RateScale {
    domain_min: -10.0,
    domain_max: 30.0,
    range_min: -10.0,
    range_max: 30.0,
};

/// Rows shown when a view first opens, per granularity.
pub struct WindowDefaults {
    pub daily: usize,
    pub weekly: usize,
    pub monthly: usize,
}

impl WindowDefaults {
    pub const fn for_granularity(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Daily => self.daily,
            Granularity::Weekly => self.weekly,
            Granularity::Monthly => self.monthly,
        }
    }
}

pub struct DashboardConfig {
    /// Smallest viewport the zoom controls will produce.
    pub min_window: usize,
    /// Rows added or removed per zoom notch.
    pub zoom_step: usize,
    pub default_granularity: Granularity,
    pub chart_windows: WindowDefaults,
    /// Points per correlation window.
    pub correlation_windows: WindowDefaults,
    /// Viewport over the correlation output.
    pub correlation_view: WindowDefaults,
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    min_window: 6,
    zoom_step: 6,
    default_granularity: Granularity::Monthly,
    chart_windows: WindowDefaults {
        daily: 90,
        weekly: 52,
        monthly: 36,
    },
    correlation_windows: WindowDefaults {
        daily: 20,
        weekly: 8,
        monthly: 6,
    },
    correlation_view: WindowDefaults {
        daily: 60,
        weekly: 36,
        monthly: 24,
    },
};
