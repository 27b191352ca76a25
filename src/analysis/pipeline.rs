//! Composes the core stages into the two views the dashboard shows.

use {
    crate::{
        analysis::{align, correlate, downsample, normalize, NormalizeConfig},
        config::DASHBOARD,
        domain::{
            AlignedRow, CorrelationPoint, Granularity, NormalizedRow, Series, TimePoint, Window,
            WindowError,
        },
    },
    serde::Serialize,
    std::{collections::BTreeMap, error::Error, fmt},
};

use crate::config::DF;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Correlating an asset with itself is refused before any work is done.
    SameAsset(String),
    ZeroWindow,
    Window(WindowError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PipelineError::SameAsset(name) => {
                write!(f, "assets A and B must differ (both are {})", name)
            }
            PipelineError::ZeroWindow => write!(f, "correlation window must hold at least one point"),
            PipelineError::Window(e) => write!(f, "invalid view window: {}", e),
        }
    }
}

impl Error for PipelineError {}

impl From<WindowError> for PipelineError {
    fn from(e: WindowError) -> Self {
        PipelineError::Window(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub assets: Vec<String>,
    pub granularity: Granularity,
    /// Explicit `[start, end)` over the downsampled rows. `None` shows the latest rows.
    pub range: Option<(usize, usize)>,
}

impl ChartRequest {
    pub fn new(assets: Vec<String>, granularity: Granularity) -> Self {
        Self {
            assets,
            granularity,
            range: None,
        }
    }

    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.range = Some((start, end));
        self
    }
}

/// Only built through [`CorrelationRequest::new`], so A and B always differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationRequest {
    asset_a: String,
    asset_b: String,
    granularity: Granularity,
    window_size: usize,
}

impl CorrelationRequest {
    /// Refuses `asset_a == asset_b`; the estimator would only ever report 1.0.
    pub fn new(
        asset_a: &str,
        asset_b: &str,
        granularity: Granularity,
        window_size: usize,
    ) -> Result<Self, PipelineError> {
        let (a, b) = (asset_a.trim(), asset_b.trim());
        if a.eq_ignore_ascii_case(b) {
            return Err(PipelineError::SameAsset(a.to_string()));
        }
        if window_size == 0 {
            return Err(PipelineError::ZeroWindow);
        }
        Ok(Self {
            asset_a: a.to_string(),
            asset_b: b.to_string(),
            granularity,
            window_size,
        })
    }

    /// Uses the configured window size for `granularity`.
    pub fn with_default_window(
        asset_a: &str,
        asset_b: &str,
        granularity: Granularity,
    ) -> Result<Self, PipelineError> {
        let size = DASHBOARD.correlation_windows.for_granularity(granularity);
        Self::new(asset_a, asset_b, granularity, size)
    }

    pub fn asset_a(&self) -> &str {
        &self.asset_a
    }

    pub fn asset_b(&self) -> &str {
        &self.asset_b
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChartView {
    pub rows: Vec<NormalizedRow>,
    /// `None` when there was no data at all.
    pub window: Option<Window>,
    /// Downsampled row count before windowing.
    pub total_rows: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CorrelationView {
    pub points: Vec<CorrelationPoint>,
    /// Default viewport over `points`.
    pub window: Option<Window>,
}

impl CorrelationView {
    pub fn visible(&self) -> &[CorrelationPoint] {
        self.window.map(|w| w.slice(&self.points)).unwrap_or(&[])
    }
}

/// align -> downsample -> window -> normalize.
///
/// Only `assets` present in `series` take part; unknown names simply produce no values.
pub fn chart_rows<S: AsRef<Series>>(
    series: &BTreeMap<String, S>,
    request: &ChartRequest,
    config: &NormalizeConfig,
) -> Result<ChartView, PipelineError> {
    let selected: BTreeMap<String, &Series> = request
        .assets
        .iter()
        .filter_map(|name| series.get(name).map(|s| (name.clone(), s.as_ref())))
        .collect();

    let aligned = align(&selected);
    let rows = downsample(&aligned, request.granularity);
    let total_rows = rows.len();

    let window = match request.range {
        // No data degrades to an empty view whatever range was asked for.
        _ if total_rows == 0 => None,
        Some((start, end)) => Some(Window::new(start, end, total_rows, DASHBOARD.min_window)?),
        None => Window::trailing(
            total_rows,
            DASHBOARD.chart_windows.for_granularity(request.granularity),
            DASHBOARD.min_window,
        ),
    };
    let visible = window.map(|w| w.slice(&rows)).unwrap_or(&[]);
    let normalized = normalize(visible, &request.assets, config);

    if DF.log_pipeline {
        log::debug!(
            "chart {:?} @ {}: {} aligned -> {} downsampled -> {} visible",
            request.assets,
            request.granularity,
            aligned.len(),
            total_rows,
            normalized.len()
        );
    }

    Ok(ChartView {
        rows: normalized,
        window,
        total_rows,
    })
}

/// Downsamples each asset on its own, then correlates the raw (not normalized) values.
pub fn correlation_series(
    a: &Series,
    b: &Series,
    granularity: Granularity,
    window_size: usize,
) -> Vec<CorrelationPoint> {
    let a = resample(a, granularity);
    let b = resample(b, granularity);
    correlate(&a, &b, window_size)
}

pub fn correlation_view(
    a: &Series,
    b: &Series,
    request: &CorrelationRequest,
) -> CorrelationView {
    let points = correlation_series(a, b, request.granularity(), request.window_size());
    let window = Window::trailing(
        points.len(),
        DASHBOARD.correlation_view.for_granularity(request.granularity()),
        DASHBOARD.min_window,
    );

    if DF.log_pipeline {
        log::debug!(
            "correlation {} vs {} @ {} (window {}): {} points",
            request.asset_a(),
            request.asset_b(),
            request.granularity(),
            request.window_size(),
            points.len()
        );
    }

    CorrelationView { points, window }
}

fn resample(series: &Series, granularity: Granularity) -> Series {
    const KEY: &str = "value";
    if granularity == Granularity::Daily {
        return series.clone();
    }
    let single: BTreeMap<String, &Series> = BTreeMap::from([(KEY.to_string(), series)]);
    let rows = downsample(&align(&single), granularity);
    column(&rows, KEY)
}

fn column(rows: &[AlignedRow], asset: &str) -> Series {
    // Rows come out of the aligner sorted and unique, so this never reorders.
    Series::sanitized(
        rows.iter()
            .filter_map(|r| r.get(asset).map(|v| TimePoint::new(r.date, v)))
            .collect(),
    )
}
