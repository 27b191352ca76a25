use {
    crate::{
        config::{RATE_SCALE, RateScale, rate_like_names},
        domain::{AlignedRow, NormalizedRow},
        utils::{finite_min_max, remap},
    },
    std::collections::BTreeSet,
};

/// Which assets get the fixed rate scale, and what that scale is.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeConfig {
    pub rate_like: BTreeSet<String>,
    pub rate_scale: RateScale,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            rate_like: rate_like_names().map(str::to_string).collect(),
            rate_scale: RATE_SCALE,
        }
    }
}

impl NormalizeConfig {
    pub fn is_rate_like(&self, asset: &str) -> bool {
        self.rate_like.contains(asset)
    }
}

#[derive(Debug, Clone, Copy)]
enum Scale {
    /// Per-window min-max onto 0..100. `None` when the asset has no values in the window.
    Window(Option<(f64, f64)>),
    Fixed(RateScale),
}

impl Scale {
    fn apply(&self, v: f64) -> f64 {
        match *self {
            Scale::Window(Some((min, max))) if max != min => remap(v, min, max, 0.0, 100.0),
            Scale::Window(_) => 0.0,
            Scale::Fixed(s) => remap(v, s.domain_min, s.domain_max, s.range_min, s.range_max),
        }
    }
}

/// Rescales `assets` in `rows` onto a common chart range.
///
/// Generic assets are min-max normalized over exactly these rows, so the caller
/// passes the visible window. Rate-like assets use `config.rate_scale` and do not
/// depend on the window at all. Each written value keeps its raw counterpart
/// in `originals`. Rows lacking a value for an asset get no entry for it.
pub fn normalize(rows: &[AlignedRow], assets: &[String], config: &NormalizeConfig) -> Vec<NormalizedRow> {
    let scales: Vec<(&str, Scale)> = assets
        .iter()
        .map(|asset| {
            let scale = if config.is_rate_like(asset) {
                Scale::Fixed(config.rate_scale)
            } else {
                let values: Vec<f64> = rows.iter().filter_map(|r| r.get(asset)).collect();
                Scale::Window(finite_min_max(&values))
            };
            (asset.as_str(), scale)
        })
        .collect();

    rows.iter()
        .map(|row| {
            let mut out = NormalizedRow::new(row.date);
            for (asset, scale) in &scales {
                if let Some(v) = row.get(asset) {
                    out.values.insert(asset.to_string(), scale.apply(v));
                    out.originals.insert(asset.to_string(), v);
                }
            }
            out
        })
        .collect()
}
