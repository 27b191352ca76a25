use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// Smallest and largest finite values, or `None` if there are none.
pub(crate) fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let (min_idx, max_idx) = finite.as_slice().argminmax();
    Some((finite[min_idx], finite[max_idx]))
}

/// Arithmetic mean of the finite values, or `None` if there are none.
pub(crate) fn finite_mean<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<f64> {
    let finite: Vec<f64> = values.into_iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        None
    } else {
        Some(finite.mean())
    }
}

/// Linearly maps a value from one range to another while preserving its relative proportion.
pub fn remap(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = (val - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}
