use {
    crate::domain::{CorrelationPoint, Series},
    chrono::NaiveDate,
    statrs::statistics::Statistics,
    std::collections::HashMap,
};

/// What to do when series A has a date that series B lacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Pair the A value with `0`.
    #[default]
    Zero,
    /// Leave the pair out of that window's computation.
    Skip,
}

/// Pearson correlation of two equal-length samples.
///
/// `None` when either side has zero variance (or fewer than two points).
/// The result is clamped to `[-1, 1]` to absorb rounding overshoot.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = xs.iter().mean();
    let mean_y = ys.iter().mean();

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = sum_xx.sqrt() * sum_yy.sqrt();
    if sum_xx == 0.0 || sum_yy == 0.0 || !denom.is_finite() {
        return None;
    }
    let r = sum_xy / denom;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Rolling correlation of `a` against `b` over non-overlapping windows of `a`.
///
/// Each window takes `window_size` consecutive points of `a`; a trailing remainder
/// shorter than that is dropped. B values are matched by exact date and default to
/// `0` when missing. Windows with an undefined coefficient are left out.
pub fn correlate(a: &Series, b: &Series, window_size: usize) -> Vec<CorrelationPoint> {
    correlate_with(a, b, window_size, MissingPolicy::Zero)
}

pub fn correlate_with(
    a: &Series,
    b: &Series,
    window_size: usize,
    missing: MissingPolicy,
) -> Vec<CorrelationPoint> {
    if window_size == 0 {
        return Vec::new();
    }
    let lookup: HashMap<NaiveDate, f64> = b.points().iter().map(|p| (p.date, p.value)).collect();

    a.points()
        .chunks_exact(window_size)
        .filter_map(|window| {
            let mut xs = Vec::with_capacity(window_size);
            let mut ys = Vec::with_capacity(window_size);
            for p in window {
                match (lookup.get(&p.date), missing) {
                    (Some(&y), _) => {
                        xs.push(p.value);
                        ys.push(y);
                    }
                    (None, MissingPolicy::Zero) => {
                        xs.push(p.value);
                        ys.push(0.0);
                    }
                    (None, MissingPolicy::Skip) => {}
                }
            }
            let correlation = pearson(&xs, &ys)?;
            let last = window.last()?;
            Some(CorrelationPoint {
                date: last.date,
                correlation,
            })
        })
        .collect()
}
