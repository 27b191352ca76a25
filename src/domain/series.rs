use {
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    std::{error::Error, fmt},
};

use crate::config::DF;

/// A single dated observation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    Unsorted { index: usize },
    DuplicateDate(NaiveDate),
    NonFinite(NaiveDate),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeriesError::Unsorted { index } => {
                write!(f, "series dates are not increasing at index {}", index)
            }
            SeriesError::DuplicateDate(date) => write!(f, "duplicate date {} in series", date),
            SeriesError::NonFinite(date) => write!(f, "non-finite value on {}", date),
        }
    }
}

impl Error for SeriesError {}

/// Date-ordered observations for one asset.
/// Dates are strictly increasing and every value is finite.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Series {
    points: Vec<TimePoint>,
}

impl Series {
    /// Accepts `points` only if they already satisfy the series invariant.
    pub fn try_from_points(points: Vec<TimePoint>) -> Result<Self, SeriesError> {
        for (i, p) in points.iter().enumerate() {
            if !p.value.is_finite() {
                return Err(SeriesError::NonFinite(p.date));
            }
            if i > 0 {
                let prev = points[i - 1].date;
                if p.date == prev {
                    return Err(SeriesError::DuplicateDate(p.date));
                }
                if p.date < prev {
                    return Err(SeriesError::Unsorted { index: i });
                }
            }
        }
        Ok(Self { points })
    }

    /// Boundary repair for provider data: drops non-finite values, sorts by date
    /// and keeps the last point seen for a repeated date.
    pub fn sanitized(mut points: Vec<TimePoint>) -> Self {
        let received = points.len();
        points.retain(|p| p.value.is_finite());
        let finite = points.len();

        // Stable sort keeps arrival order among equal dates, so the later one wins below.
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<TimePoint> = Vec::with_capacity(points.len());
        for p in points {
            match deduped.last_mut() {
                Some(last) if last.date == p.date => *last = p,
                _ => deduped.push(p),
            }
        }

        if DF.log_sanitize && deduped.len() != received {
            log::debug!(
                "Sanitized series: {} received, {} non-finite dropped, {} duplicates merged.",
                received,
                received - finite,
                finite - deduped.len()
            );
        }

        Self { points: deduped }
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Exact-date lookup.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].value)
    }
}

impl AsRef<Series> for Series {
    fn as_ref(&self) -> &Series {
        self
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<TimePoint>::deserialize(deserializer)?;
        Series::try_from_points(points).map_err(serde::de::Error::custom)
    }
}

/// One sample of a rolling correlation series. `correlation` is always in `[-1, 1]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CorrelationPoint {
    pub date: NaiveDate,
    pub correlation: f64,
}
