use {
    crate::{
        config::{AssetSpec, QUOTES},
        domain::Series,
    },
    anyhow::Result,
    async_trait::async_trait,
    chrono::{Months, NaiveDate, Utc},
};

/// Inclusive calendar range of history to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `years` back from `end`.
    pub fn lookback_years_from(end: NaiveDate, years: u32) -> Self {
        let start = end
            .checked_sub_months(Months::new(years * 12))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn lookback_years(years: u32) -> Self {
        Self::lookback_years_from(Utc::now().date_naive(), years)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::lookback_years(QUOTES.history.lookback_years)
    }
}

/// Abstract interface for fetching daily history.
///
/// Implementations return a `Series` that already satisfies the series invariant;
/// repairing provider quirks is their job, not the pipeline's.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_history(&self, asset: &AssetSpec, range: DateRange) -> Result<Series>;
}
