use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// Time resolution of a chart or correlation view.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[strum(to_string = "daily")]
    Daily,
    #[strum(to_string = "weekly")]
    Weekly,
    #[default]
    #[strum(to_string = "monthly")]
    Monthly,
}

/// How weekly buckets are keyed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum WeekNumbering {
    /// `(year, floor((day_of_month + day_of_week) / 7))`. Coarse, resets every month.
    #[default]
    Approximate,
    /// ISO-8601 `(iso_year, iso_week)`.
    Iso,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DASHBOARD;
    use clap::ValueEnum;
    use strum::IntoEnumIterator;

    #[test]
    fn cli_values_match_display_names() {
        let shown: Vec<String> = Granularity::iter().map(|g| g.to_string()).collect();
        assert_eq!(shown, vec!["daily", "weekly", "monthly"]);

        for g in Granularity::iter() {
            assert_eq!(Granularity::from_str(&g.to_string(), false), Ok(g));
        }
        assert_eq!(Granularity::value_variants().len(), Granularity::iter().count());
    }

    #[test]
    fn every_scale_has_usable_window_defaults() {
        for g in Granularity::iter() {
            let chart = DASHBOARD.chart_windows.for_granularity(g);
            let correlation = DASHBOARD.correlation_windows.for_granularity(g);
            assert!(chart >= DASHBOARD.min_window, "{} chart window", g);
            assert!(correlation >= 2, "{} correlation window", g);
        }
    }
}
