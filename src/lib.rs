#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod utils;

// Re-export commonly used types outside of crate (for the binary and integration tests)
pub use analysis::{ChartRequest, ChartView, CorrelationRequest, CorrelationView, PipelineError};
pub use config::{ASSETS, AssetSpec, DASHBOARD, find_asset};
pub use data::{DateRange, QuoteProvider, SeriesCache, YahooProvider};
pub use domain::{Granularity, Series, TimePoint};
pub use engine::{DashboardEngine, EngineError};

// CLI argument parsing
use {
    clap::{Parser, Subcommand},
    std::path::PathBuf,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the assets that can be charted
    Assets,

    /// Normalized chart rows for one or more assets
    Chart {
        /// Asset name as listed by `assets` (repeat for several)
        #[arg(short, long = "asset", required = true)]
        assets: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = DASHBOARD.default_granularity)]
        scale: Granularity,

        /// First downsampled row to show (inclusive)
        #[arg(long, requires = "end")]
        start: Option<usize>,

        /// Last downsampled row to show (exclusive)
        #[arg(long, requires = "start")]
        end: Option<usize>,
    },

    /// Rolling correlation between two assets
    Correlate {
        #[arg(short, long)]
        a: String,

        #[arg(short, long)]
        b: String,

        #[arg(short, long, value_enum, default_value_t = DASHBOARD.default_granularity)]
        scale: Granularity,

        /// Points per correlation window. Defaults per scale.
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Write raw daily closes to a CSV file
    Export {
        #[arg(short, long = "asset", required = true)]
        assets: Vec<String>,

        #[arg(short, long)]
        out: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["asset-cycle", "chart", "-a", "Gold", "-a", "Bitcoin"]).unwrap();
        match cli.command {
            Command::Chart { assets, scale, start, end } => {
                assert_eq!(assets, vec!["Gold", "Bitcoin"]);
                assert_eq!(scale, Granularity::Monthly);
                assert_eq!((start, end), (None, None));
            }
            other => panic!("unexpected {:?}", other),
        }

        let cli = Cli::try_parse_from([
            "asset-cycle", "correlate", "-a", "Gold", "-b", "Kospi", "--scale", "weekly", "-w", "8",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Correlate { scale: Granularity::Weekly, window: Some(8), .. }
        ));

        assert!(Cli::try_parse_from(["asset-cycle", "chart", "-a", "Gold", "--start", "3"]).is_err());
    }
}
