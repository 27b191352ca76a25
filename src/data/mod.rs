mod cache;
mod export;
mod provider;
mod selection;
mod yahoo;

pub use {
    cache::SeriesCache,
    export::{to_csv, write_csv},
    provider::{DateRange, QuoteProvider},
    selection::{SelectionTicket, SelectionTracker},
    yahoo::{YahooError, YahooProvider},
};
