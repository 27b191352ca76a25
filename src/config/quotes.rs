pub struct QuoteClientConfig {
    pub chart_base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_ms: u64,
    /// Concurrent fetches allowed when a selection needs several uncached assets.
    pub max_concurrent_fetches: usize,
}

/// How much history a fetch asks for.
pub struct HistoryConfig {
    pub lookback_years: u32,
    /// Provider interval string. Only daily data enters the pipeline.
    pub interval: &'static str,
}

pub struct QuoteConfig {
    pub client: QuoteClientConfig,
    pub history: HistoryConfig,
}

pub const QUOTES: QuoteConfig = QuoteConfig {
    client: QuoteClientConfig {
        chart_base_url: "https://query1.finance.yahoo.com/v8/finance/chart",
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
        timeout_ms: 10_000,
        max_concurrent_fetches: 4,
    },
    history: HistoryConfig {
        lookback_years: 20,
        interval: "1d",
    },
};
