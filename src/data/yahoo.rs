//! Daily close history from the Yahoo Finance chart API.

use {
    crate::{
        config::{AssetSpec, QUOTES},
        data::provider::{DateRange, QuoteProvider},
        domain::{Series, TimePoint},
        utils::{TimeUtils, date_to_epoch_sec, epoch_sec_to_date},
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    reqwest::Url,
    serde::Deserialize,
    std::{error::Error, fmt, time::Duration},
};

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug)]
pub enum YahooError {
    Request(String),
    Parse(String),
    Api { code: String, description: String },
    NoData,
}

impl fmt::Display for YahooError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            YahooError::Request(msg) => write!(f, "request failed: {}", msg),
            YahooError::Parse(msg) => write!(f, "could not parse chart response: {}", msg),
            YahooError::Api { code, description } => {
                write!(f, "API error [{}]: {}", code, description)
            }
            YahooError::NoData => write!(f, "no data returned"),
        }
    }
}

impl Error for YahooError {}

pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_url(QUOTES.client.chart_base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(QUOTES.client.user_agent)
            .timeout(Duration::from_millis(QUOTES.client.timeout_ms))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, symbol: &str, range: DateRange) -> Result<Url, YahooError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| YahooError::Request(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| YahooError::Request(format!("{} cannot take a path", self.base_url)))?
            .push(symbol);
        // period2 is exclusive on Yahoo's side; push it past the end date.
        let period1 = date_to_epoch_sec(range.start);
        let period2 = date_to_epoch_sec(range.end) + TimeUtils::SECS_IN_D;
        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", QUOTES.history.interval);
        Ok(url)
    }

    /// Close price per UTC calendar date. Null closes are skipped.
    fn parse_response(json: &str) -> Result<Vec<TimePoint>, YahooError> {
        let response: ChartResponse =
            serde_json::from_str(json).map_err(|e| YahooError::Parse(e.to_string()))?;

        if let Some(error) = response.chart.error {
            return Err(YahooError::Api {
                code: error.code,
                description: error.description,
            });
        }

        let results = response.chart.result.ok_or(YahooError::NoData)?;
        let data = results.first().ok_or(YahooError::NoData)?;
        let quote = data.indicators.quote.first().ok_or(YahooError::NoData)?;

        let points: Vec<TimePoint> = data
            .timestamp
            .iter()
            .zip(&quote.close)
            .filter_map(|(&ts, close)| {
                let value = (*close)?;
                let date = epoch_sec_to_date(ts)?;
                Some(TimePoint::new(date, value))
            })
            .collect();

        if points.is_empty() {
            return Err(YahooError::NoData);
        }
        Ok(points)
    }

    async fn fetch_text(&self, url: Url) -> Result<String, YahooError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| YahooError::Request(e.to_string()))?;
        // Yahoo reports unknown symbols as 404 with a JSON error body, so read it either way.
        response
            .text()
            .await
            .map_err(|e| YahooError::Request(e.to_string()))
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    async fn fetch_history(&self, asset: &AssetSpec, range: DateRange) -> Result<Series> {
        let url = self
            .build_url(asset.symbol, range)
            .with_context(|| format!("{} ({})", asset.name, asset.symbol))?;

        log::info!("Fetching {} ({}) from {} to {}", asset.name, asset.symbol, range.start, range.end);

        let body = self
            .fetch_text(url)
            .await
            .with_context(|| format!("fetching {} ({})", asset.name, asset.symbol))?;
        let points = Self::parse_response(&body)
            .with_context(|| format!("parsing {} ({})", asset.name, asset.symbol))?;

        let series = Series::sanitized(points);
        log::info!("Fetched {} points for {}.", series.len(), asset.name);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::find_asset;
    use crate::utils::parse_date;

    #[test]
    fn url_carries_symbol_and_period() {
        let provider = YahooProvider::new().unwrap();
        let range = DateRange {
            start: parse_date("2024-01-01").unwrap(),
            end: parse_date("2024-01-31").unwrap(),
        };
        let url = provider.build_url("^GSPC", range).unwrap();
        let text = url.as_str();
        assert!(text.starts_with("https://query1.finance.yahoo.com/v8/finance/chart/"));
        assert_eq!(url.path_segments().and_then(|mut s| s.next_back()), Some("^GSPC"));
        assert!(text.contains("period1=1704067200"));
        assert!(text.contains("period2=1706745600"));
        assert!(text.contains("interval=1d"));
    }

    #[test]
    fn parse_keeps_closes_and_skips_nulls() {
        let json = r#"{"chart":{"result":[{"timestamp":[1704205800,1704292200,1704378600],"indicators":{"quote":[{"close":[4742.8,null,4688.7]}]}}],"error":null}}"#;
        let points = YahooProvider::parse_response(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, parse_date("2024-01-02").unwrap());
        assert_eq!(points[1].date, parse_date("2024-01-04").unwrap());
        assert_eq!(points[1].value, 4688.7);
    }

    #[test]
    fn parse_reports_api_error() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(matches!(
            YahooProvider::parse_response(json),
            Err(YahooError::Api { .. })
        ));
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert!(matches!(
            YahooProvider::parse_response(r#"{"chart":{"result":[],"error":null}}"#),
            Err(YahooError::NoData)
        ));
        assert!(matches!(
            YahooProvider::parse_response("<html>"),
            Err(YahooError::Parse(_))
        ));
    }

    #[test]
    fn every_registry_symbol_builds_a_url() {
        let provider = YahooProvider::new().unwrap();
        let range = DateRange::lookback_years(1);
        for name in ["S&P 500", "Gold", "USD/KRW", "KR Rate"] {
            let asset = find_asset(name).unwrap();
            assert!(provider.build_url(asset.symbol, range).is_ok());
        }
    }
}
