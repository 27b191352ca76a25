use {
    super::EngineError,
    crate::{
        analysis::{
            ChartRequest, ChartView, CorrelationRequest, CorrelationView, NormalizeConfig,
            chart_rows, correlation_view,
        },
        config::{AssetSpec, QUOTES, find_asset},
        data::{DateRange, QuoteProvider, SelectionTracker, SeriesCache, write_csv},
        domain::Series,
        trace_time,
    },
    anyhow::{Context, Result},
    futures::{StreamExt, TryStreamExt, stream},
    std::{collections::BTreeMap, path::Path, sync::Arc},
};

/// Fetches through the cache and runs the pipeline for chart and correlation views.
///
/// Chart and correlation panes are selected independently, so each has its own
/// tracker: a new chart selection does not void a pending correlation.
pub struct DashboardEngine {
    provider: Arc<dyn QuoteProvider>,
    cache: Arc<SeriesCache>,
    chart_selection: SelectionTracker,
    correlation_selection: SelectionTracker,
    range: DateRange,
    normalize: NormalizeConfig,
}

impl DashboardEngine {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_cache(provider, Arc::new(SeriesCache::new()))
    }

    pub fn with_cache(provider: Arc<dyn QuoteProvider>, cache: Arc<SeriesCache>) -> Self {
        Self {
            provider,
            cache,
            chart_selection: SelectionTracker::new(),
            correlation_selection: SelectionTracker::new(),
            range: DateRange::default(),
            normalize: NormalizeConfig::default(),
        }
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_normalize(mut self, normalize: NormalizeConfig) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn cache(&self) -> &Arc<SeriesCache> {
        &self.cache
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Resolves `names` against the registry, in order.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Vec<&'static AssetSpec>, EngineError> {
        if names.is_empty() {
            return Err(EngineError::NoAssets);
        }
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                find_asset(name).ok_or_else(|| EngineError::UnknownAsset(name.trim().to_string()))
            })
            .collect()
    }

    /// Loads every named asset, keyed by its registry name.
    ///
    /// Uncached assets are fetched concurrently; any failure fails the whole load.
    pub async fn load<S: AsRef<str>>(&self, names: &[S]) -> Result<BTreeMap<String, Arc<Series>>> {
        let assets = Self::resolve(names)?;
        self.load_specs(&assets).await
    }

    async fn load_specs(&self, assets: &[&'static AssetSpec]) -> Result<BTreeMap<String, Arc<Series>>> {
        let provider = self.provider.as_ref();
        let range = self.range;
        stream::iter(assets.iter().copied())
            .map(|asset| async move {
                let series = self
                    .cache
                    .get_or_fetch(asset, provider, range)
                    .await
                    .with_context(|| format!("loading {}", asset.name))?;
                Ok::<_, anyhow::Error>((asset.name.to_string(), series))
            })
            .buffer_unordered(QUOTES.client.max_concurrent_fetches.max(1))
            .try_collect()
            .await
    }

    /// `Ok(None)` when a newer chart selection started while this one was loading.
    pub async fn chart(&self, mut request: ChartRequest) -> Result<Option<ChartView>> {
        let ticket = self.chart_selection.begin();
        let assets = Self::resolve(&request.assets)?;
        request.assets = assets.iter().map(|a| a.name.to_string()).collect();

        let series = self.load_specs(&assets).await?;
        let view = trace_time!("chart_rows", 20_000, {
            chart_rows(&series, &request, &self.normalize)
        })
        .with_context(|| format!("charting {:?}", request.assets))?;

        Ok(self.chart_selection.accept(ticket, view))
    }

    /// `Ok(None)` when a newer correlation selection superseded this one.
    pub async fn correlation(&self, request: CorrelationRequest) -> Result<Option<CorrelationView>> {
        let ticket = self.correlation_selection.begin();
        let assets = Self::resolve(&[request.asset_a(), request.asset_b()])?;
        let (a, b) = (assets[0], assets[1]);

        let series = self.load_specs(&assets).await?;
        let loaded = |asset: &AssetSpec| {
            series
                .get(asset.name)
                .ok_or_else(|| EngineError::MissingSeries(asset.name.to_string()))
        };
        let (series_a, series_b) = (loaded(a)?, loaded(b)?);
        let view = trace_time!("correlation_view", 20_000, {
            correlation_view(series_a, series_b, &request)
        });

        Ok(self.correlation_selection.accept(ticket, view))
    }

    /// Writes every loaded series as CSV.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        write_csv(path, &self.cache.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::PipelineError,
        domain::{Granularity, TimePoint},
        utils::parse_date,
    };
    use async_trait::async_trait;
    use chrono::Days;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    /// 200 daily points per asset; Bitcoin answers slowly.
    struct FakeProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuoteProvider for FakeProvider {
        async fn fetch_history(&self, asset: &AssetSpec, _range: DateRange) -> Result<Series> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if asset.name == "Bitcoin" {
                tokio::time::sleep(Duration::from_millis(150)).await;
            }
            let start = parse_date("2024-01-01").unwrap();
            let slope = asset.name.len() as f64;
            Ok(Series::sanitized(
                (0..200u64)
                    .map(|i| {
                        let wiggle = ((i * 7) % 11) as f64;
                        TimePoint::new(start + Days::new(i), slope * i as f64 + wiggle)
                    })
                    .collect(),
            ))
        }
    }

    fn engine() -> (DashboardEngine, Arc<FakeProvider>) {
        let provider = Arc::new(FakeProvider {
            calls: AtomicUsize::new(0),
        });
        (DashboardEngine::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn chart_resolves_names_case_insensitively() {
        let (engine, provider) = engine();
        let request = ChartRequest::new(vec!["gold".to_string(), " US RATE".to_string()], Granularity::Daily);
        let view = engine.chart(request).await.unwrap().unwrap();

        assert_eq!(view.total_rows, 200);
        assert_eq!(view.rows.len(), 90);
        assert!(view.rows[0].values.contains_key("Gold"));
        assert!(view.rows[0].values.contains_key("US Rate"));

        // Second chart over the same assets is served from the cache.
        engine
            .chart(ChartRequest::new(vec!["Gold".to_string()], Granularity::Weekly))
            .await
            .unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_asset_is_reported() {
        let (engine, _) = engine();
        let err = engine.load(&["Gold", "Dogecoin"]).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::UnknownAsset("Dogecoin".to_string()))
        );
        assert!(engine.load::<&str>(&[]).await.is_err());
    }

    #[tokio::test]
    async fn stale_chart_selection_is_discarded() {
        let (engine, _) = engine();
        let slow = engine.chart(ChartRequest::new(vec!["Bitcoin".to_string()], Granularity::Daily));
        let fast = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            engine
                .chart(ChartRequest::new(vec!["Gold".to_string()], Granularity::Daily))
                .await
        };
        let (slow, fast) = tokio::join!(slow, fast);
        assert!(slow.unwrap().is_none());
        assert!(fast.unwrap().is_some());
    }

    #[tokio::test]
    async fn correlation_runs_on_weekly_means() {
        let (engine, _) = engine();
        let request = CorrelationRequest::new("Gold", "Kospi", Granularity::Weekly, 4).unwrap();
        let view = engine.correlation(request).await.unwrap().unwrap();
        assert!(!view.points.is_empty());
        assert!(view.points.iter().all(|p| (-1.0..=1.0).contains(&p.correlation)));
        assert!(view.visible().len() <= view.points.len());

        assert!(matches!(
            CorrelationRequest::new("Gold", "gold", Granularity::Weekly, 4),
            Err(PipelineError::SameAsset(_))
        ));
    }

    #[tokio::test]
    async fn stale_correlation_selection_is_discarded() {
        let (engine, _) = engine();
        let slow = engine.correlation(
            CorrelationRequest::new("Bitcoin", "Gold", Granularity::Weekly, 4).unwrap(),
        );
        let fast = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            engine
                .correlation(CorrelationRequest::new("Kospi", "Gold", Granularity::Weekly, 4).unwrap())
                .await
        };
        let (slow, fast) = tokio::join!(slow, fast);
        // Superseded is the only way to get `Ok(None)`.
        assert!(slow.unwrap().is_none());
        assert!(fast.unwrap().is_some());
    }

    #[tokio::test]
    async fn export_writes_loaded_series() {
        let (engine, _) = engine();
        engine.load(&["Gold", "Kospi"]).await.unwrap();
        let path = std::env::temp_dir().join(format!("asset-cycle-engine-{}.csv", std::process::id()));
        engine.export_csv(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("date,Gold,Kospi"));
        assert_eq!(lines.count(), 200);
    }
}
