//! Read-through cache of fetched daily series, one entry per asset name.

use {
    crate::{
        config::{AssetSpec, DF},
        data::provider::{DateRange, QuoteProvider},
        domain::Series,
    },
    anyhow::Result,
    std::{
        collections::{BTreeMap, HashMap},
        sync::{Arc, Mutex, MutexGuard},
    },
    tokio::sync::OnceCell,
};

type Slot = Arc<OnceCell<Arc<Series>>>;

/// Shared by `Arc` between the engine and whoever else reads series.
///
/// Each key holds a `OnceCell`; callers racing on the same key wait on the
/// same initialisation, so a key never has two fetches in flight.
#[derive(Default)]
pub struct SeriesCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // The map holds no invariant a panicking holder could break.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn slot(&self, name: &str) -> Slot {
        self.lock()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Returns the cached series for `asset`, fetching it on first use.
    ///
    /// A failed fetch leaves the slot empty; the next call tries again.
    pub async fn get_or_fetch(
        &self,
        asset: &AssetSpec,
        provider: &dyn QuoteProvider,
        range: DateRange,
    ) -> Result<Arc<Series>> {
        let slot = self.slot(asset.name);

        if let Some(series) = slot.get() {
            if DF.log_cache {
                log::debug!("cache hit: {}", asset.name);
            }
            return Ok(series.clone());
        }

        let series = slot
            .get_or_try_init(|| async {
                if DF.log_cache {
                    log::info!("cache miss: fetching {}", asset.name);
                }
                provider.fetch_history(asset, range).await.map(Arc::new)
            })
            .await?;
        Ok(series.clone())
    }

    /// Cached series for `name`, if it has finished loading.
    pub fn get(&self, name: &str) -> Option<Arc<Series>> {
        self.lock().get(name).and_then(|slot| slot.get().cloned())
    }

    /// Every loaded series, keyed by asset name.
    pub fn snapshot(&self) -> BTreeMap<String, Arc<Series>> {
        self.lock()
            .iter()
            .filter_map(|(name, slot)| slot.get().map(|s| (name.clone(), s.clone())))
            .collect()
    }

    /// Number of loaded series. Slots still fetching do not count.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the loaded series for `name` so the next request fetches again.
    ///
    /// A slot whose fetch is still in flight is kept: later callers join that
    /// fetch instead of starting a second one. Returns whether anything was dropped.
    pub fn invalidate(&self, name: &str) -> bool {
        let mut slots = self.lock();
        let loaded = slots.get(name).is_some_and(|slot| slot.initialized());
        if loaded {
            slots.remove(name);
            if DF.log_cache {
                log::info!("cache invalidated: {}", name);
            }
        } else if DF.log_cache && slots.contains_key(name) {
            log::debug!("cache invalidate skipped: {} is still loading", name);
        }
        loaded
    }

    /// Drops every loaded series. In-flight fetches keep their slots.
    pub fn clear(&self) {
        self.lock().retain(|_, slot| !slot.initialized());
        if DF.log_cache {
            log::info!("cache cleared");
        }
    }
}
