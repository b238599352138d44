//! Lazy, never-evicting model caches keyed by model identifier.
//!
//! Every identifier owns an initialisation slot, so the first caller for an
//! identifier runs the loader while concurrent callers for the same
//! identifier wait for that result. Loads of different identifiers proceed
//! independently.

use std::{collections::HashMap, fmt, hash::Hash, str::FromStr, sync::Arc, time::Instant};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::{
    error::{AnalysisError, Result},
    nlp::models::{KeywordModelName, ModelName},
};

/// Identifier type of a cache: a closed set of names.
pub trait ModelKey:
    Copy + Eq + Hash + fmt::Display + FromStr<Err = AnalysisError> + Send + Sync + 'static
{
    /// Every identifier the cache can hold.
    fn all() -> &'static [Self];
}

impl ModelKey for ModelName {
    fn all() -> &'static [Self] {
        &ModelName::ALL
    }
}

impl ModelKey for KeywordModelName {
    fn all() -> &'static [Self] {
        &KeywordModelName::ALL
    }
}

type Loader<K, M> = dyn Fn(K) -> Result<M> + Send + Sync;

async fn load<K: ModelKey, M: Send + Sync + 'static>(
    kind: &'static str,
    key: K,
    loader: Arc<Loader<K, M>>,
) -> Result<Arc<M>> {
    let start = Instant::now();
    info!(kind, model = %key, "loading model");
    let loaded = tokio::task::spawn_blocking(move || loader(key))
        .await
        .map_err(AnalysisError::from)
        .and_then(|result| result);
    match loaded {
        Ok(model) => {
            info!(
                kind,
                model = %key,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "loaded model"
            );
            Ok(Arc::new(model))
        }
        Err(err) => {
            warn!(kind, model = %key, error = %err, "model load failed");
            Err(err)
        }
    }
}

/// Thread-safe cache of loaded models.
pub struct ModelCache<K: ModelKey, M> {
    kind: &'static str,
    slots: HashMap<K, Arc<OnceCell<Arc<M>>>>,
    loader: Arc<Loader<K, M>>,
}

impl<K: ModelKey, M> fmt::Debug for ModelCache<K, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(key, _)| key.to_string())
            .collect();
        f.debug_struct("ModelCache")
            .field("kind", &self.kind)
            .field("loaded", &loaded)
            .finish()
    }
}

impl<K: ModelKey, M: Send + Sync + 'static> ModelCache<K, M> {
    /// Create an empty cache; `loader` runs on the blocking pool at most once
    /// per identifier (again only after a failed attempt).
    pub fn new<F>(kind: &'static str, loader: F) -> Self
    where
        F: Fn(K) -> Result<M> + Send + Sync + 'static,
    {
        Self {
            kind,
            slots: K::all()
                .iter()
                .map(|key| (*key, Arc::new(OnceCell::new())))
                .collect(),
            loader: Arc::new(loader),
        }
    }

    /// Parse `identifier` and return its model, loading it on first use.
    /// Unknown identifiers fail without touching any slot.
    pub async fn get_or_load_named(&self, identifier: &str) -> Result<Arc<M>> {
        let key = identifier.parse::<K>()?;
        self.get_or_load(key).await
    }

    /// Return the model for `key`, loading it on first use.
    ///
    /// The load runs in its own task that owns the slot's initialisation,
    /// so a caller dropped mid-load does not release the slot to a second
    /// construction.
    pub async fn get_or_load(&self, key: K) -> Result<Arc<M>> {
        let slot = self
            .slots
            .get(&key)
            .ok_or_else(|| AnalysisError::InvalidRequest(format!("no cache slot for {key}")))?;
        if let Some(model) = slot.get() {
            debug!(kind = self.kind, model = %key, "model cache hit");
            return Ok(Arc::clone(model));
        }

        let slot = Arc::clone(slot);
        let loader = Arc::clone(&self.loader);
        let kind = self.kind;
        tokio::spawn(async move {
            slot.get_or_try_init(|| load(kind, key, loader))
                .await
                .map(Arc::clone)
        })
        .await
        .map_err(AnalysisError::from)
        .and_then(|result| result)
    }

    /// The model for `key` if it has already been loaded.
    pub fn get(&self, key: K) -> Option<Arc<M>> {
        self.slots.get(&key).and_then(|slot| slot.get()).cloned()
    }

    pub fn is_loaded(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Identifiers currently holding a model, in registry order.
    pub fn loaded(&self) -> Vec<K> {
        K::all()
            .iter()
            .copied()
            .filter(|key| self.is_loaded(*key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug)]
    struct TestModel {
        name: ModelName,
    }

    fn counting_cache(counter: Arc<AtomicUsize>) -> ModelCache<ModelName, TestModel> {
        ModelCache::new("test", move |name| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(TestModel { name })
        })
    }

    #[tokio::test]
    async fn cache_returns_same_instance() {
        let loads = Arc::new(AtomicUsize::new(0));
        let cache = counting_cache(loads.clone());
        let first = cache.get_or_load(ModelName::en_core_web_sm).await.unwrap();
        let second = cache.get_or_load(ModelName::en_core_web_sm).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name, ModelName::en_core_web_sm);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.loaded(), vec![ModelName::en_core_web_sm]);
    }

    #[tokio::test]
    async fn unknown_identifier_caches_nothing() {
        let loads = Arc::new(AtomicUsize::new(0));
        let cache = counting_cache(loads.clone());
        let err = cache.get_or_load_named("not_a_real_model").await.unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownModel(_)));
        assert!(cache.is_empty());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_load_can_be_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let cache: ModelCache<ModelName, TestModel> = ModelCache::new("test", move |name: ModelName| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AnalysisError::Load {
                    model: name.to_string(),
                    reason: "disk unavailable".into(),
                })
            } else {
                Ok(TestModel { name })
            }
        });
        assert!(cache.get_or_load(ModelName::fi_core_news_sm).await.is_err());
        assert!(!cache.is_loaded(ModelName::fi_core_news_sm));
        assert!(cache.get_or_load(ModelName::fi_core_news_sm).await.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_use_loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        let cache = Arc::new(ModelCache::<ModelName, TestModel>::new("test", move |name| {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(50));
            Ok(TestModel { name })
        }));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.get_or_load(ModelName::en_core_web_lg).await.unwrap()
            }));
        }
        let mut models = Vec::new();
        for handle in handles {
            models.push(handle.await.unwrap());
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(models.iter().all(|m| Arc::ptr_eq(m, &models[0])));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn dropped_caller_does_not_restart_load() {
        let loads = Arc::new(AtomicUsize::new(0));
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (counter, running, max_running) = (loads.clone(), active.clone(), peak.clone());
        let cache = Arc::new(ModelCache::<ModelName, TestModel>::new("test", move |name| {
            counter.fetch_add(1, Ordering::SeqCst);
            let now = running.fetch_add(1, Ordering::SeqCst) + 1;
            max_running.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(300));
            running.fetch_sub(1, Ordering::SeqCst);
            Ok(TestModel { name })
        }));

        let first = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get_or_load(ModelName::en_core_web_lg).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        first.abort();
        assert!(first.await.unwrap_err().is_cancelled());

        let model = cache.get_or_load(ModelName::en_core_web_lg).await.unwrap();
        assert_eq!(model.name, ModelName::en_core_web_lg);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
