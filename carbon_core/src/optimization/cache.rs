//! Fingerprint-keyed report cache.
//!
//! Each key maps to an `Arc<OnceCell>`: the first caller for a fingerprint
//! runs the provider, concurrent callers for the same fingerprint await
//! that one initialization, and other fingerprints are never blocked by it.
//! The map itself sits behind a `std::sync::Mutex` that is only held to
//! look up or swap cells, never across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::OnceCell;

use crate::config::CacheSettings;
use crate::errors::{CalcError, CalcResult};
use crate::lifecycle::MaterialInput;

use super::{fallback_report, fingerprint, OptimizationReport, RecommendationProvider};

/// Time source for entry timestamps.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = *now + by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fingerprint: String,
    pub report: OptimizationReport,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= self.ttl
    }
}

type Slot = Arc<OnceCell<CacheEntry>>;

/// Memoizes optimization reports per material set.
///
/// `get` never fails: without a provider, or when the provider times out,
/// errors, or returns unparseable text, the local fallback report is
/// cached instead.
///
/// ## Example
///
/// ```rust
/// use carbon_core::config::CacheSettings;
/// use carbon_core::lifecycle::MaterialInput;
/// use carbon_core::optimization::{OptimizationRecommendationCache, ReportSource};
///
/// # tokio_test_block(async {
/// let cache = OptimizationRecommendationCache::new(&CacheSettings::default());
/// let materials = vec![MaterialInput::new("Steel", 1000.0, "kg", 1.85)];
/// let report = cache.get(&materials).await;
/// assert_eq!(report.source, ReportSource::Fallback);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
pub struct OptimizationRecommendationCache {
    provider: Option<Arc<dyn RecommendationProvider>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    timeout: std::time::Duration,
    entries: Mutex<HashMap<String, Slot>>,
}

impl std::fmt::Debug for OptimizationRecommendationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizationRecommendationCache")
            .field("has_provider", &self.provider.is_some())
            .field("clock", &self.clock)
            .field("ttl", &self.ttl)
            .field("timeout", &self.timeout)
            .field("entries", &self.len())
            .finish()
    }
}

impl OptimizationRecommendationCache {
    /// Cache without a provider (fallback reports only).
    pub fn new(settings: &CacheSettings) -> Self {
        OptimizationRecommendationCache {
            provider: None,
            clock: Arc::new(SystemClock),
            ttl: settings.ttl(),
            timeout: settings.provider_timeout(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn RecommendationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Report for `materials`, computed at most once per fingerprint and TTL
    /// window.
    pub async fn get(&self, materials: &[MaterialInput]) -> OptimizationReport {
        let key = fingerprint(materials);
        let slot = self.slot_for(&key);

        if let Some(entry) = slot.get() {
            tracing::debug!(fingerprint = %key, "optimization cache hit");
            return entry.report.clone();
        }

        let entry = slot.get_or_init(|| self.fetch(materials, &key)).await;
        entry.report.clone()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock_entries();
        let before = entries.len();
        Self::sweep(&mut entries, now);
        before - entries.len()
    }

    /// Number of keys held, including in-flight ones
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    // Live slot for `key`: existing if fresh or still initializing,
    // otherwise a new empty one.
    fn slot_for(&self, key: &str) -> Slot {
        let now = self.clock.now();
        let mut entries = self.lock_entries();

        match entries.get(key).cloned() {
            Some(slot) if !slot.get().is_some_and(|e| e.is_expired(now)) => slot,
            Some(_) => {
                tracing::debug!(fingerprint = %key, "optimization cache entry expired");
                let slot = Slot::default();
                entries.insert(key.to_string(), slot.clone());
                slot
            }
            None => {
                Self::sweep(&mut entries, now);
                tracing::debug!(fingerprint = %key, "optimization cache miss");
                let slot = Slot::default();
                entries.insert(key.to_string(), slot.clone());
                slot
            }
        }
    }

    fn sweep(entries: &mut HashMap<String, Slot>, now: DateTime<Utc>) {
        entries.retain(|_, slot| !slot.get().is_some_and(|e| e.is_expired(now)));
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn fetch(&self, materials: &[MaterialInput], key: &str) -> CacheEntry {
        let report = match &self.provider {
            Some(provider) => match self.ask_provider(provider.as_ref(), materials).await {
                Ok(report) => report,
                Err(err) => {
                    tracing::warn!(code = err.error_code(), error = %err, "using fallback optimization report");
                    fallback_report(materials)
                }
            },
            None => fallback_report(materials),
        };

        CacheEntry {
            fingerprint: key.to_string(),
            report,
            created_at: self.clock.now(),
            ttl: self.ttl,
        }
    }

    async fn ask_provider(
        &self,
        provider: &dyn RecommendationProvider,
        materials: &[MaterialInput],
    ) -> CalcResult<OptimizationReport> {
        let raw = tokio::time::timeout(self.timeout, provider.suggest_alternatives(materials))
            .await
            .map_err(|_| CalcError::ProviderTimeout {
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| CalcError::ProviderFailed {
                reason: format!("{:#}", e),
            })?;

        OptimizationReport::parse(&raw, materials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::ReportSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        delay: std::time::Duration,
        response: String,
    }

    impl CountingProvider {
        fn new(response: &str) -> Self {
            CountingProvider {
                calls: AtomicUsize::new(0),
                delay: std::time::Duration::ZERO,
                response: response.to_string(),
            }
        }

        fn with_delay(mut self, delay: std::time::Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecommendationProvider for CountingProvider {
        async fn suggest_alternatives(&self, _materials: &[MaterialInput]) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.response.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl RecommendationProvider for FailingProvider {
        async fn suggest_alternatives(&self, _materials: &[MaterialInput]) -> anyhow::Result<String> {
            anyhow::bail!("service unavailable")
        }
    }

    const STEEL_REPORT: &str =
        r#"{"alternatives": [{"original": "Steel", "alternative": "EAF steel", "carbon_footprint": 0.9}]}"#;

    fn materials() -> Vec<MaterialInput> {
        vec![
            MaterialInput::new("Steel", 1000.0, "kg", 1.85),
            MaterialInput::new("Concrete", 20.0, "m3", 300.0),
        ]
    }

    fn cache_with(provider: Arc<CountingProvider>, clock: Arc<ManualClock>) -> OptimizationRecommendationCache {
        OptimizationRecommendationCache::new(&CacheSettings::default())
            .with_provider(provider)
            .with_clock(clock)
    }

    #[tokio::test]
    async fn test_provider_called_once_within_ttl() {
        let provider = Arc::new(CountingProvider::new(STEEL_REPORT));
        let clock = Arc::new(ManualClock::default());
        let cache = cache_with(provider.clone(), clock.clone());

        let first = cache.get(&materials()).await;
        clock.advance(Duration::minutes(29));
        let mut reordered = materials();
        reordered.reverse();
        let second = cache.get(&reordered).await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(first.source, ReportSource::Provider);
        assert!((first.total_reduction_kg - 950.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_refetch_after_expiry() {
        let provider = Arc::new(CountingProvider::new(STEEL_REPORT));
        let clock = Arc::new(ManualClock::default());
        let cache = cache_with(provider.clone(), clock.clone());

        cache.get(&materials()).await;
        clock.advance(Duration::minutes(30));
        cache.get(&materials()).await;

        assert_eq!(provider.calls(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_identical_requests_collapse() {
        let provider = Arc::new(CountingProvider::new(STEEL_REPORT).with_delay(std::time::Duration::from_millis(20)));
        let cache = cache_with(provider.clone(), Arc::new(ManualClock::default()));
        let m = materials();

        let (a, b, c) = tokio::join!(cache.get(&m), cache.get(&m), cache.get(&m));

        assert_eq!(provider.calls(), 1);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[tokio::test]
    async fn test_distinct_keys_call_provider_separately() {
        let provider = Arc::new(CountingProvider::new(STEEL_REPORT).with_delay(std::time::Duration::from_millis(10)));
        let cache = cache_with(provider.clone(), Arc::new(ManualClock::default()));
        let a = materials();
        let b = vec![MaterialInput::new("Steel", 500.0, "kg", 1.85)];

        tokio::join!(cache.get(&a), cache.get(&b));

        assert_eq!(provider.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_no_provider_uses_fallback() {
        let cache = OptimizationRecommendationCache::new(&CacheSettings::default());
        let report = cache.get(&materials()).await;
        assert_eq!(report.source, ReportSource::Fallback);
        assert_eq!(report.alternatives.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_response_uses_fallback() {
        let provider = Arc::new(CountingProvider::new("I would suggest using less steel."));
        let cache = cache_with(provider.clone(), Arc::new(ManualClock::default()));
        let report = cache.get(&materials()).await;
        assert_eq!(report.source, ReportSource::Fallback);

        // The fallback is cached like any other report
        cache.get(&materials()).await;
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_uses_fallback() {
        let cache = OptimizationRecommendationCache::new(&CacheSettings::default()).with_provider(Arc::new(FailingProvider));
        let report = cache.get(&materials()).await;
        assert_eq!(report.source, ReportSource::Fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_fallback() {
        let provider = Arc::new(CountingProvider::new(STEEL_REPORT).with_delay(std::time::Duration::from_secs(60)));
        let cache = OptimizationRecommendationCache::new(&CacheSettings::default()).with_provider(provider.clone());
        let report = cache.get(&materials()).await;
        assert_eq!(report.source, ReportSource::Fallback);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_evict_expired_and_sweep_on_insert() {
        let provider = Arc::new(CountingProvider::new(STEEL_REPORT));
        let clock = Arc::new(ManualClock::default());
        let cache = cache_with(provider.clone(), clock.clone());

        cache.get(&materials()).await;
        cache.get(&[MaterialInput::new("Timber", 10.0, "kg", 0.4)]).await;
        assert_eq!(cache.len(), 2);

        clock.advance(Duration::minutes(31));
        cache.get(&[MaterialInput::new("Glass", 10.0, "kg", 1.4)]).await;
        assert_eq!(cache.len(), 1);

        clock.advance(Duration::minutes(31));
        assert_eq!(cache.evict_expired(), 1);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = OptimizationRecommendationCache::new(&CacheSettings::default());
        cache.get(&materials()).await;
        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
