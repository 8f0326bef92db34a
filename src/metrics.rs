//! Prometheus metrics module for the alias service.
//!
//! Defines business metrics for cache performance, redirects, alias
//! creation and sign-in attempts.

use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

const NAMESPACE: &str = "alias_shortener";

/// Application metrics for Prometheus monitoring
#[derive(Clone)]
pub struct AppMetrics {
    /// Cache hit counter with cache_type label (alias, session)
    pub cache_hits_total: CounterVec,
    /// Cache miss counter with cache_type label (alias, session)
    pub cache_misses_total: CounterVec,
    /// Total alias redirects performed
    pub redirects_total: Counter,
    /// Total aliases created
    pub aliases_created_total: Counter,
    /// Sign-in attempts with result label (success, invalid)
    pub sign_ins_total: CounterVec,
}

impl AppMetrics {
    /// Create and register all metrics with the given Prometheus registry
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let cache_hits_total = CounterVec::new(
            Opts::new("cache_hits_total", "Total cache hits").namespace(NAMESPACE),
            &["cache_type"],
        )?;
        registry.register(Box::new(cache_hits_total.clone()))?;

        let cache_misses_total = CounterVec::new(
            Opts::new("cache_misses_total", "Total cache misses").namespace(NAMESPACE),
            &["cache_type"],
        )?;
        registry.register(Box::new(cache_misses_total.clone()))?;

        let redirects_total = Counter::with_opts(
            Opts::new("redirects_total", "Total alias redirects performed").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(redirects_total.clone()))?;

        let aliases_created_total = Counter::with_opts(
            Opts::new("aliases_created_total", "Total aliases created").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(aliases_created_total.clone()))?;

        let sign_ins_total = CounterVec::new(
            Opts::new("sign_ins_total", "Total sign-in attempts").namespace(NAMESPACE),
            &["result"],
        )?;
        registry.register(Box::new(sign_ins_total.clone()))?;

        Ok(Self {
            cache_hits_total,
            cache_misses_total,
            redirects_total,
            aliases_created_total,
            sign_ins_total,
        })
    }

    pub fn record_cache_hit(&self, cache_type: &str) {
        self.cache_hits_total.with_label_values(&[cache_type]).inc();
    }

    pub fn record_cache_miss(&self, cache_type: &str) {
        self.cache_misses_total.with_label_values(&[cache_type]).inc();
    }

    pub fn record_redirect(&self) {
        self.redirects_total.inc();
    }

    pub fn record_alias_created(&self) {
        self.aliases_created_total.inc();
    }

    /// Record a sign-in attempt; `result` is "success" or "invalid"
    pub fn record_sign_in(&self, result: &str) {
        self.sign_ins_total.with_label_values(&[result]).inc();
    }
}

/// Render every metric in the registry in the Prometheus text format
pub fn render(registry: &Registry) -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
