//! Localization metrics and observability module.
//!
//! Counts how content requests were served (seed store vs static fetch),
//! how many fetches failed, and how many translation keys missed.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by the content adapter and translator.
///
/// One instance is created per engine and shared through an `Arc`, so tests
/// get isolated counters without a reset hook.
#[derive(Debug, Default)]
pub struct LocalizationMetrics {
    /// Number of content requests answered from the seeded store
    seed_hits: AtomicUsize,

    /// Number of content requests that went to the static-file fetch
    static_fetches: AtomicUsize,

    /// Number of static fetches that ended in an error
    fetch_failures: AtomicUsize,

    /// Number of `t()` lookups that fell back to the raw key
    key_misses: AtomicUsize,
}

impl LocalizationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a content request served from the seeded store.
    pub fn record_seed_hit(&self) {
        self.seed_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a content request sent to the static-file fetch.
    pub fn record_static_fetch(&self) {
        self.static_fetches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed static fetch.
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a translation key miss.
    pub fn record_key_miss(&self) {
        self.key_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn seed_hits(&self) -> usize {
        self.seed_hits.load(Ordering::Relaxed)
    }

    pub fn static_fetches(&self) -> usize {
        self.static_fetches.load(Ordering::Relaxed)
    }

    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    pub fn key_misses(&self) -> usize {
        self.key_misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.seed_hits();
        let fetches = self.static_fetches();
        let total_requests = hits + fetches;
        let seed_hit_rate = if total_requests > 0 {
            (hits as f64 / total_requests as f64) * 100.0
        } else {
            0.0
        };

        let failures = self.fetch_failures();
        let fetch_success_rate = if fetches > 0 {
            (fetches.saturating_sub(failures) as f64 / fetches as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            seed_hits: hits,
            static_fetches: fetches,
            seed_hit_rate,
            fetch_failures: failures,
            fetch_success_rate,
            key_misses: self.key_misses(),
        }
    }
}

/// Metrics report containing current localization statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub seed_hits: usize,
    pub static_fetches: usize,

    /// Seed hit rate as a percentage (0-100)
    pub seed_hit_rate: f64,

    pub fetch_failures: usize,

    /// Static fetch success rate as a percentage (0-100)
    pub fetch_success_rate: f64,

    pub key_misses: usize,
}
