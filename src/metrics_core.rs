//! Core metrics traits (always compiled, no feature gate).
//!
//! Provides `MetricsRecorder` trait and `NoopMetrics` so that the resolver
//! can accept `Arc<dyn MetricsRecorder>` unconditionally.  When the
//! `metrics` feature is disabled, `NoopMetrics` is injected.

use std::sync::Arc;

/// Trait for recording application metrics.
///
/// All methods are no-op by default, allowing partial implementation.
/// Implementations must be thread-safe (Send + Sync).
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    // ===== Geo cache =====

    /// Record geo cache hit
    fn inc_geo_cache_hit(&self) {}

    /// Record geo cache miss
    fn inc_geo_cache_miss(&self) {}

    // ===== Geo database =====

    /// Record a database lookup by outcome (resolved, unknown, failed)
    fn inc_geo_lookup(&self, outcome: &str) {}

    /// Observe database lookup duration
    fn observe_geo_lookup(&self, duration_secs: f64) {}
}

/// Noop metrics implementation for testing and non-metrics builds.
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {}

impl NoopMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self::new())
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}
