//! Global metrics registry
//!
//! Defines all Prometheus metrics used by the GeoIP2 resolver.

use once_cell::sync::Lazy;
use prometheus::{CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

use crate::metrics_core::MetricsRecorder;

/// Global metrics instance
pub static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Application metrics container
pub struct Metrics {
    /// Internal Prometheus registry
    registry: Registry,

    // ===== Geo cache metrics =====
    /// Geo cache lookups by result (hit, miss)
    pub geo_cache_total: CounterVec,

    // ===== Geo database metrics =====
    /// Database lookups by outcome (resolved, unknown, failed)
    pub geo_lookups_total: CounterVec,
    /// Database lookup latency
    pub geo_lookup_duration_seconds: Histogram,
}

impl Metrics {
    fn new() -> Self {
        let registry = Registry::new();

        let geo_cache_total = CounterVec::new(
            Opts::new(
                "geoip2_extras_cache_total",
                "Total geo cache lookups by result",
            ),
            &["result"],
        )
        .expect("Failed to create geo_cache_total metric");

        let geo_lookups_total = CounterVec::new(
            Opts::new(
                "geoip2_extras_lookups_total",
                "Total geo database lookups by outcome",
            ),
            &["outcome"],
        )
        .expect("Failed to create geo_lookups_total metric");

        let geo_lookup_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "geoip2_extras_lookup_duration_seconds",
                "Geo database lookup duration in seconds",
            )
            .buckets(vec![
                0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05,
            ]),
        )
        .expect("Failed to create geo_lookup_duration_seconds metric");

        // Register all metrics
        registry
            .register(Box::new(geo_cache_total.clone()))
            .expect("Failed to register geo_cache_total");
        registry
            .register(Box::new(geo_lookups_total.clone()))
            .expect("Failed to register geo_lookups_total");
        registry
            .register(Box::new(geo_lookup_duration_seconds.clone()))
            .expect("Failed to register geo_lookup_duration_seconds");

        Self {
            registry,
            geo_cache_total,
            geo_lookups_total,
            geo_lookup_duration_seconds,
        }
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            return format!("# failed to encode metrics: {}\n", e);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// `MetricsRecorder` backed by the global Prometheus registry
pub struct PrometheusMetricsWrapper;

impl MetricsRecorder for PrometheusMetricsWrapper {
    fn inc_geo_cache_hit(&self) {
        METRICS.geo_cache_total.with_label_values(&["hit"]).inc();
    }

    fn inc_geo_cache_miss(&self) {
        METRICS.geo_cache_total.with_label_values(&["miss"]).inc();
    }

    fn inc_geo_lookup(&self, outcome: &str) {
        METRICS
            .geo_lookups_total
            .with_label_values(&[outcome])
            .inc();
    }

    fn observe_geo_lookup(&self, duration_secs: f64) {
        METRICS.geo_lookup_duration_seconds.observe(duration_secs);
    }
}
