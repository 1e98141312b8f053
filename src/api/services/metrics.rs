//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus text format at `/metrics`.

use actix_web::{HttpResponse, Responder};

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;

/// Metrics service handler
pub struct MetricsService;

impl MetricsService {
    /// Handle metrics export request
    #[cfg(feature = "metrics")]
    pub async fn metrics() -> impl Responder {
        HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4; charset=utf-8")
            .body(METRICS.export())
    }

    /// Metrics not available when feature is disabled
    #[cfg(not(feature = "metrics"))]
    pub async fn metrics() -> impl Responder {
        HttpResponse::NotFound()
            .content_type("text/plain")
            .body("Metrics not enabled. Rebuild with --features metrics")
    }
}
