pub mod geo;
pub mod health;
pub mod metrics;

pub use geo::{GeoService, geo_routes};
pub use health::{AppState, HealthService, health_routes};
pub use metrics::MetricsService;
