//! HTTP layer: the GeoIP2 middleware and the demo server's handlers.

pub mod middleware;
pub mod services;
