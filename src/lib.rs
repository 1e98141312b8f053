//! geoip2-extras - GeoIP2 request annotation for actix-web
//!
//! Resolves the client address of every request against a local MaxMind
//! database, caches the result, and exposes it as `X-GEOIP2-*` request
//! headers, request extensions, and optional `X-GeoIP2-*` response headers.
//!
//! # Features
//! - **server**: demo HTTP server binary (default)
//! - **metrics**: Prometheus metrics export
//! - **full**: All features enabled
//!
//! # Architecture
//! - `api`: the `GeoIp2` middleware, header annotation, demo handlers
//! - `services`: geo-database access and the cache-aside resolver
//! - `cache`: key-value cache backends (moka, redis) and the geo cache
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod metrics_core;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;

pub use api::middleware::{GeoIp2, GeoIp2Middleware, RemoteAddr, ResponseHeaderPolicy};
pub use services::geoip::{GeoFields, GeoRecord, GeoResolver, Resolution};
