//! Service layer
//!
//! GeoIP2 resolution shared by the middleware and the `lookup` command.

pub mod geoip;

pub use geoip::{GeoDatabase, GeoFields, GeoRecord, GeoResolver, LookupError, Resolution};
