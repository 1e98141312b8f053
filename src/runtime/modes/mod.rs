//! Mode routing
//!
//! - Server mode (HTTP demo server wrapped by the GeoIP2 middleware)
//! - Lookup mode (resolve a single address and print it)

pub mod lookup;
#[cfg(feature = "server")]
pub mod server;

pub use lookup::run_lookup;
#[cfg(feature = "server")]
pub use server::run_server;
