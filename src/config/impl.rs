use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns the loaded configuration, or defaults when `init_config` has not
/// been called (library users configure the middleware explicitly).
pub fn get_config() -> Arc<StaticConfig> {
    match CONFIG.get() {
        Some(config) => config.load_full(),
        None => Arc::new(StaticConfig::default()),
    }
}

/// Initialize the global configuration
///
/// Loads configuration from `path` (TOML, optional) and `GEOIP2__*`
/// environment variables. Calling it again replaces the stored value.
///
/// # Examples
/// ```no_run
/// use geoip2_extras::config::init_config;
/// init_config("config.toml").unwrap();
/// ```
pub fn init_config(path: &str) -> Result<Arc<StaticConfig>> {
    let loaded = Arc::new(StaticConfig::load(path)?);
    match CONFIG.get() {
        Some(existing) => existing.store(Arc::clone(&loaded)),
        None => {
            let _ = CONFIG.set(ArcSwap::new(Arc::clone(&loaded)));
        }
    }
    Ok(loaded)
}
