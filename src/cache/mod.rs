pub mod factory;
pub mod geo_cache;
pub mod moka;
pub mod redis;
pub mod traits;

pub use factory::CacheFactory;
pub use geo_cache::GeoCache;
pub use traits::KeyValueCache;
