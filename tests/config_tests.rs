//! Configuration loading tests

use std::io::Write;

use geoip2_extras::config::StaticConfig;

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
[server]
debug = true

[cache]
type = "memory"
default_ttl = 30
key_prefix = "geo::"

[geoip]
path = "/usr/share/GeoIP"
debug_header = "X-Geo-Debug"
"#
    )
    .unwrap();

    let config = StaticConfig::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.cache.default_ttl, 30);
    assert_eq!(config.cache.key_prefix, "geo::");
    assert_eq!(config.geoip.path.as_deref(), Some("/usr/share/GeoIP"));
    assert_eq!(config.geoip.debug_header.as_deref(), Some("X-Geo-Debug"));
    assert!(config.add_response_headers());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let config = StaticConfig::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.cache.cache_type, "memory");
    assert_eq!(config.geoip.city_file, "GeoLite2-City.mmdb");
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = StaticConfig::default();
    config.geoip.debug_query_param = Some("geo".to_string());
    config.save_to_file(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let reloaded = StaticConfig::from_toml_str(&content).unwrap();
    assert_eq!(reloaded.geoip.debug_query_param.as_deref(), Some("geo"));
}
