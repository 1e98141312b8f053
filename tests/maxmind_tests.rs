//! MaxMindDatabase tests against the .mmdb fixtures in tests/data
//!
//! 城市库与国家库包含的网段：
//! - 81.2.69.0/24      → London, GB
//! - 216.160.83.56/29  → Milton, WA, US
//! - 89.160.20.112/28  → SE（仅国家和大洲）
//! 其余地址（包括私有地址）不在库中。

use std::path::PathBuf;

use geoip2_extras::config::StaticConfig;
use geoip2_extras::metrics_core::NoopMetrics;
use geoip2_extras::services::geoip::{
    GeoDatabase, GeoFields, GeoResolver, LookupError, MaxMindDatabase, Resolution,
};

const CITY_FILE: &str = "GeoIP2-City-Test.mmdb";
const COUNTRY_FILE: &str = "GeoIP2-Country-Test.mmdb";

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

fn open_dir() -> MaxMindDatabase {
    MaxMindDatabase::open(data_dir(), CITY_FILE, COUNTRY_FILE).unwrap()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_open_directory_loads_both_editions() {
    let db = open_dir();
    assert!(db.has_city_db());
    assert!(db.has_country_db());
}

#[test]
fn test_open_single_file_by_edition() {
    let city = MaxMindDatabase::open(data_dir().join(CITY_FILE), "unused", "unused").unwrap();
    assert!(city.has_city_db());
    assert!(!city.has_country_db());

    let country =
        MaxMindDatabase::open(data_dir().join(COUNTRY_FILE), "unused", "unused").unwrap();
    assert!(!country.has_city_db());
    assert!(country.has_country_db());
}

#[test]
fn test_open_directory_with_only_country_file() {
    let db = MaxMindDatabase::open(data_dir(), "missing.mmdb", COUNTRY_FILE).unwrap();
    assert!(!db.has_city_db());
    assert!(db.has_country_db());
}

// =============================================================================
// City lookups
// =============================================================================

#[test]
fn test_city_lookup_maps_every_field() {
    let db = open_dir();
    let fields = db.lookup_city("216.160.83.58").unwrap();

    assert_eq!(
        fields,
        GeoFields {
            country_code: Some("US".to_string()),
            country_name: Some("United States".to_string()),
            city: Some("Milton".to_string()),
            region: Some("WA".to_string()),
            postal_code: Some("98354".to_string()),
            latitude: Some(47.2513),
            longitude: Some(-122.3149),
            dma_code: Some(819),
            time_zone: Some("America/Los_Angeles".to_string()),
            continent_code: Some("NA".to_string()),
            continent_name: Some("North America".to_string()),
            is_in_european_union: None,
        }
    );
}

#[test]
fn test_city_lookup_with_missing_fields() {
    let db = open_dir();
    let fields = db.lookup_city("81.2.69.142").unwrap();

    assert_eq!(fields.country_code.as_deref(), Some("GB"));
    assert_eq!(fields.city.as_deref(), Some("London"));
    assert_eq!(fields.region.as_deref(), Some("ENG"));
    assert_eq!(fields.time_zone.as_deref(), Some("Europe/London"));
    assert_eq!(fields.is_in_european_union, Some(false));
    assert!(fields.postal_code.is_none());
    assert!(fields.dma_code.is_none());
}

#[test]
fn test_city_lookup_country_level_record() {
    let db = open_dir();
    let fields = db.lookup_city("89.160.20.120").unwrap();

    assert_eq!(fields.country_code.as_deref(), Some("SE"));
    assert_eq!(fields.is_in_european_union, Some(true));
    assert!(fields.city.is_none());
    assert!(fields.latitude.is_none());
}

#[test]
fn test_city_lookup_private_address_not_found() {
    let db = open_dir();
    for ip in ["10.0.0.1", "192.168.0.1", "127.0.0.1"] {
        assert_eq!(
            db.lookup_city(ip),
            Err(LookupError::AddressNotFound(ip.to_string()))
        );
    }
}

#[test]
fn test_city_lookup_unparseable_address_is_database_error() {
    let db = open_dir();
    assert!(matches!(
        db.lookup_city("not-an-ip"),
        Err(LookupError::Database(_))
    ));
    assert!(matches!(db.lookup_city(""), Err(LookupError::Database(_))));
}

#[test]
fn test_ipv6_in_ipv4_database_is_database_error() {
    let db = open_dir();
    assert!(matches!(
        db.lookup_city("2001:db8::1"),
        Err(LookupError::Database(_))
    ));
}

// =============================================================================
// Country lookups
// =============================================================================

#[test]
fn test_country_lookup_maps_country_fields_only() {
    let db = open_dir();
    let fields = db.lookup_country("216.160.83.58").unwrap();

    assert_eq!(
        fields,
        GeoFields {
            country_code: Some("US".to_string()),
            country_name: Some("United States".to_string()),
            continent_code: Some("NA".to_string()),
            continent_name: Some("North America".to_string()),
            ..GeoFields::default()
        }
    );
}

#[test]
fn test_country_lookup_outcomes() {
    let db = open_dir();

    let fields = db.lookup_country("89.160.20.112").unwrap();
    assert_eq!(fields.country_name.as_deref(), Some("Sweden"));
    assert_eq!(fields.continent_code.as_deref(), Some("EU"));

    assert_eq!(
        db.lookup_country("10.0.0.1"),
        Err(LookupError::AddressNotFound("10.0.0.1".to_string()))
    );
    assert!(matches!(
        db.lookup_country("999.1.1.1"),
        Err(LookupError::Database(_))
    ));
}

// =============================================================================
// Resolver over a real database
// =============================================================================

fn fixture_config() -> StaticConfig {
    let mut config = StaticConfig::default();
    config.geoip.path = Some(data_dir().to_string_lossy().into_owned());
    config.geoip.city_file = CITY_FILE.to_string();
    config.geoip.country_file = COUNTRY_FILE.to_string();
    config
}

#[tokio::test]
async fn test_resolver_from_config_classifies_outcomes() {
    let resolver = GeoResolver::from_config(&fixture_config(), NoopMetrics::arc()).unwrap();

    match resolver.resolve("81.2.69.142").await {
        Resolution::Resolved(record) => {
            assert_eq!(record.remote_addr, "81.2.69.142");
            assert_eq!(record.fields.city.as_deref(), Some("London"));
        }
        other => panic!("expected resolved record, got {:?}", other),
    }

    match resolver.resolve("10.0.0.1").await {
        Resolution::Unknown(record) => assert!(record.is_unknown()),
        other => panic!("expected unknown record, got {:?}", other),
    }
    assert!(resolver.cache().get("10.0.0.1").await.is_some());

    assert_eq!(resolver.resolve("not-an-ip").await, Resolution::Failed);
    assert!(resolver.cache().get("not-an-ip").await.is_none());
}
