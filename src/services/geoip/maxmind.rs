//! MaxMind GeoIP2 / GeoLite2 数据库实现
//!
//! 支持两种加载方式：
//! 1. `path` 为目录 → 加载其中的城市库和国家库（存在即加载）
//! 2. `path` 为单个 .mmdb 文件 → 按 metadata.database_type 判断是城市库还是国家库

use std::net::IpAddr;
use std::path::Path;

use maxminddb::{Reader, geoip2};
use tracing::{debug, info, trace};

use super::provider::{GeoDatabase, LookupError};
use super::record::GeoFields;
use crate::errors::{GeoIpError, Result};

/// MaxMind 数据库
pub struct MaxMindDatabase {
    city: Option<Reader<Vec<u8>>>,
    country: Option<Reader<Vec<u8>>>,
}

/// 数据库版本（由 metadata.database_type 推断）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseEdition {
    City,
    Country,
}

impl DatabaseEdition {
    /// 例如 "GeoLite2-City"、"GeoIP2-Country"
    pub fn from_database_type(database_type: &str) -> Option<Self> {
        if database_type.ends_with("City") {
            Some(DatabaseEdition::City)
        } else if database_type.ends_with("Country") {
            Some(DatabaseEdition::Country)
        } else {
            None
        }
    }
}

impl MaxMindDatabase {
    /// 从目录或文件加载
    ///
    /// 目录中城市库和国家库都不可用时返回错误。
    pub fn open<P: AsRef<Path>>(path: P, city_file: &str, country_file: &str) -> Result<Self> {
        let path = path.as_ref();

        if path.is_dir() {
            let city = Self::open_optional(&path.join(city_file))?;
            let country = Self::open_optional(&path.join(country_file))?;
            if city.is_none() && country.is_none() {
                return Err(GeoIpError::database_open(format!(
                    "Could not load a database from {}",
                    path.display()
                )));
            }
            let database = Self { city, country };
            database.log_loaded(path);
            return Ok(database);
        }

        if path.is_file() {
            let reader = Reader::open_readfile(path)?;
            let database_type = reader.metadata.database_type.clone();
            let database = match DatabaseEdition::from_database_type(&database_type) {
                Some(DatabaseEdition::City) => Self {
                    city: Some(reader),
                    country: None,
                },
                Some(DatabaseEdition::Country) => Self {
                    city: None,
                    country: Some(reader),
                },
                None => {
                    return Err(GeoIpError::database_edition(format!(
                        "Unable to recognize database edition: {}",
                        database_type
                    )));
                }
            };
            database.log_loaded(path);
            return Ok(database);
        }

        Err(GeoIpError::database_open(format!(
            "GeoIP path is not a file or directory: {}",
            path.display()
        )))
    }

    /// 直接由已打开的 Reader 构造
    pub fn from_readers(city: Option<Reader<Vec<u8>>>, country: Option<Reader<Vec<u8>>>) -> Self {
        Self { city, country }
    }

    fn open_optional(file: &Path) -> Result<Option<Reader<Vec<u8>>>> {
        if !file.is_file() {
            debug!("GeoIP2: database file {} not present", file.display());
            return Ok(None);
        }
        Ok(Some(Reader::open_readfile(file)?))
    }

    fn log_loaded(&self, path: &Path) {
        info!(
            "GeoIP2: loaded database from {} (city: {}, country: {})",
            path.display(),
            self.city.is_some(),
            self.country.is_some()
        );
    }

    fn parse_ip(ip: &str) -> std::result::Result<IpAddr, LookupError> {
        ip.parse::<IpAddr>()
            .map_err(|_| LookupError::database(format!("invalid IP address: {:?}", ip)))
    }
}

impl GeoDatabase for MaxMindDatabase {
    fn has_city_db(&self) -> bool {
        self.city.is_some()
    }

    fn has_country_db(&self) -> bool {
        self.country.is_some()
    }

    fn lookup_city(&self, ip: &str) -> std::result::Result<GeoFields, LookupError> {
        let reader = self
            .city
            .as_ref()
            .ok_or_else(|| LookupError::database("city database not loaded"))?;
        let ip_addr = Self::parse_ip(ip)?;

        let result = reader
            .lookup(ip_addr)
            .map_err(|e| LookupError::database(e.to_string()))?;
        let city: geoip2::City = result
            .decode()
            .map_err(|e| LookupError::database(e.to_string()))?
            .ok_or_else(|| LookupError::AddressNotFound(ip.to_string()))?;

        let fields = GeoFields {
            country_code: city.country.iso_code.map(String::from),
            country_name: city.country.names.english.map(String::from),
            city: city.city.names.english.map(String::from),
            region: city
                .subdivisions
                .first()
                .and_then(|s| s.iso_code)
                .map(String::from),
            postal_code: city.postal.code.map(String::from),
            latitude: city.location.latitude,
            longitude: city.location.longitude,
            dma_code: city.location.metro_code,
            time_zone: city.location.time_zone.map(String::from),
            continent_code: city.continent.code.map(String::from),
            continent_name: city.continent.names.english.map(String::from),
            is_in_european_union: city.country.is_in_european_union,
        };

        trace!("MaxMind city lookup for {}: {:?}", ip, fields);
        Ok(fields)
    }

    fn lookup_country(&self, ip: &str) -> std::result::Result<GeoFields, LookupError> {
        let reader = self
            .country
            .as_ref()
            .ok_or_else(|| LookupError::database("country database not loaded"))?;
        let ip_addr = Self::parse_ip(ip)?;

        let result = reader
            .lookup(ip_addr)
            .map_err(|e| LookupError::database(e.to_string()))?;
        let country: geoip2::Country = result
            .decode()
            .map_err(|e| LookupError::database(e.to_string()))?
            .ok_or_else(|| LookupError::AddressNotFound(ip.to_string()))?;

        let fields = GeoFields {
            country_code: country.country.iso_code.map(String::from),
            country_name: country.country.names.english.map(String::from),
            continent_code: country.continent.code.map(String::from),
            continent_name: country.continent.names.english.map(String::from),
            is_in_european_union: country.country.is_in_european_union,
            ..GeoFields::default()
        };

        trace!("MaxMind country lookup for {}: {:?}", ip, fields);
        Ok(fields)
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_from_database_type() {
        assert_eq!(
            DatabaseEdition::from_database_type("GeoLite2-City"),
            Some(DatabaseEdition::City)
        );
        assert_eq!(
            DatabaseEdition::from_database_type("GeoIP2-Country"),
            Some(DatabaseEdition::Country)
        );
        assert_eq!(DatabaseEdition::from_database_type("GeoLite2-ASN"), None);
    }

    #[test]
    fn test_open_nonexistent_path() {
        let result = MaxMindDatabase::open(
            "/nonexistent/path/GeoIP",
            "GeoLite2-City.mmdb",
            "GeoLite2-Country.mmdb",
        );
        assert!(matches!(result, Err(GeoIpError::DatabaseOpen(_))));
    }

    #[test]
    fn test_open_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            MaxMindDatabase::open(dir.path(), "GeoLite2-City.mmdb", "GeoLite2-Country.mmdb");
        assert!(matches!(result, Err(GeoIpError::DatabaseOpen(_))));
    }

    #[test]
    fn test_open_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("GeoLite2-City.mmdb");
        std::fs::write(&file, b"definitely not a maxmind database").unwrap();

        // 单文件
        assert!(MaxMindDatabase::open(&file, "unused", "unused").is_err());
        // 目录中的损坏文件
        assert!(
            MaxMindDatabase::open(dir.path(), "GeoLite2-City.mmdb", "GeoLite2-Country.mmdb")
                .is_err()
        );
    }

    #[test]
    fn test_lookup_without_readers_is_database_error() {
        let db = MaxMindDatabase::from_readers(None, None);
        assert!(!db.has_city_db());
        assert!(!db.has_country_db());
        assert!(matches!(
            db.lookup_city("8.8.8.8"),
            Err(LookupError::Database(_))
        ));
        assert!(matches!(
            db.lookup_country("8.8.8.8"),
            Err(LookupError::Database(_))
        ));
    }
}
