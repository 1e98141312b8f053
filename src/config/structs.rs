use serde::{Deserialize, Serialize};

use crate::errors::{GeoIpError, Result};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 示例服务器地址、端口、CPU 数量、debug 开关
/// - cache: 缓存后端配置
/// - geoip: GeoIP2 数据库与响应头配置
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub geoip: GeoIpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：GEOIP2，分隔符：__
    /// 示例：GEOIP2__CACHE__TYPE=redis
    pub fn load(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix("GEOIP2")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings = builder
            .build()
            .map_err(|e| GeoIpError::config(format!("Failed to build config: {}", e)))?;
        let config = settings
            .try_deserialize::<StaticConfig>()
            .map_err(|e| GeoIpError::config(format!("Failed to deserialize config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 字符串解析（不读取环境变量）
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StaticConfig = toml::from_str(content)
            .map_err(|e| GeoIpError::config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache.key_prefix.is_empty() {
            return Err(GeoIpError::config(
                "cache.key_prefix must not be empty, geo entries would collide with other keys",
            ));
        }
        if let Some(ref header) = self.geoip.debug_header
            && actix_web::http::header::HeaderName::from_bytes(header.as_bytes()).is_err()
        {
            return Err(GeoIpError::config(format!(
                "geoip.debug_header '{}' is not a valid header name",
                header
            )));
        }
        Ok(())
    }

    /// 是否总是添加响应头，未配置时跟随 server.debug
    pub fn add_response_headers(&self) -> bool {
        self.geoip
            .add_response_headers
            .unwrap_or(self.server.debug)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GeoIpError::serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// 调试模式，决定 geoip.add_response_headers 的默认值
    #[serde(default)]
    pub debug: bool,
}

/// 缓存系统配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    #[serde(default = "default_cache_type")]
    pub cache_type: String,
    /// 地理数据缓存时间（秒），0 表示不过期
    #[serde(default = "default_cache_ttl")]
    pub default_ttl: u64,
    #[serde(default = "default_cache_key_prefix")]
    pub key_prefix: String,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Redis 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
}

/// 内存缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_capacity")]
    pub max_capacity: u64,
}

/// GeoIP2 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    /// 数据库目录或单个 .mmdb 文件
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_city_file")]
    pub city_file: String,
    #[serde(default = "default_country_file")]
    pub country_file: String,
    /// 总是添加 X-GeoIP2-* 响应头，未设置时跟随 server.debug
    #[serde(default)]
    pub add_response_headers: Option<bool>,
    /// 请求携带此头时添加响应头
    #[serde(default = "default_debug_header")]
    pub debug_header: Option<String>,
    /// 请求携带此查询参数时添加响应头
    #[serde(default)]
    pub debug_query_param: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_cache_type() -> String {
    "memory".to_string()
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_cache_key_prefix() -> String {
    "geoip2-extras::".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/".to_string()
}

fn default_memory_capacity() -> u64 {
    10000
}

fn default_city_file() -> String {
    "GeoLite2-City.mmdb".to_string()
}

fn default_country_file() -> String {
    "GeoLite2-Country.mmdb".to_string()
}

fn default_debug_header() -> Option<String> {
    Some("X-GeoIP2-Debug".to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            debug: false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: default_cache_type(),
            default_ttl: default_cache_ttl(),
            key_prefix: default_cache_key_prefix(),
            redis: RedisConfig::default(),
            memory: MemoryConfig::default(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_memory_capacity(),
        }
    }
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            path: None,
            city_file: default_city_file(),
            country_file: default_country_file(),
            add_response_headers: None,
            debug_header: default_debug_header(),
            debug_query_param: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
