use std::fmt;

#[derive(Debug, Clone)]
pub enum GeoIpError {
    CacheConnection(String),
    CacheBackendNotFound(String),
    DatabaseOpen(String),
    DatabaseEdition(String),
    Serialization(String),
    Config(String),
    FileOperation(String),
}

impl GeoIpError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GeoIpError::CacheConnection(_) => "E001",
            GeoIpError::CacheBackendNotFound(_) => "E002",
            GeoIpError::DatabaseOpen(_) => "E003",
            GeoIpError::DatabaseEdition(_) => "E004",
            GeoIpError::Serialization(_) => "E005",
            GeoIpError::Config(_) => "E006",
            GeoIpError::FileOperation(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GeoIpError::CacheConnection(_) => "Cache Connection Error",
            GeoIpError::CacheBackendNotFound(_) => "Cache Backend Not Found",
            GeoIpError::DatabaseOpen(_) => "GeoIP Database Open Error",
            GeoIpError::DatabaseEdition(_) => "GeoIP Database Edition Error",
            GeoIpError::Serialization(_) => "Serialization Error",
            GeoIpError::Config(_) => "Configuration Error",
            GeoIpError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            GeoIpError::CacheConnection(msg) => msg,
            GeoIpError::CacheBackendNotFound(msg) => msg,
            GeoIpError::DatabaseOpen(msg) => msg,
            GeoIpError::DatabaseEdition(msg) => msg,
            GeoIpError::Serialization(msg) => msg,
            GeoIpError::Config(msg) => msg,
            GeoIpError::FileOperation(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GeoIpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GeoIpError {}

// 便捷的构造函数
impl GeoIpError {
    pub fn cache_connection<T: Into<String>>(msg: T) -> Self {
        GeoIpError::CacheConnection(msg.into())
    }

    pub fn cache_backend_not_found<T: Into<String>>(msg: T) -> Self {
        GeoIpError::CacheBackendNotFound(msg.into())
    }

    pub fn database_open<T: Into<String>>(msg: T) -> Self {
        GeoIpError::DatabaseOpen(msg.into())
    }

    pub fn database_edition<T: Into<String>>(msg: T) -> Self {
        GeoIpError::DatabaseEdition(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GeoIpError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        GeoIpError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        GeoIpError::FileOperation(msg.into())
    }
}

impl From<std::io::Error> for GeoIpError {
    fn from(err: std::io::Error) -> Self {
        GeoIpError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GeoIpError {
    fn from(err: serde_json::Error) -> Self {
        GeoIpError::Serialization(err.to_string())
    }
}

impl From<maxminddb::MaxMindDbError> for GeoIpError {
    fn from(err: maxminddb::MaxMindDbError) -> Self {
        GeoIpError::DatabaseOpen(err.to_string())
    }
}

impl From<redis::RedisError> for GeoIpError {
    fn from(err: redis::RedisError) -> Self {
        GeoIpError::CacheConnection(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeoIpError>;
