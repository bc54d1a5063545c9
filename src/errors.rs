use std::fmt;

#[derive(Debug, Clone)]
pub enum ShortenerError {
    /// Short URL or user record absent from the datastore
    NotFound(String),
    /// Duplicate shortcode on insert
    AlreadyExists(String),
    /// Quota key missing for a user that was never initialized this cycle
    UserDoesNotExist(String),
    /// Config entry absent from the cache and pull not permitted
    CacheMiss(String),
    /// Warm-up write failed after a successful upstream fetch
    CachePut(String),
    /// Connectivity to the key-value store itself failed
    DataStore { endpoint: String, cause: String },
    /// Upstream configuration fetch failed
    ConfigFetch(String),
    /// Monthly generation or hit quota exhausted
    QuotaExceeded(String),
    Validation(String),
    Serialization(String),
}

impl ShortenerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortenerError::NotFound(_) => "E001",
            ShortenerError::AlreadyExists(_) => "E002",
            ShortenerError::UserDoesNotExist(_) => "E003",
            ShortenerError::CacheMiss(_) => "E004",
            ShortenerError::CachePut(_) => "E005",
            ShortenerError::DataStore { .. } => "E006",
            ShortenerError::ConfigFetch(_) => "E007",
            ShortenerError::QuotaExceeded(_) => "E008",
            ShortenerError::Validation(_) => "E009",
            ShortenerError::Serialization(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortenerError::NotFound(_) => "Resource Not Found",
            ShortenerError::AlreadyExists(_) => "Resource Already Exists",
            ShortenerError::UserDoesNotExist(_) => "User Does Not Exist",
            ShortenerError::CacheMiss(_) => "Cache Miss",
            ShortenerError::CachePut(_) => "Cache Put Error",
            ShortenerError::DataStore { .. } => "Data Store Error",
            ShortenerError::ConfigFetch(_) => "Config Fetch Error",
            ShortenerError::QuotaExceeded(_) => "Quota Exceeded",
            ShortenerError::Validation(_) => "Validation Error",
            ShortenerError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortenerError::NotFound(msg) => msg,
            ShortenerError::AlreadyExists(msg) => msg,
            ShortenerError::UserDoesNotExist(msg) => msg,
            ShortenerError::CacheMiss(msg) => msg,
            ShortenerError::CachePut(msg) => msg,
            ShortenerError::DataStore { cause, .. } => cause,
            ShortenerError::ConfigFetch(msg) => msg,
            ShortenerError::QuotaExceeded(msg) => msg,
            ShortenerError::Validation(msg) => msg,
            ShortenerError::Serialization(msg) => msg,
        }
    }

    /// Target endpoint for datastore connectivity failures, None otherwise
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ShortenerError::DataStore { endpoint, .. } => Some(endpoint),
            _ => None,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        match self {
            ShortenerError::DataStore { endpoint, cause } => {
                format!(
                    "{}: can't reach Redis at {}: {}",
                    self.error_type(),
                    endpoint,
                    cause
                )
            }
            _ => format!("{}: {}", self.error_type(), self.message()),
        }
    }
}

impl fmt::Display for ShortenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortenerError {}

// 便捷的构造函数
impl ShortenerError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortenerError::NotFound(msg.into())
    }

    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        ShortenerError::AlreadyExists(msg.into())
    }

    pub fn user_does_not_exist<T: Into<String>>(msg: T) -> Self {
        ShortenerError::UserDoesNotExist(msg.into())
    }

    pub fn cache_miss<T: Into<String>>(msg: T) -> Self {
        ShortenerError::CacheMiss(msg.into())
    }

    pub fn cache_put<T: Into<String>>(msg: T) -> Self {
        ShortenerError::CachePut(msg.into())
    }

    pub fn data_store<E: Into<String>, C: Into<String>>(endpoint: E, cause: C) -> Self {
        ShortenerError::DataStore {
            endpoint: endpoint.into(),
            cause: cause.into(),
        }
    }

    pub fn config_fetch<T: Into<String>>(msg: T) -> Self {
        ShortenerError::ConfigFetch(msg.into())
    }

    pub fn quota_exceeded<T: Into<String>>(msg: T) -> Self {
        ShortenerError::QuotaExceeded(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Validation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<serde_json::Error> for ShortenerError {
    fn from(err: serde_json::Error) -> Self {
        ShortenerError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ShortenerError {
    fn from(err: chrono::ParseError) -> Self {
        ShortenerError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortenerError>;
