use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurlError {
    BadInput(String),
    Unauthorized(String),
    NotFound(String),
    StoreUnavailable(String),
    StoreExhausted(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
    Client(String),
}

impl SurlError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SurlError::BadInput(_) => "E001",
            SurlError::Unauthorized(_) => "E002",
            SurlError::NotFound(_) => "E003",
            SurlError::StoreUnavailable(_) => "E004",
            SurlError::StoreExhausted(_) => "E005",
            SurlError::Config(_) => "E006",
            SurlError::FileOperation(_) => "E007",
            SurlError::Serialization(_) => "E008",
            SurlError::Client(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SurlError::BadInput(_) => "Bad Input",
            SurlError::Unauthorized(_) => "Unauthorized",
            SurlError::NotFound(_) => "Resource Not Found",
            SurlError::StoreUnavailable(_) => "Store Unavailable",
            SurlError::StoreExhausted(_) => "Token Space Exhausted",
            SurlError::Config(_) => "Configuration Error",
            SurlError::FileOperation(_) => "File Operation Error",
            SurlError::Serialization(_) => "Serialization Error",
            SurlError::Client(_) => "Client Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SurlError::BadInput(msg)
            | SurlError::Unauthorized(msg)
            | SurlError::NotFound(msg)
            | SurlError::StoreUnavailable(msg)
            | SurlError::StoreExhausted(msg)
            | SurlError::Config(msg)
            | SurlError::FileOperation(msg)
            | SurlError::Serialization(msg)
            | SurlError::Client(msg) => msg,
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

impl fmt::Display for SurlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SurlError {}

// 便捷的构造函数
impl SurlError {
    pub fn bad_input<T: Into<String>>(msg: T) -> Self {
        SurlError::BadInput(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        SurlError::Unauthorized(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SurlError::NotFound(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        SurlError::StoreUnavailable(msg.into())
    }

    pub fn store_exhausted<T: Into<String>>(msg: T) -> Self {
        SurlError::StoreExhausted(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        SurlError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SurlError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        SurlError::Serialization(msg.into())
    }

    pub fn client<T: Into<String>>(msg: T) -> Self {
        SurlError::Client(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<redis::RedisError> for SurlError {
    fn from(err: redis::RedisError) -> Self {
        SurlError::StoreUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for SurlError {
    fn from(err: std::io::Error) -> Self {
        SurlError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SurlError {
    fn from(err: serde_json::Error) -> Self {
        SurlError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SurlError {
    fn from(err: toml::de::Error) -> Self {
        SurlError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for SurlError {
    fn from(err: toml::ser::Error) -> Self {
        SurlError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for SurlError {
    fn from(err: config::ConfigError) -> Self {
        SurlError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SurlError>;
