use std::fmt;

#[derive(Debug, Clone)]
pub enum ShortenerError {
    InvalidInput(String),
    InvalidCode(String),
    NotFound(String),
    ExhaustedRetries(String),
    StoreConnection(String),
    StoreOperation(String),
    Serialization(String),
    Config(String),
}

impl ShortenerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortenerError::InvalidInput(_) => "E001",
            ShortenerError::InvalidCode(_) => "E002",
            ShortenerError::NotFound(_) => "E003",
            ShortenerError::ExhaustedRetries(_) => "E004",
            ShortenerError::StoreConnection(_) => "E005",
            ShortenerError::StoreOperation(_) => "E006",
            ShortenerError::Serialization(_) => "E007",
            ShortenerError::Config(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortenerError::InvalidInput(_) => "Invalid Input",
            ShortenerError::InvalidCode(_) => "Invalid Short Code",
            ShortenerError::NotFound(_) => "Resource Not Found",
            ShortenerError::ExhaustedRetries(_) => "Code Generation Exhausted",
            ShortenerError::StoreConnection(_) => "Store Connection Error",
            ShortenerError::StoreOperation(_) => "Store Operation Error",
            ShortenerError::Serialization(_) => "Serialization Error",
            ShortenerError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortenerError::InvalidInput(msg)
            | ShortenerError::InvalidCode(msg)
            | ShortenerError::NotFound(msg)
            | ShortenerError::ExhaustedRetries(msg)
            | ShortenerError::StoreConnection(msg)
            | ShortenerError::StoreOperation(msg)
            | ShortenerError::Serialization(msg)
            | ShortenerError::Config(msg) => msg,
        }
    }

    /// HTTP status the router answers with for this error.
    ///
    /// Everything that is not the caller's fault collapses to 500.
    pub fn http_status(&self) -> u16 {
        match self {
            ShortenerError::InvalidInput(_) | ShortenerError::InvalidCode(_) => 400,
            ShortenerError::NotFound(_) => 404,
            _ => 500,
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

impl fmt::Display for ShortenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortenerError {}

// 便捷的构造函数
impl ShortenerError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        ShortenerError::InvalidInput(msg.into())
    }

    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        ShortenerError::InvalidCode(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortenerError::NotFound(msg.into())
    }

    pub fn exhausted_retries<T: Into<String>>(msg: T) -> Self {
        ShortenerError::ExhaustedRetries(msg.into())
    }

    pub fn store_connection<T: Into<String>>(msg: T) -> Self {
        ShortenerError::StoreConnection(msg.into())
    }

    pub fn store_operation<T: Into<String>>(msg: T) -> Self {
        ShortenerError::StoreOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Config(msg.into())
    }
}

impl From<redis::RedisError> for ShortenerError {
    fn from(err: redis::RedisError) -> Self {
        // 连接失败在 RedisStore::connect 中单独映射
        ShortenerError::StoreOperation(err.to_string())
    }
}

impl From<std::io::Error> for ShortenerError {
    fn from(err: std::io::Error) -> Self {
        ShortenerError::StoreOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ShortenerError {
    fn from(err: serde_json::Error) -> Self {
        ShortenerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortenerError>;
