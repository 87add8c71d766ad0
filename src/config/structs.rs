use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShortenerError};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment prefix for overrides, e.g. `LV__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "LV";

/// Single variable that selects the backing table/collection name.
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// Built once in `main` and handed to the runtime by value; nothing
/// reads it through a global.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// `TABLE_NAME` is applied last and wins over `LV__STORE__TABLE_NAME`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ShortenerError::config(format!("failed to build config: {e}")))?;

        let config: StaticConfig = settings
            .try_deserialize()
            .map_err(|e| ShortenerError::config(format!("failed to deserialize config: {e}")))?;

        let config = config.with_table_name_override(std::env::var(TABLE_NAME_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace the store table name when the override is present and non-empty.
    pub fn with_table_name_override(mut self, table_name: Option<String>) -> Self {
        if let Some(name) = table_name.filter(|n| !n.trim().is_empty()) {
            self.store.table_name = name;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.table_name.trim().is_empty() {
            return Err(ShortenerError::config("store.table_name cannot be empty"));
        }
        if !StoreConfig::SUPPORTED_BACKENDS.contains(&self.store.backend.as_str()) {
            return Err(ShortenerError::config(format!(
                "unknown store backend '{}'. Valid: {}",
                self.store.backend,
                StoreConfig::SUPPORTED_BACKENDS.join(", ")
            )));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ShortenerError::config(format!(
                "invalid logging.format '{}'. Valid: text, json",
                self.logging.format
            )));
        }
        if self.server.port == 0 {
            return Err(ShortenerError::config("server.port must be non-zero"));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

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
    /// Path segment placed between host and code in `shortUrl`.
    /// Empty means the code sits directly under the host.
    #[serde(default = "default_stage")]
    pub stage: String,
}

/// 存储后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_backend")]
    pub backend: String,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default)]
    pub redis: RedisConfig,
}

impl StoreConfig {
    pub const SUPPORTED_BACKENDS: &'static [&'static str] = &["memory", "redis"];
}

/// Redis 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
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

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_stage() -> String {
    "prod".to_string()
}

fn default_store_backend() -> String {
    "memory".to_string()
}

fn default_table_name() -> String {
    "UrlShortener".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/".to_string()
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            stage: default_stage(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            table_name: default_table_name(),
            redis: RedisConfig::default(),
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
