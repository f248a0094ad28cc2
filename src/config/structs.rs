use serde::{Deserialize, Serialize};

use crate::errors::{Result, SurlError};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（启动时从 TOML 与环境变量加载一次）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量
/// - storage: 后端选择与 Redis 连接参数
/// - auth: 特权操作（list/delete）的授权开关与口令
/// - token: 短码长度与碰撞处理策略
/// - logging: 日志配置
///
/// 该值在启动时构造后按引用传入各服务，不作为全局状态访问。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub token: TokenConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 旧版部署使用的环境变量（REDIS_HOST / REDIS_PW / REDIS_DB / CODE / PORT）
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    pub redis_host: Option<String>,
    pub redis_password: Option<String>,
    pub redis_db: Option<String>,
    pub code: Option<String>,
    pub port: Option<String>,
}

impl LegacyEnv {
    pub fn from_process() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            redis_host: var("REDIS_HOST"),
            redis_password: var("REDIS_PW"),
            redis_db: var("REDIS_DB"),
            code: var("CODE"),
            port: var("PORT"),
        }
    }
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：旧版 ENV > SURL ENV > config.toml > 默认值
    /// ENV 前缀：SURL，分隔符：__
    /// 示例：SURL__SERVER__PORT=9999
    pub fn load_from(path: &str) -> Result<Self> {
        Self::build(path, LegacyEnv::from_process())
    }

    pub fn build(path: &str, legacy: LegacyEnv) -> Result<Self> {
        Self::build_with_env(path, None, legacy)
    }

    /// `env` 为 None 时读取进程环境变量，否则使用给定的键值表
    pub fn build_with_env(
        path: &str,
        env: Option<config::Map<String, String>>,
        legacy: LegacyEnv,
    ) -> Result<Self> {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 SURL，分隔符 __
            // 值保持字符串，由反序列化按字段类型转换；auth.code 的前导 0 不会丢
            .add_source(
                Environment::with_prefix("SURL")
                    .separator("__")
                    .try_parsing(false)
                    .source(env),
            )
            // 3. 旧版环境变量
            .set_override_option("storage.redis_host", legacy.redis_host)?
            .set_override_option("storage.redis_password", legacy.redis_password)?
            .set_override_option("storage.redis_db", legacy.redis_db)?
            .set_override_option("auth.code", legacy.code)?
            .set_override_option("server.port", legacy.port)?;

        let config: StaticConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }

        Ok(config)
    }

    /// 校验配置取值范围
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TOKEN_LENGTH).contains(&self.token.length) {
            return Err(SurlError::config(format!(
                "token.length must be between 1 and {}, got {}",
                MAX_TOKEN_LENGTH, self.token.length
            )));
        }
        if self.token.max_attempts == 0 {
            return Err(SurlError::config("token.max_attempts must be at least 1"));
        }
        if !matches!(self.storage.backend.as_str(), "redis" | "memory") {
            return Err(SurlError::config(format!(
                "Unknown storage backend '{}'. Valid: redis, memory",
                self.storage.backend
            )));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(SurlError::config(format!(
                "Unknown log format '{}'. Valid: text, json",
                self.logging.format
            )));
        }
        if self.storage.timeout_ms == 0 {
            return Err(SurlError::config("storage.timeout_ms must be positive"));
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
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
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

/// 短码最大长度
pub const MAX_TOKEN_LENGTH: usize = 64;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 存储后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// 完整 Redis URL，设置后忽略 host/password/db
    #[serde(default)]
    pub redis_url: String,
    #[serde(default = "default_redis_host")]
    pub redis_host: String,
    #[serde(default)]
    pub redis_password: String,
    #[serde(default)]
    pub redis_db: u32,
    #[serde(default)]
    pub key_prefix: String,
    /// 单次后端调用超时（毫秒）
    #[serde(default = "default_storage_timeout_ms")]
    pub timeout_ms: u64,
    /// SCAN 每页建议数量
    #[serde(default = "default_scan_count")]
    pub scan_count: usize,
}

impl StorageConfig {
    /// 组合 Redis 连接 URL
    pub fn connection_url(&self) -> String {
        if !self.redis_url.is_empty() {
            return self.redis_url.clone();
        }

        let host = self
            .redis_host
            .trim_start_matches("redis://")
            .trim_end_matches('/');

        if self.redis_password.is_empty() {
            format!("redis://{}/{}", host, self.redis_db)
        } else {
            format!(
                "redis://:{}@{}/{}",
                urlencoding::encode(&self.redis_password),
                host,
                self.redis_db
            )
        }
    }
}

/// 授权配置
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 是否对 list / delete 启用口令校验
    #[serde(default = "default_require_auth")]
    pub require_auth: bool,
    #[serde(default)]
    pub code: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("require_auth", &self.require_auth)
            .field("code", &if self.code.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// 短码生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_token_length")]
    pub length: usize,
    /// 写入前检查短码是否已存在（SET NX + 重试）
    #[serde(default = "default_collision_check")]
    pub collision_check: bool,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
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
    #[serde(default)]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_storage_backend() -> String {
    "redis".to_string()
}

fn default_redis_host() -> String {
    "127.0.0.1:6379".to_string()
}

fn default_storage_timeout_ms() -> u64 {
    3000
}

fn default_scan_count() -> usize {
    100
}

fn default_require_auth() -> bool {
    true
}

fn default_token_length() -> usize {
    8
}

fn default_collision_check() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    5
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            redis_url: String::new(),
            redis_host: default_redis_host(),
            redis_password: String::new(),
            redis_db: 0,
            key_prefix: String::new(),
            timeout_ms: default_storage_timeout_ms(),
            scan_count: default_scan_count(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_auth: default_require_auth(),
            code: String::new(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            length: default_token_length(),
            collision_check: default_collision_check(),
            max_attempts: default_max_attempts(),
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
            enable_rotation: false,
        }
    }
}
