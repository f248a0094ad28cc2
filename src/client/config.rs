//! Client config file (`host_url` + `auth_code`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{Result, SurlError};

pub const CLIENT_CONFIG_ENV: &str = "SURL_CLIENT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub host_url: String,
    #[serde(default)]
    pub auth_code: String,
}

impl ClientConfig {
    /// 读取配置；文件不存在时创建一个空配置
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Client config {} not found, creating", path.display());
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SurlError::file_operation(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SurlError::file_operation(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| {
            SurlError::file_operation(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// 去掉末尾的 `/`，拼接路径时不会出现 `//`
    pub fn base_url(&self) -> &str {
        self.host_url.trim_end_matches('/')
    }

    pub fn require_host(&self) -> Result<&str> {
        if self.host_url.is_empty() {
            return Err(SurlError::client(
                "Host URL not set. Please set the host URL using the 'set-host' command.",
            ));
        }
        Ok(self.base_url())
    }

    pub fn require_code(&self) -> Result<&str> {
        if self.auth_code.is_empty() {
            return Err(SurlError::client(
                "Auth code not set. Please set the auth code using the 'set-code' command.",
            ));
        }
        Ok(&self.auth_code)
    }
}

/// 配置文件路径：`--client-config` > `$SURL_CLIENT_CONFIG` > `$HOME/.config/surl/config.toml`
pub fn resolve_config_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Ok(path) = std::env::var(CLIENT_CONFIG_ENV)
        && !path.is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let home = std::env::var("HOME")
        .ok()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| {
            SurlError::config(format!(
                "HOME is not set; pass --client-config or set {}",
                CLIENT_CONFIG_ENV
            ))
        })?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("surl")
        .join("config.toml"))
}
