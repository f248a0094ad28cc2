//! Blocking HTTP client for a running surl server

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

use super::config::ClientConfig;
use crate::errors::{Result, SurlError};

/// HTTP 请求超时时间
const HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize)]
struct ShortUrlBody {
    #[serde(rename = "shortUrl")]
    short_url: String,
}

#[derive(Deserialize)]
struct ListBody {
    #[serde(default)]
    data: HashMap<String, String>,
}

pub struct SurlClient {
    agent: Agent,
    config: ClientConfig,
}

impl SurlClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, config }
    }

    /// POST /shorten，返回 token
    ///
    /// 服务端开启鉴权时返回 `{"shortUrl": ...}`，否则返回纯文本 token。
    pub fn shorten(&self, target: &str) -> Result<String> {
        let url = format!("{}/shorten", self.config.require_host()?);
        debug!("POST {}", url);

        let resp = self
            .agent
            .post(&url)
            .send_form([("url", target)])
            .map_err(|e| SurlError::client(format!("Request to {} failed: {}", url, e)))?;
        let body = Self::read_ok_body(resp)?;

        match serde_json::from_str::<ShortUrlBody>(&body) {
            Ok(parsed) => Ok(parsed.short_url),
            Err(_) => Ok(body.trim().to_string()),
        }
    }

    /// GET /list?code=
    pub fn list(&self) -> Result<HashMap<String, String>> {
        let url = format!("{}/list", self.config.require_host()?);
        let code = self.config.require_code()?;
        debug!("GET {}", url);

        let resp = self
            .agent
            .get(&url)
            .query("code", code)
            .call()
            .map_err(|e| SurlError::client(format!("Request to {} failed: {}", url, e)))?;
        let body = Self::read_ok_body(resp)?;

        let parsed: ListBody = serde_json::from_str(&body)?;
        Ok(parsed.data)
    }

    /// DELETE /d/{token}?code=
    pub fn delete(&self, token: &str) -> Result<String> {
        let url = format!(
            "{}/d/{}",
            self.config.require_host()?,
            urlencoding::encode(token)
        );
        let code = self.config.require_code()?;
        debug!("DELETE {}", url);

        let resp = self
            .agent
            .delete(&url)
            .query("code", code)
            .call()
            .map_err(|e| SurlError::client(format!("Request to {} failed: {}", url, e)))?;
        let body = Self::read_ok_body(resp)?;

        match serde_json::from_str::<ShortUrlBody>(&body) {
            Ok(parsed) => Ok(parsed.short_url),
            Err(_) => Ok(token.to_string()),
        }
    }

    /// `<host>/r/<token>`
    pub fn open_url(&self, token: &str) -> Result<String> {
        Ok(format!(
            "{}/r/{}",
            self.config.require_host()?,
            urlencoding::encode(token)
        ))
    }

    fn read_ok_body(resp: ureq::http::Response<ureq::Body>) -> Result<String> {
        let status = resp.status();
        let body = resp
            .into_body()
            .read_to_string()
            .map_err(|e| SurlError::client(format!("Failed to read response body: {}", e)))?;

        if status != ureq::http::StatusCode::OK {
            return Err(SurlError::client(format!(
                "Server responded with {}: {}",
                status,
                body.trim()
            )));
        }
        Ok(body)
    }
}

/// 用系统默认浏览器打开 URL
pub fn open_in_browser(url: &str) -> Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = std::process::Command::new("cmd");
        c.args(["/c", "start", "", url]);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = std::process::Command::new("open");
        c.arg(url);
        c
    } else {
        let mut c = std::process::Command::new("xdg-open");
        c.arg(url);
        c
    };

    let status = command
        .status()
        .map_err(|e| SurlError::client(format!("Failed to launch browser: {}", e)))?;
    if !status.success() {
        return Err(SurlError::client(format!(
            "Browser command exited with {}",
            status
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(host: &str, code: &str) -> SurlClient {
        SurlClient::new(ClientConfig {
            host_url: host.to_string(),
            auth_code: code.to_string(),
        })
    }

    #[test]
    fn test_open_url() {
        let c = client("https://s.example.com/", "");
        assert_eq!(c.open_url("aB3d").unwrap(), "https://s.example.com/r/aB3d");
    }

    #[test]
    fn test_requires_host() {
        let c = client("", "secret");
        assert!(matches!(c.shorten("https://example.com"), Err(SurlError::Client(_))));
        assert!(matches!(c.open_url("abc"), Err(SurlError::Client(_))));
    }

    #[test]
    fn test_list_requires_code() {
        let c = client("http://127.0.0.1:9", "");
        assert!(matches!(c.list(), Err(SurlError::Client(_))));
        assert!(matches!(c.delete("abc"), Err(SurlError::Client(_))));
    }
}
