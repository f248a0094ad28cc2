//! Authorization guard for privileged operations (list, delete)

use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::errors::{Result, SurlError};

/// 特权操作口令校验
///
/// - `required == false`：全部放行
/// - 未配置口令：拒绝所有特权请求
/// - 其余情况按常数时间比较
#[derive(Clone)]
pub struct AuthGuard {
    required: bool,
    secret: Option<Vec<u8>>,
}

impl AuthGuard {
    pub fn new(required: bool, secret: Option<&str>) -> Self {
        let secret = secret
            .filter(|s| !s.is_empty())
            .map(|s| s.as_bytes().to_vec());

        if required && secret.is_none() {
            warn!("Authorization is required but no code is configured; list/delete are disabled");
        }

        Self { required, secret }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.require_auth, Some(config.code.as_str()))
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn authorize(&self, provided: Option<&str>) -> Result<()> {
        if !self.required {
            return Ok(());
        }

        let Some(secret) = self.secret.as_deref() else {
            debug!("Privileged request denied: no code configured");
            return Err(SurlError::unauthorized("Unauthorized"));
        };

        let provided = provided.unwrap_or_default().as_bytes();
        if bool::from(provided.ct_eq(secret)) {
            Ok(())
        } else {
            debug!("Privileged request denied: code mismatch");
            Err(SurlError::unauthorized("Unauthorized"))
        }
    }
}

impl std::fmt::Debug for AuthGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGuard")
            .field("required", &self.required)
            .field("configured", &self.secret.is_some())
            .finish()
    }
}
