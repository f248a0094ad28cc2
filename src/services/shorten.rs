//! Shortening service
//!
//! Orchestrates token generation, the mapping store and the authorization
//! guard into the four operations exposed over HTTP: create, resolve, list
//! and delete. Every call is independent; the only state is the immutable
//! store handle, generator and guard.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::auth::AuthGuard;
use super::token::TokenGenerator;
use crate::config::StaticConfig;
use crate::errors::{Result, SurlError};
use crate::storage::MappingStore;

/// How `create` deals with a generated token that already exists
#[derive(Debug, Clone, Copy)]
pub struct CollisionPolicy {
    /// `false` keeps the legacy overwrite-on-collision behaviour
    pub check: bool,
    pub max_attempts: u32,
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        Self {
            check: true,
            max_attempts: 5,
        }
    }
}

pub struct ShortenService {
    store: Arc<dyn MappingStore>,
    tokens: TokenGenerator,
    guard: AuthGuard,
    collision: CollisionPolicy,
}

impl ShortenService {
    pub fn new(
        store: Arc<dyn MappingStore>,
        tokens: TokenGenerator,
        guard: AuthGuard,
        collision: CollisionPolicy,
    ) -> Self {
        Self {
            store,
            tokens,
            guard,
            collision,
        }
    }

    /// 按静态配置组装服务
    pub fn from_config(store: Arc<dyn MappingStore>, config: &StaticConfig) -> Result<Self> {
        let tokens = TokenGenerator::new(config.token.length)?;
        let guard = AuthGuard::from_config(&config.auth);
        let collision = CollisionPolicy {
            check: config.token.collision_check,
            max_attempts: config.token.max_attempts.max(1),
        };
        debug!(
            "Token length: {}, collision check: {} (max {} attempts)",
            tokens.length(),
            collision.check,
            collision.max_attempts
        );
        Ok(Self::new(store, tokens, guard, collision))
    }

    /// list / delete 是否需要口令（同时决定响应格式）
    pub fn require_auth(&self) -> bool {
        self.guard.is_required()
    }

    pub fn store(&self) -> &Arc<dyn MappingStore> {
        &self.store
    }

    /// 生成短码并保存映射
    pub async fn create(&self, target: &str) -> Result<String> {
        if target.is_empty() {
            return Err(SurlError::bad_input("url is required"));
        }

        if !self.collision.check {
            let token = self.tokens.generate();
            self.store.put(&token, target).await?;
            info!("Created mapping {} -> {}", token, target);
            return Ok(token);
        }

        for attempt in 1..=self.collision.max_attempts {
            let token = self.tokens.generate();
            if self.store.put_if_absent(&token, target).await? {
                info!("Created mapping {} -> {}", token, target);
                return Ok(token);
            }
            warn!(
                "Token collision on attempt {}/{}: {}",
                attempt, self.collision.max_attempts, token
            );
        }

        Err(SurlError::store_exhausted(format!(
            "No free token found after {} attempts",
            self.collision.max_attempts
        )))
    }

    /// 查找短码对应的目标地址
    pub async fn resolve(&self, token: &str) -> Result<String> {
        if token.is_empty() {
            return Err(SurlError::bad_input("token is required"));
        }

        match self.store.get(token).await? {
            Some(target) if !target.is_empty() => Ok(target),
            Some(_) => {
                debug!("Token {} maps to an empty target", token);
                Err(SurlError::not_found(format!("token '{}' not found", token)))
            }
            None => {
                debug!("Token {} not found", token);
                Err(SurlError::not_found(format!("token '{}' not found", token)))
            }
        }
    }

    /// 列出全部映射（需授权）
    pub async fn list(&self, code: Option<&str>) -> Result<HashMap<String, String>> {
        self.guard.authorize(code)?;
        let all = self.store.list_all().await?;
        debug!("Listed {} mappings", all.len());
        Ok(all)
    }

    /// 删除映射（需授权），返回被删除的短码
    pub async fn delete(&self, token: &str, code: Option<&str>) -> Result<String> {
        self.guard.authorize(code)?;

        if token.is_empty() {
            return Err(SurlError::bad_input("token is required"));
        }

        if self.store.delete(token).await? {
            info!("Deleted mapping {}", token);
            Ok(token.to_string())
        } else {
            debug!("Delete of unknown token {}", token);
            Err(SurlError::not_found(format!("token '{}' not found", token)))
        }
    }
}
