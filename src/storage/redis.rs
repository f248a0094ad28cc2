use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, error, trace};

use super::{Mapping, MappingStore, ScanPage};
use crate::config::StorageConfig;
use crate::errors::{Result, SurlError};

/// Redis-backed mapping store
///
/// Keys are `key_prefix + token`, values are the raw target URL. The
/// `ConnectionManager` is multiplexed and reconnects on its own, so one
/// handle is opened at startup and cloned per call.
pub struct RedisStore {
    conn: ConnectionManager,
    key_prefix: String,
    timeout: Duration,
    scan_count: usize,
}

impl RedisStore {
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        let url = config.connection_url();
        let client = redis::Client::open(url.as_str())
            .map_err(|e| SurlError::config(format!("Invalid Redis URL: {}", e)))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let conn = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                SurlError::store_unavailable(format!(
                    "Timed out after {:?} connecting to Redis",
                    timeout
                ))
            })??;

        let store = Self {
            conn,
            key_prefix: config.key_prefix.clone(),
            timeout,
            scan_count: config.scan_count.max(1),
        };

        // 启动时确认后端可达
        store.ping().await?;
        debug!(
            "Redis connection established (prefix: '{}', timeout: {:?})",
            store.key_prefix, store.timeout
        );

        Ok(store)
    }

    fn make_key(&self, token: &str) -> String {
        format!("{}{}", self.key_prefix, token)
    }

    fn strip_key(&self, key: String) -> String {
        match key.strip_prefix(&self.key_prefix) {
            Some(token) => token.to_string(),
            None => key,
        }
    }

    fn match_pattern(&self) -> String {
        format!("{}*", escape_glob(&self.key_prefix))
    }

    /// 为单次 Redis 调用加上超时
    async fn with_timeout<T, F>(&self, op: &str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("Redis {} failed: {}", op, e);
                Err(e.into())
            }
            Err(_) => {
                error!("Redis {} timed out after {:?}", op, self.timeout);
                Err(SurlError::store_unavailable(format!(
                    "Redis {} timed out",
                    op
                )))
            }
        }
    }
}

#[async_trait]
impl MappingStore for RedisStore {
    async fn put(&self, token: &str, target: &str) -> Result<()> {
        let key = self.make_key(token);
        let mut conn = self.conn.clone();
        self.with_timeout("SET", conn.set::<_, _, ()>(&key, target))
            .await?;
        trace!("Stored key: {}", key);
        Ok(())
    }

    async fn put_if_absent(&self, token: &str, target: &str) -> Result<bool> {
        let key = self.make_key(token);
        let mut conn = self.conn.clone();
        let written = self
            .with_timeout("SETNX", conn.set_nx::<_, _, bool>(&key, target))
            .await?;
        if !written {
            debug!("Key already exists, not overwritten: {}", key);
        }
        Ok(written)
    }

    async fn get(&self, token: &str) -> Result<Option<String>> {
        let key = self.make_key(token);
        let mut conn = self.conn.clone();
        self.with_timeout("GET", conn.get::<_, Option<String>>(&key))
            .await
    }

    async fn delete(&self, token: &str) -> Result<bool> {
        let key = self.make_key(token);
        let mut conn = self.conn.clone();
        let deleted = self
            .with_timeout("DEL", conn.del::<_, i64>(&key))
            .await?;
        Ok(deleted > 0)
    }

    async fn scan_page(&self, cursor: u64) -> Result<ScanPage> {
        let mut conn = self.conn.clone();

        let mut scan = redis::cmd("SCAN");
        scan.arg(cursor)
            .arg("MATCH")
            .arg(self.match_pattern())
            .arg("COUNT")
            .arg(self.scan_count);
        let (next_cursor, keys): (u64, Vec<String>) = self
            .with_timeout("SCAN", scan.query_async(&mut conn))
            .await?;

        if keys.is_empty() {
            return Ok(ScanPage {
                next_cursor,
                mappings: Vec::new(),
            });
        }

        // 显式 MGET，单个 key 时也返回数组
        let mut mget = redis::cmd("MGET");
        mget.arg(&keys);
        let values: Vec<Option<String>> = self
            .with_timeout("MGET", mget.query_async(&mut conn))
            .await?;

        // SCAN 与 MGET 之间被删除的 key 返回 nil，直接跳过
        let mappings = keys
            .into_iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|target| Mapping::new(self.strip_key(key), target)))
            .collect();

        Ok(ScanPage {
            next_cursor,
            mappings,
        })
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let ping = redis::cmd("PING");
        let response: String = self.with_timeout("PING", ping.query_async(&mut conn)).await?;
        trace!("Redis PING: {}", response);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// 转义 glob 特殊字符，使前缀按字面匹配
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
