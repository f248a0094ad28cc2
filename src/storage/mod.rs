use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::errors::{Result, SurlError};

pub mod memory;
pub mod models;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::models::{Mapping, ScanPage};
pub use self::redis::RedisStore;

/// Key-value backend holding token → target mappings
///
/// Each call is a single backend operation; atomicity is whatever the backend
/// gives for that operation.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// 无条件写入（覆盖已有值）
    async fn put(&self, token: &str, target: &str) -> Result<()>;

    /// 仅在 token 不存在时写入，返回是否写入成功
    async fn put_if_absent(&self, token: &str, target: &str) -> Result<bool>;

    /// 精确查找；存在但值为空时返回 `Some("")`
    async fn get(&self, token: &str) -> Result<Option<String>>;

    /// 删除，返回是否真的删除了一个 key
    async fn delete(&self, token: &str) -> Result<bool>;

    /// 游标扫描的一页，cursor 从 0 开始
    async fn scan_page(&self, cursor: u64) -> Result<ScanPage>;

    async fn ping(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;

    /// 迭代游标直到扫描结束
    async fn list_all(&self) -> Result<HashMap<String, String>> {
        let mut all = HashMap::new();
        let mut cursor = 0;
        let mut pages = 0usize;

        loop {
            let page = self.scan_page(cursor).await?;
            pages += 1;
            let last = page.is_last();
            cursor = page.next_cursor;
            all.extend(page.mappings.into_iter().map(|m| (m.token, m.target)));
            if last {
                break;
            }
        }

        debug!("Full scan finished: {} mappings in {} pages", all.len(), pages);
        Ok(all)
    }
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn MappingStore>> {
        let store: Arc<dyn MappingStore> = match config.backend.as_str() {
            "redis" => Arc::new(RedisStore::connect(config).await?),
            "memory" => Arc::new(MemoryStore::with_page_size(config.scan_count)),
            other => {
                return Err(SurlError::config(format!(
                    "Unknown storage backend '{}'. Valid: redis, memory",
                    other
                )));
            }
        };

        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}
