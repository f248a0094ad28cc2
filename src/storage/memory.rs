//! In-process store backed by `DashMap`
//!
//! Used for local runs (`storage.backend = "memory"`) and tests. Data lives
//! only as long as the process.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::trace;

use super::{Mapping, MappingStore, ScanPage};
use crate::errors::Result;

const DEFAULT_PAGE_SIZE: usize = 100;

pub struct MemoryStore {
    data: DashMap<String, String>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            data: DashMap::new(),
            page_size: page_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn put(&self, token: &str, target: &str) -> Result<()> {
        self.data.insert(token.to_string(), target.to_string());
        trace!("MemoryStore put: {} ({} entries)", token, self.len());
        Ok(())
    }

    async fn put_if_absent(&self, token: &str, target: &str) -> Result<bool> {
        match self.data.entry(token.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(target.to_string());
                Ok(true)
            }
        }
    }

    async fn get(&self, token: &str) -> Result<Option<String>> {
        Ok(self.data.get(token).map(|v| v.value().clone()))
    }

    async fn delete(&self, token: &str) -> Result<bool> {
        Ok(self.data.remove(token).is_some())
    }

    /// 游标为排序后 key 的偏移量
    async fn scan_page(&self, cursor: u64) -> Result<ScanPage> {
        let mut keys: Vec<String> = self.data.iter().map(|e| e.key().clone()).collect();
        keys.sort_unstable();

        let start = cursor as usize;
        let end = (start + self.page_size).min(keys.len());

        let mappings = keys
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .filter_map(|k| self.data.get(k).map(|v| Mapping::new(k.clone(), v.value().clone())))
            .collect();

        let next_cursor = if end >= keys.len() { 0 } else { end as u64 };
        Ok(ScanPage {
            next_cursor,
            mappings,
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
