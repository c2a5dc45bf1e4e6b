//! Cache store seam
//!
//! The engine talks to an external key-value store through [`CacheStore`];
//! deployments back it with whatever KV service they run. The in-memory
//! implementation covers single-process embedders and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::error::AppResult;

/// Outbound key-value seam for the result cache
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: String) -> AppResult<()>;
    async fn delete(&self, key: &str) -> AppResult<()>;
    /// Delete every key starting with `prefix`; returns how many were removed
    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64>;
}

/// Lock-free in-process store backed by a concurrent map
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, String>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of live entries (expired ones included until they are read
    /// or invalidated)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64> {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - self.entries.len()) as u64)
    }
}
