//! Result cache
//!
//! Three versioned key spaces over one external key-value store:
//! availability snapshots, utilization snapshots, and whole assignment
//! decisions. Entries carry their format version and expiry inside the
//! stored envelope; a version mismatch or expired entry reads as a miss
//! and is evicted. A failing or slow store always degrades to miss
//! behavior, never to a hard error.
//!
//! All read/write methods take the current time explicitly (Unix millis) so
//! TTL behavior stays deterministic under test.

mod store;

pub use store::{CacheStore, MemoryCacheStore};

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::types::Timestamp;
use shared::AssignmentDecision;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Bumped whenever the cached payload layout changes
pub const CACHE_FORMAT_VERSION: u32 = 3;

/// Evening hours where availability churns fast and gets the short TTL
const EVENING_HOURS: std::ops::RangeInclusive<u32> = 18..=22;

/// TTLs and the per-operation store timeout
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub availability_ttl_secs: i64,
    /// Shorter TTL for evening slots
    pub availability_peak_ttl_secs: i64,
    pub utilization_ttl_secs: i64,
    pub assignment_ttl_secs: i64,
    pub op_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            availability_ttl_secs: 300,
            availability_peak_ttl_secs: 120,
            utilization_ttl_secs: 600,
            assignment_ttl_secs: 60,
            op_timeout_ms: 150,
        }
    }
}

/// Versioned envelope around every cached payload
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    expires_at: Timestamp,
    payload: Value,
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Cache manager for the assignment engine
#[derive(Clone)]
pub struct AssignmentCache {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    evictions: Arc<AtomicU64>,
}

impl std::fmt::Debug for AssignmentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentCache")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl AssignmentCache {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    // ==================== Availability ====================

    pub async fn get_availability(
        &self,
        date: NaiveDate,
        slot: NaiveTime,
        now_ms: Timestamp,
    ) -> Option<Value> {
        self.read(&availability_key(date, slot), now_ms).await
    }

    pub async fn put_availability(
        &self,
        date: NaiveDate,
        slot: NaiveTime,
        payload: Value,
        now_ms: Timestamp,
    ) {
        let ttl = if EVENING_HOURS.contains(&slot.hour()) {
            self.config.availability_peak_ttl_secs
        } else {
            self.config.availability_ttl_secs
        };
        self.write(&availability_key(date, slot), payload, ttl, now_ms)
            .await;
    }

    // ==================== Utilization ====================

    pub async fn get_utilization(
        &self,
        date: NaiveDate,
        hour: u32,
        now_ms: Timestamp,
    ) -> Option<Value> {
        self.read(&utilization_key(date, hour), now_ms).await
    }

    pub async fn put_utilization(
        &self,
        date: NaiveDate,
        hour: u32,
        payload: Value,
        now_ms: Timestamp,
    ) {
        self.write(
            &utilization_key(date, hour),
            payload,
            self.config.utilization_ttl_secs,
            now_ms,
        )
        .await;
    }

    // ==================== Assignment decisions ====================

    /// `request_key` is a caller-supplied hash of the full request
    pub async fn get_assignment(
        &self,
        request_key: &str,
        now_ms: Timestamp,
    ) -> Option<AssignmentDecision> {
        let value = self.read(&assignment_key(request_key), now_ms).await?;
        match serde_json::from_value(value) {
            Ok(decision) => Some(decision),
            Err(err) => {
                tracing::debug!(error = %err, "cached assignment failed to decode, evicting");
                self.evict(&assignment_key(request_key)).await;
                None
            }
        }
    }

    pub async fn put_assignment(
        &self,
        request_key: &str,
        decision: &AssignmentDecision,
        now_ms: Timestamp,
    ) {
        let payload = match serde_json::to_value(decision) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, "assignment decision failed to encode, skipping cache");
                return;
            }
        };
        self.write(
            &assignment_key(request_key),
            payload,
            self.config.assignment_ttl_secs,
            now_ms,
        )
        .await;
    }

    // ==================== Invalidation ====================

    /// Drop everything a reservation mutation on `date` could have staled:
    /// all availability and utilization entries for that date, and every
    /// assignment entry. Coarse on purpose; correctness over precision.
    pub async fn invalidate_date(&self, date: NaiveDate) {
        for prefix in [
            format!("availability:{}:", date),
            format!("utilization:{}:", date),
            "assignment:".to_string(),
        ] {
            match self.timed(self.store.delete_prefix(&prefix)).await {
                Some(Ok(deleted)) => {
                    self.evictions.fetch_add(deleted, Ordering::Relaxed);
                }
                Some(Err(err)) => {
                    tracing::debug!(error = %err, prefix = %prefix, "cache invalidation failed");
                }
                None => {
                    tracing::debug!(prefix = %prefix, "cache invalidation timed out");
                }
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    // ==================== Envelope plumbing ====================

    async fn read(&self, key: &str, now_ms: Timestamp) -> Option<Value> {
        let raw = match self.timed(self.store.get(key)).await {
            Some(Ok(raw)) => raw,
            Some(Err(err)) => {
                tracing::debug!(error = %err, key, "cache read failed, treating as miss");
                None
            }
            None => {
                tracing::debug!(key, "cache read timed out, treating as miss");
                None
            }
        };

        let Some(raw) = raw else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };

        let envelope: Envelope = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::debug!(error = %err, key, "cache entry corrupt, evicting");
                self.miss_and_evict(key).await;
                return None;
            }
        };

        if envelope.version != CACHE_FORMAT_VERSION {
            tracing::debug!(
                key,
                found = envelope.version,
                expected = CACHE_FORMAT_VERSION,
                "cache entry from another format version, evicting"
            );
            self.miss_and_evict(key).await;
            return None;
        }
        if envelope.expires_at <= now_ms {
            self.miss_and_evict(key).await;
            return None;
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(envelope.payload)
    }

    async fn write(&self, key: &str, payload: Value, ttl_secs: i64, now_ms: Timestamp) {
        let envelope = Envelope {
            version: CACHE_FORMAT_VERSION,
            expires_at: now_ms + ttl_secs * 1000,
            payload,
        };
        let raw = match serde_json::to_string(&envelope) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(error = %err, key, "cache envelope failed to encode");
                return;
            }
        };
        match self.timed(self.store.set(key, raw)).await {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                tracing::debug!(error = %err, key, "cache write failed, continuing without cache");
            }
            None => {
                tracing::debug!(key, "cache write timed out, continuing without cache");
            }
        }
    }

    async fn miss_and_evict(&self, key: &str) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.evict(key).await;
    }

    async fn evict(&self, key: &str) {
        if let Some(Ok(())) = self.timed(self.store.delete(key)).await {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    async fn timed<T>(&self, fut: impl std::future::Future<Output = T>) -> Option<T> {
        tokio::time::timeout(Duration::from_millis(self.config.op_timeout_ms), fut)
            .await
            .ok()
    }
}

fn availability_key(date: NaiveDate, slot: NaiveTime) -> String {
    format!("availability:{}:{}", date, slot.format("%H:%M"))
}

fn utilization_key(date: NaiveDate, hour: u32) -> String {
    format!("utilization:{}:{:02}", date, hour)
}

fn assignment_key(request_key: &str) -> String {
    format!("assignment:{}", request_key)
}
