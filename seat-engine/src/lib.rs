//! Table-assignment scoring engine
//!
//! Selects which physical table(s) to assign to an incoming reservation
//! request by scoring candidate tables and table combinations against
//! weighted objectives (revenue, zone load balance, historical fit) and
//! returning a ranked decision with alternatives.
//!
//! The engine is a library with three read-only inputs (candidate tables,
//! a utilization snapshot, the request context) and one output (an
//! [`shared::AssignmentDecision`]). It never fetches data, persists
//! reservations, or sends notifications; those belong to the calling system.
//!
//! # Example
//!
//! ```ignore
//! let engine = AssignmentEngine::new(
//!     EngineConfig::default(),
//!     Arc::new(StaticPatternStore::default()),
//!     AssignmentCache::new(Arc::new(MemoryCacheStore::new()), CacheConfig::default()),
//!     Arc::new(TracingMetricsSink),
//! );
//! let decision = engine.execute(&tables, &context, &utilization, StrategyPreference::Auto).await?;
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod metrics;
pub mod perf;
pub mod scoring;
pub mod strategy;
pub mod utils;

// Re-exports
pub use cache::{AssignmentCache, CacheConfig, CacheStats, CacheStore, MemoryCacheStore};
pub use config::EngineConfig;
pub use engine::AssignmentEngine;
pub use metrics::{AllocationRecord, MetricsSink, TracingMetricsSink};
pub use strategy::historical::{PatternQuery, PatternStore, StaticPatternStore};
