//! Allocation metrics
//!
//! One structured record per allocation call, handed to an external sink.
//! Sink failures never fail the allocation; the trait is infallible by
//! contract and implementations swallow their own errors.

use serde::Serialize;
use shared::models::{StrategyKind, StrategyPreference};
use shared::types::TableId;
use uuid::Uuid;

/// Structured record of one allocation call
#[derive(Debug, Clone, Serialize)]
pub struct AllocationRecord {
    pub request_id: Uuid,
    /// Strategy that produced the decision (the resolved one when the
    /// request turned out infeasible)
    pub strategy: StrategyKind,
    pub preference: StrategyPreference,
    pub party_size: i32,
    pub is_vip: bool,
    /// Empty when the request was infeasible
    pub assigned_tables: Vec<TableId>,
    pub confidence: Option<f64>,
    pub elapsed_ms: u64,
    pub cache_hit: bool,
}

/// Outbound metrics seam
pub trait MetricsSink: Send + Sync {
    fn record(&self, record: &AllocationRecord);
}

/// Default sink emitting one structured tracing event per allocation
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetricsSink;

impl MetricsSink for TracingMetricsSink {
    fn record(&self, record: &AllocationRecord) {
        tracing::info!(
            target: "seat_engine::metrics",
            request_id = %record.request_id,
            strategy = %record.strategy,
            preference = ?record.preference,
            party_size = record.party_size,
            is_vip = record.is_vip,
            assigned = ?record.assigned_tables,
            confidence = ?record.confidence,
            elapsed_ms = record.elapsed_ms,
            cache_hit = record.cache_hit,
            "allocation completed"
        );
    }
}
