//! Assignment orchestrator
//!
//! Resolves which strategy to run for a request, executes it with timing
//! instrumentation, composes the fallback chain explicitly, and emits one
//! metrics record per allocation. All collaborators are injected at
//! construction; the engine holds no global state.

use crate::cache::AssignmentCache;
use crate::config::EngineConfig;
use crate::metrics::{AllocationRecord, MetricsSink};
use crate::perf::MemoCache;
use crate::scoring::{rank_tables, ScoredTable};
use crate::strategy::historical::PatternStore;
use crate::strategy::{balanced, historical, optimal};
use crate::utils::time::{is_peak_hour, now_millis};
use crate::utils::validation::{validate_context, validate_tables};
use chrono::NaiveDate;
use shared::error::AppResult;
use shared::models::{
    AssignmentContext, AssignmentDecision, AssignmentResult, StrategyKind, StrategyPreference,
    Zone,
};
use shared::{DiningTable, UtilizationSnapshot};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Parties at or above this size always go to the revenue-optimal strategy
const LARGE_PARTY_THRESHOLD: i32 = 8;

/// Table-assignment engine with injected collaborators
pub struct AssignmentEngine {
    config: EngineConfig,
    pattern_store: Arc<dyn PatternStore>,
    cache: AssignmentCache,
    metrics: Arc<dyn MetricsSink>,
    score_memo: MemoCache<Vec<ScoredTable>>,
}

impl AssignmentEngine {
    pub fn new(
        config: EngineConfig,
        pattern_store: Arc<dyn PatternStore>,
        cache: AssignmentCache,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        let score_memo = MemoCache::new(config.memo_capacity);
        Self {
            config,
            pattern_store,
            cache,
            metrics,
            score_memo,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &AssignmentCache {
        &self.cache
    }

    /// Allocate tables for one request
    ///
    /// Malformed input is the only hard error; an unseatable party comes
    /// back as [`AssignmentDecision::Infeasible`].
    pub async fn execute(
        &self,
        tables: &[DiningTable],
        context: &AssignmentContext,
        utilization: &UtilizationSnapshot,
        preference: StrategyPreference,
    ) -> AppResult<AssignmentDecision> {
        validate_context(context)?;
        validate_tables(tables)?;

        let resolved = self.resolve_strategy(context, preference);
        let started = Instant::now();
        let mut result = self
            .run_strategy(resolved, tables, context, utilization)
            .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if elapsed_ms > self.config.allocation_latency_target_ms {
            tracing::warn!(
                elapsed_ms,
                target_ms = self.config.allocation_latency_target_ms,
                strategy = %resolved,
                "allocation exceeded latency target"
            );
            if let Some(result) = &mut result {
                result.warnings.push(format!(
                    "allocation took {}ms (target {}ms)",
                    elapsed_ms, self.config.allocation_latency_target_ms
                ));
            }
        }

        let decision = match result {
            Some(result) => AssignmentDecision::Assigned(result),
            None => AssignmentDecision::Infeasible {
                reason: if tables.is_empty() {
                    "no tables are available for the requested slot".to_string()
                } else {
                    format!(
                        "no single table or combination seats a party of {}",
                        context.party_size
                    )
                },
            },
        };

        self.record(&decision, resolved, preference, context, elapsed_ms, false);
        Ok(decision)
    }

    /// Allocate with a read-through decision cache
    ///
    /// `request_key` is a caller-supplied hash of the full request; two
    /// requests may share a key only if they are identical.
    pub async fn execute_cached(
        &self,
        request_key: &str,
        tables: &[DiningTable],
        context: &AssignmentContext,
        utilization: &UtilizationSnapshot,
        preference: StrategyPreference,
    ) -> AppResult<AssignmentDecision> {
        validate_context(context)?;
        validate_tables(tables)?;

        if let Some(decision) = self.cache.get_assignment(request_key, now_millis()).await {
            let resolved = self.resolve_strategy(context, preference);
            self.record(&decision, resolved, preference, context, 0, true);
            return Ok(decision);
        }

        let decision = self
            .execute(tables, context, utilization, preference)
            .await?;
        self.cache
            .put_assignment(request_key, &decision, now_millis())
            .await;
        Ok(decision)
    }

    /// Drop cached state made stale by a reservation mutation on `date`
    pub async fn invalidate_date(&self, date: NaiveDate) {
        self.cache.invalidate_date(date).await;
    }

    /// Pre-score common scenarios into the memo cache
    ///
    /// Called explicitly from process startup, typically with the evening
    /// contexts the floor sees most; never runs as an import side effect.
    pub fn warm_up(
        &self,
        tables: &[DiningTable],
        utilization: &UtilizationSnapshot,
        contexts: &[AssignmentContext],
    ) {
        for context in contexts {
            let _ = self.ranked(tables, context, utilization);
        }
        tracing::info!(scenarios = contexts.len(), "assignment engine warmed up");
    }

    /// Resolve the strategy to run for this request
    fn resolve_strategy(
        &self,
        context: &AssignmentContext,
        preference: StrategyPreference,
    ) -> StrategyKind {
        match preference {
            StrategyPreference::Optimal => StrategyKind::Optimal,
            StrategyPreference::Balanced => StrategyKind::Balanced,
            StrategyPreference::Historical => StrategyKind::Historical,
            StrategyPreference::Auto => {
                if is_peak_hour(context.hour())
                    && context.party_size < LARGE_PARTY_THRESHOLD
                    && !context.is_vip
                {
                    StrategyKind::Balanced
                } else if context.party_size >= LARGE_PARTY_THRESHOLD || context.is_vip {
                    StrategyKind::Optimal
                } else {
                    StrategyKind::Historical
                }
            }
        }
    }

    /// Run one strategy with its fallback chain spelled out
    async fn run_strategy(
        &self,
        kind: StrategyKind,
        tables: &[DiningTable],
        context: &AssignmentContext,
        utilization: &UtilizationSnapshot,
    ) -> Option<AssignmentResult> {
        match kind {
            StrategyKind::Optimal => self.run_optimal(tables, context, utilization),
            StrategyKind::Balanced => balanced::try_allocate(tables, context, utilization, &self.config)
                .or_else(|| self.run_optimal(tables, context, utilization)),
            StrategyKind::Historical => {
                match historical::try_allocate(
                    self.pattern_store.as_ref(),
                    tables,
                    context,
                    &self.config,
                )
                .await
                {
                    Some(result) => Some(result),
                    None => self.run_optimal(tables, context, utilization),
                }
            }
        }
    }

    /// Scoring + search pipeline of the revenue-optimal allocator, timed
    /// from the start of the scoring pass
    fn run_optimal(
        &self,
        tables: &[DiningTable],
        context: &AssignmentContext,
        utilization: &UtilizationSnapshot,
    ) -> Option<AssignmentResult> {
        let started = Instant::now();
        let ranked = self.ranked(tables, context, utilization);
        optimal::allocate(&ranked, context, utilization, &self.config, started)
    }

    /// Memoized scoring: identical (tables, context, utilization) signatures
    /// reuse the ranked candidate list
    fn ranked(
        &self,
        tables: &[DiningTable],
        context: &AssignmentContext,
        utilization: &UtilizationSnapshot,
    ) -> Vec<ScoredTable> {
        let key = score_signature(tables, context, utilization);
        if let Some(ranked) = self.score_memo.get(&key) {
            return ranked;
        }
        let ranked = rank_tables(tables, context, utilization);
        self.score_memo.insert(key, ranked.clone());
        ranked
    }

    fn record(
        &self,
        decision: &AssignmentDecision,
        resolved: StrategyKind,
        preference: StrategyPreference,
        context: &AssignmentContext,
        elapsed_ms: u64,
        cache_hit: bool,
    ) {
        let (strategy, assigned_tables, confidence) = match decision {
            AssignmentDecision::Assigned(result) => (
                result.strategy,
                result.table_ids.clone(),
                Some(result.confidence),
            ),
            AssignmentDecision::Infeasible { .. } => (resolved, Vec::new(), None),
        };
        self.metrics.record(&AllocationRecord {
            request_id: Uuid::new_v4(),
            strategy,
            preference,
            party_size: context.party_size,
            is_vip: context.is_vip,
            assigned_tables,
            confidence,
            elapsed_ms,
            cache_hit,
        });
    }
}

/// Deterministic signature of everything the scorer reads
fn score_signature(
    tables: &[DiningTable],
    context: &AssignmentContext,
    utilization: &UtilizationSnapshot,
) -> String {
    use std::fmt::Write;

    let mut key = format!(
        "p{};h{};v{}",
        context.party_size,
        context.hour(),
        context.is_vip as u8
    );
    for zone in Zone::ALL {
        let _ = write!(key, ";{}={:.3}", zone, utilization.zone_utilization(zone));
    }
    for table in tables {
        let _ = write!(key, ";{}:{}:{}", table.id, table.capacity, table.zone);
    }
    key
}
