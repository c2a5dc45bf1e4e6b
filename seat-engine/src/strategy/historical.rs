//! Historical-Pattern Allocator
//!
//! Reuses previously successful table configurations for similar contexts
//! (party size, day of week, time slot, season). The pattern store is an
//! external analytics system behind [`PatternStore`]; a slow or failing
//! store degrades to "no patterns" and the orchestrator falls back to the
//! revenue-optimal allocator.

use super::{floor_impact, project_revenue};
use crate::config::EngineConfig;
use crate::utils::time::{pattern_keys, request_millis};
use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{AssignmentResult, HistoricalPattern, Season, StrategyKind, TimeSlot};
use shared::types::TableId;
use shared::{AssignmentContext, DiningTable};
use std::collections::HashMap;
use std::time::Duration;

/// Patterns below this success rate are never reused
pub const MIN_SUCCESS_RATE: f64 = 0.8;
/// Patterns with fewer observations are never reused
pub const MIN_SAMPLE_SIZE: u32 = 5;
/// Patterns fetched per lookup at most
pub const PATTERN_LIMIT: usize = 10;

/// Cap for historical confidence
const MAX_HISTORICAL_CONFIDENCE: f64 = 0.96;
/// Sample-size contribution cap
const MAX_SAMPLE_BONUS: f64 = 0.1;
/// Recency bonus tiers (days since the analytics refresh)
const RECENT_DAYS: i64 = 30;
const RECENT_BONUS: f64 = 0.05;
const STALE_DAYS: i64 = 90;
const STALE_BONUS: f64 = 0.02;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// One lookup against the pattern store
#[derive(Debug, Clone, PartialEq)]
pub struct PatternQuery {
    pub party_size: i32,
    /// Day of week, 0 = Sunday
    pub day_of_week: u8,
    pub time_slot: TimeSlot,
    pub season: Season,
    pub min_success_rate: f64,
    pub min_sample_size: u32,
    pub limit: usize,
}

impl PatternQuery {
    /// Build the lookup for one assignment context
    pub fn for_context(context: &AssignmentContext) -> Self {
        let (day_of_week, time_slot, season) = pattern_keys(context);
        Self {
            party_size: context.party_size,
            day_of_week,
            time_slot,
            season,
            min_success_rate: MIN_SUCCESS_RATE,
            min_sample_size: MIN_SAMPLE_SIZE,
            limit: PATTERN_LIMIT,
        }
    }

    /// Whether a pattern matches this query's keys and thresholds
    pub fn matches(&self, pattern: &HistoricalPattern) -> bool {
        pattern.party_size == self.party_size
            && pattern.day_of_week == self.day_of_week
            && pattern.time_slot == self.time_slot
            && pattern.season == self.season
            && pattern.success_rate >= self.min_success_rate
            && pattern.sample_size >= self.min_sample_size
    }
}

/// Read access to the analytics store of successful configurations
///
/// Implementations should return patterns ordered by success rate then
/// sample size; the engine re-applies ordering and thresholds defensively
/// so a loose implementation cannot break allocation invariants.
#[async_trait]
pub trait PatternStore: Send + Sync {
    async fn find_patterns(&self, query: &PatternQuery) -> AppResult<Vec<HistoricalPattern>>;
}

/// Pattern store over a fixed snapshot, for embedders that load analytics
/// exports periodically (and for tests)
#[derive(Debug, Default)]
pub struct StaticPatternStore {
    patterns: Vec<HistoricalPattern>,
}

impl StaticPatternStore {
    pub fn new(patterns: Vec<HistoricalPattern>) -> Self {
        Self { patterns }
    }
}

#[async_trait]
impl PatternStore for StaticPatternStore {
    async fn find_patterns(&self, query: &PatternQuery) -> AppResult<Vec<HistoricalPattern>> {
        let mut matched: Vec<HistoricalPattern> = self
            .patterns
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.success_rate
                .partial_cmp(&a.success_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.sample_size.cmp(&a.sample_size))
        });
        matched.truncate(query.limit);
        Ok(matched)
    }
}

/// A pattern that survived the availability intersection
struct PatternCandidate {
    tables: Vec<TableId>,
    confidence: f64,
    pattern: HistoricalPattern,
}

/// Allocate from a matching historical pattern
///
/// Returns `None` when the store has no usable pattern for this context
/// (or is unreachable); the orchestrator then falls back to the
/// revenue-optimal allocator.
pub async fn try_allocate(
    store: &dyn PatternStore,
    tables: &[DiningTable],
    context: &AssignmentContext,
    config: &EngineConfig,
) -> Option<AssignmentResult> {
    let query = PatternQuery::for_context(context);

    let lookup = tokio::time::timeout(
        Duration::from_millis(config.pattern_timeout_ms),
        store.find_patterns(&query),
    )
    .await;

    let mut patterns = match lookup {
        Ok(Ok(patterns)) => patterns,
        Ok(Err(err)) => {
            tracing::debug!(error = %err, "pattern store lookup failed, falling back");
            return None;
        }
        Err(_) => {
            tracing::debug!(
                timeout_ms = config.pattern_timeout_ms,
                "pattern store lookup timed out, falling back"
            );
            return None;
        }
    };

    // Defensive: re-check thresholds and ordering regardless of the store
    patterns.retain(|p| query.matches(p));
    patterns.sort_by(|a, b| {
        b.success_rate
            .partial_cmp(&a.success_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.sample_size.cmp(&a.sample_size))
    });
    patterns.truncate(PATTERN_LIMIT);

    let capacity_by_id: HashMap<&str, i32> =
        tables.iter().map(|t| (t.id.as_str(), t.capacity)).collect();
    let request_ms = request_millis(context);

    let mut candidates: Vec<PatternCandidate> = patterns
        .into_iter()
        .filter_map(|pattern| {
            // Keep the subset of the stored configuration that is still
            // available, in the configuration's order
            let available: Vec<TableId> = pattern
                .table_configuration
                .iter()
                .filter(|id| capacity_by_id.contains_key(id.as_str()))
                .cloned()
                .collect();
            if available.is_empty() {
                return None;
            }
            // The surviving subset must still seat the party
            let capacity: i32 = available
                .iter()
                .map(|id| capacity_by_id[id.as_str()])
                .sum();
            if capacity < context.party_size {
                return None;
            }
            let confidence = pattern_confidence(&pattern, request_ms);
            Some(PatternCandidate {
                tables: available,
                confidence,
                pattern,
            })
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let alternatives = candidates
        .iter()
        .skip(1)
        .take(2)
        .map(|c| candidate_result(c, tables, context, config))
        .collect();

    let mut primary = candidate_result(&candidates[0], tables, context, config);
    primary.alternatives = alternatives;
    Some(primary)
}

/// Confidence for one matched pattern: success rate, sample depth, recency
fn pattern_confidence(pattern: &HistoricalPattern, request_ms: i64) -> f64 {
    let sample_bonus = (pattern.sample_size as f64 / 100.0).min(MAX_SAMPLE_BONUS);

    let age_days = (request_ms - pattern.updated_at) / MILLIS_PER_DAY;
    let recency_bonus = if age_days <= RECENT_DAYS {
        RECENT_BONUS
    } else if age_days <= STALE_DAYS {
        STALE_BONUS
    } else {
        0.0
    };

    (pattern.success_rate + sample_bonus + recency_bonus).min(MAX_HISTORICAL_CONFIDENCE)
}

fn candidate_result(
    candidate: &PatternCandidate,
    tables: &[DiningTable],
    context: &AssignmentContext,
    config: &EngineConfig,
) -> AssignmentResult {
    let pattern = &candidate.pattern;
    let reasoning = format!(
        "Matched configuration with {:.0}% success over {} seatings for {} guests ({} {})",
        pattern.success_rate * 100.0,
        pattern.sample_size,
        pattern.party_size,
        pattern.time_slot.as_str(),
        pattern.season.as_str(),
    );

    AssignmentResult {
        table_ids: candidate.tables.clone(),
        confidence: candidate.confidence,
        strategy: StrategyKind::Historical,
        utilization_impact: floor_impact(
            context.party_size,
            tables.iter().map(|t| t.capacity),
        ),
        projected_revenue: project_revenue(
            context.party_size,
            pattern.avg_revenue_per_cover,
            &[],
        ),
        reasoning,
        alternatives: Vec::new(),
        warnings: Vec::new(),
    }
}
