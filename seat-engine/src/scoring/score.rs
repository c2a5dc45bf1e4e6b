//! Scoring primitives
//!
//! Computes one table's fit score for a party. The weights and caps below
//! are the product's tuning surface; they must move together with the
//! formula, so they live here as constants rather than in `EngineConfig`.

use crate::utils::time::is_peak_hour;
use shared::models::Zone;
use shared::{AssignmentContext, DiningTable, UtilizationSnapshot};

// ── Scoring weights ─────────────────────────────────────────────────
pub const WEIGHT_CAPACITY_EFFICIENCY: f64 = 0.4;
pub const WEIGHT_WASTE: f64 = 0.3;
pub const WEIGHT_ZONE_BONUS: f64 = 0.15;
pub const WEIGHT_VIP: f64 = 0.1;
pub const WEIGHT_PEAK: f64 = 0.05;

/// Max contribution of zone under-utilization to the raw score
pub const ZONE_BONUS_FACTOR: f64 = 0.3;
/// Flat bonus for VIP parties in the window zone
pub const VIP_WINDOW_BONUS: f64 = 0.2;
/// Waste share folded back in during the peak window
pub const PEAK_WASTE_FACTOR: f64 = 0.25;

/// Sub-metrics behind one table's score, kept for explanation text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableScore {
    /// party / capacity; deliberately not clamped, can exceed 1 for tables
    /// too small on their own (they still participate in combinations)
    pub capacity_efficiency: f64,
    /// 1.0 = perfectly filled, lower = more empty seats
    pub waste_score: f64,
    pub zone_utilization_bonus: f64,
    pub vip_bonus: f64,
    pub peak_optimization: f64,
    pub zone_multiplier: f64,
    pub total: f64,
}

/// A candidate table with its score, as produced by [`rank_tables`]
#[derive(Debug, Clone)]
pub struct ScoredTable {
    pub table: DiningTable,
    pub score: TableScore,
}

/// Score one table for one party
pub fn score_table(
    table: &DiningTable,
    context: &AssignmentContext,
    utilization: &UtilizationSnapshot,
) -> TableScore {
    let party = context.party_size as f64;
    let capacity = table.capacity as f64;

    let capacity_efficiency = party / capacity;
    let empty_share = ((table.capacity - context.party_size).max(0)) as f64 / capacity;
    let waste_score = 1.0 - empty_share;

    let zone_utilization = utilization.zone_utilization(table.zone).clamp(0.0, 1.0);
    let zone_utilization_bonus = (1.0 - zone_utilization) * ZONE_BONUS_FACTOR;

    let vip_bonus = if context.is_vip && table.zone == Zone::Window {
        VIP_WINDOW_BONUS
    } else {
        0.0
    };

    let peak_optimization = if is_peak_hour(context.hour()) {
        waste_score * PEAK_WASTE_FACTOR
    } else {
        0.0
    };

    let zone_multiplier = table.zone.revenue_multiplier();
    let total = (capacity_efficiency * WEIGHT_CAPACITY_EFFICIENCY
        + waste_score * WEIGHT_WASTE
        + zone_utilization_bonus * WEIGHT_ZONE_BONUS
        + vip_bonus * WEIGHT_VIP
        + peak_optimization * WEIGHT_PEAK)
        * zone_multiplier;

    TableScore {
        capacity_efficiency,
        waste_score,
        zone_utilization_bonus,
        vip_bonus,
        peak_optimization,
        zone_multiplier,
        total,
    }
}

/// Score every candidate table and sort by total score descending
///
/// Ties break on table id so identical inputs always rank identically.
pub fn rank_tables(
    tables: &[DiningTable],
    context: &AssignmentContext,
    utilization: &UtilizationSnapshot,
) -> Vec<ScoredTable> {
    let mut ranked: Vec<ScoredTable> = tables
        .iter()
        .map(|table| ScoredTable {
            table: table.clone(),
            score: score_table(table, context, utilization),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total
            .partial_cmp(&a.score.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.table.id.cmp(&b.table.id))
    });
    ranked
}
