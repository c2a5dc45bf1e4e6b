//! Revenue-Optimal Allocator
//!
//! Ranks individual tables and multi-table combinations by the weighted
//! revenue/efficiency score and returns the best decision with up to two
//! alternatives.

use super::{floor_impact, project_revenue};
use crate::config::EngineConfig;
use crate::scoring::{find_combinations, ScoredTable, TableCombination};
use shared::models::{AssignmentResult, StrategyKind};
use shared::{AssignmentContext, UtilizationSnapshot};
use std::time::Instant;

/// Revenue multiplier for the evening service baseline
const PEAK_REVENUE_MULTIPLIER: f64 = 1.15;
/// Extra multiplier when an assigned table has recorded metrics
const TRACKED_TABLES_MULTIPLIER: f64 = 1.1;

/// Cap for single-table confidence
const MAX_SINGLE_CONFIDENCE: f64 = 0.98;
/// Cap for combination confidence
const MAX_COMBO_CONFIDENCE: f64 = 0.95;

/// Allocate the highest-scoring table or combination
///
/// `ranked` must come from [`crate::scoring::rank_tables`] over the full
/// candidate list; `started` marks the beginning of that scoring pass so
/// the latency warning covers the whole scoring+search pipeline. Returns
/// `None` when neither a single table nor any combination can seat the
/// party.
pub fn allocate(
    ranked: &[ScoredTable],
    context: &AssignmentContext,
    utilization: &UtilizationSnapshot,
    config: &EngineConfig,
    started: Instant,
) -> Option<AssignmentResult> {
    if ranked.is_empty() {
        return None;
    }

    let impact = floor_impact(
        context.party_size,
        ranked.iter().map(|s| s.table.capacity),
    );

    let singles: Vec<&ScoredTable> = ranked
        .iter()
        .filter(|s| s.table.seats(context.party_size))
        .collect();

    let mut primary = if let Some(best) = singles.first() {
        let mut result = single_result(best, context, utilization, config, impact);
        result.alternatives = singles
            .iter()
            .skip(1)
            .take(2)
            .map(|s| single_result(s, context, utilization, config, impact))
            .collect();
        result
    } else {
        // Party too large for any one table; try pairs and triples
        let combinations = find_combinations(ranked, context.party_size);
        let best = combinations.first()?;
        let mut result = combo_result(best, context, utilization, config, impact);
        result.alternatives = combinations
            .iter()
            .skip(1)
            .take(2)
            .map(|c| combo_result(c, context, utilization, config, impact))
            .collect();
        result
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    if elapsed_ms > config.strategy_latency_target_ms {
        tracing::warn!(
            elapsed_ms,
            target_ms = config.strategy_latency_target_ms,
            "optimal allocation exceeded latency target"
        );
        primary.warnings.push(format!(
            "scoring took {}ms (target {}ms)",
            elapsed_ms, config.strategy_latency_target_ms
        ));
    }
    Some(primary)
}

fn single_result(
    scored: &ScoredTable,
    context: &AssignmentContext,
    utilization: &UtilizationSnapshot,
    config: &EngineConfig,
    impact: f64,
) -> AssignmentResult {
    let table = &scored.table;
    let score = &scored.score;

    let tracked = utilization.table_metrics(&table.id).is_some();
    let projected_revenue = project_revenue(
        context.party_size,
        config.revenue_per_cover,
        &[
            PEAK_REVENUE_MULTIPLIER,
            if tracked { TRACKED_TABLES_MULTIPLIER } else { 1.0 },
        ],
    );

    let zone_utilization = utilization.zone_utilization(table.zone);
    let reasoning = format!(
        "Table {} seats {} of {} ({:.0}% efficiency, {:.0}% empty seats); zone {} at {:.0}% utilization",
        table.number,
        context.party_size,
        table.capacity,
        score.capacity_efficiency * 100.0,
        (1.0 - score.waste_score) * 100.0,
        table.zone,
        zone_utilization * 100.0,
    );

    AssignmentResult {
        table_ids: vec![table.id.clone()],
        confidence: score.total.min(MAX_SINGLE_CONFIDENCE).max(0.0),
        strategy: StrategyKind::Optimal,
        utilization_impact: impact,
        projected_revenue,
        reasoning,
        alternatives: Vec::new(),
        warnings: Vec::new(),
    }
}

fn combo_result(
    combination: &TableCombination,
    context: &AssignmentContext,
    utilization: &UtilizationSnapshot,
    config: &EngineConfig,
    impact: f64,
) -> AssignmentResult {
    let tracked = utilization.any_table_tracked(&combination.table_ids);
    let projected_revenue = project_revenue(
        context.party_size,
        config.revenue_per_cover,
        &[
            PEAK_REVENUE_MULTIPLIER,
            if tracked { TRACKED_TABLES_MULTIPLIER } else { 1.0 },
        ],
    );

    let reasoning = format!(
        "No single table seats {}; {} tables combine for {} seats ({:.0}% filled)",
        context.party_size,
        combination.table_ids.len(),
        combination.total_capacity,
        context.party_size as f64 / combination.total_capacity as f64 * 100.0,
    );

    AssignmentResult {
        table_ids: combination.table_ids.clone(),
        confidence: combination.score.min(MAX_COMBO_CONFIDENCE).max(0.0),
        strategy: StrategyKind::Optimal,
        utilization_impact: impact,
        projected_revenue,
        reasoning,
        alternatives: Vec::new(),
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rank_tables;
    use chrono::NaiveDate;
    use shared::models::{TableMetrics, TableStatus, Zone};

    fn make_table(id: &str, capacity: i32, zone: Zone) -> shared::DiningTable {
        shared::DiningTable {
            id: id.to_string(),
            number: id.trim_start_matches('t').parse().unwrap_or(0),
            capacity,
            zone,
            status: TableStatus::Available,
            position: None,
            estimated_free_at: None,
        }
    }

    fn make_context(party_size: i32) -> AssignmentContext {
        AssignmentContext {
            party_size,
            requested_at: NaiveDate::from_ymd_opt(2025, 6, 14)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            duration_minutes: 90,
            preferred_zone: None,
            is_vip: false,
            occasion: None,
            customer: None,
        }
    }

    fn allocate_for(
        tables: &[shared::DiningTable],
        context: &AssignmentContext,
        utilization: &UtilizationSnapshot,
    ) -> Option<AssignmentResult> {
        let config = EngineConfig::default();
        let started = Instant::now();
        let ranked = rank_tables(tables, context, utilization);
        allocate(&ranked, context, utilization, &config, started)
    }

    #[test]
    fn test_single_table_fit() {
        let tables = vec![make_table("t1", 4, Zone::Center)];
        let ctx = make_context(2);
        let mut util = UtilizationSnapshot::default();
        util.zones.insert(Zone::Center, 0.5);

        let result = allocate_for(&tables, &ctx, &util).unwrap();
        assert_eq!(result.table_ids, vec!["t1"]);
        assert_eq!(result.strategy, StrategyKind::Optimal);
        assert!(result.confidence <= 0.98);
        assert!(result.reasoning.contains("50% empty seats"));
    }

    #[test]
    fn test_prefers_tightest_single() {
        let tables = vec![
            make_table("t1", 8, Zone::Center),
            make_table("t2", 4, Zone::Center),
        ];
        let result = allocate_for(
            &tables,
            &make_context(4),
            &UtilizationSnapshot::default(),
        )
        .unwrap();
        assert_eq!(result.table_ids, vec!["t2"]);
        assert_eq!(result.alternatives.len(), 1);
        assert_eq!(result.alternatives[0].table_ids, vec!["t1"]);
    }

    #[test]
    fn test_forced_combination() {
        let tables = vec![
            make_table("t1", 4, Zone::Window),
            make_table("t2", 4, Zone::Window),
        ];
        let result = allocate_for(
            &tables,
            &make_context(8),
            &UtilizationSnapshot::default(),
        )
        .unwrap();

        let mut ids = result.table_ids.clone();
        ids.sort();
        assert_eq!(ids, vec!["t1", "t2"]);
        assert!(result.confidence <= 0.95);
        assert!(result.reasoning.contains("100% filled"));
    }

    #[test]
    fn test_infeasible_party() {
        let tables = vec![make_table("t1", 2, Zone::Center)];
        let result = allocate_for(
            &tables,
            &make_context(10),
            &UtilizationSnapshot::default(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_candidates() {
        let result = allocate_for(&[], &make_context(2), &UtilizationSnapshot::default());
        assert!(result.is_none());
    }

    #[test]
    fn test_revenue_projection_untracked() {
        let tables = vec![make_table("t1", 4, Zone::Center)];
        let result = allocate_for(
            &tables,
            &make_context(4),
            &UtilizationSnapshot::default(),
        )
        .unwrap();
        // 4 x 45 x 1.15 x 1.0
        assert_eq!(result.projected_revenue, 207.0);
    }

    #[test]
    fn test_revenue_projection_tracked_table() {
        let tables = vec![make_table("t1", 4, Zone::Center)];
        let mut util = UtilizationSnapshot::default();
        util.tables.insert("t1".to_string(), TableMetrics::default());

        let result = allocate_for(&tables, &make_context(4), &util).unwrap();
        // 4 x 45 x 1.15 x 1.1
        assert_eq!(result.projected_revenue, 227.7);
    }

    #[test]
    fn test_capacity_sufficiency_always_holds() {
        // Every assignment must seat the whole party, whatever the pool
        let tables = vec![
            make_table("t1", 2, Zone::Bar),
            make_table("t2", 4, Zone::Center),
            make_table("t3", 6, Zone::Window),
            make_table("t4", 8, Zone::Terrace),
        ];
        let util = UtilizationSnapshot::default();
        for party in 1..=14 {
            if let Some(result) = allocate_for(&tables, &make_context(party), &util) {
                let by_id: std::collections::HashMap<_, _> =
                    tables.iter().map(|t| (t.id.clone(), t.capacity)).collect();
                let total: i32 = result.table_ids.iter().map(|id| by_id[id]).sum();
                assert!(total >= party, "party {} got capacity {}", party, total);
            }
        }
    }
}
