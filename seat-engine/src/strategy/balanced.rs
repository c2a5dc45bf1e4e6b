//! Load-Balanced Allocator
//!
//! Ranks zones by distance from the target utilization and picks the best
//! fitting table inside the best zone. Returns `None` when no zone has a
//! table that can seat the party on its own; the orchestrator then falls
//! back to the revenue-optimal allocator.

use super::project_revenue;
use crate::config::EngineConfig;
use crate::perf::ScanGovernor;
use shared::models::{AssignmentResult, StrategyKind, Zone};
use shared::{AssignmentContext, DiningTable, UtilizationSnapshot};

/// Penalty for pushing a zone past the overload line
const OVERLOAD_THRESHOLD: f64 = 0.95;
const OVERLOAD_PENALTY: f64 = 0.5;
/// Bonus for zones still below the target (steer load here)
const UNDER_TARGET_BONUS: f64 = 0.2;

/// Confidence when seating outside the best zone
const FALLBACK_CONFIDENCE: f64 = 0.7;
/// Cap for balanced confidence
const MAX_BALANCED_CONFIDENCE: f64 = 0.92;

/// Revenue multiplier for balanced placements
const BALANCED_REVENUE_MULTIPLIER: f64 = 1.08;

/// One zone's load picture for this request
#[derive(Debug)]
struct ZoneLoad<'a> {
    zone: Zone,
    current: f64,
    projected: f64,
    score: f64,
    tables: Vec<&'a DiningTable>,
}

/// Allocate a table in the zone whose projected load lands closest to the
/// target utilization
pub fn try_allocate(
    tables: &[DiningTable],
    context: &AssignmentContext,
    utilization: &UtilizationSnapshot,
    config: &EngineConfig,
) -> Option<AssignmentResult> {
    let zones = rank_zones(tables, context, utilization, config);
    if zones.is_empty() {
        return None;
    }

    let best_zone = &zones[0];
    if let Some(table) = best_fitting_table(&best_zone.tables, context.party_size, config) {
        let waste = context.party_size as f64 / table.capacity as f64;
        let confidence = (best_zone.score * waste).min(MAX_BALANCED_CONFIDENCE).max(0.0);

        let alternatives = zones
            .iter()
            .skip(1)
            .take(2)
            .filter_map(|zone| {
                let alt = best_fitting_table(&zone.tables, context.party_size, config)?;
                let alt_waste = context.party_size as f64 / alt.capacity as f64;
                Some(zone_result(
                    alt,
                    zone,
                    context,
                    config,
                    (zone.score * alt_waste).min(MAX_BALANCED_CONFIDENCE).max(0.0),
                ))
            })
            .collect();

        let mut result = zone_result(table, best_zone, context, config, confidence);
        result.alternatives = alternatives;
        return Some(result);
    }

    // Best zone cannot seat the party; scan remaining zones in score order
    for zone in zones.iter().skip(1) {
        if let Some(table) = best_fitting_table(&zone.tables, context.party_size, config) {
            let mut result = zone_result(table, zone, context, config, FALLBACK_CONFIDENCE);
            result.warnings.push(format!(
                "no table in zone {} seats {}; assigned from zone {}",
                best_zone.zone, context.party_size, zone.zone
            ));
            return Some(result);
        }
    }

    // No zone can seat the party on a single table
    None
}

/// Group available tables by zone and score each zone's projected load
fn rank_zones<'a>(
    tables: &'a [DiningTable],
    context: &AssignmentContext,
    utilization: &UtilizationSnapshot,
    config: &EngineConfig,
) -> Vec<ZoneLoad<'a>> {
    let target = config.target_zone_utilization;
    let mut zones = Vec::new();

    for zone in Zone::ALL {
        let zone_tables: Vec<&DiningTable> =
            tables.iter().filter(|t| t.zone == zone).collect();
        let capacity: i32 = zone_tables.iter().map(|t| t.capacity).sum();
        if capacity <= 0 {
            continue;
        }

        let current = utilization.zone_utilization(zone);
        let projected = current + context.party_size as f64 / capacity as f64;

        let mut score = 1.0 - (target - projected).abs();
        if projected > OVERLOAD_THRESHOLD {
            score -= OVERLOAD_PENALTY;
        }
        if current < target {
            score += UNDER_TARGET_BONUS;
        }

        zones.push(ZoneLoad {
            zone,
            current,
            projected,
            score,
            tables: zone_tables,
        });
    }

    zones.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    zones
}

/// Pick the fitting table whose capacity sits closest to the party size
///
/// Scans under a [`ScanGovernor`] so a long candidate list cannot stretch
/// the request; fit quality feeds the governor as its running best.
fn best_fitting_table<'a>(
    tables: &[&'a DiningTable],
    party_size: i32,
    config: &EngineConfig,
) -> Option<&'a DiningTable> {
    let mut governor = ScanGovernor::from_config(config);
    let mut best: Option<(&'a DiningTable, f64)> = None;

    for &table in tables {
        if !table.seats(party_size) {
            continue;
        }
        let capacity_match = party_size as f64 / table.capacity as f64;
        let closeness = 1.0 - (capacity_match - 1.0).abs();

        let better = match best {
            None => true,
            Some((current, current_closeness)) => {
                closeness > current_closeness
                    || (closeness == current_closeness && table.id < current.id)
            }
        };
        if better {
            best = Some((table, closeness));
        }
        if !governor.observe(closeness) {
            break;
        }
    }

    best.map(|(table, _)| table)
}

fn zone_result(
    table: &DiningTable,
    zone: &ZoneLoad<'_>,
    context: &AssignmentContext,
    config: &EngineConfig,
    confidence: f64,
) -> AssignmentResult {
    let reasoning = format!(
        "Zone {} at {:.0}% utilization, {:.0}% after seating (target {:.0}%); table {} seats {} of {}",
        zone.zone,
        zone.current * 100.0,
        zone.projected * 100.0,
        config.target_zone_utilization * 100.0,
        table.number,
        context.party_size,
        table.capacity,
    );

    AssignmentResult {
        table_ids: vec![table.id.clone()],
        confidence,
        strategy: StrategyKind::Balanced,
        utilization_impact: zone.projected - zone.current,
        projected_revenue: project_revenue(
            context.party_size,
            config.revenue_per_cover,
            &[BALANCED_REVENUE_MULTIPLIER],
        ),
        reasoning,
        alternatives: Vec::new(),
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::TableStatus;
    use std::collections::HashMap;

    fn make_table(id: &str, capacity: i32, zone: Zone) -> DiningTable {
        DiningTable {
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
                .and_hms_opt(19, 30, 0)
                .unwrap(),
            duration_minutes: 90,
            preferred_zone: None,
            is_vip: false,
            occasion: None,
            customer: None,
        }
    }

    fn make_snapshot(zones: &[(Zone, f64)]) -> UtilizationSnapshot {
        UtilizationSnapshot {
            zones: zones.iter().copied().collect::<HashMap<_, _>>(),
            ..Default::default()
        }
    }

    #[test]
    fn test_steers_to_underused_zone() {
        let tables = vec![
            make_table("t1", 4, Zone::Window),
            make_table("t2", 4, Zone::Terrace),
        ];
        let util = make_snapshot(&[(Zone::Window, 0.9), (Zone::Terrace, 0.2)]);

        let result =
            try_allocate(&tables, &make_context(2), &util, &EngineConfig::default()).unwrap();
        assert_eq!(result.table_ids, vec!["t2"]);
        assert_eq!(result.strategy, StrategyKind::Balanced);
        assert!(result.confidence <= 0.92);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_fallback_zone_carries_warning() {
        // Terrace ranks best but only has 2-seat tables; window can seat 4
        let tables = vec![
            make_table("t1", 2, Zone::Terrace),
            make_table("t2", 2, Zone::Terrace),
            make_table("t3", 6, Zone::Window),
        ];
        let util = make_snapshot(&[(Zone::Terrace, 0.2), (Zone::Window, 0.9)]);

        let result =
            try_allocate(&tables, &make_context(4), &util, &EngineConfig::default()).unwrap();
        assert_eq!(result.table_ids, vec!["t3"]);
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("TERRACE"));
        assert!(result.warnings[0].contains("WINDOW"));
    }

    #[test]
    fn test_no_fitting_table_anywhere() {
        let tables = vec![
            make_table("t1", 2, Zone::Bar),
            make_table("t2", 2, Zone::Center),
        ];
        let result = try_allocate(
            &tables,
            &make_context(6),
            &UtilizationSnapshot::default(),
            &EngineConfig::default(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_candidates() {
        let result = try_allocate(
            &[],
            &make_context(2),
            &UtilizationSnapshot::default(),
            &EngineConfig::default(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_closest_capacity_wins_within_zone() {
        let tables = vec![
            make_table("t1", 8, Zone::Center),
            make_table("t2", 4, Zone::Center),
            make_table("t3", 6, Zone::Center),
        ];
        let result = try_allocate(
            &tables,
            &make_context(4),
            &UtilizationSnapshot::default(),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(result.table_ids, vec!["t2"]);
    }

    #[test]
    fn test_overloaded_zone_penalized() {
        // Seating 4 in a nearly full bar would overshoot 95%
        let tables = vec![
            make_table("t1", 4, Zone::Bar),
            make_table("t2", 4, Zone::Center),
        ];
        let util = make_snapshot(&[(Zone::Bar, 0.94), (Zone::Center, 0.5)]);

        let result =
            try_allocate(&tables, &make_context(4), &util, &EngineConfig::default()).unwrap();
        assert_eq!(result.table_ids, vec!["t2"]);
    }

    #[test]
    fn test_alternatives_from_next_zones() {
        let tables = vec![
            make_table("t1", 4, Zone::Window),
            make_table("t2", 4, Zone::Center),
            make_table("t3", 4, Zone::Bar),
        ];
        let util = make_snapshot(&[
            (Zone::Window, 0.1),
            (Zone::Center, 0.4),
            (Zone::Bar, 0.6),
        ]);

        let result =
            try_allocate(&tables, &make_context(4), &util, &EngineConfig::default()).unwrap();
        assert_eq!(result.alternatives.len(), 2);
        for alt in &result.alternatives {
            assert_ne!(alt.table_ids, result.table_ids);
            assert!(alt.confidence <= 0.92);
        }
    }

    #[test]
    fn test_revenue_projection() {
        let tables = vec![make_table("t1", 4, Zone::Center)];
        let result = try_allocate(
            &tables,
            &make_context(4),
            &UtilizationSnapshot::default(),
            &EngineConfig::default(),
        )
        .unwrap();
        // 4 x 45 x 1.08
        assert_eq!(result.projected_revenue, 194.4);
    }
}
