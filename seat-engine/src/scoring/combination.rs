//! Combination search
//!
//! When no single table seats the party, enumerate 2-table pairs (and, for
//! very large parties, 3-table triples) among the top-ranked candidates.
//! Pool sizes and capacity slack are hard bounds that keep the enumeration
//! O(k^2)/O(k^3) for small fixed k.

use super::score::ScoredTable;
use shared::types::TableId;

/// Candidates considered for pairs
pub const PAIR_POOL: usize = 6;
/// Candidates considered for triples
pub const TRIPLE_POOL: usize = 4;
/// Max seats over party size a pair may have
pub const PAIR_SLACK: i32 = 6;
/// Max seats over party size a triple may have
pub const TRIPLE_SLACK: i32 = 8;
/// Party size at which triples become worth the coordination cost
pub const TRIPLE_PARTY_MIN: i32 = 16;
/// Complexity penalty applied to triple scores
pub const TRIPLE_PENALTY: f64 = 0.9;
/// Combinations returned at most
pub const MAX_COMBINATIONS: usize = 5;

/// A multi-table grouping that seats the party together
#[derive(Debug, Clone)]
pub struct TableCombination {
    pub table_ids: Vec<TableId>,
    pub total_capacity: i32,
    pub score: f64,
}

/// Enumerate feasible 2- and 3-table combinations for a party
///
/// `ranked` must already be sorted by score descending (see
/// [`super::rank_tables`]). Returns an empty list when fewer than two
/// candidates are usable; the caller signals infeasibility.
pub fn find_combinations(ranked: &[ScoredTable], party_size: i32) -> Vec<TableCombination> {
    if ranked.len() < 2 {
        return Vec::new();
    }

    let mut combinations = Vec::new();

    let pool = &ranked[..ranked.len().min(PAIR_POOL)];
    for i in 0..pool.len() {
        for j in (i + 1)..pool.len() {
            let total_capacity = pool[i].table.capacity + pool[j].table.capacity;
            if total_capacity < party_size || total_capacity > party_size + PAIR_SLACK {
                continue;
            }
            let fit = party_size as f64 / total_capacity as f64;
            let score = (pool[i].score.total + pool[j].score.total) / 2.0 * fit;
            combinations.push(TableCombination {
                table_ids: vec![pool[i].table.id.clone(), pool[j].table.id.clone()],
                total_capacity,
                score,
            });
        }
    }

    if party_size >= TRIPLE_PARTY_MIN {
        let pool = &ranked[..ranked.len().min(TRIPLE_POOL)];
        for i in 0..pool.len() {
            for j in (i + 1)..pool.len() {
                for k in (j + 1)..pool.len() {
                    let total_capacity = pool[i].table.capacity
                        + pool[j].table.capacity
                        + pool[k].table.capacity;
                    if total_capacity < party_size || total_capacity > party_size + TRIPLE_SLACK {
                        continue;
                    }
                    let fit = party_size as f64 / total_capacity as f64;
                    let avg = (pool[i].score.total + pool[j].score.total + pool[k].score.total)
                        / 3.0;
                    combinations.push(TableCombination {
                        table_ids: vec![
                            pool[i].table.id.clone(),
                            pool[j].table.id.clone(),
                            pool[k].table.id.clone(),
                        ],
                        total_capacity,
                        score: avg * fit * TRIPLE_PENALTY,
                    });
                }
            }
        }
    }

    combinations.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.table_ids.cmp(&b.table_ids))
    });
    combinations.truncate(MAX_COMBINATIONS);
    combinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rank_tables;
    use chrono::NaiveDate;
    use shared::models::{TableStatus, Zone};
    use shared::{AssignmentContext, DiningTable, UtilizationSnapshot};

    fn make_table(id: &str, capacity: i32) -> DiningTable {
        DiningTable {
            id: id.to_string(),
            number: 1,
            capacity,
            zone: Zone::Center,
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
            duration_minutes: 120,
            preferred_zone: None,
            is_vip: false,
            occasion: None,
            customer: None,
        }
    }

    fn ranked_for(tables: &[DiningTable], party_size: i32) -> Vec<crate::scoring::ScoredTable> {
        rank_tables(tables, &make_context(party_size), &UtilizationSnapshot::default())
    }

    #[test]
    fn test_pair_for_party_of_eight() {
        let tables = vec![make_table("t1", 4), make_table("t2", 4)];
        let ranked = ranked_for(&tables, 8);

        let combos = find_combinations(&ranked, 8);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].total_capacity, 8);
        let mut ids = combos[0].table_ids.clone();
        ids.sort();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn test_pair_slack_bounds() {
        // 4+12 = 16 > 8+6, rejected; 4+6 = 10 accepted
        let tables = vec![make_table("t1", 4), make_table("t2", 12), make_table("t3", 6)];
        let ranked = ranked_for(&tables, 8);

        let combos = find_combinations(&ranked, 8);
        for combo in &combos {
            assert!(combo.total_capacity >= 8);
            assert!(combo.total_capacity <= 14);
        }
        assert!(combos
            .iter()
            .any(|c| c.table_ids.contains(&"t3".to_string())));
    }

    #[test]
    fn test_single_candidate_yields_nothing() {
        let tables = vec![make_table("t1", 2)];
        let ranked = ranked_for(&tables, 10);
        assert!(find_combinations(&ranked, 10).is_empty());
    }

    #[test]
    fn test_no_triples_below_party_sixteen() {
        // Only a triple could seat 12 here, but triples need party >= 16
        let tables = vec![make_table("t1", 4), make_table("t2", 4), make_table("t3", 4)];
        let ranked = ranked_for(&tables, 12);
        assert!(find_combinations(&ranked, 12).is_empty());
    }

    #[test]
    fn test_triples_for_large_party() {
        let tables = vec![
            make_table("t1", 8),
            make_table("t2", 6),
            make_table("t3", 6),
            make_table("t4", 4),
        ];
        let ranked = ranked_for(&tables, 18);

        let combos = find_combinations(&ranked, 18);
        assert!(!combos.is_empty());
        for combo in &combos {
            assert!(combo.total_capacity >= 18);
            assert!(combo.total_capacity <= 26);
            assert_eq!(combo.table_ids.len(), 3);
        }
    }

    #[test]
    fn test_triple_penalty_applied() {
        let tables = vec![make_table("t1", 8), make_table("t2", 6), make_table("t3", 6)];
        let ranked = ranked_for(&tables, 20);

        let combos = find_combinations(&ranked, 20);
        assert_eq!(combos.len(), 1);
        let combo = &combos[0];

        let avg = (ranked[0].score.total + ranked[1].score.total + ranked[2].score.total) / 3.0;
        let expected = avg * (20.0 / 20.0) * TRIPLE_PENALTY;
        assert!((combo.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_result_cap_and_ordering() {
        let tables: Vec<DiningTable> = (1..=8)
            .map(|i| make_table(&format!("t{}", i), 5))
            .collect();
        let ranked = ranked_for(&tables, 8);

        let combos = find_combinations(&ranked, 8);
        assert!(combos.len() <= MAX_COMBINATIONS);
        for pair in combos.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_tight_fit_outranks_loose_fit() {
        // 4+4 seats 8 exactly; 6+4 leaves two empty seats
        let tables = vec![make_table("t1", 4), make_table("t2", 4), make_table("t3", 6)];
        let ranked = ranked_for(&tables, 8);

        let combos = find_combinations(&ranked, 8);
        assert_eq!(combos[0].total_capacity, 8);
    }
}
