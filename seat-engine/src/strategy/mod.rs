//! Allocation strategies
//!
//! Three policies for ranking candidate tables, each producing a full
//! [`shared::AssignmentResult`]. `balanced` and `historical` return `None`
//! when they cannot produce a decision; the orchestrator composes the
//! fallback to `optimal` explicitly, so the chain is visible in control
//! flow.

pub mod balanced;
pub mod historical;
pub mod optimal;

use rust_decimal::prelude::*;

/// Rounding for projected revenue (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Project revenue for a party: covers x per-cover price x multipliers
///
/// A heuristic estimate for ranking and reporting, never a billing figure.
pub(crate) fn project_revenue(party_size: i32, per_cover: f64, multipliers: &[f64]) -> f64 {
    let mut projected = to_decimal(party_size as f64) * to_decimal(per_cover);
    for multiplier in multipliers {
        projected *= to_decimal(*multiplier);
    }
    to_f64(projected)
}

/// Party share of the whole available floor, used as a coarse
/// utilization-impact estimate by the optimal and historical strategies
pub(crate) fn floor_impact(party_size: i32, capacities: impl IntoIterator<Item = i32>) -> f64 {
    let total: i32 = capacities.into_iter().sum();
    if total <= 0 {
        return 0.0;
    }
    (party_size as f64 / total as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_revenue_rounding() {
        // 4 x 45 x 1.15 = 207.00
        assert_eq!(project_revenue(4, 45.0, &[1.15]), 207.0);
        // 3 x 45 x 1.15 x 1.1 = 170.775 -> 170.78
        assert_eq!(project_revenue(3, 45.0, &[1.15, 1.1]), 170.78);
    }

    #[test]
    fn test_floor_impact() {
        assert!((floor_impact(2, [4, 6]) - 0.2).abs() < 1e-9);
        assert_eq!(floor_impact(2, []), 0.0);
        // Oversized parties cap at 1.0
        assert_eq!(floor_impact(20, [4, 6]), 1.0);
    }
}
