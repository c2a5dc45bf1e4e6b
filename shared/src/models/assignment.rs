//! Assignment Result Model

use crate::types::TableId;
use serde::{Deserialize, Serialize};

/// The allocation strategy that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Optimal,
    Balanced,
    Historical,
}

impl StrategyKind {
    /// Get the string tag for this strategy
    pub const fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Optimal => "optimal",
            StrategyKind::Balanced => "balanced",
            StrategyKind::Historical => "historical",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller preference for strategy selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyPreference {
    /// Let the engine pick based on context
    #[default]
    Auto,
    Optimal,
    Balanced,
    Historical,
}

/// One assignment decision (分配结果)
///
/// `table_ids` holds a single table, or 2-3 tables for a combination.
/// Alternatives are full, self-contained decisions ranked by confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub table_ids: Vec<TableId>,
    /// Heuristic endorsement in [0, 1]; not a probability
    pub confidence: f64,
    pub strategy: StrategyKind,
    /// Estimated change in utilization caused by seating this party
    pub utilization_impact: f64,
    /// Heuristic revenue estimate, not a billing figure
    pub projected_revenue: f64,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AssignmentResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AssignmentResult {
    /// Whether this decision joins multiple tables
    pub fn is_combination(&self) -> bool {
        self.table_ids.len() > 1
    }
}

/// Outcome of one allocation call
///
/// Infeasibility is an expected business case and is modeled as data, never
/// as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignmentDecision {
    Assigned(AssignmentResult),
    Infeasible { reason: String },
}

impl AssignmentDecision {
    /// Whether a table set was assigned
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignmentDecision::Assigned(_))
    }

    /// Borrow the result, if assigned
    pub fn result(&self) -> Option<&AssignmentResult> {
        match self {
            AssignmentDecision::Assigned(result) => Some(result),
            AssignmentDecision::Infeasible { .. } => None,
        }
    }
}
