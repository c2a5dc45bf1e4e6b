//! Utilization Snapshot Model

use super::zone::Zone;
use crate::types::TableId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rolling metrics for one table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableMetrics {
    /// Fraction of service time this table was committed (0-1)
    pub utilization_rate: f64,
    /// Revenue generated over the metrics window
    pub revenue: f64,
    pub avg_party_size: f64,
    /// Completed seatings over the metrics window
    pub turn_count: u32,
}

/// Aggregate peak-hour view of the whole floor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeakSnapshot {
    pub target_utilization: f64,
    pub current_utilization: f64,
    /// Seats still assignable during the peak window
    pub remaining_capacity: i32,
}

/// Read-only utilization view for one allocation call (上座率快照)
///
/// Supplied by the caller and never mutated by the engine; the caller
/// recomputes it between calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UtilizationSnapshot {
    /// Per-zone utilization ratio (0-1)
    #[serde(default)]
    pub zones: HashMap<Zone, f64>,
    /// Per-table rolling metrics
    #[serde(default)]
    pub tables: HashMap<TableId, TableMetrics>,
    #[serde(default)]
    pub peak: PeakSnapshot,
}

impl UtilizationSnapshot {
    /// Current utilization for a zone; zones absent from the snapshot are
    /// treated as empty (0.0)
    pub fn zone_utilization(&self, zone: Zone) -> f64 {
        self.zones.get(&zone).copied().unwrap_or(0.0)
    }

    /// Metrics for a table, if the snapshot has any
    pub fn table_metrics(&self, table_id: &str) -> Option<&TableMetrics> {
        self.tables.get(table_id)
    }

    /// Whether any of the given tables has recorded metrics
    pub fn any_table_tracked<'a>(&self, table_ids: impl IntoIterator<Item = &'a TableId>) -> bool {
        table_ids.into_iter().any(|id| self.tables.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_utilization_default() {
        let snapshot = UtilizationSnapshot::default();
        assert_eq!(snapshot.zone_utilization(Zone::Bar), 0.0);
    }

    #[test]
    fn test_any_table_tracked() {
        let mut snapshot = UtilizationSnapshot::default();
        snapshot
            .tables
            .insert("t1".to_string(), TableMetrics::default());

        let ids = vec!["t1".to_string(), "t2".to_string()];
        assert!(snapshot.any_table_tracked(&ids));

        let ids = vec!["t9".to_string()];
        assert!(!snapshot.any_table_tracked(&ids));
    }
}
