//! Dining Table Model

use super::zone::Zone;
use crate::types::{TableId, Timestamp};
use serde::{Deserialize, Serialize};

/// Occupancy status of a dining table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
}

/// 2D floor-plan position (editor/UI only, never used for scoring)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TablePosition {
    pub x: f32,
    pub y: f32,
}

/// Dining table entity (桌台)
///
/// A snapshot of one physical seating unit, immutable for the duration of a
/// single allocation decision. Ownership of the persistent record stays with
/// the calling system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: TableId,
    /// Display number shown on the floor plan
    pub number: u32,
    pub capacity: i32,
    pub zone: Zone,
    pub status: TableStatus,
    #[serde(default)]
    pub position: Option<TablePosition>,
    /// When an occupied table is expected to free up
    #[serde(default)]
    pub estimated_free_at: Option<Timestamp>,
}

impl DiningTable {
    /// Whether this table alone can seat the party
    #[inline]
    pub fn seats(&self, party_size: i32) -> bool {
        self.capacity >= party_size
    }
}
