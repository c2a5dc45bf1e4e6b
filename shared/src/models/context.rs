//! Assignment Context Model

use super::zone::Zone;
use crate::types::TableId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Known history for a returning customer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerHistory {
    /// Number of completed prior reservations
    pub visit_count: u32,
    /// Average spend per visit
    pub avg_spend: f64,
    /// Tables this customer has asked for before
    #[serde(default)]
    pub preferred_tables: Vec<TableId>,
}

/// One table-assignment request (预订请求)
///
/// Constructed fresh per request; the engine never stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentContext {
    pub party_size: i32,
    /// Requested seating time, in the restaurant's local time
    pub requested_at: NaiveDateTime,
    /// Expected dining duration in minutes
    pub duration_minutes: i64,
    #[serde(default)]
    pub preferred_zone: Option<Zone>,
    #[serde(default)]
    pub is_vip: bool,
    /// Occasion tag (birthday, anniversary, business, ...)
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub customer: Option<CustomerHistory>,
}

impl AssignmentContext {
    /// Requested hour of day (0-23)
    #[inline]
    pub fn hour(&self) -> u32 {
        use chrono::Timelike;
        self.requested_at.time().hour()
    }
}
