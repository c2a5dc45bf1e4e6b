//! Historical Pattern Model

use crate::types::{TableId, Timestamp};
use serde::{Deserialize, Serialize};

/// 3-hour service slot used as a historical lookup key
///
/// Hours outside service time default to the evening slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    /// 12:00-15:00
    Lunch,
    /// 15:00-18:00
    Afternoon,
    /// 18:00-21:00
    Evening,
    /// 21:00-24:00
    LateNight,
}

impl TimeSlot {
    /// Slot containing the given hour of day
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            12..15 => TimeSlot::Lunch,
            15..18 => TimeSlot::Afternoon,
            18..21 => TimeSlot::Evening,
            21..24 => TimeSlot::LateNight,
            _ => TimeSlot::Evening,
        }
    }

    /// Get the string key for this slot
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Lunch => "12-15",
            TimeSlot::Afternoon => "15-18",
            TimeSlot::Evening => "18-21",
            TimeSlot::LateNight => "21-24",
        }
    }
}

/// Season bucket used as a historical lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// March-May
    Spring,
    /// June-August
    Summer,
    /// September-November
    Autumn,
    /// December-February
    Winter,
}

impl Season {
    /// Season containing the given month (1-12)
    pub const fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    /// Get the string key for this season
    pub const fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

/// A previously observed successful table configuration (历史模式)
///
/// Produced by the analytics pipeline; read-only to the assignment engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPattern {
    pub party_size: i32,
    /// Day of week, 0 = Sunday
    pub day_of_week: u8,
    pub time_slot: TimeSlot,
    pub season: Season,
    /// Tables that were assigned together
    pub table_configuration: Vec<TableId>,
    /// Fraction of seatings with this configuration rated successful (0-1)
    pub success_rate: f64,
    /// Number of observed seatings behind `success_rate`
    pub sample_size: u32,
    pub avg_revenue_per_cover: f64,
    /// When the analytics pipeline last refreshed this row
    pub updated_at: Timestamp,
}
