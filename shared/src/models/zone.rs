//! Zone Model

use serde::{Deserialize, Serialize};

/// Zone of the dining floor (区域：窗边、大厅、吧台、露台、包厢)
///
/// Closed set: every table belongs to exactly one of these areas. Keeping
/// this an enum (rather than free-form strings) makes the revenue multiplier
/// lookup exhaustive at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    Window,
    Center,
    Bar,
    Terrace,
    Private,
}

impl Zone {
    /// All zones, in display order
    pub const ALL: [Zone; 5] = [
        Zone::Window,
        Zone::Center,
        Zone::Bar,
        Zone::Terrace,
        Zone::Private,
    ];

    /// Revenue multiplier applied to scores and projections for this zone.
    ///
    /// Center is the baseline (1.00); the other multipliers reflect observed
    /// per-zone spend differences and are part of the scoring tuning surface.
    pub const fn revenue_multiplier(&self) -> f64 {
        match self {
            Zone::Window => 1.25,
            Zone::Bar => 1.15,
            Zone::Terrace => 1.10,
            Zone::Private => 1.30,
            Zone::Center => 1.00,
        }
    }

    /// Get the string name for this zone
    pub const fn name(&self) -> &'static str {
        match self {
            Zone::Window => "WINDOW",
            Zone::Center => "CENTER",
            Zone::Bar => "BAR",
            Zone::Terrace => "TERRACE",
            Zone::Private => "PRIVATE",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
