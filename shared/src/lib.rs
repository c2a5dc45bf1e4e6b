//! Shared types for the seating platform
//!
//! Domain models and error types used by the assignment engine and its
//! embedding services.

pub mod error;
pub mod models;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{
    AssignmentContext, AssignmentDecision, AssignmentResult, DiningTable, HistoricalPattern,
    StrategyKind, TableStatus, UtilizationSnapshot, Zone,
};
