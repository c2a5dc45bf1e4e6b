//! Engine utilities

pub mod logger;
pub mod time;
pub mod validation;

// Re-exports for crate-internal convenience
pub use shared::error::{AppError, AppResult};
