//! Input validation helpers
//!
//! Malformed inputs indicate a caller contract violation and are the one
//! case the engine rejects hard, before any scoring runs.

use shared::error::{AppError, ErrorCode};
use shared::{AssignmentContext, DiningTable};
use std::collections::HashSet;

/// Occasion tags are free text from the reservation form
pub const MAX_OCCASION_LEN: usize = 100;

/// Validate one assignment context
pub fn validate_context(context: &AssignmentContext) -> Result<(), AppError> {
    if context.party_size < 1 {
        return Err(AppError::with_message(
            ErrorCode::PartySizeInvalid,
            format!("party size must be at least 1, got {}", context.party_size),
        ));
    }
    if context.duration_minutes <= 0 {
        return Err(AppError::with_message(
            ErrorCode::DurationInvalid,
            format!(
                "expected duration must be positive, got {} minutes",
                context.duration_minutes
            ),
        ));
    }
    if let Some(occasion) = &context.occasion
        && occasion.len() > MAX_OCCASION_LEN
    {
        return Err(AppError::validation(format!(
            "occasion is too long ({} chars, max {MAX_OCCASION_LEN})",
            occasion.len()
        )));
    }
    Ok(())
}

/// Validate the candidate table list
///
/// An empty list is not malformed; it leads to an infeasible decision, not
/// an error.
pub fn validate_tables(tables: &[DiningTable]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(tables.len());
    for table in tables {
        if table.capacity < 1 {
            return Err(AppError::with_message(
                ErrorCode::TableCapacityInvalid,
                format!("table {} has capacity {}", table.id, table.capacity),
            )
            .with_detail("table_id", table.id.clone()));
        }
        if !seen.insert(table.id.as_str()) {
            return Err(AppError::with_message(
                ErrorCode::DuplicateTableId,
                format!("table {} appears twice in the candidate list", table.id),
            )
            .with_detail("table_id", table.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{TableStatus, Zone};

    fn make_context(party_size: i32) -> AssignmentContext {
        AssignmentContext {
            party_size,
            requested_at: NaiveDate::from_ymd_opt(2025, 6, 14)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
            duration_minutes: 90,
            preferred_zone: None,
            is_vip: false,
            occasion: None,
            customer: None,
        }
    }

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

    #[test]
    fn test_valid_context() {
        assert!(validate_context(&make_context(4)).is_ok());
    }

    #[test]
    fn test_party_size_rejected() {
        let err = validate_context(&make_context(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::PartySizeInvalid);

        let err = validate_context(&make_context(-3)).unwrap_err();
        assert_eq!(err.code, ErrorCode::PartySizeInvalid);
    }

    #[test]
    fn test_duration_rejected() {
        let mut ctx = make_context(4);
        ctx.duration_minutes = 0;
        let err = validate_context(&ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::DurationInvalid);
    }

    #[test]
    fn test_occasion_too_long() {
        let mut ctx = make_context(4);
        ctx.occasion = Some("x".repeat(MAX_OCCASION_LEN + 1));
        let err = validate_context(&ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_tables_valid_and_empty() {
        assert!(validate_tables(&[]).is_ok());
        assert!(validate_tables(&[make_table("t1", 4), make_table("t2", 2)]).is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = validate_tables(&[make_table("t1", 0)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::TableCapacityInvalid);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = validate_tables(&[make_table("t1", 4), make_table("t1", 2)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateTableId);
    }
}
