//! Time helpers for scoring and pattern lookup
//!
//! All request times are naive datetimes in the restaurant's local time;
//! timezone conversion is the caller's concern.

use chrono::{Datelike, Weekday};
use shared::models::{Season, TimeSlot};
use shared::types::Timestamp;
use shared::AssignmentContext;

/// Peak dinner window, inclusive on both ends
pub const PEAK_START_HOUR: u32 = 19;
pub const PEAK_END_HOUR: u32 = 21;

/// Whether the hour falls in the peak dinner window
#[inline]
pub fn is_peak_hour(hour: u32) -> bool {
    (PEAK_START_HOUR..=PEAK_END_HOUR).contains(&hour)
}

/// Day-of-week number used by the analytics store (0 = Sunday)
pub fn weekday_number(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

/// Historical lookup keys derived from one assignment context
pub fn pattern_keys(context: &AssignmentContext) -> (u8, TimeSlot, Season) {
    let day = weekday_number(context.requested_at.weekday());
    let slot = TimeSlot::from_hour(context.hour());
    let season = Season::from_month(context.requested_at.month());
    (day, slot, season)
}

/// Request time as Unix millis, for pattern-recency comparison
pub fn request_millis(context: &AssignmentContext) -> Timestamp {
    context.requested_at.and_utc().timestamp_millis()
}

/// Current wall-clock time as Unix millis
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_context(y: i32, m: u32, d: u32, hour: u32) -> AssignmentContext {
        AssignmentContext {
            party_size: 4,
            requested_at: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            duration_minutes: 90,
            preferred_zone: None,
            is_vip: false,
            occasion: None,
            customer: None,
        }
    }

    #[test]
    fn test_peak_window() {
        assert!(!is_peak_hour(18));
        assert!(is_peak_hour(19));
        assert!(is_peak_hour(20));
        assert!(is_peak_hour(21));
        assert!(!is_peak_hour(22));
    }

    #[test]
    fn test_weekday_number_sunday_first() {
        assert_eq!(weekday_number(Weekday::Sun), 0);
        assert_eq!(weekday_number(Weekday::Mon), 1);
        assert_eq!(weekday_number(Weekday::Sat), 6);
    }

    #[test]
    fn test_pattern_keys() {
        // 2025-06-14 is a Saturday
        let ctx = make_context(2025, 6, 14, 19);
        let (day, slot, season) = pattern_keys(&ctx);
        assert_eq!(day, 6);
        assert_eq!(slot, TimeSlot::Evening);
        assert_eq!(season, Season::Summer);
    }
}
