use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

// ============================================================================
// Business Calendar
// ============================================================================
//
// Saturday and Sunday are the only closed days. No holiday awareness.
//
// ============================================================================

/// Friday orders at or after this time roll over to Monday
pub const FRIDAY_CLOSING: NaiveTime = match NaiveTime::from_hms_opt(17, 0, 0) {
    Some(t) => t,
    None => panic!("invalid closing time"),
};

/// Time assigned to orders rolled over to Monday
pub const MONDAY_OPENING: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(t) => t,
    None => panic!("invalid opening time"),
};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First Monday strictly after `date`
pub fn next_monday(date: NaiveDate) -> NaiveDate {
    let days = 7 - i64::from(date.weekday().num_days_from_monday());
    date + Duration::days(days)
}

/// Map a raw order timestamp to the effective timestamp used for all date
/// math. Late-Friday and weekend orders count as placed Monday at 08:00.
pub fn normalize_order_time(placed_at: NaiveDateTime) -> NaiveDateTime {
    let date = placed_at.date();
    let rolls_over = match date.weekday() {
        Weekday::Sat | Weekday::Sun => true,
        Weekday::Fri => placed_at.time() >= FRIDAY_CLOSING,
        _ => false,
    };

    if rolls_over {
        next_monday(date).and_time(MONDAY_OPENING)
    } else {
        placed_at
    }
}

/// Advance `start` by `days` business days, skipping weekends.
/// Stops at the last representable date rather than overflowing.
pub fn add_business_days(start: NaiveDate, days: u32) -> NaiveDate {
    let mut date = start;
    let mut counted = 0;
    while counted < days {
        let Some(next) = date.succ_opt() else {
            break;
        };
        date = next;
        if is_business_day(date) {
            counted += 1;
        }
    }
    date
}

// ============================================================================
// Unit Tests
// ============================================================================
