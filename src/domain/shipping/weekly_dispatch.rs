use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::calendar::{add_business_days, next_monday};

// ============================================================================
// Weekly Dispatch Override
// ============================================================================
//
// One supplier ships on a fixed weekly cycle. Orders that reach it early in
// the morning catch a dispatch slot instead of waiting out the lead time.
//
// ============================================================================

/// Latest time of day (inclusive) that still catches the weekly slot
pub const DISPATCH_CUTOFF: NaiveTime = match NaiveTime::from_hms_opt(8, 30, 0) {
    Some(t) => t,
    None => panic!("invalid dispatch cutoff"),
};

/// Which rule produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPath {
    Generic,
    WeeklyDispatch,
}

impl DispatchPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchPath::Generic => "generic",
            DispatchPath::WeeklyDispatch => "weekly_dispatch",
        }
    }
}

/// How the weekly-dispatch date combines with the rest of the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePrecedence {
    /// The weekly-dispatch date replaces the generic date outright, even if a
    /// slower supplier on the same order would push shipping later.
    #[default]
    AlwaysOverride,
    /// The later of the weekly-dispatch date and the generic date wins.
    NeverEarlierThanGeneric,
}

impl FromStr for OverridePrecedence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" | "always_override" => Ok(Self::AlwaysOverride),
            "never_earlier" | "never_earlier_than_generic" => Ok(Self::NeverEarlierThanGeneric),
            other => Err(format!("unknown override precedence: {other}")),
        }
    }
}

/// Ship date for an order that contains the weekly-dispatch supplier.
///
/// `effective` must already be normalized. Early Monday orders ship two
/// calendar days later, early Tuesday–Thursday orders ship the following
/// Monday, everything else falls back to `max_delay` business days.
pub fn weekly_dispatch_date(effective: NaiveDateTime, max_delay: u32) -> NaiveDate {
    let date = effective.date();
    let early = effective.time() <= DISPATCH_CUTOFF;

    match date.weekday() {
        Weekday::Mon if early => date + Duration::days(2),
        Weekday::Tue | Weekday::Wed | Weekday::Thu if early => next_monday(date),
        _ => add_business_days(date, max_delay),
    }
}
