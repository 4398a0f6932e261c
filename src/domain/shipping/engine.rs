use chrono::{NaiveDate, NaiveDateTime, Timelike};

use super::calendar::{add_business_days, normalize_order_time};
use super::lead_times::SupplierLeadTimeTable;
use super::value_objects::{ItemCode, ShippingEstimate};
use super::weekly_dispatch::{weekly_dispatch_date, DispatchPath, OverridePrecedence};

// ============================================================================
// Shipping Date Engine
// ============================================================================
//
// Orchestrates: normalize → max lead time → generic or weekly-dispatch path.
// Pure and thread-safe; share it behind an Arc.
//
// ============================================================================

/// Estimate plus the intermediate values that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateBreakdown {
    pub effective_time: NaiveDateTime,
    pub max_delay: u32,
    pub path: DispatchPath,
    pub estimate: ShippingEstimate,
}

#[derive(Debug, Clone, Default)]
pub struct ShippingDateEngine {
    table: SupplierLeadTimeTable,
    precedence: OverridePrecedence,
}

impl ShippingDateEngine {
    pub fn new(table: SupplierLeadTimeTable, precedence: OverridePrecedence) -> Self {
        Self { table, precedence }
    }

    pub fn table(&self) -> &SupplierLeadTimeTable {
        &self.table
    }

    pub fn precedence(&self) -> OverridePrecedence {
        self.precedence
    }

    /// Expected ship date for an order placed at `placed_at`
    pub fn estimate(&self, items: &[ItemCode], placed_at: NaiveDateTime) -> ShippingEstimate {
        self.estimate_with_breakdown(items, placed_at).estimate
    }

    pub fn estimate_with_breakdown(
        &self,
        items: &[ItemCode],
        placed_at: NaiveDateTime,
    ) -> EstimateBreakdown {
        let effective_time = normalize_order_time(placed_at);
        let max_delay = self.table.max_delay(items, effective_time.hour());

        let (path, date) = if self.table.contains_weekly_dispatch(items) {
            (
                DispatchPath::WeeklyDispatch,
                self.weekly_dispatch(effective_time, max_delay),
            )
        } else {
            (
                DispatchPath::Generic,
                add_business_days(effective_time.date(), max_delay),
            )
        };

        tracing::debug!(
            placed_at = %placed_at,
            effective_time = %effective_time,
            max_delay = max_delay,
            path = path.as_str(),
            ship_date = %date,
            "Computed shipping estimate"
        );

        EstimateBreakdown {
            effective_time,
            max_delay,
            path,
            estimate: ShippingEstimate::new(date),
        }
    }

    fn weekly_dispatch(&self, effective_time: NaiveDateTime, max_delay: u32) -> NaiveDate {
        let dispatch = weekly_dispatch_date(effective_time, max_delay);
        match self.precedence {
            OverridePrecedence::AlwaysOverride => dispatch,
            OverridePrecedence::NeverEarlierThanGeneric => {
                dispatch.max(add_business_days(effective_time.date(), max_delay))
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shipping::value_objects::{CutoffRule, SupplierCode};

    // 2024-03-04 is a Monday
    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn items(codes: &[&str]) -> Vec<ItemCode> {
        codes.iter().map(|c| ItemCode::from(*c)).collect()
    }

    fn engine() -> ShippingDateEngine {
        ShippingDateEngine::default()
    }

    #[test]
    fn test_generic_path_adds_lead_time() {
        let result = engine().estimate_with_breakdown(&items(&["FER123"]), at(4, 9, 0));
        assert_eq!(result.max_delay, 2);
        assert_eq!(result.path, DispatchPath::Generic);
        assert_eq!(result.estimate.to_string(), "06/03/2024");
    }

    #[test]
    fn test_evening_cutoff_adds_one_day() {
        let morning = engine().estimate_with_breakdown(&items(&["FER123"]), at(4, 9, 0));
        let evening = engine().estimate_with_breakdown(&items(&["FER123"]), at(4, 17, 30));
        assert_eq!(evening.max_delay, morning.max_delay + 1);
        assert_eq!(evening.estimate.to_string(), "07/03/2024");
    }

    #[test]
    fn test_multiple_suppliers_use_slowest() {
        let result = engine().estimate_with_breakdown(&items(&["FER1", "CAP2"]), at(4, 9, 0));
        assert_eq!(result.max_delay, 3);
        assert_eq!(result.estimate.to_string(), "07/03/2024");
    }

    #[test]
    fn test_unknown_supplier_ships_same_day() {
        let result = engine().estimate_with_breakdown(&items(&["ZZZ999"]), at(5, 11, 0));
        assert_eq!(result.max_delay, 0);
        assert_eq!(result.estimate.to_string(), "05/03/2024");
    }

    #[test]
    fn test_empty_order_ships_on_effective_date() {
        assert_eq!(engine().estimate(&[], at(5, 11, 0)).to_string(), "05/03/2024");
        // Saturday order counts from Monday
        assert_eq!(engine().estimate(&[], at(9, 11, 0)).to_string(), "11/03/2024");
    }

    #[test]
    fn test_weekend_order_counts_from_monday_morning() {
        // Saturday 20:00 would trip the 17:00 cutoff; effective time is Monday 08:00
        let result = engine().estimate_with_breakdown(&items(&["FER1"]), at(9, 20, 0));
        assert_eq!(result.effective_time, at(11, 8, 0));
        assert_eq!(result.max_delay, 2);
        assert_eq!(result.estimate.to_string(), "13/03/2024");
    }

    #[test]
    fn test_lead_time_spanning_weekend() {
        // Thursday + 4 business days => Wednesday
        let result = engine().estimate(&items(&["DIS9"]), at(7, 9, 0));
        assert_eq!(result.to_string(), "13/03/2024");
    }

    #[test]
    fn test_weekly_dispatch_early_monday() {
        let result = engine().estimate_with_breakdown(&items(&["ART55"]), at(4, 8, 0));
        assert_eq!(result.path, DispatchPath::WeeklyDispatch);
        assert_eq!(result.estimate.to_string(), "06/03/2024");
    }

    #[test]
    fn test_weekly_dispatch_early_midweek_ships_monday() {
        let result = engine().estimate(&items(&["ART55"]), at(6, 8, 15));
        assert_eq!(result.to_string(), "11/03/2024");
    }

    #[test]
    fn test_weekly_dispatch_late_falls_back_to_lead_time() {
        // Tuesday 09:00, ART lead time 3 => Friday
        let result = engine().estimate(&items(&["ART55"]), at(5, 9, 0));
        assert_eq!(result.to_string(), "08/03/2024");
    }

    #[test]
    fn test_weekend_order_with_weekly_dispatch_supplier() {
        // Sunday => Monday 08:00, inside the early window
        let result = engine().estimate(&items(&["ART55"]), at(10, 15, 0));
        assert_eq!(result.to_string(), "13/03/2024");
    }

    #[test]
    fn test_weekly_dispatch_overrides_slower_supplier_by_default() {
        // DIS needs 4 business days (Friday) but the weekly slot wins
        let result = engine().estimate(&items(&["ART55", "DIS9"]), at(4, 8, 0));
        assert_eq!(result.to_string(), "06/03/2024");
    }

    #[test]
    fn test_never_earlier_precedence_keeps_slower_supplier() {
        let engine = ShippingDateEngine::new(
            SupplierLeadTimeTable::default(),
            OverridePrecedence::NeverEarlierThanGeneric,
        );
        let result = engine.estimate(&items(&["ART55", "DIS9"]), at(4, 8, 0));
        assert_eq!(result.to_string(), "08/03/2024");
    }

    #[test]
    fn test_never_earlier_precedence_keeps_weekly_slot_when_later() {
        let engine = ShippingDateEngine::new(
            SupplierLeadTimeTable::default(),
            OverridePrecedence::NeverEarlierThanGeneric,
        );
        // Tuesday early: generic is Friday (3 days), slot is next Monday
        let result = engine.estimate(&items(&["ART55"]), at(5, 8, 0));
        assert_eq!(result.to_string(), "11/03/2024");
    }

    #[test]
    fn test_never_earlier_precedence_when_dates_coincide() {
        let engine = ShippingDateEngine::new(
            SupplierLeadTimeTable::default(),
            OverridePrecedence::NeverEarlierThanGeneric,
        );
        // Wednesday early: generic lands on Monday too (3 days)
        let result = engine.estimate(&items(&["ART55", "LUX1"]), at(6, 8, 0));
        assert_eq!(result.to_string(), "11/03/2024");
    }

    #[test]
    fn test_huge_lead_time_saturates_instead_of_panicking() {
        let table = SupplierLeadTimeTable::new(None)
            .with_supplier(SupplierCode::parse("FER").unwrap(), u32::MAX)
            .with_cutoff(SupplierCode::parse("FER").unwrap(), CutoffRule::new(17, 1));
        let engine = ShippingDateEngine::new(table, OverridePrecedence::default());

        let breakdown = engine.estimate_with_breakdown(&items(&["FER1"]), at(4, 18, 0));
        assert_eq!(breakdown.max_delay, u32::MAX);
        assert_eq!(breakdown.estimate.date(), NaiveDate::MAX);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let order = items(&["FER1", "CAP2", "ZZZ3"]);
        let first = engine().estimate(&order, at(6, 18, 0));
        let second = engine().estimate(&order, at(6, 18, 0));
        assert_eq!(first, second);
    }
}
