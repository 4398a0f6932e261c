use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::errors::ShippingError;

// ============================================================================
// Shipping Value Objects
// ============================================================================

/// Number of leading characters of an item code that name its supplier
pub const SUPPLIER_CODE_LEN: usize = 3;

/// Purchased item identifier; the first 3 characters are the supplier prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemCode(pub String);

impl ItemCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Supplier prefix of this item, `None` when the code is too short
    pub fn supplier(&self) -> Option<SupplierCode> {
        let prefix: String = self.0.chars().take(SUPPLIER_CODE_LEN).collect();
        if prefix.chars().count() == SUPPLIER_CODE_LEN {
            Some(SupplierCode(prefix))
        } else {
            None
        }
    }
}

impl From<&str> for ItemCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Case-sensitive 3-character supplier prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SupplierCode(String);

impl SupplierCode {
    pub fn parse(code: impl Into<String>) -> Result<Self, ShippingError> {
        let code = code.into();
        if code.chars().count() != SUPPLIER_CODE_LEN {
            return Err(ShippingError::InvalidSupplierCode(code));
        }
        Ok(Self(code))
    }

    /// Code from a built-in table; the literal must be 3 characters
    pub(crate) fn known(code: &'static str) -> Self {
        debug_assert_eq!(code.chars().count(), SUPPLIER_CODE_LEN);
        Self(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SupplierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extra lead time owed when an order lands at or after `hour`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffRule {
    pub hour: u32,
    pub extra_days: u32,
}

impl CutoffRule {
    pub fn new(hour: u32, extra_days: u32) -> Self {
        Self { hour, extra_days }
    }

    pub fn applies_at(&self, hour: u32) -> bool {
        hour >= self.hour
    }
}

/// Date the order is expected to leave the warehouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShippingEstimate(NaiveDate);

impl ShippingEstimate {
    pub const DISPLAY_FORMAT: &'static str = "%d/%m/%Y";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ShippingEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::DISPLAY_FORMAT))
    }
}

/// Parse an ISO-8601 timestamp with UTC offset, keeping the wall-clock time
/// and dropping the offset.
pub fn parse_order_timestamp(value: &str) -> Result<NaiveDateTime, ShippingError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.naive_local())
        .map_err(|source| ShippingError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_supplier_prefix_extraction() {
        let item = ItemCode::new("FER123");
        assert_eq!(item.supplier().unwrap().as_str(), "FER");
    }

    #[test]
    fn test_exact_length_code_is_its_own_prefix() {
        assert_eq!(ItemCode::new("CAP").supplier().unwrap().as_str(), "CAP");
    }

    #[test]
    fn test_short_codes_have_no_supplier() {
        assert!(ItemCode::new("FE").supplier().is_none());
        assert!(ItemCode::new("").supplier().is_none());
    }

    #[test]
    fn test_prefix_counts_characters_not_bytes() {
        let item = ItemCode::new("ÀBC-77");
        assert_eq!(item.supplier().unwrap().as_str(), "ÀBC");
    }

    #[test]
    fn test_supplier_code_parse_rejects_wrong_length() {
        assert!(SupplierCode::parse("FER").is_ok());
        assert!(matches!(
            SupplierCode::parse("FERR"),
            Err(ShippingError::InvalidSupplierCode(_))
        ));
    }

    #[test]
    fn test_cutoff_rule_threshold_is_inclusive() {
        let rule = CutoffRule::new(17, 1);
        assert!(!rule.applies_at(16));
        assert!(rule.applies_at(17));
        assert!(rule.applies_at(23));
    }

    #[test]
    fn test_estimate_display_format() {
        let estimate = ShippingEstimate::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(estimate.to_string(), "05/03/2024");
    }

    #[test]
    fn test_parse_timestamp_drops_offset() {
        let ts = parse_order_timestamp("2024-03-08T18:15:00+01:00").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert_eq!(ts.hour(), 18);
        assert_eq!(ts.minute(), 15);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_order_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, ShippingError::InvalidTimestamp { .. }));
    }
}
