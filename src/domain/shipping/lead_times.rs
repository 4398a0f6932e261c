use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::errors::ShippingError;
use super::value_objects::{CutoffRule, ItemCode, SupplierCode};

// ============================================================================
// Supplier Lead-Time Table
// ============================================================================
//
// Base lead time (business days) per supplier prefix, optional cutoff rules,
// and the supplier that runs on a fixed weekly dispatch cycle. Built once at
// startup and shared read-only.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierLeadTimeTable {
    lead_times: HashMap<SupplierCode, u32>,
    cutoffs: HashMap<SupplierCode, CutoffRule>,
    weekly_dispatch_supplier: Option<SupplierCode>,
}

impl SupplierLeadTimeTable {
    pub fn new(weekly_dispatch_supplier: Option<SupplierCode>) -> Self {
        Self {
            lead_times: HashMap::new(),
            cutoffs: HashMap::new(),
            weekly_dispatch_supplier,
        }
    }

    pub fn with_supplier(mut self, supplier: SupplierCode, lead_time: u32) -> Self {
        self.lead_times.insert(supplier, lead_time);
        self
    }

    pub fn with_cutoff(mut self, supplier: SupplierCode, rule: CutoffRule) -> Self {
        self.cutoffs.insert(supplier, rule);
        self
    }

    pub fn weekly_dispatch_supplier(&self) -> Option<&SupplierCode> {
        self.weekly_dispatch_supplier.as_ref()
    }

    pub fn is_registered(&self, supplier: &SupplierCode) -> bool {
        self.lead_times.contains_key(supplier)
    }

    /// Lead time for `supplier` given the effective order hour.
    /// Unregistered suppliers yield `None`.
    pub fn lead_time(&self, supplier: &SupplierCode, hour: u32) -> Option<u32> {
        let base = *self.lead_times.get(supplier)?;
        let extra = self
            .cutoffs
            .get(supplier)
            .filter(|rule| rule.applies_at(hour))
            .map_or(0, |rule| rule.extra_days);
        Some(base.saturating_add(extra))
    }

    /// Slowest adjusted lead time across the order; 0 when no item matches.
    pub fn max_delay(&self, items: &[ItemCode], hour: u32) -> u32 {
        items
            .iter()
            .filter_map(ItemCode::supplier)
            .filter_map(|supplier| self.lead_time(&supplier, hour))
            .max()
            .unwrap_or(0)
    }

    /// Whether any item comes from the weekly-dispatch supplier
    pub fn contains_weekly_dispatch(&self, items: &[ItemCode]) -> bool {
        match &self.weekly_dispatch_supplier {
            Some(special) => items
                .iter()
                .filter_map(ItemCode::supplier)
                .any(|supplier| &supplier == special),
            None => false,
        }
    }
}

impl Default for SupplierLeadTimeTable {
    /// Table used by the current deployment
    fn default() -> Self {
        let code = SupplierCode::known;
        Self::new(Some(code("ART")))
            .with_supplier(code("FER"), 2)
            .with_supplier(code("CAP"), 3)
            .with_supplier(code("LUX"), 1)
            .with_supplier(code("DIS"), 4)
            .with_supplier(code("ART"), 3)
            .with_cutoff(code("FER"), CutoffRule::new(17, 1))
            .with_cutoff(code("CAP"), CutoffRule::new(17, 1))
            .with_cutoff(code("LUX"), CutoffRule::new(10, 1))
    }
}

// ============================================================================
// Serializable configuration form
// ============================================================================

/// Upper bound for a base lead time or a cutoff's extra days
pub const MAX_LEAD_TIME_DAYS: u32 = 365;

fn check_lead_time(supplier: &str, days: u32) -> Result<u32, ShippingError> {
    if days > MAX_LEAD_TIME_DAYS {
        return Err(ShippingError::InvalidLeadTime {
            supplier: supplier.to_string(),
            days,
        });
    }
    Ok(days)
}

/// JSON shape of a lead-time table, validated into `SupplierLeadTimeTable`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierTableConfig {
    pub lead_times: BTreeMap<String, u32>,
    #[serde(default)]
    pub cutoffs: BTreeMap<String, CutoffRule>,
    #[serde(default)]
    pub weekly_dispatch_supplier: Option<String>,
}

impl SupplierTableConfig {
    pub fn build(&self) -> Result<SupplierLeadTimeTable, ShippingError> {
        let special = self
            .weekly_dispatch_supplier
            .clone()
            .map(SupplierCode::parse)
            .transpose()?;

        let mut table = SupplierLeadTimeTable::new(special);
        for (code, lead_time) in &self.lead_times {
            let days = check_lead_time(code, *lead_time)?;
            table = table.with_supplier(SupplierCode::parse(code.clone())?, days);
        }
        for (code, rule) in &self.cutoffs {
            if rule.hour > 23 {
                return Err(ShippingError::InvalidCutoffHour {
                    supplier: code.clone(),
                    hour: rule.hour,
                });
            }
            check_lead_time(code, rule.extra_days)?;
            table = table.with_cutoff(SupplierCode::parse(code.clone())?, *rule);
        }
        Ok(table)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
