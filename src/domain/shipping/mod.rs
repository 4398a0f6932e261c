// ============================================================================
// Shipping Domain - Estimated Shipping Date
// ============================================================================
//
// This module contains ALL shipping-estimate code:
// - Value objects (ItemCode, SupplierCode, CutoffRule, ShippingEstimate)
// - Lead-time table (per-supplier lead times and cutoff rules)
// - Business calendar (weekend roll-over, business-day stepping)
// - Weekly dispatch override (fixed weekly cycle for one supplier)
// - Engine (ShippingDateEngine orchestrating the above)
// - Errors (ShippingError for boundary parsing and table validation)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod lead_times;
pub mod calendar;
pub mod weekly_dispatch;
pub mod engine;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use lead_times::*;
pub use calendar::*;
pub use weekly_dispatch::*;
pub use engine::*;
