// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// - order/    - inbound order and chat payloads, contact resolution
// - shipping/ - estimated-shipping-date engine
//
// Nothing in here performs I/O. Sending lives in crate::messaging.
//
// ============================================================================

pub mod order;
pub mod shipping;
