// ============================================================================
// Order Notifier
// ============================================================================
//
// Chat notifications for e-commerce order events, with an estimated shipping
// date computed from supplier lead times.
//
// - domain/    - order payloads and the shipping-date engine (pure)
// - messaging/ - notification dispatch over a MessageSender
// - metrics/   - Prometheus registry and /metrics server
// - config     - environment-driven configuration
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod messaging;
pub mod metrics;
