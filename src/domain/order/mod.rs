// ============================================================================
// Order Domain - Inbound Order and Chat Payloads
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderPayload, Address, LineItem, ContactDetails)
// - Events (OrderEventKind, InboundMessage, InboundEvent)
// - Errors (OrderError enum)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod errors;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use errors::*;
