use crate::domain::shipping::ShippingError;

// ============================================================================
// Order Payload Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order {order} has no phone number or first name to notify")]
    MissingContact { order: String },

    #[error("Order {order} has no creation timestamp")]
    MissingTimestamp { order: String },

    #[error(transparent)]
    InvalidTimestamp(#[from] ShippingError),

    #[error("Inbound message has no sender address")]
    MissingSender,
}
