use crate::domain::order::OrderError;

// ============================================================================
// Notification Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error(transparent)]
    InvalidPayload(#[from] OrderError),

    #[error("Message send failed: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// Short label used for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            NotificationError::InvalidPayload(OrderError::MissingContact { .. }) => "missing_contact",
            NotificationError::InvalidPayload(OrderError::MissingSender) => "missing_sender",
            NotificationError::InvalidPayload(OrderError::MissingTimestamp { .. }) => "missing_timestamp",
            NotificationError::InvalidPayload(OrderError::InvalidTimestamp(_)) => "invalid_timestamp",
            NotificationError::SendFailed(_) => "send_failed",
        }
    }
}
