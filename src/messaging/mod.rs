// ============================================================================
// Messaging - Outbound chat notifications
// ============================================================================
//
// - sender     - MessageSender seam and the logging implementation
// - dispatcher - turns order events and inbound chats into template sends
// - errors     - NotificationError
//
// The vendor messaging client is an external collaborator and plugs in by
// implementing MessageSender.
//
// ============================================================================

mod dispatcher;
mod errors;
mod sender;

pub use dispatcher::{DispatchOutcome, NotificationDispatcher, TemplateSet, RECIPIENT_CHANNEL};
pub use errors::NotificationError;
pub use sender::{LoggingSender, MessageReceipt, MessageSender, TemplateVariables};
