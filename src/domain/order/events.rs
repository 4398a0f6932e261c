use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::value_objects::OrderPayload;

// ============================================================================
// Order Events - State changes the customer is told about
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEventKind {
    Created,
    Paid,
    Fulfilled,
    Shipped,
    Refunded,
}

impl OrderEventKind {
    pub const ALL: [OrderEventKind; 5] = [
        OrderEventKind::Created,
        OrderEventKind::Paid,
        OrderEventKind::Fulfilled,
        OrderEventKind::Shipped,
        OrderEventKind::Refunded,
    ];

    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEventKind::Created => "order_created",
            OrderEventKind::Paid => "order_paid",
            OrderEventKind::Fulfilled => "order_fulfilled",
            OrderEventKind::Shipped => "order_shipped",
            OrderEventKind::Refunded => "order_refunded",
        }
    }

    /// Only the creation message carries the shipping estimate
    pub fn includes_shipping_estimate(&self) -> bool {
        matches!(self, OrderEventKind::Created)
    }
}

/// Chat message received from a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub from: String,
    #[serde(default)]
    pub body: String,
}

impl InboundMessage {
    pub fn sender(&self) -> Result<&str, OrderError> {
        let from = self.from.trim();
        if from.is_empty() {
            return Err(OrderError::MissingSender);
        }
        Ok(from)
    }
}

/// One line of the notifier's input stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboundEvent {
    Order {
        kind: OrderEventKind,
        payload: OrderPayload,
    },
    InboundMessage(InboundMessage),
}

impl InboundEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            InboundEvent::Order { kind, .. } => kind.event_type(),
            InboundEvent::InboundMessage(_) => "inbound_message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_event_deserialization() {
        let line = r##"{"event":"order","kind":"fulfilled","payload":{"name":"#1001"}}"##;
        let event: InboundEvent = serde_json::from_str(line).unwrap();

        match &event {
            InboundEvent::Order { kind, payload } => {
                assert_eq!(*kind, OrderEventKind::Fulfilled);
                assert_eq!(payload.order_name(), "#1001");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(event.event_type(), "order_fulfilled");
    }

    #[test]
    fn test_inbound_message_deserialization() {
        let line = r#"{"event":"inbound_message","from":"whatsapp:+39333","body":"ciao"}"#;
        let event: InboundEvent = serde_json::from_str(line).unwrap();
        assert_eq!(
            event,
            InboundEvent::InboundMessage(InboundMessage {
                from: "whatsapp:+39333".to_string(),
                body: "ciao".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let line = r#"{"event":"order","kind":"lost","payload":{}}"#;
        assert!(serde_json::from_str::<InboundEvent>(line).is_err());
    }

    #[test]
    fn test_blank_sender_is_rejected() {
        let message = InboundMessage { from: "  ".to_string(), body: String::new() };
        assert!(matches!(message.sender(), Err(OrderError::MissingSender)));
    }

    #[test]
    fn test_only_created_carries_estimate() {
        let with_estimate: Vec<_> = OrderEventKind::ALL
            .iter()
            .filter(|k| k.includes_shipping_estimate())
            .collect();
        assert_eq!(with_estimate, vec![&OrderEventKind::Created]);
    }
}
