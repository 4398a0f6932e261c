use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::{InboundMessage, OrderEventKind, OrderPayload};
use crate::domain::shipping::{ShippingDateEngine, ShippingEstimate};
use crate::metrics::Metrics;

use super::errors::NotificationError;
use super::sender::{MessageReceipt, MessageSender, TemplateVariables};

// ============================================================================
// Notification Dispatcher
// ============================================================================
//
// Orchestrates: payload → contact + variables (+ shipping estimate) → sender
//
// A failed send is reported to the caller and counted; it is never retried.
//
// ============================================================================

/// Chat channel prefix for customer phone numbers
pub const RECIPIENT_CHANNEL: &str = "whatsapp";

/// Template identifier for each message the notifier can send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    pub order_created: String,
    pub order_paid: String,
    pub order_fulfilled: String,
    pub order_shipped: String,
    pub order_refunded: String,
    pub auto_reply: String,
}

impl TemplateSet {
    pub fn for_event(&self, kind: OrderEventKind) -> &str {
        match kind {
            OrderEventKind::Created => &self.order_created,
            OrderEventKind::Paid => &self.order_paid,
            OrderEventKind::Fulfilled => &self.order_fulfilled,
            OrderEventKind::Shipped => &self.order_shipped,
            OrderEventKind::Refunded => &self.order_refunded,
        }
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            order_created: "order_created".to_string(),
            order_paid: "order_paid".to_string(),
            order_fulfilled: "order_fulfilled".to_string(),
            order_shipped: "order_shipped".to_string(),
            order_refunded: "order_refunded".to_string(),
            auto_reply: "auto_reply".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub correlation_id: Uuid,
    pub receipt: MessageReceipt,
    pub estimate: Option<ShippingEstimate>,
}

pub struct NotificationDispatcher {
    sender: Arc<dyn MessageSender>,
    engine: Arc<ShippingDateEngine>,
    templates: TemplateSet,
    metrics: Arc<Metrics>,
}

impl NotificationDispatcher {
    pub fn new(
        sender: Arc<dyn MessageSender>,
        engine: Arc<ShippingDateEngine>,
        templates: TemplateSet,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            sender,
            engine,
            templates,
            metrics,
        }
    }

    /// Notify the customer that their order changed state
    pub async fn dispatch_order_event(
        &self,
        kind: OrderEventKind,
        payload: &OrderPayload,
    ) -> Result<DispatchOutcome, NotificationError> {
        let correlation_id = Uuid::new_v4();
        let started = Instant::now();

        let result = self.send_order_notification(kind, payload, correlation_id).await;
        self.record(kind.event_type(), started, &result);

        match &result {
            Ok(outcome) => tracing::info!(
                correlation_id = %correlation_id,
                order_id = %payload.order_name(),
                event_type = kind.event_type(),
                message_id = %outcome.receipt.message_id,
                "✅ Order notification sent"
            ),
            Err(e) => tracing::warn!(
                correlation_id = %correlation_id,
                order_id = %payload.order_name(),
                event_type = kind.event_type(),
                error = %e,
                "Order notification not sent"
            ),
        }

        result
    }

    /// Answer an inbound chat message with the auto-reply template
    pub async fn auto_reply(
        &self,
        message: &InboundMessage,
    ) -> Result<DispatchOutcome, NotificationError> {
        let correlation_id = Uuid::new_v4();
        let started = Instant::now();

        tracing::debug!(
            correlation_id = %correlation_id,
            from = %message.from,
            body = %message.body,
            "Received inbound message"
        );

        let result = self.send_auto_reply(message, correlation_id).await;
        self.record("inbound_message", started, &result);

        if let Err(e) = &result {
            tracing::warn!(correlation_id = %correlation_id, error = %e, "Auto-reply not sent");
        }

        result
    }

    async fn send_auto_reply(
        &self,
        message: &InboundMessage,
        correlation_id: Uuid,
    ) -> Result<DispatchOutcome, NotificationError> {
        let to = message.sender()?;
        let receipt = self
            .sender
            .send_template(to, &self.templates.auto_reply, &TemplateVariables::new())
            .await?;

        Ok(DispatchOutcome {
            correlation_id,
            receipt,
            estimate: None,
        })
    }

    async fn send_order_notification(
        &self,
        kind: OrderEventKind,
        payload: &OrderPayload,
        correlation_id: Uuid,
    ) -> Result<DispatchOutcome, NotificationError> {
        let contact = payload.contact()?;

        let mut variables = TemplateVariables::new();
        variables.insert("1".to_string(), contact.first_name.clone());
        variables.insert("2".to_string(), payload.order_name().to_string());

        let estimate = if kind.includes_shipping_estimate() {
            let placed_at = payload.placed_at()?;
            let breakdown = self
                .engine
                .estimate_with_breakdown(&payload.item_codes(), placed_at);
            self.metrics.record_estimate(breakdown.path.as_str());
            variables.insert("3".to_string(), breakdown.estimate.to_string());
            Some(breakdown.estimate)
        } else {
            None
        };

        let to = format!("{}:{}", RECIPIENT_CHANNEL, contact.phone);
        tracing::debug!(
            correlation_id = %correlation_id,
            to = %to,
            variables = ?variables,
            "Dispatching order notification"
        );

        let receipt = self
            .sender
            .send_template(&to, self.templates.for_event(kind), &variables)
            .await?;

        Ok(DispatchOutcome {
            correlation_id,
            receipt,
            estimate,
        })
    }

    fn record<T>(&self, event_type: &str, started: Instant, result: &Result<T, NotificationError>) {
        let failure = result.as_ref().err().map(NotificationError::reason);
        self.metrics
            .record_dispatch(event_type, started.elapsed().as_secs_f64(), failure);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
