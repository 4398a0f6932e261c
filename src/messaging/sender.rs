use std::collections::BTreeMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::NotificationError;

/// Positional template variables, keyed "1", "2", ...
pub type TemplateVariables = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    pub message_id: String,
    pub to: String,
    pub template_id: String,
}

/// Sends a pre-approved template message to a chat address
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_template(
        &self,
        to: &str,
        template_id: &str,
        variables: &TemplateVariables,
    ) -> Result<MessageReceipt, NotificationError>;
}

/// Sender that records the outbound message in the log instead of calling a
/// messaging API.
pub struct LoggingSender {
    from: String,
}

impl LoggingSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl MessageSender for LoggingSender {
    async fn send_template(
        &self,
        to: &str,
        template_id: &str,
        variables: &TemplateVariables,
    ) -> Result<MessageReceipt, NotificationError> {
        let content_variables = serde_json::to_string(variables)
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
        let message_id = Uuid::new_v4().to_string();

        tracing::info!(
            from = %self.from,
            to = %to,
            template_id = %template_id,
            content_variables = %content_variables,
            message_id = %message_id,
            "Template message sent"
        );

        Ok(MessageReceipt {
            message_id,
            to: to.to_string(),
            template_id: template_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_sender_returns_receipt() {
        let sender = LoggingSender::new("whatsapp:+390000");
        let mut variables = TemplateVariables::new();
        variables.insert("1".to_string(), "Giulia".to_string());

        let receipt = sender
            .send_template("whatsapp:+391111", "order_created", &variables)
            .await
            .unwrap();

        assert_eq!(receipt.to, "whatsapp:+391111");
        assert_eq!(receipt.template_id, "order_created");
        assert!(Uuid::parse_str(&receipt.message_id).is_ok());
    }
}
