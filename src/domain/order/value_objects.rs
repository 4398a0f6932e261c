use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::shipping::{parse_order_timestamp, ItemCode};
use super::errors::OrderError;

// ============================================================================
// Order Webhook Payload
// ============================================================================
//
// Only the fields the notifier reads. Everything else in the storefront
// payload is ignored by serde.
//
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub default_address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Human-facing order reference, e.g. "#1001"
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// Who to notify about an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub phone: String,
    pub first_name: String,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl OrderPayload {
    fn default_address(&self) -> Option<&Address> {
        self.customer.as_ref()?.default_address.as_ref()
    }

    /// Billing address first, then the customer's default address
    fn address_field<'a>(
        &'a self,
        field: impl Fn(&'a Address) -> Option<&'a String>,
    ) -> Option<&'a str> {
        non_empty(self.billing_address.as_ref().and_then(&field))
            .or_else(|| non_empty(self.default_address().and_then(&field)))
    }

    pub fn phone(&self) -> Option<&str> {
        self.address_field(|a| a.phone.as_ref())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.address_field(|a| a.first_name.as_ref())
    }

    pub fn order_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn contact(&self) -> Result<ContactDetails, OrderError> {
        match (self.phone(), self.first_name()) {
            (Some(phone), Some(first_name)) => Ok(ContactDetails {
                phone: phone.to_string(),
                first_name: first_name.to_string(),
            }),
            _ => Err(OrderError::MissingContact {
                order: self.order_name().to_string(),
            }),
        }
    }

    /// SKUs of the purchased line items, blanks skipped
    pub fn item_codes(&self) -> Vec<ItemCode> {
        self.line_items
            .iter()
            .filter_map(|item| non_empty(item.sku.as_ref()))
            .map(ItemCode::from)
            .collect()
    }

    /// Order creation time as naive wall-clock time
    pub fn placed_at(&self) -> Result<NaiveDateTime, OrderError> {
        let raw = non_empty(self.created_at.as_ref()).ok_or_else(|| OrderError::MissingTimestamp {
            order: self.order_name().to_string(),
        })?;
        Ok(parse_order_timestamp(raw)?)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
