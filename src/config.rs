use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::shipping::{
    OverridePrecedence, ShippingDateEngine, SupplierLeadTimeTable, SupplierTableConfig,
};
use crate::messaging::TemplateSet;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Read from the environment (a .env file is loaded first when present).
// The supplier lead-time table is an optional JSON file; without one the
// built-in table applies.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub metrics_port: u16,
    pub sender_address: String,
    pub templates: TemplateSet,
    pub supplier_table_path: Option<PathBuf>,
    pub override_precedence: OverridePrecedence,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            metrics_port: 9090,
            sender_address: "whatsapp:+10000000000".to_string(),
            templates: TemplateSet::default(),
            supplier_table_path: None,
            override_precedence: OverridePrecedence::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine; real deployments set variables directly
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, falling back to defaults per key
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let metrics_port = match lookup("METRICS_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("METRICS_PORT is not a valid port: {port}"))?,
            None => defaults.metrics_port,
        };

        let override_precedence = match lookup("OVERRIDE_PRECEDENCE") {
            Some(value) => value.parse().map_err(anyhow::Error::msg)?,
            None => defaults.override_precedence,
        };

        let templates = TemplateSet {
            order_created: text("TEMPLATE_ORDER_CREATED", defaults.templates.order_created),
            order_paid: text("TEMPLATE_ORDER_PAID", defaults.templates.order_paid),
            order_fulfilled: text("TEMPLATE_ORDER_FULFILLED", defaults.templates.order_fulfilled),
            order_shipped: text("TEMPLATE_ORDER_SHIPPED", defaults.templates.order_shipped),
            order_refunded: text("TEMPLATE_ORDER_REFUNDED", defaults.templates.order_refunded),
            auto_reply: text("TEMPLATE_AUTO_REPLY", defaults.templates.auto_reply),
        };

        Ok(Self {
            metrics_port,
            sender_address: text("SENDER_ADDRESS", defaults.sender_address),
            templates,
            supplier_table_path: lookup("SUPPLIER_TABLE_PATH").map(PathBuf::from),
            override_precedence,
        })
    }

    pub fn supplier_table(&self) -> Result<SupplierLeadTimeTable> {
        let Some(path) = &self.supplier_table_path else {
            return Ok(SupplierLeadTimeTable::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read supplier table {}", path.display()))?;
        let config: SupplierTableConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse supplier table {}", path.display()))?;

        config
            .build()
            .with_context(|| format!("Invalid supplier table {}", path.display()))
    }

    pub fn shipping_engine(&self) -> Result<ShippingDateEngine> {
        Ok(ShippingDateEngine::new(
            self.supplier_table()?,
            self.override_precedence,
        ))
    }
}
