// ============================================================================
// Shipping Boundary Errors
// ============================================================================
//
// The estimate itself never fails. These errors belong to the edges: parsing
// the caller's timestamp and validating an injected lead-time table.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ShippingError {
    #[error("Invalid order timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Supplier code must be exactly 3 characters: '{0}'")]
    InvalidSupplierCode(String),

    #[error("Cutoff hour out of range for supplier {supplier}: {hour}")]
    InvalidCutoffHour { supplier: String, hour: u32 },

    #[error("Lead time out of range for supplier {supplier}: {days} days")]
    InvalidLeadTime { supplier: String, days: u32 },
}
