use super::value_objects::DeliveryField;

// ============================================================================
// Order Validation Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid cake type index: {0}")]
    InvalidCakeType(i64),

    #[error("Unknown flavor: {0}")]
    UnknownFlavor(String),

    #[error("Quantity must be between 3 and 20, got {0}")]
    InvalidQuantity(i64),

    #[error("Special requests must be enabled to add {0}")]
    SpecialRequestDisabled(&'static str),

    #[error("Delivery address is incomplete: {0} is blank")]
    IncompleteAddress(DeliveryField),
}
