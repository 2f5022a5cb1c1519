use super::value_objects::DeliveryField;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCommand {
    SelectCakeType {
        index: usize,
    },
    SetQuantity {
        quantity: u32,
    },
    SetSpecialRequest {
        enabled: bool,
    },
    SetExtraFrosting {
        enabled: bool,
    },
    SetSprinkles {
        enabled: bool,
    },
    UpdateDelivery {
        field: DeliveryField,
        value: String,
    },
}
