use serde::{Deserialize, Serialize};

use super::value_objects::{CakeType, DeliveryField};

// ============================================================================
// Order Events - change notifications emitted for every accepted edit
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    CakeTypeSelected { cake_type: CakeType },
    QuantityChanged { quantity: u32 },
    SpecialRequestChanged { enabled: bool },
    /// Emitted after `SpecialRequestChanged { enabled: false }` when a topping was selected.
    ToppingsCleared,
    ExtraFrostingChanged { enabled: bool },
    SprinklesChanged { enabled: bool },
    DeliveryUpdated { field: DeliveryField, value: String },
}

impl OrderEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::CakeTypeSelected { .. } => "CakeTypeSelected",
            OrderEvent::QuantityChanged { .. } => "QuantityChanged",
            OrderEvent::SpecialRequestChanged { .. } => "SpecialRequestChanged",
            OrderEvent::ToppingsCleared => "ToppingsCleared",
            OrderEvent::ExtraFrostingChanged { .. } => "ExtraFrostingChanged",
            OrderEvent::SprinklesChanged { .. } => "SprinklesChanged",
            OrderEvent::DeliveryUpdated { .. } => "DeliveryUpdated",
        }
    }
}
