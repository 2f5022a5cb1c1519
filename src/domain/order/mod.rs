// ============================================================================
// Order Domain - pricing, validation and change notification
// ============================================================================
//
// - Value objects (CakeType, DeliveryField, flavor catalog, quantity bounds)
// - Errors (OrderError)
// - Commands (user edits) and Events (accepted changes)
// - Order (state, derived cost and address validity, wire form)
// - OrderStore (applies commands and notifies listeners)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod store;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use store::*;
