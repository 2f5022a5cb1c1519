use serde::{Deserialize, Serialize};

use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::OrderEvent;
use super::value_objects::{check_quantity, CakeType, DeliveryField, MIN_QUANTITY};

// ============================================================================
// Order - selections, delivery details and derived price
// ============================================================================

/// A customer's cupcake order.
///
/// Fields are private so that every write goes through a setter or
/// [`Order::apply_event`]; that keeps the quantity within range and the
/// toppings cleared whenever special requests are off. The wire form is
/// [`OrderRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord", into = "OrderRecord")]
pub struct Order {
    cake_type: CakeType,
    quantity: u32,
    special_request_enabled: bool,
    extra_frosting: bool,
    add_sprinkles: bool,

    // Delivery details
    name: String,
    street_address: String,
    city: String,
    zip: String,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            cake_type: CakeType::default(),
            quantity: MIN_QUANTITY,
            special_request_enabled: false,
            extra_frosting: false,
            add_sprinkles: false,
            name: String::new(),
            street_address: String::new(),
            city: String::new(),
            zip: String::new(),
        }
    }
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cake_type(&self) -> CakeType {
        self.cake_type
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn special_request_enabled(&self) -> bool {
        self.special_request_enabled
    }

    pub fn extra_frosting(&self) -> bool {
        self.extra_frosting
    }

    pub fn add_sprinkles(&self) -> bool {
        self.add_sprinkles
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn street_address(&self) -> &str {
        &self.street_address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn delivery_field(&self, field: DeliveryField) -> &str {
        match field {
            DeliveryField::Name => &self.name,
            DeliveryField::StreetAddress => &self.street_address,
            DeliveryField::City => &self.city,
            DeliveryField::Zip => &self.zip,
        }
    }

    pub fn set_cake_type(&mut self, cake_type: CakeType) {
        self.cake_type = cake_type;
    }

    pub fn set_cake_type_index(&mut self, index: usize) -> Result<(), OrderError> {
        self.cake_type = CakeType::from_index(index)?;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), OrderError> {
        self.quantity = check_quantity(i64::from(quantity))?;
        Ok(())
    }

    /// Turning special requests off also clears both toppings. Turning them
    /// back on does not restore the previous choices.
    pub fn set_special_request_enabled(&mut self, enabled: bool) {
        self.special_request_enabled = enabled;
        if !enabled {
            self.extra_frosting = false;
            self.add_sprinkles = false;
        }
    }

    pub fn set_extra_frosting(&mut self, enabled: bool) -> Result<(), OrderError> {
        self.require_special_request(enabled, "extra frosting")?;
        self.extra_frosting = enabled;
        Ok(())
    }

    pub fn set_add_sprinkles(&mut self, enabled: bool) -> Result<(), OrderError> {
        self.require_special_request(enabled, "sprinkles")?;
        self.add_sprinkles = enabled;
        Ok(())
    }

    pub fn set_delivery_field(&mut self, field: DeliveryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DeliveryField::Name => self.name = value,
            DeliveryField::StreetAddress => self.street_address = value,
            DeliveryField::City => self.city = value,
            DeliveryField::Zip => self.zip = value,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_delivery_field(DeliveryField::Name, name);
    }

    pub fn set_street_address(&mut self, street_address: impl Into<String>) {
        self.set_delivery_field(DeliveryField::StreetAddress, street_address);
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.set_delivery_field(DeliveryField::City, city);
    }

    pub fn set_zip(&mut self, zip: impl Into<String>) {
        self.set_delivery_field(DeliveryField::Zip, zip);
    }

    /// Price in dollars, unrounded.
    ///
    /// $2 per cake, plus half the flavor index for the fancier flavors,
    /// $1 per cake for extra frosting and $0.50 per cake for sprinkles.
    pub fn cost(&self) -> f64 {
        let quantity = f64::from(self.quantity);

        let mut cost = quantity * 2.0;
        cost += self.cake_type.index() as f64 / 2.0;

        if self.extra_frosting {
            cost += quantity;
        }

        if self.add_sprinkles {
            cost += quantity / 2.0;
        }

        cost
    }

    /// Cost as US dollars, e.g. `$36.00`.
    pub fn formatted_cost(&self) -> String {
        format!("${:.2}", self.cost())
    }

    pub fn has_valid_address(&self) -> bool {
        self.first_blank_field().is_none()
    }

    pub fn first_blank_field(&self) -> Option<DeliveryField> {
        DeliveryField::ALL
            .into_iter()
            .find(|field| self.delivery_field(*field).trim().is_empty())
    }

    /// Checks everything a checkout needs before the order can be sent.
    pub fn validate(&self) -> Result<(), OrderError> {
        match self.first_blank_field() {
            Some(field) => Err(OrderError::IncompleteAddress(field)),
            None => Ok(()),
        }
    }

    /// Validate a command against the current state and return the events it
    /// produces. Commands that would not change anything produce no events.
    pub fn handle_command(&self, command: &OrderCommand) -> Result<Vec<OrderEvent>, OrderError> {
        match command {
            OrderCommand::SelectCakeType { index } => {
                let cake_type = CakeType::from_index(*index)?;
                if cake_type == self.cake_type {
                    return Ok(vec![]);
                }
                Ok(vec![OrderEvent::CakeTypeSelected { cake_type }])
            }

            OrderCommand::SetQuantity { quantity } => {
                let quantity = check_quantity(i64::from(*quantity))?;
                if quantity == self.quantity {
                    return Ok(vec![]);
                }
                Ok(vec![OrderEvent::QuantityChanged { quantity }])
            }

            OrderCommand::SetSpecialRequest { enabled } => {
                if *enabled == self.special_request_enabled {
                    return Ok(vec![]);
                }

                let mut events = vec![OrderEvent::SpecialRequestChanged { enabled: *enabled }];
                if !*enabled && (self.extra_frosting || self.add_sprinkles) {
                    events.push(OrderEvent::ToppingsCleared);
                }
                Ok(events)
            }

            OrderCommand::SetExtraFrosting { enabled } => {
                self.require_special_request(*enabled, "extra frosting")?;
                if *enabled == self.extra_frosting {
                    return Ok(vec![]);
                }
                Ok(vec![OrderEvent::ExtraFrostingChanged { enabled: *enabled }])
            }

            OrderCommand::SetSprinkles { enabled } => {
                self.require_special_request(*enabled, "sprinkles")?;
                if *enabled == self.add_sprinkles {
                    return Ok(vec![]);
                }
                Ok(vec![OrderEvent::SprinklesChanged { enabled: *enabled }])
            }

            OrderCommand::UpdateDelivery { field, value } => {
                if self.delivery_field(*field) == value.as_str() {
                    return Ok(vec![]);
                }
                Ok(vec![OrderEvent::DeliveryUpdated {
                    field: *field,
                    value: value.clone(),
                }])
            }
        }
    }

    /// Apply an event produced by [`Order::handle_command`].
    ///
    /// Topping events are masked by the special request flag so the
    /// invariant holds even for events applied out of order.
    pub fn apply_event(&mut self, event: &OrderEvent) {
        match event {
            OrderEvent::CakeTypeSelected { cake_type } => self.cake_type = *cake_type,
            OrderEvent::QuantityChanged { quantity } => {
                if let Ok(quantity) = check_quantity(i64::from(*quantity)) {
                    self.quantity = quantity;
                }
            }
            OrderEvent::SpecialRequestChanged { enabled } => {
                self.set_special_request_enabled(*enabled);
            }
            OrderEvent::ToppingsCleared => {
                self.extra_frosting = false;
                self.add_sprinkles = false;
            }
            OrderEvent::ExtraFrostingChanged { enabled } => {
                self.extra_frosting = *enabled && self.special_request_enabled;
            }
            OrderEvent::SprinklesChanged { enabled } => {
                self.add_sprinkles = *enabled && self.special_request_enabled;
            }
            OrderEvent::DeliveryUpdated { field, value } => {
                self.set_delivery_field(*field, value.clone());
            }
        }
    }

    fn require_special_request(&self, enabled: bool, topping: &'static str) -> Result<(), OrderError> {
        if enabled && !self.special_request_enabled {
            return Err(OrderError::SpecialRequestDisabled(topping));
        }
        Ok(())
    }
}

// ============================================================================
// Wire Representation
// ============================================================================

/// JSON payload exchanged with the order endpoint. Field names are fixed by
/// the endpoint contract; only stored fields are carried, never cost or
/// address validity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(rename = "type")]
    pub cake_type: i64,
    pub quantity: i64,
    pub special_request_enabled: bool,
    pub extra_frosting: bool,
    pub add_sprinkles: bool,
    pub name: String,
    pub street_address: String,
    pub city: String,
    pub zip: String,
}

impl From<Order> for OrderRecord {
    fn from(order: Order) -> Self {
        Self {
            cake_type: order.cake_type.index() as i64,
            quantity: i64::from(order.quantity),
            special_request_enabled: order.special_request_enabled,
            extra_frosting: order.extra_frosting,
            add_sprinkles: order.add_sprinkles,
            name: order.name,
            street_address: order.street_address,
            city: order.city,
            zip: order.zip,
        }
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = OrderError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let mut order = Order {
            cake_type: CakeType::from_wire(record.cake_type)?,
            quantity: check_quantity(record.quantity)?,
            special_request_enabled: true,
            extra_frosting: record.extra_frosting,
            add_sprinkles: record.add_sprinkles,
            name: record.name,
            street_address: record.street_address,
            city: record.city,
            zip: record.zip,
        };
        order.set_special_request_enabled(record.special_request_enabled);
        Ok(order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
