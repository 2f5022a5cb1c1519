use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Flavor catalog. Orders refer to a flavor by its zero-based index here.
pub const FLAVORS: [&str; 4] = ["Vanilla", "Strawberry", "Chocolate", "Rainbow"];

pub const MIN_QUANTITY: u32 = 3;
pub const MAX_QUANTITY: u32 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CakeType {
    #[default]
    Vanilla,
    Strawberry,
    Chocolate,
    Rainbow,
}

impl CakeType {
    pub const ALL: [CakeType; 4] = [
        CakeType::Vanilla,
        CakeType::Strawberry,
        CakeType::Chocolate,
        CakeType::Rainbow,
    ];

    pub fn from_index(index: usize) -> Result<Self, OrderError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(OrderError::InvalidCakeType(index as i64))
    }

    /// Wire values are signed so that a negative index is reported, not truncated.
    pub fn from_wire(index: i64) -> Result<Self, OrderError> {
        usize::try_from(index)
            .map_err(|_| OrderError::InvalidCakeType(index))
            .and_then(Self::from_index)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        FLAVORS[self.index()]
    }
}

impl fmt::Display for CakeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either a flavor name (any case) or its index.
impl FromStr for CakeType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<i64>() {
            return Self::from_wire(index);
        }

        Self::ALL
            .into_iter()
            .find(|cake| cake.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OrderError::UnknownFlavor(s.to_string()))
    }
}

pub fn check_quantity(quantity: i64) -> Result<u32, OrderError> {
    match u32::try_from(quantity) {
        Ok(q) if (MIN_QUANTITY..=MAX_QUANTITY).contains(&q) => Ok(q),
        _ => Err(OrderError::InvalidQuantity(quantity)),
    }
}

/// One of the four delivery text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryField {
    Name,
    StreetAddress,
    City,
    Zip,
}

impl DeliveryField {
    pub const ALL: [DeliveryField; 4] = [
        DeliveryField::Name,
        DeliveryField::StreetAddress,
        DeliveryField::City,
        DeliveryField::Zip,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeliveryField::Name => "name",
            DeliveryField::StreetAddress => "street address",
            DeliveryField::City => "city",
            DeliveryField::Zip => "zip",
        }
    }
}

impl fmt::Display for DeliveryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_list_order() {
        assert_eq!(FLAVORS, ["Vanilla", "Strawberry", "Chocolate", "Rainbow"]);
        for (index, cake) in CakeType::ALL.iter().enumerate() {
            assert_eq!(cake.index(), index);
            assert_eq!(cake.name(), FLAVORS[index]);
        }
    }

    #[test]
    fn test_cake_type_from_index_bounds() {
        assert_eq!(CakeType::from_index(2).unwrap(), CakeType::Chocolate);
        assert_eq!(CakeType::from_index(4), Err(OrderError::InvalidCakeType(4)));
        assert_eq!(CakeType::from_wire(-1), Err(OrderError::InvalidCakeType(-1)));
    }

    #[test]
    fn test_cake_type_parses_name_or_index() {
        assert_eq!("rainbow".parse::<CakeType>().unwrap(), CakeType::Rainbow);
        assert_eq!("Strawberry".parse::<CakeType>().unwrap(), CakeType::Strawberry);
        assert_eq!("2".parse::<CakeType>().unwrap(), CakeType::Chocolate);
        assert_eq!(
            "lemon".parse::<CakeType>(),
            Err(OrderError::UnknownFlavor("lemon".to_string()))
        );
    }

    #[test]
    fn test_quantity_range() {
        assert_eq!(check_quantity(3), Ok(3));
        assert_eq!(check_quantity(20), Ok(20));
        assert_eq!(check_quantity(2), Err(OrderError::InvalidQuantity(2)));
        assert_eq!(check_quantity(21), Err(OrderError::InvalidQuantity(21)));
        assert_eq!(check_quantity(-5), Err(OrderError::InvalidQuantity(-5)));
    }
}
