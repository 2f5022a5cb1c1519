use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

use crate::domain::order::{CakeType, Order};

/// Response body of the order endpoint: the order as it was received, plus
/// whatever bookkeeping fields the endpoint adds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoedOrder {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub quantity: u32,
    pub cake_type: CakeType,
    pub order_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Confirmation {
    pub fn message(&self) -> String {
        format!(
            "Your order for {}x {} cupcakes is on its way!",
            self.quantity,
            self.cake_type.name().to_lowercase()
        )
    }
}

impl From<EchoedOrder> for Confirmation {
    fn from(echo: EchoedOrder) -> Self {
        // Endpoints disagree on whether ids are strings or numbers
        let order_id = echo.id.map(|id| match id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

        Self {
            quantity: echo.order.quantity(),
            cake_type: echo.order.cake_type(),
            order_id,
            created_at: echo.created_at,
        }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echoed(extra: serde_json::Value) -> serde_json::Value {
        let mut body = json!({
            "type": 1,
            "quantity": 5,
            "specialRequestEnabled": false,
            "extraFrosting": false,
            "addSprinkles": false,
            "name": "Taylor",
            "streetAddress": "1 Infinite Loop",
            "city": "Cupertino",
            "zip": "95014"
        });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }
        body
    }

    #[test]
    fn test_message_uses_lowercase_flavor() {
        let echo: EchoedOrder = serde_json::from_value(echoed(json!({}))).unwrap();
        let confirmation = Confirmation::from(echo);

        assert_eq!(
            confirmation.message(),
            "Your order for 5x strawberry cupcakes is on its way!"
        );
        assert_eq!(confirmation.order_id, None);
    }

    #[test]
    fn test_reads_endpoint_bookkeeping_fields() {
        let body = echoed(json!({ "id": "481", "createdAt": "2023-04-19T18:02:11.451Z" }));
        let confirmation = Confirmation::from(serde_json::from_value::<EchoedOrder>(body).unwrap());

        assert_eq!(confirmation.order_id.as_deref(), Some("481"));
        assert!(confirmation.created_at.is_some());
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let body = echoed(json!({ "id": 17 }));
        let confirmation = Confirmation::from(serde_json::from_value::<EchoedOrder>(body).unwrap());
        assert_eq!(confirmation.order_id.as_deref(), Some("17"));
    }

    #[test]
    fn test_missing_order_fields_fail_to_decode() {
        let result = serde_json::from_value::<EchoedOrder>(json!({ "id": "1" }));
        assert!(result.is_err());
    }
}
