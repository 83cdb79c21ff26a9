//! Order data supplied by the host commerce platform.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::settings::join_present;
use crate::error::DocsmithError;

/// Arbitrary-precision amount in the currency's minor units.
///
/// Accepts a JSON number, a numeric string, or a wrapper object carrying
/// the number under `value` or `numeric` (the shapes big-number fields take
/// in commerce APIs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(pub Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<i64> for Amount {
    fn from(minor_units: i64) -> Self {
        Self(Decimal::from(minor_units))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

fn decimal_from_json(value: &serde_json::Value) -> Result<Decimal, String> {
    match value {
        serde_json::Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|e| format!("invalid amount {}: {}", text, e))
        }
        serde_json::Value::String(s) => {
            Decimal::from_str(s.trim()).map_err(|e| format!("invalid amount {:?}: {}", s, e))
        }
        serde_json::Value::Object(map) => map
            .get("value")
            .or_else(|| map.get("numeric"))
            .ok_or_else(|| "amount object needs a 'value' or 'numeric' field".to_string())
            .and_then(decimal_from_json),
        other => Err(format!("expected amount, got {}", other)),
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        decimal_from_json(&value)
            .map(Amount)
            .map_err(serde::de::Error::custom)
    }
}

/// Customer address on an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address_1: Option<String>,
    #[serde(default)]
    pub address_2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Address {
    pub fn full_name(&self) -> String {
        join_present(&[self.first_name.as_deref(), self.last_name.as_deref()])
    }

    pub fn city_line(&self) -> String {
        join_present(&[self.city.as_deref(), self.postal_code.as_deref()])
    }

    /// Street address, with the second line appended when present.
    pub fn street(&self) -> String {
        let mut street = self.address_1.clone().unwrap_or_default();
        if let Some(line2) = self.address_2.as_deref().filter(|l| !l.trim().is_empty()) {
            if !street.is_empty() {
                street.push_str(", ");
            }
            street.push_str(line2.trim());
        }
        street
    }
}

/// One purchased line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Unit price in minor units.
    pub unit_price: i64,
    /// Unit price as stored by the platform, in minor units.
    #[serde(default)]
    pub raw_unit_price: Option<Amount>,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(title: impl Into<String>, unit_price: i64, quantity: u32) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            unit_price,
            raw_unit_price: None,
            quantity,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn description(&self) -> &str {
        self.subtitle.as_deref().unwrap_or("")
    }

    /// Precise unit price, preferring the arbitrary-precision value.
    pub fn precise_unit_price(&self) -> Decimal {
        self.raw_unit_price
            .map(|a| a.value())
            .unwrap_or_else(|| Decimal::from(self.unit_price))
    }

    /// Unit price times quantity, in minor units; `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.precise_unit_price()
            .checked_mul(Decimal::from(self.quantity))
    }
}

/// Order with everything a document prints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: String,
    pub currency_code: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub shipping_total: Amount,
    #[serde(default)]
    pub tax_total: Amount,
    #[serde(default)]
    pub total: Amount,
}

impl Order {
    /// Fails when a line total does not fit a decimal.
    pub fn check_line_totals(&self) -> crate::error::Result<()> {
        match self.items.iter().find(|item| item.line_total().is_none()) {
            Some(item) => Err(DocsmithError::InvalidOrder(format!(
                "line total of {:?} overflows ({} x {})",
                item.title,
                item.precise_unit_price(),
                item.quantity
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_shapes() {
        let a: Amount = serde_json::from_str("3150").unwrap();
        assert_eq!(a.value(), dec!(3150));
        let b: Amount = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(b.value(), dec!(12.5));
        let c: Amount = serde_json::from_str(r#"{"value": "500"}"#).unwrap();
        assert_eq!(c.value(), dec!(500));
        let d: Amount = serde_json::from_str(r#"{"numeric": 150}"#).unwrap();
        assert_eq!(d.value(), dec!(150));
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert!(serde_json::from_str::<Amount>("true").is_err());
        assert!(serde_json::from_str::<Amount>(r#"{"other": 1}"#).is_err());
        assert!(serde_json::from_str::<Amount>("\"ten\"").is_err());
    }

    #[test]
    fn test_order_from_json() {
        let json = r#"{
            "id": "order_01",
            "currency_code": "usd",
            "items": [
                {"title": "Shirt", "subtitle": "Large", "unit_price": 1000, "raw_unit_price": {"value": "1000"}, "quantity": 2}
            ],
            "shipping_address": {"first_name": "Ada", "last_name": "Lovelace", "city": "London", "postal_code": "N1", "address_1": "12 Analytical Row"},
            "shipping_total": 500,
            "tax_total": {"value": 150},
            "total": "3150"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].line_total(), Some(dec!(2000)));
        assert!(order.billing_address.is_none());
        let ship = order.shipping_address.unwrap();
        assert_eq!(ship.full_name(), "Ada Lovelace");
        assert_eq!(ship.city_line(), "London N1");
        assert_eq!(order.total.value(), dec!(3150));
    }

    #[test]
    fn test_line_total_without_raw_price() {
        let item = LineItem::new("Mug", 450, 3);
        assert_eq!(item.line_total(), Some(dec!(1350)));
        assert_eq!(item.description(), "");
    }

    #[test]
    fn test_line_total_overflow() {
        let mut item = LineItem::new("Yacht", 0, 2);
        item.raw_unit_price = Some(Amount::new(Decimal::MAX));
        assert_eq!(item.line_total(), None);

        let order = Order {
            items: vec![LineItem::new("Mug", 450, 3), item],
            ..Default::default()
        };
        let err = order.check_line_totals().unwrap_err();
        assert!(matches!(err, DocsmithError::InvalidOrder(m) if m.contains("Yacht")));
        assert!(Order::default().check_line_totals().is_ok());
    }

    #[test]
    fn test_street_joins_second_line() {
        let address = Address {
            address_1: Some("1 Main St".into()),
            address_2: Some("Apt 4".into()),
            ..Default::default()
        };
        assert_eq!(address.street(), "1 Main St, Apt 4");
    }
}
