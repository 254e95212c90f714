//! # Order Types
//!
//! Cart, order and checkout session types.
//!
//! A cart arrives from the storefront as a list of `{ title, price, quantity }`
//! items with decimal prices. It is turned into an [`Order`] whose line items
//! carry minor-unit amounts, ready to hand to a payment provider.

use crate::price::{Currency, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A cart item as posted by the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Display name shown on the hosted checkout page
    pub title: String,

    /// Decimal unit price; numeric strings such as `"19.99"` are accepted
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: f64,

    /// Quantity; numeric strings and integral floats such as `"2"` or `2.0`
    /// are accepted
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
}

impl CartItem {
    pub fn new(title: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            title: title.into(),
            price,
            quantity,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Number(f64),
    Text(String),
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Decimal::deserialize(deserializer)? {
        Decimal::Number(n) => Ok(n),
        Decimal::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid price: {:?}", s))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Quantity {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64)
        .then_some(n as i64)
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Quantity::deserialize(deserializer)? {
        Quantity::Integer(n) => return Ok(n),
        Quantity::Float(n) => integral(n),
        Quantity::Text(ref s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
    };
    parsed.ok_or_else(|| serde::de::Error::custom("quantity must be a whole number"))
}

/// A line item in an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name
    pub name: String,

    /// Unit price in minor units
    pub unit_price: Price,

    /// Quantity
    pub quantity: i64,
}

impl LineItem {
    /// Create a line item from a cart item, converting the price to minor units
    pub fn from_cart_item(item: &CartItem, currency: Currency) -> Self {
        Self {
            name: item.title.clone(),
            unit_price: Price::new(item.price, currency),
            quantity: item.quantity,
        }
    }

    /// Calculate the total price for this line item, saturating at the
    /// `i64` bounds
    pub fn total(&self) -> Price {
        Price {
            amount: self.unit_price.amount.saturating_mul(self.quantity),
            currency: self.unit_price.currency,
        }
    }
}

/// A one-time payment order to be checked out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Line items
    pub line_items: Vec<LineItem>,

    /// Currency (same for all items)
    pub currency: Currency,
}

impl Order {
    /// Create an empty order
    pub fn new(currency: Currency) -> Self {
        Self {
            line_items: Vec::new(),
            currency,
        }
    }

    /// Build an order from cart items. No positivity or emptiness checks are
    /// made here; the provider is the judge of what it accepts.
    pub fn from_cart(items: &[CartItem], currency: Currency) -> Self {
        let mut order = Self::new(currency);
        for item in items {
            order.add_item(LineItem::from_cart_item(item, currency));
        }
        order
    }

    /// Add a line item
    pub fn add_item(&mut self, item: LineItem) {
        self.line_items.push(item);
    }

    /// Calculate order total, saturating at the `i64` bounds
    pub fn total(&self) -> Price {
        let total_amount = self
            .line_items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.total().amount));
        Price {
            amount: total_amount,
            currency: self.currency,
        }
    }

    /// Check if order is empty
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Get item count
    pub fn item_count(&self) -> i64 {
        self.line_items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }
}

/// A checkout session created by a payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// URL to redirect customer to for payment
    pub checkout_url: String,

    /// Payment intent ID, when the provider creates one up front
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,

    /// When the session expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CheckoutSession {
    pub fn new(session_id: impl Into<String>, checkout_url: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            checkout_url: checkout_url.into(),
            payment_intent_id: None,
            expires_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_to_line_item() {
        let item = CartItem::new("A", 19.99, 2);
        let line = LineItem::from_cart_item(&item, Currency::EUR);

        assert_eq!(line.name, "A");
        assert_eq!(line.unit_price.amount, 1999);
        assert_eq!(line.unit_price.currency.as_str(), "eur");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.total().amount, 3998);
    }

    #[test]
    fn test_order_from_cart() {
        let cart = vec![
            CartItem::new("Star map", 10.0, 2),
            CartItem::new("Telescope", 25.5, 1),
        ];
        let order = Order::from_cart(&cart, Currency::EUR);

        assert_eq!(order.total().amount, 4550);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_empty_cart_is_not_rejected() {
        let order = Order::from_cart(&[], Currency::EUR);
        assert!(order.is_empty());
        assert_eq!(order.total().amount, 0);
    }

    #[test]
    fn test_cart_item_accepts_numeric_string_price() {
        let item: CartItem =
            serde_json::from_str(r#"{"title":"A","price":"19.99","quantity":1}"#).unwrap();
        assert_eq!(item.price, 19.99);

        let item: CartItem =
            serde_json::from_str(r#"{"title":"A","price":5,"quantity":1}"#).unwrap();
        assert_eq!(item.price, 5.0);
    }

    #[test]
    fn test_cart_item_rejects_garbage_price() {
        let result =
            serde_json::from_str::<CartItem>(r#"{"title":"A","price":"cheap","quantity":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_huge_cart_totals_saturate() {
        let cart = vec![
            CartItem::new("A", 1e17, 1000),
            CartItem::new("B", 1.0, i64::MAX),
        ];
        let order = Order::from_cart(&cart, Currency::EUR);

        assert_eq!(order.line_items[0].unit_price.amount, i64::MAX);
        assert_eq!(order.line_items[0].total().amount, i64::MAX);
        assert_eq!(order.total().amount, i64::MAX);
        assert_eq!(order.item_count(), i64::MAX);
        assert!(!order.total().display().is_empty());
    }

    #[test]
    fn test_negative_totals_saturate() {
        let cart = vec![
            CartItem::new("A", -1e17, 2),
            CartItem::new("B", -1.0, 1),
        ];
        let order = Order::from_cart(&cart, Currency::EUR);
        assert_eq!(order.total().amount, i64::MIN);
    }

    #[test]
    fn test_cart_item_accepts_numeric_quantity_forms() {
        for raw in [r#"2"#, r#""2""#, r#"2.0"#, r#"" 2 ""#, r#""2.0""#] {
            let json = format!(r#"{{"title":"A","price":1,"quantity":{}}}"#, raw);
            let item: CartItem = serde_json::from_str(&json).unwrap();
            assert_eq!(item.quantity, 2, "quantity {}", raw);
        }
    }

    #[test]
    fn test_cart_item_rejects_fractional_or_garbage_quantity() {
        for raw in [r#"2.5"#, r#""two""#, r#"null"#] {
            let json = format!(r#"{{"title":"A","price":1,"quantity":{}}}"#, raw);
            assert!(serde_json::from_str::<CartItem>(&json).is_err(), "quantity {}", raw);
        }
    }
}
