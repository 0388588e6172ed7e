//! Order Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::schema::{Field, Kind, Schema};
use crate::domain::value_objects::{validate_http_url, Currency, OrderStatus, PaymentProvider};

pub const DEFAULT_SHIPPING_COUNTRY: &str = "AU";

/// Placed order. Totals are taken as submitted and are not reconciled
/// against the line items. Status, provider and transaction id are written
/// by the client or by a payment callback outside this service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Order {
    pub email: String,
    #[validate]
    pub items: Vec<CartItem>,
    #[validate(range(min = 0.0))]
    pub subtotal: f64,
    #[validate(range(min = 0.0))]
    pub shipping: f64,
    #[validate(range(min = 0.0))]
    pub total: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub status: OrderStatus,
    pub payment_provider: Option<PaymentProvider>,
    pub transaction_id: Option<String>,
    #[serde(default = "default_shipping_country")]
    pub shipping_country: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Line item snapshot taken at checkout. `product_id` and `sku` are plain
/// references and `price`/`title` are not re-checked against the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct CartItem {
    pub product_id: String,
    pub sku: String,
    /// Quantity ordered.
    #[validate(range(min = 1, max = 10))]
    pub qty: i64,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub title: String,
    pub size: Option<String>,
    #[validate(custom = "validate_http_url")]
    pub image: Option<String>,
}

const CART_ITEM: Kind = Kind::Object(CartItem::FIELDS);

impl Schema for Order {
    const FIELDS: &'static [Field] = &[
        Field::required("email", Kind::Text),
        Field::required("items", Kind::List(&CART_ITEM)),
        Field::required("subtotal", Kind::Number),
        Field::required("shipping", Kind::Number),
        Field::required("total", Kind::Number),
        Field::defaulted("currency", Kind::OneOf(Currency::VARIANTS)),
        Field::defaulted("status", Kind::OneOf(OrderStatus::VARIANTS)),
        Field::optional("payment_provider", Kind::OneOf(PaymentProvider::VARIANTS)),
        Field::optional("transaction_id", Kind::Text),
        Field::defaulted("shipping_country", Kind::Text),
        Field::optional("created_at", Kind::Timestamp),
    ];
}

impl Schema for CartItem {
    const FIELDS: &'static [Field] = &[
        Field::required("product_id", Kind::Text),
        Field::required("sku", Kind::Text),
        Field::required("qty", Kind::Integer),
        Field::required("price", Kind::Number),
        Field::required("title", Kind::Text),
        Field::optional("size", Kind::Text),
        Field::optional("image", Kind::Text),
    ];
}

fn default_shipping_country() -> String { DEFAULT_SHIPPING_COUNTRY.to_string() }

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn item(qty: i64) -> CartItem {
        CartItem {
            product_id: "fight-club-hoodie".into(), sku: "FCH-M".into(), qty, price: 89.0,
            title: "Fight Club Hoodie".into(), size: Some("M".into()), image: None,
        }
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(10, true)]
    #[case(11, false)]
    fn test_qty_bounds(#[case] qty: i64, #[case] valid: bool) {
        assert_eq!(item(qty).validate().is_ok(), valid);
    }

    #[test]
    fn test_order_defaults() {
        let order: Order = serde_json::from_value(json!({
            "email": "sam@example.com",
            "items": [{"product_id": "p1", "sku": "S1", "qty": 2, "price": 45.0, "title": "Tee"}],
            "subtotal": 90.0, "shipping": 9.99, "total": 99.99
        })).unwrap();
        assert_eq!(order.currency, Currency::Aud);
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.shipping_country, "AU");
        assert_eq!(order.payment_provider, None);
        assert_eq!(order.created_at, None);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_totals_not_reconciled() {
        let order: Order = serde_json::from_value(json!({
            "email": "sam@example.com", "items": [],
            "subtotal": 1.0, "shipping": 0.0, "total": 500.0, "status": "paid", "payment_provider": "stripe"
        })).unwrap();
        assert!(order.validate().is_ok());
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[test]
    fn test_item_image_must_be_url() {
        let mut bad = item(1);
        bad.image = Some("hoodie.png".into());
        assert!(bad.validate().is_err());
        bad.image = Some("https://cdn.stoush.au/hoodie.png".into());
        assert!(bad.validate().is_ok());
    }
}
