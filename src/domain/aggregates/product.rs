//! Product Aggregate

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::schema::{Field, Kind, Schema};
use crate::domain::value_objects::{Category, Image, Size};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Catalog entry. `handle` is the public lookup key; nothing below the
/// application enforces that it is unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub title: String,
    pub handle: String,
    pub description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub hero: bool,
    #[serde(default)]
    #[validate]
    pub images: Vec<Image>,
    #[serde(default)]
    #[validate]
    pub variants: Vec<Variant>,
    pub materials: Option<String>,
    pub care: Option<String>,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
    #[serde(default = "default_published")]
    pub published: bool,
}

/// Purchasable SKU under a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Variant {
    pub sku: String,
    pub size: Size,
    pub color: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock: i64,
}

const IMAGE: Kind = Kind::Object(Image::FIELDS);
const VARIANT: Kind = Kind::Object(Variant::FIELDS);

impl Schema for Product {
    const FIELDS: &'static [Field] = &[
        Field::required("title", Kind::Text),
        Field::required("handle", Kind::Text),
        Field::optional("description", Kind::Text),
        Field::required("category", Kind::OneOf(Category::VARIANTS)),
        Field::defaulted("tags", Kind::List(&Kind::Text)),
        Field::defaulted("featured", Kind::Bool),
        Field::defaulted("hero", Kind::Bool),
        Field::defaulted("images", Kind::List(&IMAGE)),
        Field::defaulted("variants", Kind::List(&VARIANT)),
        Field::optional("materials", Kind::Text),
        Field::optional("care", Kind::Text),
        Field::defaulted("low_stock_threshold", Kind::Integer),
        Field::defaulted("published", Kind::Bool),
    ];
}

impl Schema for Variant {
    const FIELDS: &'static [Field] = &[
        Field::required("sku", Kind::Text),
        Field::required("size", Kind::OneOf(Size::VARIANTS)),
        Field::optional("color", Kind::Text),
        Field::required("price", Kind::Number),
        Field::required("stock", Kind::Integer),
    ];
}

fn default_low_stock_threshold() -> i64 { DEFAULT_LOW_STOCK_THRESHOLD }
fn default_published() -> bool { true }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let p: Product = serde_json::from_value(json!({
            "title": "Fight Club Hoodie", "handle": "fight-club-hoodie", "category": "Street"
        })).unwrap();
        assert!(p.tags.is_empty() && p.images.is_empty() && p.variants.is_empty());
        assert!(!p.featured && !p.hero);
        assert!(p.published);
        assert_eq!(p.low_stock_threshold, 5);
        assert_eq!(p.description, None);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_nested_constraints() {
        let p: Product = serde_json::from_value(json!({
            "title": "Tee", "handle": "tee", "category": "Training",
            "images": [{"url": "not-a-url"}],
            "variants": [{"sku": "TEE-M", "size": "M", "price": -1.0, "stock": -2}]
        })).unwrap();
        let errors = p.validate().unwrap_err();
        assert!(errors.errors().contains_key("images"));
        assert!(errors.errors().contains_key("variants"));
    }
}
