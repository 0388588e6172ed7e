//! Value Objects for the storefront schemas

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use super::schema::{Field, Kind, Schema};

/// Catalog section a product is merchandised under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category { Training, Street, Drops }

impl Category {
    pub const VARIANTS: &'static [&'static str] = &["Training", "Street", "Drops"];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "XS")] Xs,
    #[serde(rename = "S")] S,
    #[serde(rename = "M")] M,
    #[serde(rename = "L")] L,
    #[serde(rename = "XL")] Xl,
    #[serde(rename = "XXL")] Xxl,
}

impl Size {
    pub const VARIANTS: &'static [&'static str] = &["XS", "S", "M", "L", "XL", "XXL"];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "AUD")] Aud,
    #[serde(rename = "USD")] Usd,
}

impl Currency {
    pub const VARIANTS: &'static [&'static str] = &["AUD", "USD"];
}

/// Order lifecycle. Orders are created as `Created`; later transitions belong
/// to whatever payment callback integration confirms the order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus { #[default] Created, Paid, Shipped, Cancelled }

impl OrderStatus {
    pub const VARIANTS: &'static [&'static str] = &["created", "paid", "shipped", "cancelled"];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider { Stripe, Paypal }

impl PaymentProvider {
    pub const VARIANTS: &'static [&'static str] = &["stripe", "paypal"];
}

/// Where on the site a newsletter signup came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberSource { #[default] Hero, Footer, Modal, Account }

impl SubscriberSource {
    pub const VARIANTS: &'static [&'static str] = &["hero", "footer", "modal", "account"];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role { #[default] Customer, Admin }

impl Role {
    pub const VARIANTS: &'static [&'static str] = &["customer", "admin"];
}

/// Product image
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Image {
    #[validate(custom = "validate_http_url")]
    pub url: String,
    pub alt: Option<String>,
}

impl Schema for Image {
    const FIELDS: &'static [Field] = &[Field::required("url", Kind::Text), Field::optional("alt", Kind::Text)];
}

/// Accepts absolute `http`/`https` URLs with a host.
pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => {
            let mut err = ValidationError::new("url");
            err.message = Some("must be a well-formed http(s) URL".into());
            Err(err)
        }
    }
}
