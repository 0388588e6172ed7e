//! Flat-rate shipping.
//!
//! Domestic (AU) orders ship free from 150, otherwise 9.99. Everything else
//! ships free from 300, otherwise 24.99. Quotes are always in AUD.

use serde::{Deserialize, Serialize};
use crate::domain::validation::Violations;
use crate::domain::value_objects::Currency;

pub const DOMESTIC_COUNTRY: &str = "AU";
const DOMESTIC_FREE_FROM: f64 = 150.0;
const DOMESTIC_RATE: f64 = 9.99;
const INTERNATIONAL_FREE_FROM: f64 = 300.0;
const INTERNATIONAL_RATE: f64 = 24.99;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub country: String,
    pub subtotal: f64,
    pub shipping: f64,
    pub currency: Currency,
}

/// Quote shipping for `subtotal` to `country` (any case).
pub fn quote(country: &str, subtotal: f64) -> Result<ShippingQuote, Violations> {
    if !subtotal.is_finite() || subtotal < 0.0 {
        return Err(Violations::single("subtotal", "must be a non-negative number"));
    }
    let country = country.trim().to_uppercase();
    let (free_from, rate) = if country == DOMESTIC_COUNTRY {
        (DOMESTIC_FREE_FROM, DOMESTIC_RATE)
    } else {
        (INTERNATIONAL_FREE_FROM, INTERNATIONAL_RATE)
    };
    let shipping = if subtotal >= free_from { 0.0 } else { rate };
    Ok(ShippingQuote { country, subtotal, shipping, currency: Currency::Aud })
}
