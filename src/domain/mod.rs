//! Storefront domain: schemas, validation and pricing rules.
pub mod aggregates;
pub mod schema;
pub mod shipping;
pub mod validation;
pub mod value_objects;
