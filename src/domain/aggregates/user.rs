//! User account schema
//!
//! Reserved: no route reads or writes users yet and there is no
//! authentication flow behind it.

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::schema::{Field, Kind, Schema};
use crate::domain::value_objects::Role;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Schema for User {
    const FIELDS: &'static [Field] = &[
        Field::optional("name", Kind::Text),
        Field::required("email", Kind::Text),
        Field::optional("password_hash", Kind::Text),
        Field::defaulted("role", Kind::OneOf(Role::VARIANTS)),
    ];
}
