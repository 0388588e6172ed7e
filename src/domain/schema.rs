//! Declared wire shapes of the storefront schemas.
//!
//! The JSON decoder gives up at the first missing field or wrong type. A body
//! is walked against these declarations first so that every structural
//! problem is reported together, and each bad part is swapped for a
//! well-typed placeholder so the rest of the body can still be decoded and
//! constraint-checked.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::validation::Violation;

/// JSON type a field must carry.
pub enum Kind {
    Text,
    Number,
    Integer,
    Bool,
    /// RFC 3339 date-time string.
    Timestamp,
    /// String drawn from a closed, case-sensitive set.
    OneOf(&'static [&'static str]),
    Object(&'static [Field]),
    List(&'static Kind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Must be present and non-null.
    Required,
    /// May be absent (a default applies) but not null.
    Defaulted,
    /// May be absent or null.
    Optional,
}

pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub presence: Presence,
}

impl Field {
    pub const fn required(name: &'static str, kind: Kind) -> Self { Self { name, kind, presence: Presence::Required } }
    pub const fn defaulted(name: &'static str, kind: Kind) -> Self { Self { name, kind, presence: Presence::Defaulted } }
    pub const fn optional(name: &'static str, kind: Kind) -> Self { Self { name, kind, presence: Presence::Optional } }
}

/// A type whose JSON form is an object with these fields.
pub trait Schema {
    const FIELDS: &'static [Field];
}

pub const FIELD_REQUIRED: &str = "field required";

/// Check `body` against `fields`, repairing it in place. Returns one
/// violation per missing, mistyped or out-of-set value, in declaration order.
pub fn inspect(fields: &[Field], body: &mut Map<String, Value>) -> Vec<Violation> {
    let mut out = Vec::new();
    inspect_object(fields, body, "", &mut out);
    out
}

fn inspect_object(fields: &[Field], map: &mut Map<String, Value>, prefix: &str, out: &mut Vec<Violation>) {
    for field in fields {
        let path = if prefix.is_empty() { field.name.to_string() } else { format!("{prefix}.{}", field.name) };
        if !map.contains_key(field.name) {
            if field.presence == Presence::Required {
                out.push(Violation { field: path, message: FIELD_REQUIRED.to_string() });
                map.insert(field.name.to_string(), placeholder(&field.kind));
            }
            continue;
        }
        if let Some(value) = map.get_mut(field.name) {
            if value.is_null() && field.presence == Presence::Optional {
                continue;
            }
            inspect_value(&field.kind, value, &path, out);
        }
    }
}

fn inspect_value(kind: &Kind, value: &mut Value, path: &str, out: &mut Vec<Violation>) {
    match kind {
        Kind::Object(fields) => {
            if let Value::Object(map) = value {
                return inspect_object(fields, map, path, out);
            }
        }
        Kind::List(item) => {
            if let Value::Array(elements) = value {
                for (index, element) in elements.iter_mut().enumerate() {
                    inspect_value(item, element, &format!("{path}[{index}]"), out);
                }
                return;
            }
        }
        scalar if accepts(scalar, value) => return,
        _ => {}
    }
    out.push(Violation { field: path.to_string(), message: expected(kind) });
    *value = placeholder(kind);
}

fn accepts(kind: &Kind, value: &Value) -> bool {
    match kind {
        Kind::Text => value.is_string(),
        Kind::Number => value.is_number(),
        Kind::Integer => value.is_i64(),
        Kind::Bool => value.is_boolean(),
        Kind::Timestamp => value.as_str().is_some_and(|s| s.parse::<DateTime<Utc>>().is_ok()),
        Kind::OneOf(variants) => value.as_str().is_some_and(|s| variants.contains(&s)),
        Kind::Object(_) => value.is_object(),
        Kind::List(_) => value.is_array(),
    }
}

fn expected(kind: &Kind) -> String {
    match kind {
        Kind::Text => "must be a string".into(),
        Kind::Number => "must be a number".into(),
        Kind::Integer => "must be an integer".into(),
        Kind::Bool => "must be a boolean".into(),
        Kind::Timestamp => "must be an RFC 3339 timestamp".into(),
        Kind::OneOf(variants) => format!("must be one of: {}", variants.join(", ")),
        Kind::Object(_) => "must be an object".into(),
        Kind::List(_) => "must be a list".into(),
    }
}

fn placeholder(kind: &Kind) -> Value {
    match kind {
        Kind::Text => Value::from(""),
        Kind::Number | Kind::Integer => Value::from(0),
        Kind::Bool => Value::Bool(false),
        Kind::Timestamp => Value::from("1970-01-01T00:00:00Z"),
        Kind::OneOf(variants) => variants.first().map_or(Value::Null, |v| Value::from(*v)),
        Kind::Object(fields) => Value::Object(
            fields
                .iter()
                .filter(|f| f.presence == Presence::Required)
                .map(|f| (f.name.to_string(), placeholder(&f.kind)))
                .collect(),
        ),
        Kind::List(_) => Value::Array(Vec::new()),
    }
}
