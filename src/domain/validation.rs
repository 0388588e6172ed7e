//! Payload validation.
//!
//! Turns a raw request body into a fully-defaulted entity or a list of every
//! violated field: missing fields, wrong types and values outside an enum
//! (found by walking the declared [`Schema`]) together with constraint
//! failures such as ranges and URLs.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use super::schema::{self, Schema};

/// One rejected field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path with list indices, e.g. `variants[1].price`.
    pub field: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![Violation { field: field.into(), message: message.into() }])
    }

    pub fn as_slice(&self) -> &[Violation] { &self.0 }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn fields(&self) -> impl Iterator<Item = &str> { self.0.iter().map(|v| v.field.as_str()) }

    fn sorted(mut violations: Vec<Violation>) -> Self {
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Self(violations)
    }
}

impl From<&ValidationErrors> for Violations {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = Vec::new();
        collect(errors, "", &mut out);
        Self(out)
    }
}

#[derive(Debug, Error)]
pub enum PayloadError {
    /// Body is not JSON at all.
    #[error("malformed JSON body: {0}")]
    Malformed(String),
    #[error("payload failed validation")]
    Invalid(Violations),
}

/// Decode `bytes` as `T`, applying serde defaults, then check its constraints.
///
/// Structural and constraint violations are reported together, sorted by
/// field path. A constraint failure under a path that is already structurally
/// wrong is not repeated.
pub fn parse_payload<T>(bytes: &[u8]) -> Result<T, PayloadError>
where
    T: Schema + DeserializeOwned + Validate,
{
    let mut body: Value = serde_json::from_slice(bytes).map_err(|e| PayloadError::Malformed(e.to_string()))?;
    let Value::Object(map) = &mut body else {
        return Err(PayloadError::Invalid(Violations::single("body", "must be a JSON object")));
    };
    let mut structural = schema::inspect(T::FIELDS, map);

    let value: T = match serde_path_to_error::deserialize(body) {
        Ok(value) => value,
        Err(err) => {
            let path = err.path().to_string();
            let field = if path == "." { "body".to_string() } else { path };
            structural.push(Violation { field, message: err.into_inner().to_string() });
            return Err(PayloadError::Invalid(Violations::sorted(structural)));
        }
    };

    let constraints = check(&value).err().unwrap_or_default();
    let mut violations: Vec<Violation> = constraints
        .0
        .into_iter()
        .filter(|c| !structural.iter().any(|s| within(&c.field, &s.field)))
        .collect();
    violations.append(&mut structural);
    if violations.is_empty() {
        Ok(value)
    } else {
        Err(PayloadError::Invalid(Violations::sorted(violations)))
    }
}

/// Run `T`'s constraints and flatten any failures.
pub fn check<T: Validate>(value: &T) -> Result<(), Violations> {
    value.validate().map_err(|errors| Violations::from(&errors))
}

/// Whether `field` is `root` or nested beneath it.
fn within(field: &str, root: &str) -> bool {
    match field.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<Violation>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(name, _)| **name);
    for (name, kind) in fields {
        let path = if prefix.is_empty() { (*name).to_string() } else { format!("{prefix}.{name}") };
        match kind {
            ValidationErrorsKind::Field(errs) => out.extend(errs.iter().map(|e| Violation {
                field: path.clone(),
                message: describe(e),
            })),
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let param = |key: &str| error.params.get(key).map(ToString::to_string);
    match (&*error.code, param("min"), param("max")) {
        ("range", Some(min), Some(max)) => format!("must be between {min} and {max}"),
        ("range", Some(min), None) => format!("must be at least {min}"),
        ("range", None, Some(max)) => format!("must be at most {max}"),
        (code, ..) => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Order, Product};
    use crate::domain::schema::FIELD_REQUIRED;

    #[test]
    fn test_collects_every_constraint_violation() {
        let body = br#"{
            "title": "Tee", "handle": "tee", "category": "Street",
            "images": [{"url": "https://cdn.stoush.au/a.jpg"}, {"url": "nope"}],
            "variants": [
                {"sku": "A", "size": "S", "price": 10.0, "stock": 1},
                {"sku": "B", "size": "M", "price": -5.0, "stock": -1}
            ]
        }"#;
        let PayloadError::Invalid(violations) = parse_payload::<Product>(body).unwrap_err() else {
            panic!("expected violations");
        };
        let fields: Vec<&str> = violations.fields().collect();
        assert_eq!(fields, vec!["images[1].url", "variants[1].price", "variants[1].stock"]);
        assert_eq!(violations.as_slice()[0].message, "must be a well-formed http(s) URL");
        assert!(violations.as_slice()[1].message.starts_with("must be at least 0"));
    }

    #[test]
    fn test_missing_field_is_named() {
        let err = parse_payload::<Product>(br#"{"title": "Tee", "category": "Street"}"#).unwrap_err();
        let PayloadError::Invalid(violations) = err else { panic!("expected violations") };
        assert_eq!(violations.fields().collect::<Vec<_>>(), vec!["handle"]);
        assert_eq!(violations.as_slice()[0].message, FIELD_REQUIRED);
    }

    #[test]
    fn test_enum_outside_set_rejected() {
        let err = parse_payload::<Product>(br#"{"title": "Tee", "handle": "t", "category": "training"}"#).unwrap_err();
        let PayloadError::Invalid(violations) = err else { panic!("expected violations") };
        assert_eq!(violations.fields().collect::<Vec<_>>(), vec!["category"]);
        assert_eq!(violations.as_slice()[0].message, "must be one of: Training, Street, Drops");
    }

    #[test]
    fn test_structural_and_constraint_violations_reported_together() {
        let body = br#"{"email": "a@b.co", "status": "refunded",
            "items": [{"product_id": "p", "sku": "s", "qty": 11, "price": 1.0, "title": "t"}]}"#;
        let PayloadError::Invalid(violations) = parse_payload::<Order>(body).unwrap_err() else {
            panic!("expected violations");
        };
        let fields: Vec<&str> = violations.fields().collect();
        assert_eq!(fields, vec!["items[0].qty", "shipping", "status", "subtotal", "total"]);
    }

    #[test]
    fn test_nested_paths_and_no_duplicate_constraint_report() {
        let body = br#"{"email": "a@b.co", "subtotal": 0, "shipping": 0, "total": 0,
            "items": [{"product_id": "p", "qty": "two", "price": "x", "title": "t"}]}"#;
        let PayloadError::Invalid(violations) = parse_payload::<Order>(body).unwrap_err() else {
            panic!("expected violations");
        };
        let found: Vec<(&str, &str)> = violations.as_slice().iter().map(|v| (v.field.as_str(), v.message.as_str())).collect();
        assert_eq!(
            found,
            vec![
                ("items[0].price", "must be a number"),
                ("items[0].qty", "must be an integer"),
                ("items[0].sku", FIELD_REQUIRED),
            ]
        );
    }

    #[test]
    fn test_non_object_body() {
        let err = parse_payload::<Product>(b"[1, 2]").unwrap_err();
        let PayloadError::Invalid(violations) = err else { panic!("expected violations") };
        assert_eq!(violations.fields().collect::<Vec<_>>(), vec!["body"]);
    }

    #[test]
    fn test_within() {
        assert!(within("items[0].qty", "items[0]"));
        assert!(within("items", "items"));
        assert!(within("variants.price", "variants"));
        assert!(!within("items_total", "items"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = parse_payload::<Order>(br#"{"email": "a@b.co", "items": [], "subtotal": "ten", "shipping": 0, "total": 0}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_payload::<Product>(b"{not json"), Err(PayloadError::Malformed(_))));
    }

    #[test]
    fn test_quantity_range_message() {
        let body = br#"{"email": "a@b.co", "subtotal": 0, "shipping": 0, "total": 0,
            "items": [{"product_id": "p", "sku": "s", "qty": 11, "price": 1.0, "title": "t"}]}"#;
        let PayloadError::Invalid(violations) = parse_payload::<Order>(body).unwrap_err() else {
            panic!("expected violations");
        };
        assert_eq!(violations.len(), 1);
        let Violation { field, message } = &violations.as_slice()[0];
        assert_eq!(field, "items[0].qty");
        assert!(message.starts_with("must be between 1"));
    }
}
