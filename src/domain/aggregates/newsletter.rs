//! Newsletter subscriber

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::schema::{Field, Kind, Schema};
use crate::domain::value_objects::SubscriberSource;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewsletterSubscriber {
    pub email: String,
    #[serde(default)]
    pub source: SubscriberSource,
}

impl Schema for NewsletterSubscriber {
    const FIELDS: &'static [Field] = &[
        Field::required("email", Kind::Text),
        Field::defaulted("source", Kind::OneOf(SubscriberSource::VARIANTS)),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_defaults_to_hero() {
        let s: NewsletterSubscriber = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(s.source, SubscriberSource::Hero);
        assert!(serde_json::from_str::<NewsletterSubscriber>(r#"{"email":"a@b.co","source":"popup"}"#).is_err());
    }
}
