//! Blog post

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::schema::{Field, Kind, Schema};
use crate::domain::value_objects::validate_http_url;

/// Journal entry. `slug` is the public lookup key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    #[validate(custom = "validate_http_url")]
    pub cover: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

impl Schema for BlogPost {
    const FIELDS: &'static [Field] = &[
        Field::required("title", Kind::Text),
        Field::required("slug", Kind::Text),
        Field::optional("excerpt", Kind::Text),
        Field::optional("body", Kind::Text),
        Field::optional("cover", Kind::Text),
        Field::defaulted("published", Kind::Bool),
    ];
}

fn default_published() -> bool { true }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_by_default() {
        let post: BlogPost = serde_json::from_str(r#"{"title":"Start Something","slug":"start-something"}"#).unwrap();
        assert!(post.published);
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_cover_url() {
        let post: BlogPost = serde_json::from_str(r#"{"title":"t","slug":"s","cover":"cover.jpg"}"#).unwrap();
        assert!(post.validate().is_err());
    }
}
