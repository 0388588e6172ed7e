//! Query parameters for the listing operations.

use serde::Deserialize;

use super::Filter;

/// Catalog listing. Absent (or empty) parameters match any product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProductQuery {
    /// Compared as stored; a value outside the category set matches nothing.
    pub category: Option<String>,
    pub featured: Option<bool>,
}

impl ProductQuery {
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            filter = filter.equals("category", category);
        }
        if let Some(featured) = self.featured {
            filter = filter.equals("featured", featured);
        }
        filter
    }

    /// Single product lookup by its handle.
    pub fn handle(handle: &str) -> Filter { Filter::new().equals("handle", handle) }
}

/// Blog listing. Public listings always use [`BlogPostQuery::published`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlogPostQuery {
    pub published: Option<bool>,
}

impl BlogPostQuery {
    pub fn published() -> Self { Self { published: Some(true) } }

    pub fn filter(&self) -> Filter {
        match self.published {
            Some(published) => Filter::new().equals("published", published),
            None => Filter::new(),
        }
    }
}
