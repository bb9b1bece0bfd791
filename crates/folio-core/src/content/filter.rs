//! Client-side filters applied by consumer views.

use serde::{Deserialize, Serialize};

use super::ContentItem;
use crate::types::Slug;

/// A predicate over accumulated content.
///
/// Filters run after fetch, on whatever the accumulator already holds. They
/// never change pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentFilter {
    /// Items carrying this tag.
    Tag { slug: Slug },

    /// Items carrying any tag of a named category.
    Category { name: String, tags: Vec<Slug> },

    /// Case-insensitive text search over title, brief, and tag names.
    Search { query: String },
}

impl ContentFilter {
    /// Filter on a single tag.
    pub fn tag(slug: Slug) -> Self {
        ContentFilter::Tag { slug }
    }

    /// Filter on a category's tag set.
    pub fn category(name: impl Into<String>, tags: Vec<Slug>) -> Self {
        ContentFilter::Category {
            name: name.into(),
            tags,
        }
    }

    /// Filter on free text.
    pub fn search(query: impl Into<String>) -> Self {
        ContentFilter::Search {
            query: query.into(),
        }
    }

    /// Tag slugs the upstream can filter on, if this filter maps to any.
    pub fn tag_slugs(&self) -> Option<Vec<&Slug>> {
        match self {
            ContentFilter::Tag { slug } => Some(vec![slug]),
            ContentFilter::Category { tags, .. } if !tags.is_empty() => {
                Some(tags.iter().collect())
            }
            _ => None,
        }
    }

    /// Whether an item passes this filter.
    pub fn matches(&self, item: &ContentItem) -> bool {
        match self {
            ContentFilter::Tag { slug } => item.has_tag(slug),
            ContentFilter::Category { tags, .. } => tags.iter().any(|t| item.has_tag(t)),
            ContentFilter::Search { query } => {
                let query = query.trim().to_lowercase();
                if query.is_empty() {
                    return true;
                }
                item.title.to_lowercase().contains(&query)
                    || item
                        .brief
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&query))
                    || item
                        .tags
                        .iter()
                        .any(|t| t.name.to_lowercase().contains(&query))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Tag;
    use chrono::Utc;

    fn item(title: &str, brief: Option<&str>, tags: &[&str]) -> ContentItem {
        ContentItem {
            id: title.to_string(),
            title: title.to_string(),
            slug: Slug::new("x").unwrap(),
            brief: brief.map(str::to_string),
            cover_image: None,
            published_at: Utc::now(),
            tags: tags
                .iter()
                .map(|t| Tag::new(t.to_uppercase(), Slug::new(t).unwrap()))
                .collect(),
        }
    }

    #[test]
    fn tag_filter() {
        let filter = ContentFilter::tag(Slug::new("rust").unwrap());
        assert!(filter.matches(&item("a", None, &["rust", "web"])));
        assert!(!filter.matches(&item("b", None, &["go"])));
    }

    #[test]
    fn category_matches_any_tag() {
        let filter = ContentFilter::category(
            "systems",
            vec![Slug::new("rust").unwrap(), Slug::new("c").unwrap()],
        );
        assert!(filter.matches(&item("a", None, &["c"])));
        assert!(!filter.matches(&item("b", None, &["javascript"])));
    }

    #[test]
    fn empty_category_matches_nothing() {
        let filter = ContentFilter::category("empty", vec![]);
        assert!(!filter.matches(&item("a", None, &["rust"])));
        assert!(filter.tag_slugs().is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let filter = ContentFilter::search("ASYNC");
        assert!(filter.matches(&item("Async Rust in practice", None, &[])));
        assert!(filter.matches(&item("Other", Some("notes on async"), &[])));
        assert!(filter.matches(&item("Other", None, &["async"])));
        assert!(!filter.matches(&item("Other", None, &[])));
    }

    #[test]
    fn blank_search_matches_everything() {
        assert!(ContentFilter::search("  ").matches(&item("a", None, &[])));
    }
}
