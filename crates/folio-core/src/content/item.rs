//! Content item and tag types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Slug;

/// Colours handed out to tags.
const PALETTE: [&str; 8] = [
    "#f97316", "#3b82f6", "#10b981", "#a855f7", "#ef4444", "#eab308", "#06b6d4", "#ec4899",
];

/// A display colour for a tag, as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TagColor(&'static str);

impl TagColor {
    /// Pick the colour for a slug.
    ///
    /// The choice depends only on the slug bytes (FNV-1a), so a tag keeps its
    /// colour across pages, runs, and machines.
    pub fn for_slug(slug: &Slug) -> Self {
        let mut hash: u32 = 0x811c_9dc5;
        for byte in slug.as_str().bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(0x0100_0193);
        }
        Self(PALETTE[hash as usize % PALETTE.len()])
    }

    /// Returns the colour as a hex string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A tag attached to a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// Display name.
    pub name: String,
    /// URL key.
    pub slug: Slug,
    /// Display colour derived from the slug.
    pub color: TagColor,
}

impl Tag {
    /// Create a tag, assigning its colour from the slug.
    pub fn new(name: impl Into<String>, slug: Slug) -> Self {
        let color = TagColor::for_slug(&slug);
        Self {
            name: name.into(),
            slug,
            color,
        }
    }
}

// Colours are derived, so only name and slug are read back.
impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            slug: Slug,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Tag::new(raw.name, raw.slug))
    }
}

/// One fetched unit of content (an article summary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Upstream identifier, unique within an accumulated list.
    pub id: String,

    /// Article title.
    pub title: String,

    /// URL key.
    pub slug: Slug,

    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,

    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Publication timestamp.
    pub published_at: DateTime<Utc>,

    /// Attached tags, in upstream order.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ContentItem {
    /// Whether the item carries a tag with the given slug.
    pub fn has_tag(&self, slug: &Slug) -> bool {
        self.tags.iter().any(|t| &t.slug == slug)
    }
}
