//! Query documents and response shapes for the blogging platform API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use folio_core::{Article, Author, AuthorRef, ContentItem, Slug, Tag};

// ============================================================================
// Operation Names
// ============================================================================

pub const PUBLICATION_POSTS: &str = "PublicationPosts";
pub const TAGGED_POST_COUNT: &str = "TaggedPostCount";
pub const POST_BY_SLUG: &str = "PostBySlug";
pub const PUBLICATION_AUTHOR: &str = "PublicationAuthor";

// ============================================================================
// Documents
// ============================================================================

pub const PUBLICATION_POSTS_QUERY: &str = r#"
query PublicationPosts($host: String!, $first: Int!, $after: String) {
  publication(host: $host) {
    posts(first: $first, after: $after) {
      edges {
        node {
          id
          title
          slug
          brief
          publishedAt
          coverImage { url }
          tags { name slug }
        }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

pub const TAGGED_POST_COUNT_QUERY: &str = r#"
query TaggedPostCount($host: String!, $tagSlugs: [String!]!) {
  publication(host: $host) {
    posts(first: 1, filter: { tagSlugs: $tagSlugs }) {
      totalDocuments
    }
  }
}
"#;

pub const POST_BY_SLUG_QUERY: &str = r#"
query PostBySlug($host: String!, $slug: String!) {
  publication(host: $host) {
    post(slug: $slug) {
      id
      title
      slug
      brief
      publishedAt
      coverImage { url }
      tags { name slug }
      readTimeInMinutes
      content { markdown }
      author { name username }
    }
  }
}
"#;

pub const PUBLICATION_AUTHOR_QUERY: &str = r#"
query PublicationAuthor($host: String!) {
  publication(host: $host) {
    author {
      name
      username
      bio { text }
      profilePicture
    }
  }
}
"#;

// ============================================================================
// Variables
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PostsVariables<'a> {
    pub host: &'a str,
    pub first: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCountVariables<'a> {
    pub host: &'a str,
    pub tag_slugs: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct PostVariables<'a> {
    pub host: &'a str,
    pub slug: &'a str,
}

#[derive(Debug, Serialize)]
pub struct HostVariables<'a> {
    pub host: &'a str,
}

// ============================================================================
// Responses
// ============================================================================

/// `data` of every publication-scoped query. The publication is null when
/// the host is unknown.
#[derive(Debug, Deserialize)]
pub struct PublicationData<P> {
    pub publication: Option<P>,
}

#[derive(Debug, Deserialize)]
pub struct PostsPublication {
    pub posts: PostConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostConnection {
    #[serde(default)]
    pub edges: Vec<PostEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct PostEdge {
    pub node: PostNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNode {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub brief: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub cover_image: Option<ImageNode>,
    #[serde(default)]
    pub tags: Option<Vec<TagNode>>,
}

#[derive(Debug, Deserialize)]
pub struct ImageNode {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct TagNode {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct CountPublication {
    pub posts: CountConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountConnection {
    pub total_documents: u64,
}

#[derive(Debug, Deserialize)]
pub struct PostPublication {
    pub post: Option<FullPostNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPostNode {
    #[serde(flatten)]
    pub summary: PostNode,
    #[serde(default)]
    pub read_time_in_minutes: Option<u32>,
    #[serde(default)]
    pub content: Option<MarkdownNode>,
    #[serde(default)]
    pub author: Option<AuthorRefNode>,
}

#[derive(Debug, Deserialize)]
pub struct MarkdownNode {
    #[serde(default)]
    pub markdown: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorRefNode {
    pub name: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorPublication {
    pub author: ProfileNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileNode {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub bio: Option<BioNode>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BioNode {
    #[serde(default)]
    pub text: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl PostNode {
    /// Normalize into a content item.
    ///
    /// Returns `None` when the post slug is unusable. Tags with unusable slugs
    /// are dropped from the item.
    pub fn into_item(self) -> Option<ContentItem> {
        let slug = match Slug::new(&self.slug) {
            Ok(slug) => slug,
            Err(e) => {
                warn!(id = %self.id, error = %e, "dropping post with invalid slug");
                return None;
            }
        };

        let tags = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| match Slug::new(&t.slug) {
                Ok(slug) => Some(Tag::new(t.name, slug)),
                Err(e) => {
                    warn!(post = %self.id, error = %e, "dropping tag with invalid slug");
                    None
                }
            })
            .collect();

        Some(ContentItem {
            id: self.id,
            title: self.title,
            slug,
            brief: self.brief.filter(|b| !b.trim().is_empty()),
            cover_image: self.cover_image.map(|c| c.url),
            published_at: self.published_at,
            tags,
        })
    }
}

impl FullPostNode {
    pub fn into_article(self) -> Option<Article> {
        let item = self.summary.into_item()?;
        Some(Article {
            item,
            markdown: self.content.map(|c| c.markdown).unwrap_or_default(),
            read_time_minutes: self.read_time_in_minutes,
            author: self.author.map(|a| AuthorRef {
                name: a.name,
                username: a.username,
            }),
        })
    }
}

impl From<ProfileNode> for Author {
    fn from(node: ProfileNode) -> Self {
        Author {
            name: node.name,
            username: node.username,
            bio: node
                .bio
                .and_then(|b| b.text)
                .filter(|t| !t.trim().is_empty()),
            profile_picture: node.profile_picture,
        }
    }
}
