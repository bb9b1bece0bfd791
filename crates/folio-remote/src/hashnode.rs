//! Article source backed by a Hashnode-style GraphQL API.

use async_trait::async_trait;
use tracing::{debug, instrument};

use folio_core::error::{ApiError, InvalidInputError};
use folio_core::{
    Article, Author, ContentFilter, ContentSource, Page, PageRequest, Result, Slug,
};

use crate::graphql::GraphqlClient;
use crate::graphql::queries::*;

/// Public GraphQL endpoint of the blogging platform.
pub const DEFAULT_ENDPOINT: &str = "https://gql.hashnode.com";

/// Largest page the upstream serves.
pub const MAX_PAGE_SIZE: usize = 50;

/// Articles of one publication, read over GraphQL.
#[derive(Debug, Clone)]
pub struct HashnodeSource {
    client: GraphqlClient,
    host: String,
}

impl HashnodeSource {
    /// Create a source for the publication served at `host`
    /// (for example `blog.example.com`).
    pub fn new(client: GraphqlClient, host: impl Into<String>) -> Result<Self> {
        let host = host.into().trim().to_string();
        if host.is_empty() || host.contains('/') || host.contains(char::is_whitespace) {
            return Err(InvalidInputError::Other {
                message: format!("invalid publication host '{}'", host),
            }
            .into());
        }
        Ok(Self { client, host })
    }

    /// Returns the publication host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch a full article by slug. `Ok(None)` when no such post exists.
    #[instrument(skip(self), fields(host = %self.host))]
    pub async fn article(&self, slug: &Slug) -> Result<Option<Article>> {
        debug!("Fetching article");

        let variables = PostVariables {
            host: &self.host,
            slug: slug.as_str(),
        };
        let data: PublicationData<PostPublication> = self
            .client
            .execute(POST_BY_SLUG, POST_BY_SLUG_QUERY, &variables)
            .await?;

        let publication = data.publication.ok_or(ApiError::MissingData {
            what: "publication",
        })?;

        Ok(publication.post.and_then(FullPostNode::into_article))
    }

    /// Fetch the publication's author profile.
    #[instrument(skip(self), fields(host = %self.host))]
    pub async fn author(&self) -> Result<Author> {
        debug!("Fetching author");

        let variables = HostVariables { host: &self.host };
        let data: PublicationData<AuthorPublication> = self
            .client
            .execute(PUBLICATION_AUTHOR, PUBLICATION_AUTHOR_QUERY, &variables)
            .await?;

        let publication = data.publication.ok_or(ApiError::MissingData {
            what: "publication",
        })?;

        Ok(publication.author.into())
    }
}

#[async_trait]
impl ContentSource for HashnodeSource {
    #[instrument(skip(self), fields(host = %self.host))]
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        let first = request.count.clamp(1, MAX_PAGE_SIZE);
        debug!(first, "Fetching posts page");

        let variables = PostsVariables {
            host: &self.host,
            first,
            after: request.after.as_deref(),
        };
        let data: PublicationData<PostsPublication> = self
            .client
            .execute(PUBLICATION_POSTS, PUBLICATION_POSTS_QUERY, &variables)
            .await?;

        let posts = data
            .publication
            .ok_or(ApiError::MissingData {
                what: "publication",
            })?
            .posts;

        let items = posts
            .edges
            .into_iter()
            .filter_map(|edge| edge.node.into_item())
            .collect();

        Ok(Page {
            items,
            has_more: posts.page_info.has_next_page,
            next_cursor: posts.page_info.end_cursor,
        })
    }

    #[instrument(skip(self), fields(host = %self.host))]
    async fn count_matching(&self, filter: &ContentFilter) -> Result<Option<u64>> {
        let Some(slugs) = filter.tag_slugs() else {
            return Ok(None);
        };

        let variables = TagCountVariables {
            host: &self.host,
            tag_slugs: slugs.into_iter().map(Slug::as_str).collect(),
        };
        let data: PublicationData<CountPublication> = self
            .client
            .execute(TAGGED_POST_COUNT, TAGGED_POST_COUNT_QUERY, &variables)
            .await?;

        Ok(data.publication.map(|p| p.posts.total_documents))
    }
}
