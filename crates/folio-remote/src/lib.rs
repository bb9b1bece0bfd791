//! folio-remote - Network-backed sources.
//!
//! [`HashnodeSource`] reads articles from a GraphQL blogging API and
//! implements [`ContentSource`](folio_core::ContentSource).
//! [`ProductClient`] reads the store listing from a JSON endpoint and
//! implements [`ProductSource`](folio_core::ProductSource).

mod graphql;
mod hashnode;
mod http;
mod rest;

pub use graphql::GraphqlClient;
pub use hashnode::{DEFAULT_ENDPOINT, HashnodeSource, MAX_PAGE_SIZE};
pub use rest::ProductClient;
