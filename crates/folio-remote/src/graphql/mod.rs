//! GraphQL client implementation.
//!
//! This module provides the HTTP client for GraphQL APIs and the query
//! documents and response shapes used against the blogging platform.

mod client;
pub(crate) mod queries;

pub use client::GraphqlClient;
