//! REST product listing.

mod client;
mod responses;

pub use client::ProductClient;
