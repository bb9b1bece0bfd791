//! folio-cache - Local persistence for folio.
//!
//! [`TtlCache`] keeps JSON values on disk with a time-to-live.
//! [`CachedProducts`] puts it in front of any
//! [`ProductSource`](folio_core::ProductSource).

mod products;
mod store;

pub use products::{CachedProducts, PRODUCTS_KEY};
pub use store::{DEFAULT_TTL_HOURS, TtlCache};
