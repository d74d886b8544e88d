//! Normalized client cache.
//!
//! - [`Cache`]: operation results stored by [`CacheKey`], with identifiable
//!   objects merged into shared entity records
//! - [`CacheSynchronizer`]: writes a mutation's returned entity into the
//!   record a query reads, so the next cache-first read needs no request

mod key;
mod store;
mod sync;

pub use key::{CacheKey, EntityKey};
pub use store::Cache;
pub use sync::CacheSynchronizer;
