//! Configuration types for the job board client.
//!
//! - [`CacheConfig`]: Whether the normalized cache is used, and the default
//!   [`FetchPolicy`] for queries

mod cache;

pub use cache::{CacheConfig, FetchPolicy};
