//! Cache configuration and fetch policies.

use std::fmt;

/// How a query consults the cache before the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FetchPolicy {
    /// Answer from the cache when it holds every selected field; otherwise
    /// dispatch and store the result.
    #[default]
    CacheFirst,
    /// Always dispatch, then store the result.
    NetworkOnly,
}

impl FetchPolicy {
    /// Returns `true` if the policy may answer from the cache.
    pub fn reads_cache(&self) -> bool {
        matches!(self, FetchPolicy::CacheFirst)
    }
}

impl fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchPolicy::CacheFirst => write!(f, "cache-first"),
            FetchPolicy::NetworkOnly => write!(f, "network-only"),
        }
    }
}

/// Configuration for the client's normalized cache.
///
/// The cache is enabled by default. Disabling it turns every query into a
/// network-only dispatch whose result is not stored, and makes mutation
/// results skip cache synchronization.
///
/// ## Example
///
/// ```rust
/// use jobboard::{CacheConfig, FetchPolicy};
///
/// let config = CacheConfig::builder()
///     .default_policy(FetchPolicy::NetworkOnly)
///     .build();
/// assert!(config.enabled);
///
/// let config = CacheConfig::disabled();
/// assert!(!config.enabled);
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct CacheConfig {
    /// Whether the cache is used at all.
    #[builder(default = true)]
    pub enabled: bool,

    /// Policy used by queries that do not name one.
    #[builder(default)]
    pub default_policy: FetchPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CacheConfig {
    /// Creates a configuration with the cache turned off.
    pub fn disabled() -> Self {
        Self::builder().enabled(false).build()
    }

    /// Returns the policy actually applied for a requested policy.
    ///
    /// With the cache disabled every read goes to the network.
    pub fn effective_policy(&self, requested: FetchPolicy) -> FetchPolicy {
        if self.enabled {
            requested
        } else {
            FetchPolicy::NetworkOnly
        }
    }
}
