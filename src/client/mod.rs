//! The job board client.
//!
//! [`Client`] is an explicit context object: it owns the transport, the
//! login-state source, the normalized cache and the operation documents.
//! Cloning it shares all of them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jobboard::prelude::*;
//!
//! let session = Session::new();
//! let client = Client::builder()
//!     .url("http://localhost:9000/graphql")
//!     .auth(session.clone())
//!     .build()?;
//!
//! let jobs = client.load_jobs().await?;
//! let job = client.load_job(&jobs[0].id).await?;
//! ```

mod builder;
mod inner;

pub use builder::{ClientBuilder, HasUrl, NoUrl};

use std::sync::Arc;

use serde_json::Value;

use crate::Result;
use crate::cache::Cache;
use crate::config::{CacheConfig, FetchPolicy};
use crate::graphql::{Operation, Variables};
use crate::jobs::Documents;
use crate::transport::{TransportKind, TransportStats};

/// The job board client.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share one cache, so a result
/// stored through one clone is served to all of them.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use jobboard::Client;
/// use jobboard::testing::MockTransport;
///
/// let client = Client::builder()
///     .build_with_transport(Arc::new(MockTransport::new()))
///     .unwrap();
/// let other = client.clone();
/// assert!(other.cache().is_empty());
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoUrl> {
        ClientBuilder::new()
    }

    /// Runs a query under the configured default policy.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`](crate::graphql::Dispatcher::dispatch).
    pub async fn query(&self, operation: &Operation, variables: Variables) -> Result<Value> {
        let policy = self.config().default_policy;
        self.query_with_policy(operation, variables, policy).await
    }

    /// Runs a query under `policy`.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`](crate::graphql::Dispatcher::dispatch).
    pub async fn query_with_policy(
        &self,
        operation: &Operation,
        variables: Variables,
        policy: FetchPolicy,
    ) -> Result<Value> {
        self.inner.dispatcher.dispatch(operation, variables, policy).await
    }

    /// Runs a mutation. The cache is neither read nor written.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`](crate::graphql::Dispatcher::dispatch).
    pub async fn mutate(&self, operation: &Operation, variables: Variables) -> Result<Value> {
        self.inner
            .dispatcher
            .dispatch(operation, variables, FetchPolicy::NetworkOnly)
            .await
    }

    /// Returns the shared cache.
    pub fn cache(&self) -> &Cache {
        self.inner.dispatcher.cache()
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        self.inner.dispatcher.config()
    }

    /// Returns the job board's operation documents.
    pub fn documents(&self) -> &Documents {
        &self.inner.documents
    }

    /// Returns the transport type.
    pub fn transport_kind(&self) -> TransportKind {
        self.inner.dispatcher.transport().kind()
    }

    /// Returns transport statistics.
    pub fn transport_stats(&self) -> TransportStats {
        self.inner.dispatcher.transport().stats()
    }

    /// Creates a client from the inner implementation.
    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport_kind())
            .finish_non_exhaustive()
    }
}
