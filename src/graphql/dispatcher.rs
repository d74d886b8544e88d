//! Request dispatch with the fetch-policy cache check.

use std::sync::Arc;

use serde_json::Value;

use super::envelope::{GraphQLRequest, GraphQLResponse, Variables};
use super::operation::{Operation, OperationKind};
use crate::auth::{AuthProvider, auth_headers};
use crate::cache::{Cache, CacheKey};
use crate::config::{CacheConfig, FetchPolicy};
use crate::transport::{Transport, TransportRequest};
use crate::Result;

/// Sends operations to the endpoint and keeps query results in the cache.
///
/// Each dispatch asks the [`AuthProvider`] once for the login state and
/// derives the request headers from that single answer.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    auth: Arc<dyn AuthProvider>,
    cache: Arc<Cache>,
    config: CacheConfig,
}

impl Dispatcher {
    /// Creates a dispatcher.
    pub fn new(
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthProvider>,
        cache: Arc<Cache>,
        config: CacheConfig,
    ) -> Self {
        Self {
            transport,
            auth,
            cache,
            config,
        }
    }

    /// Returns the cache.
    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Runs `operation` under `policy`.
    ///
    /// A cache-first query whose full selection is cached returns without a
    /// request. Otherwise the operation is sent; a query's data is then
    /// stored. Mutations never read or write the cache here.
    ///
    /// # Errors
    ///
    /// Transport failures, non-empty `errors` and malformed responses.
    /// Nothing is stored when the dispatch fails.
    pub async fn dispatch(
        &self,
        operation: &Operation,
        variables: Variables,
        policy: FetchPolicy,
    ) -> Result<Value> {
        let is_query = operation.kind() == OperationKind::Query;
        let caches = is_query && self.config.enabled;
        let key = CacheKey::new(operation.name(), &variables);

        if caches && self.config.effective_policy(policy).reads_cache() {
            if let Some(hit) = self.cache.read(&key, operation.resolved()) {
                tracing::debug!(operation = operation.name(), %policy, "cache hit");
                return Ok(hit);
            }
            tracing::debug!(operation = operation.name(), %policy, "cache miss");
        }

        let data = self.send(operation, &variables).await?;

        if caches && data.is_object() {
            self.cache.put(&key, &data);
        }
        Ok(data)
    }

    /// Sends `operation` without consulting the cache.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn send(&self, operation: &Operation, variables: &Variables) -> Result<Value> {
        let request = self.request(operation, variables)?;

        tracing::debug!(operation = operation.name(), kind = %operation.kind(), "dispatching");
        let body = self.transport.post(request).await.inspect_err(|e| {
            tracing::warn!(operation = operation.name(), error = %e, "request failed");
        })?;

        GraphQLResponse::from_value(body)?.into_data().inspect_err(|e| {
            tracing::debug!(operation = operation.name(), error = %e, "operation returned errors");
        })
    }

    /// Builds the transport request for one dispatch.
    pub fn request(&self, operation: &Operation, variables: &Variables) -> Result<TransportRequest> {
        let headers = auth_headers(&self.auth.auth_context());
        let body = GraphQLRequest {
            query: operation.text(),
            variables,
        }
        .to_value()?;
        Ok(TransportRequest::new(headers, body))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("transport", &self.transport.kind())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
