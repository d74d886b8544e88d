//! Transport trait definitions and common types.

use serde_json::Value;

use crate::Error;
use crate::auth::HeaderSet;

// ============================================================================
// Transport Kind
// ============================================================================

/// Available transport implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// JSON over HTTP via reqwest.
    Http,
    /// Scripted responses, for tests.
    Mock,
    /// Requests executed in-process against the resolver layer.
    InMemory,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Http => write!(f, "HTTP"),
            TransportKind::Mock => write!(f, "Mock"),
            TransportKind::InMemory => write!(f, "InMemory"),
        }
    }
}

// ============================================================================
// Transport Stats
// ============================================================================

/// Transport statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Total requests sent.
    pub requests_sent: u64,
    /// Requests that did not produce a JSON response.
    pub requests_failed: u64,
}

// ============================================================================
// Request
// ============================================================================

/// One POST to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// Headers computed for this request (authorization, if logged in).
    pub headers: HeaderSet,
    /// JSON body, `{"query": ..., "variables": ...}`.
    pub body: Value,
}

impl TransportRequest {
    /// Creates a request.
    pub fn new(headers: HeaderSet, body: Value) -> Self {
        Self { headers, body }
    }

    /// Returns the `query` text of the body, if present.
    pub fn query(&self) -> Option<&str> {
        self.body.get("query").and_then(Value::as_str)
    }

    /// Returns the `variables` of the body, if present.
    pub fn variables(&self) -> Option<&Value> {
        self.body.get("variables")
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Performs an HTTP POST with a JSON body and returns the JSON response.
///
/// The HTTP status is not part of the contract: an implementation returns the
/// parsed body whatever the status, and fails only when the call could not
/// complete or the body is not JSON.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request.
    async fn post(&self, request: TransportRequest) -> Result<Value, Error>;

    /// Returns the transport type.
    fn kind(&self) -> TransportKind;

    /// Returns transport statistics.
    fn stats(&self) -> TransportStats {
        TransportStats::default()
    }
}
