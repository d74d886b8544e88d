//! Scripted transport for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde_json::Value;

use crate::Error;
use crate::transport::{Transport, TransportKind, TransportRequest, TransportStats};

/// Mock transport for testing.
///
/// Answers requests from a queue of scripted responses and records every
/// request it receives. When the queue runs dry the fallback response set by
/// [`respond_always`](Self::respond_always) is used; without one the request
/// fails with a transport error.
///
/// ## Example
///
/// ```rust
/// use jobboard::testing::MockTransport;
/// use serde_json::json;
///
/// let mock = MockTransport::new()
///     .respond_with(json!({"data": {"jobs": []}}))
///     .respond_with(json!({"errors": [{"message": "Unauthorized"}]}));
/// assert_eq!(mock.request_count(), 0);
/// ```
#[derive(Default)]
pub struct MockTransport {
    responses: RwLock<VecDeque<Result<Value, Error>>>,
    fallback: RwLock<Option<Value>>,
    requests: RwLock<Vec<TransportRequest>>,
    request_count: AtomicU64,
    failed_count: AtomicU64,
    simulate_failure: RwLock<Option<Error>>,
}

impl MockTransport {
    /// Creates a new mock transport with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response body.
    #[must_use]
    pub fn respond_with(self, body: Value) -> Self {
        self.push_response(body);
        self
    }

    /// Answers every request not covered by the queue with `body`.
    #[must_use]
    pub fn respond_always(self, body: Value) -> Self {
        *self.fallback.write() = Some(body);
        self
    }

    /// Queues a response body.
    pub fn push_response(&self, body: Value) {
        self.responses.write().push_back(Ok(body));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: Error) {
        self.responses.write().push_back(Err(error));
    }

    /// Sets a failure to simulate on the next request, ahead of the queue.
    pub fn set_failure(&self, error: Error) {
        *self.simulate_failure.write() = Some(error);
    }

    /// Clears any simulated failure.
    pub fn clear_failure(&self) {
        *self.simulate_failure.write() = None;
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns every request received, oldest first.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.read().clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.requests.read().last().cloned()
    }

    fn next_response(&self) -> Result<Value, Error> {
        if let Some(error) = self.simulate_failure.write().take() {
            return Err(error);
        }
        if let Some(scripted) = self.responses.write().pop_front() {
            return scripted;
        }
        self.fallback
            .read()
            .clone()
            .ok_or_else(|| Error::transport("mock transport has no scripted response left"))
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued", &self.responses.read().len())
            .field("request_count", &self.request_count())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: TransportRequest) -> Result<Value, Error> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().push(request);

        let response = self.next_response();
        if response.is_err() {
            self.failed_count.fetch_add(1, Ordering::Relaxed);
        }
        response
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Mock
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            requests_sent: self.request_count(),
            requests_failed: self.failed_count.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::auth::HeaderSet;

    fn request() -> TransportRequest {
        TransportRequest::new(HeaderSet::new(), json!({"query": "query Q { a }", "variables": {}}))
    }

    #[tokio::test]
    async fn test_queue_then_fallback() {
        let mock = MockTransport::new()
            .respond_with(json!({"data": 1}))
            .respond_always(json!({"data": 2}));

        assert_eq!(mock.post(request()).await.unwrap(), json!({"data": 1}));
        assert_eq!(mock.post(request()).await.unwrap(), json!({"data": 2}));
        assert_eq!(mock.post(request()).await.unwrap(), json!({"data": 2}));
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_queue_fails() {
        let mock = MockTransport::new();
        let err = mock.post(request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(mock.stats().requests_failed, 1);
    }

    #[tokio::test]
    async fn test_simulated_failure_is_one_shot() {
        let mock = MockTransport::new().respond_always(json!({"data": null}));
        mock.set_failure(Error::timeout("slow"));

        assert_eq!(mock.post(request()).await.unwrap_err().kind(), ErrorKind::Timeout);
        assert!(mock.post(request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_queued_error() {
        let mock = MockTransport::new();
        mock.push_error(Error::connection("refused"));
        mock.push_response(json!({"data": {}}));

        assert!(mock.post(request()).await.is_err());
        assert!(mock.post(request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_records_requests() {
        let mock = MockTransport::new().respond_always(json!({}));
        let mut headers = HeaderSet::new();
        headers.insert("authorization", "Bearer T");
        mock.post(TransportRequest::new(headers, json!({"query": "q"}))).await.unwrap();

        let last = mock.last_request().unwrap();
        assert_eq!(last.headers.get("authorization"), Some("Bearer T"));
        assert_eq!(mock.requests().len(), 1);
    }
}
