//! HTTP transport implementation using reqwest.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::auth::HeaderSet;
use crate::error::ErrorKind;
use crate::transport::traits::{Transport, TransportKind, TransportRequest, TransportStats};
use crate::Error;

/// Default GraphQL endpoint of a locally running job board server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9000/graphql";

// ============================================================================
// HTTP Transport
// ============================================================================

/// HTTP transport using reqwest.
///
/// POSTs the JSON body to a single endpoint and returns the parsed JSON
/// response regardless of status code. No retries are attempted.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    stats: Arc<RwLock<TransportStats>>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a new HTTP transport builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Creates a new HTTP transport for `endpoint`.
    ///
    /// `timeout` is the transport's own request timeout; `None` waits
    /// indefinitely.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut client_builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent());

        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            endpoint,
            stats: Arc::new(RwLock::new(TransportStats::default())),
        })
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn record(&self, failed: bool) {
        let mut stats = self.stats.write();
        stats.requests_sent += 1;
        if failed {
            stats.requests_failed += 1;
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: TransportRequest) -> Result<Value, Error> {
        let headers = build_headers(&request.headers)?;

        let response = match self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .json(&request.body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.record(true);
                tracing::warn!(endpoint = %self.endpoint, error = %e, "request failed");
                return Err(map_reqwest_error(e));
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.record(true);
                return Err(map_reqwest_error(e));
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => {
                self.record(false);
                tracing::debug!(status = status.as_u16(), "response received");
                Ok(body)
            }
            Err(e) => {
                self.record(true);
                Err(Error::new(
                    ErrorKind::InvalidResponse,
                    format!("HTTP {}: response body is not JSON: {}", status.as_u16(), e),
                )
                .with_source(e))
            }
        }
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Http
    }

    fn stats(&self) -> TransportStats {
        *self.stats.read()
    }
}

/// Builds reqwest headers from the computed header set.
fn build_headers(set: &HeaderSet) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    // Note: User-Agent is set at the client level via .user_agent() in new()

    for (name, value) in set.iter() {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            Error::new(ErrorKind::InvalidArgument, format!("Invalid header name: {}", name))
        })?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            Error::new(ErrorKind::InvalidArgument, "Invalid header value")
        })?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// `jobboard/<version> (rust/<msrv>; <os>/<arch>)`, computed once.
fn user_agent() -> &'static str {
    static USER_AGENT: OnceLock<String> = OnceLock::new();
    USER_AGENT.get_or_init(|| {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            os => os,
        };
        format!(
            "{}/{} (rust/{}; {}/{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_RUST_VERSION"),
            os,
            std::env::consts::ARCH,
        )
    })
}

fn map_reqwest_error(e: reqwest::Error) -> Error {
    let err = if e.is_timeout() {
        Error::new(ErrorKind::Timeout, format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::new(ErrorKind::Connection, format!("Connection failed: {}", e))
    } else {
        Error::new(ErrorKind::Transport, format!("HTTP error: {}", e))
    };
    err.with_source(e)
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    endpoint: Option<Url>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    fn new() -> Self {
        Self {
            endpoint: None,
            timeout: None,
        }
    }

    /// Sets the GraphQL endpoint URL.
    pub fn endpoint(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        self.endpoint = Some(Url::parse(url.as_ref()).map_err(|e| {
            Error::new(ErrorKind::Configuration, format!("Invalid endpoint URL: {}", e))
                .with_source(e)
        })?);
        Ok(self)
    }

    /// Sets the request timeout enforced by reqwest.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the HTTP transport.
    ///
    /// Falls back to [`DEFAULT_ENDPOINT`] when no endpoint was set.
    pub fn build(self) -> Result<HttpTransport, Error> {
        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => Url::parse(DEFAULT_ENDPOINT)?,
        };
        HttpTransport::new(endpoint, self.timeout)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn create_test_transport(server: &MockServer) -> HttpTransport {
        HttpTransport::builder()
            .endpoint(format!("{}/graphql", server.uri()))
            .unwrap()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_default_endpoint() {
        let transport = HttpTransport::builder().build().unwrap();
        assert_eq!(transport.endpoint().as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_builder_invalid_url() {
        let result = HttpTransport::builder().endpoint("not a url");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_user_agent_cached() {
        let ua = user_agent();
        assert!(ua.starts_with("jobboard/"));
        assert!(ua.contains(std::env::consts::ARCH));
        assert!(std::ptr::eq(ua, user_agent()));
    }

    #[test]
    fn test_build_headers_rejects_bad_value() {
        let mut set = HeaderSet::new();
        set.insert("authorization", "Bearer bad\ntoken");
        let err = build_headers(&set).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        let body = json!({"query": "{ jobs { id } }", "variables": {}});

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("content-type", "application/json"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"jobs": []}})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_test_transport(&server).await;
        let response = transport
            .post(TransportRequest::new(HeaderSet::new(), body))
            .await
            .unwrap();

        assert_eq!(response, json!({"data": {"jobs": []}}));
        assert_eq!(transport.stats().requests_sent, 1);
        assert_eq!(transport.stats().requests_failed, 0);
    }

    #[tokio::test]
    async fn test_post_ignores_status_code() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"errors": [{"message": "bad query"}]})),
            )
            .mount(&server)
            .await;

        let transport = create_test_transport(&server).await;
        let response = transport
            .post(TransportRequest::new(HeaderSet::new(), json!({"query": "{"})))
            .await
            .unwrap();

        assert_eq!(response["errors"][0]["message"], "bad query");
    }

    #[tokio::test]
    async fn test_post_non_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let transport = create_test_transport(&server).await;
        let err = transport
            .post(TransportRequest::new(HeaderSet::new(), json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert!(err.message().contains("HTTP 502"));
        assert_eq!(transport.stats().requests_failed, 1);
    }

    #[tokio::test]
    async fn test_post_connection_refused() {
        // Nothing listens on port 1.
        let transport = HttpTransport::builder()
            .endpoint("http://127.0.0.1:1/graphql")
            .unwrap()
            .build()
            .unwrap();

        let err = transport
            .post(TransportRequest::new(HeaderSet::new(), json!({})))
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_user_agent_header_format() {
        use wiremock::matchers::header_regex;

        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header_regex("user-agent", r"^jobboard/\d+\.\d+\.\d+ \(.+\)$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_test_transport(&server).await;
        let result = transport
            .post(TransportRequest::new(HeaderSet::new(), json!({})))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_debug_hides_client() {
        let server = MockServer::start().await;
        let transport = create_test_transport(&server).await;
        let debug = format!("{:?}", transport);
        assert!(debug.contains("HttpTransport"));
        assert!(debug.contains("/graphql"));
    }
}
