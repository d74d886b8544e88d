//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::HttpTransport;
use crate::{
    Client, Error,
    auth::{Anonymous, AuthProvider},
    cache::Cache,
    config::CacheConfig,
    graphql::Dispatcher,
    jobs::Documents,
    transport::Transport,
};

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so that [`build()`](ClientBuilder::build) is
/// only available once an endpoint URL has been given. A client over any
/// other [`Transport`] is created with
/// [`build_with_transport()`](ClientBuilder::build_with_transport).
///
/// ## Optional Configuration
///
/// - `auth()`: Source of the login state, anonymous by default
/// - `cache_config()`: Cache on/off and the default fetch policy
/// - `timeout()`: Request timeout of the HTTP transport
///
/// ## Example
///
/// ```rust
/// use jobboard::{CacheConfig, Client, FetchPolicy};
/// use jobboard::auth::Session;
///
/// let session = Session::new();
/// let client = Client::builder()
///     .url("http://localhost:9000/graphql")
///     .auth(session.clone())
///     .cache_config(CacheConfig::builder().default_policy(FetchPolicy::CacheFirst).build())
///     .build()
///     .unwrap();
/// # drop(client);
/// ```
pub struct ClientBuilder<UrlState> {
    url: Option<String>,
    auth: Arc<dyn AuthProvider>,
    cache_config: CacheConfig,
    timeout: Option<Duration>,
    _url_state: PhantomData<UrlState>,
}

impl ClientBuilder<NoUrl> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            auth: Arc::new(Anonymous),
            cache_config: CacheConfig::default(),
            timeout: None,
            _url_state: PhantomData,
        }
    }

    /// Sets the GraphQL endpoint URL.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let builder = Client::builder()
    ///     .url("http://localhost:9000/graphql");
    /// ```
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasUrl> {
        ClientBuilder {
            url: Some(url.into()),
            auth: self.auth,
            cache_config: self.cache_config,
            timeout: self.timeout,
            _url_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ClientBuilder<U> {
    /// Sets the source of the login state.
    ///
    /// The provider is asked once per dispatched request.
    #[must_use]
    pub fn auth(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Arc::new(provider);
        self
    }

    /// Sets the cache configuration.
    #[must_use]
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Sets the request timeout.
    ///
    /// Without one, a request waits as long as the connection stays open.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client over a custom transport.
    ///
    /// Useful for testing with [`MockTransport`](crate::testing::MockTransport)
    /// or [`InMemoryServer`](crate::testing::InMemoryServer).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the built-in documents fail to build.
    pub fn build_with_transport(self, transport: Arc<dyn Transport>) -> Result<Client, Error> {
        let documents = Documents::new()?;
        let dispatcher = Dispatcher::new(
            transport,
            self.auth,
            Arc::new(Cache::new()),
            self.cache_config,
        );

        tracing::debug!(transport = %dispatcher.transport().kind(), "client built");
        Ok(Client::from_inner(ClientInner {
            dispatcher,
            documents,
        }))
    }
}

#[cfg(feature = "rest")]
impl ClientBuilder<HasUrl> {
    /// Builds the client over HTTP.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid URL or an HTTP client
    /// that cannot be created.
    pub fn build(mut self) -> Result<Client, Error> {
        let url = self.url.take().ok_or_else(|| Error::configuration("URL is required"))?;

        let mut transport = HttpTransport::builder().endpoint(&url)?;
        if let Some(timeout) = self.timeout {
            transport = transport.timeout(timeout);
        }
        let transport: Arc<dyn Transport> = Arc::new(transport.build()?);

        self.build_with_transport(transport)
    }
}
