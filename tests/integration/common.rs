//! Common test harness for job board integration tests.

use std::sync::{Arc, Once};

use jobboard::auth::Session;
use jobboard::jobs::Documents;
use jobboard::testing::{InMemoryServer, sample_store};
use jobboard::{CacheConfig, Client};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A client wired to an in-memory server over the sample store.
pub struct TestFixture {
    pub server: Arc<InMemoryServer>,
    pub session: Session,
    pub client: Client,
}

impl TestFixture {
    /// Creates a fixture with the cache enabled and nobody logged in.
    pub fn new() -> Self {
        Self::with_cache_config(CacheConfig::default())
    }

    /// Creates a fixture with a specific cache configuration.
    pub fn with_cache_config(config: CacheConfig) -> Self {
        init_tracing();

        let documents = Documents::new().expect("documents should build");
        let server = Arc::new(InMemoryServer::new(Arc::new(sample_store()), &documents));
        let session = Session::new();
        let client = Client::builder()
            .auth(session.clone())
            .cache_config(config)
            .build_with_transport(server.clone())
            .expect("client should build");

        Self {
            server,
            session,
            client,
        }
    }

    /// Logs the session in as the sample user `u1`.
    pub fn login(&self) {
        let token = self.server.issue_token("u1");
        self.session.login(token);
    }
}
