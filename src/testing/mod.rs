//! Testing utilities for the job board client.
//!
//! Both types implement [`Transport`](crate::transport::Transport), so a
//! real [`Client`](crate::Client) runs on top of them through
//! [`ClientBuilder::build_with_transport`](crate::ClientBuilder::build_with_transport):
//!
//! - [`MockTransport`]: scripted responses and recorded requests
//! - [`InMemoryServer`]: executes the client's operations against the
//!   resolver layer over an in-memory store
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use jobboard::Client;
//! use jobboard::testing::MockTransport;
//! use serde_json::json;
//!
//! let mock = Arc::new(MockTransport::new().respond_with(json!({"data": {"jobs": []}})));
//! let client = Client::builder().build_with_transport(mock.clone()).unwrap();
//! ```
//!
//! ## MockTransport vs InMemoryServer
//!
//! | Feature | MockTransport | InMemoryServer |
//! |---------|---------------|----------------|
//! | Scripted responses | ✓ | ✗ |
//! | Request recording | ✓ | ✗ |
//! | Nested field resolution | ✗ | ✓ |
//! | Authorization | ✗ | ✓ |
//! | Best for | Unit tests | Integration tests |

mod in_memory;
mod mock_transport;

pub use in_memory::{InMemoryServer, sample_store};
pub use mock_transport::MockTransport;
