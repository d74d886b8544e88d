//! Transport layer for the GraphQL endpoint.
//!
//! The dispatcher depends only on the [`Transport`] trait: one POST with a
//! JSON body, one JSON response back. Implementations:
//!
//! - [`HttpTransport`] (feature `rest`, default): reqwest over HTTP
//! - [`MockTransport`](crate::testing::MockTransport): scripted responses
//! - [`InMemoryServer`](crate::testing::InMemoryServer): executes requests
//!   against the in-process resolver layer
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable the HTTP transport

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod http;

pub use traits::{Transport, TransportKind, TransportRequest, TransportStats};

#[cfg(feature = "rest")]
pub use http::{DEFAULT_ENDPOINT, HttpTransport, HttpTransportBuilder};
