//! # Job Board Client
//!
//! GraphQL data-access layer for the job board, with a normalized client
//! cache.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jobboard::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), jobboard::Error> {
//!     let session = Session::new();
//!     let client = Client::builder()
//!         .url("http://localhost:9000/graphql")
//!         .auth(session.clone())
//!         .build()?;
//!
//!     for job in client.load_jobs().await? {
//!         println!("{} at {}", job.title, job.company.name);
//!     }
//!
//!     session.login("eyJhbGciOi...");
//!     let job = client
//!         .create_job(&CreateJobInput::new("Engineer", "Build things"))
//!         .await?;
//!
//!     // Served from the cache, no request.
//!     let same = client.load_job(&job.id).await?;
//!     assert_eq!(same.as_ref(), Some(&job));
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Explicit context**: `Client` owns transport, login state, cache and
//!   documents; clones share them
//! - **Fetch policy**: `load_job`/`load_company` are cache-first,
//!   `load_jobs` always goes to the network
//! - **Errors ≠ data**: any `errors` entry fails the call, even with `data`
//!   present; the HTTP status is ignored
//! - **Synchronized mutations**: `create_job` writes its result where
//!   `load_job` reads
//!
//! ## Features
//!
//! - `rest` (default): Enable the HTTP transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod jobs;

// Transport layer
pub mod transport;

// Resolver layer
pub mod server;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};

// Re-export config types
pub use config::{CacheConfig, FetchPolicy};

// Testing support
pub use testing::{InMemoryServer, MockTransport};
