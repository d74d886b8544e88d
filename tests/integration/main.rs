//! Integration tests for the job board client.
//!
//! Everything runs in-process: job board scenarios against
//! [`InMemoryServer`](jobboard::testing::InMemoryServer), wire-level checks
//! against a wiremock HTTP server.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With logs
//! RUST_LOG=jobboard=debug cargo test --test integration -- --nocapture
//! ```

mod client_tests;
mod common;
mod transport_tests;
