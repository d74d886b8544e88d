//! Authentication for job board requests.
//!
//! The client does not own the login state. It consumes it through the
//! [`AuthProvider`] trait, asking for a fresh [`AuthContext`] on every
//! dispatch, and turns it into headers with the pure [`auth_headers`] hook.
//!
//! - [`Anonymous`]: never logged in
//! - [`StaticToken`]: always logged in with one token
//! - [`Session`]: login state that changes at runtime
//!
//! ```rust,ignore
//! use jobboard::{Client, auth::Session};
//!
//! let session = Session::new();
//! let client = Client::builder()
//!     .url("http://localhost:9000/graphql")
//!     .auth(session.clone())
//!     .build()?;
//!
//! session.login(token);                 // later, from the login form
//! let job = client.create_job(input).await?;
//! ```

mod headers;
mod provider;

pub use headers::{AUTHORIZATION, HeaderSet, auth_headers};
pub use provider::{Anonymous, AuthContext, AuthProvider, Session, StaticToken};
