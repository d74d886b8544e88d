//! Pre-dispatch header hook.

use std::collections::BTreeMap;

use super::AuthContext;

/// Name of the authorization header.
pub const AUTHORIZATION: &str = "authorization";

/// Request headers handed to a [`Transport`](crate::transport::Transport).
///
/// Header names are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    headers: BTreeMap<String, String>,
}

impl HeaderSet {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any previous value.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Returns a header value by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns `true` if the header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns `true` if no header is set.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Builds the headers for one request from the current login state.
///
/// Logged in with a token yields `authorization: Bearer <token>`. Anything
/// else, including a logged-in context without a token, yields no header.
///
/// ```rust
/// use jobboard::auth::{auth_headers, AuthContext};
///
/// let headers = auth_headers(&AuthContext::logged_in("T"));
/// assert_eq!(headers.get("authorization"), Some("Bearer T"));
///
/// assert!(auth_headers(&AuthContext::anonymous()).is_empty());
/// ```
pub fn auth_headers(context: &AuthContext) -> HeaderSet {
    let mut headers = HeaderSet::new();
    if let (true, Some(token)) = (context.is_logged_in(), context.token()) {
        headers.insert(AUTHORIZATION, format!("Bearer {}", token));
    }
    headers
}
