//! Auth provider trait and the built-in providers.

use std::sync::Arc;

use parking_lot::RwLock;

/// A read-only snapshot of the caller's login state.
///
/// The client asks its [`AuthProvider`] for a fresh `AuthContext` on every
/// dispatch and never stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    logged_in: bool,
    token: Option<String>,
}

impl AuthContext {
    /// A logged-out context.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in context carrying `token`.
    pub fn logged_in(token: impl Into<String>) -> Self {
        Self {
            logged_in: true,
            token: Some(token.into()),
        }
    }

    /// Builds a context from raw parts, as reported by an external session.
    pub fn from_parts(logged_in: bool, token: Option<String>) -> Self {
        Self { logged_in, token }
    }

    /// Returns `true` if the provider reports the caller as logged in.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Returns the access token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Trait for supplying the current login state.
///
/// Implement this to connect the client to whatever holds the session
/// (a login form, a keychain, an environment variable).
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn AuthProvider>`.
///
/// ## Example: Environment Variable Provider
///
/// ```rust
/// use jobboard::auth::{AuthContext, AuthProvider};
///
/// struct EnvAuthProvider {
///     env_var: String,
/// }
///
/// impl AuthProvider for EnvAuthProvider {
///     fn auth_context(&self) -> AuthContext {
///         match std::env::var(&self.env_var) {
///             Ok(token) if !token.is_empty() => AuthContext::logged_in(token),
///             _ => AuthContext::anonymous(),
///         }
///     }
/// }
/// ```
pub trait AuthProvider: Send + Sync {
    /// Returns the login state as of now.
    ///
    /// Called exactly once per dispatch, synchronously, before the request
    /// headers are built.
    fn auth_context(&self) -> AuthContext;
}

impl<T: AuthProvider + ?Sized> AuthProvider for Arc<T> {
    fn auth_context(&self) -> AuthContext {
        (**self).auth_context()
    }
}

impl<T: AuthProvider + ?Sized> AuthProvider for Box<T> {
    fn auth_context(&self) -> AuthContext {
        (**self).auth_context()
    }
}

/// A provider that is never logged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AuthProvider for Anonymous {
    fn auth_context(&self) -> AuthContext {
        AuthContext::anonymous()
    }
}

/// A provider that is always logged in with the same token.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: Arc<str>,
}

impl StaticToken {
    /// Creates a new static token provider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl AuthProvider for StaticToken {
    fn auth_context(&self) -> AuthContext {
        AuthContext::logged_in(self.token.to_string())
    }
}

/// A provider backed by a mutable session.
///
/// Clones share the same session, so the UI can hold one handle to call
/// [`login`](Session::login) and [`logout`](Session::logout) while the client
/// holds another. Requests dispatched after a state change observe the new
/// state.
///
/// ```rust
/// use jobboard::auth::{AuthProvider, Session};
///
/// let session = Session::new();
/// assert!(!session.auth_context().is_logged_in());
///
/// session.login("token-123");
/// assert_eq!(session.auth_context().token(), Some("token-123"));
///
/// session.logout();
/// assert!(!session.is_logged_in());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Creates a logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the access token.
    pub fn login(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Forgets the access token.
    pub fn logout(&self) {
        *self.token.write() = None;
    }

    /// Returns `true` while a token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.token.read().is_some()
    }
}

impl AuthProvider for Session {
    fn auth_context(&self) -> AuthContext {
        match self.token.read().as_ref() {
            Some(token) => AuthContext::logged_in(token.clone()),
            None => AuthContext::anonymous(),
        }
    }
}
