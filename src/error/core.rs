//! Main error type for the job board client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// Message the server uses when a protected operation is called anonymously.
pub(crate) const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// The primary error type for client operations.
///
/// Every failed dispatch produces exactly one `Error`:
/// - [`kind()`](Error::kind): Categorization for `match` statements
/// - [`message()`](Error::message): The failure text. For server-reported
///   errors this is every `errors[].message` joined by `\n`.
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use jobboard::{Error, ErrorKind};
///
/// fn describe(err: &Error) -> String {
///     match err.kind() {
///         ErrorKind::Unauthorized => "please log in".to_string(),
///         kind if kind.is_transport() => "server unreachable".to_string(),
///         _ => err.message().to_string(),
///     }
/// }
///
/// let err = Error::response(["first", "second"]);
/// assert_eq!(describe(&err), "first\nsecond");
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jobboard::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::InvalidArgument, "title cannot be empty");
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error from a kind with a default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Transport => "request could not be sent",
            ErrorKind::Connection => "connection failed",
            ErrorKind::Timeout => "request timed out",
            ErrorKind::Response => "server reported an error",
            ErrorKind::Unauthorized => UNAUTHORIZED_MESSAGE,
            ErrorKind::InvalidResponse => "invalid response",
            ErrorKind::Configuration => "configuration error",
            ErrorKind::InvalidArgument => "invalid argument",
        };
        Self::new(kind, message)
    }

    /// Builds the single failure for a response carrying server errors.
    ///
    /// The messages are joined by `\n` in the order given. A joined message of
    /// exactly `Unauthorized` is classified as [`ErrorKind::Unauthorized`].
    ///
    /// ```rust
    /// use jobboard::{Error, ErrorKind};
    ///
    /// let err = Error::response(["Unauthorized"]);
    /// assert_eq!(err.kind(), ErrorKind::Unauthorized);
    /// assert_eq!(err.message(), "Unauthorized");
    /// ```
    pub fn response<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = messages
            .into_iter()
            .map(|m| m.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join("\n");
        let kind = if joined == UNAUTHORIZED_MESSAGE {
            ErrorKind::Unauthorized
        } else {
            ErrorKind::Response
        };
        Self::new(kind, joined)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the failure message without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the network call itself did not complete.
    #[inline]
    pub fn is_transport(&self) -> bool {
        self.kind.is_transport()
    }

    /// Returns `true` if the server refused an unauthenticated caller.
    #[inline]
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates an unauthorized error with the server's message.
    pub fn unauthorized() -> Self {
        Self::from_kind(ErrorKind::Unauthorized)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_response(format!("JSON error: {}", err)).with_source(err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_error_new() {
        let err = Error::new(ErrorKind::InvalidArgument, "test message");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.message(), "test message");
        assert!(err.to_string().contains("test message"));
    }

    #[test]
    fn test_response_joins_in_order() {
        let err = Error::response(["a", "b", "c"]);
        assert_eq!(err.kind(), ErrorKind::Response);
        assert_eq!(err.message(), "a\nb\nc");
    }

    #[test]
    fn test_response_unauthorized_is_classified() {
        let err = Error::response(vec!["Unauthorized".to_string()]);
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Unauthorized");
    }

    #[test]
    fn test_unauthorized_needs_exact_message() {
        let err = Error::response(["Unauthorized", "also this"]);
        assert_eq!(err.kind(), ErrorKind::Response);

        let err = Error::response(["unauthorized"]);
        assert_eq!(err.kind(), ErrorKind::Response);
    }

    #[test]
    fn test_error_from_kind() {
        let err = Error::from_kind(ErrorKind::Unauthorized);
        assert_eq!(err.message(), "Unauthorized");

        let err: Error = ErrorKind::Timeout.into();
        assert!(err.is_transport());
    }

    #[test]
    fn test_error_with_source() {
        let io_err = std::io::Error::other("underlying error");
        let err = Error::connection("connection failed").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_url_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_display_format() {
        let err = Error::response(["job not found"]);
        assert_eq!(err.to_string(), "response error: job not found");
    }
}
