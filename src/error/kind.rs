//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on error types. The
/// client never retries, so the classification exists for presentation
/// decisions in the caller, not for recovery.
///
/// ## Error Classes
///
/// | ErrorKind         | Class          | Raised when                              |
/// |-------------------|----------------|------------------------------------------|
/// | `Transport`       | transport      | The HTTP call could not complete         |
/// | `Connection`      | transport      | DNS, TLS handshake, connection refused   |
/// | `Timeout`         | transport      | The transport's own timeout elapsed      |
/// | `Response`        | response       | The server reported one or more errors   |
/// | `Unauthorized`    | response       | The server reported exactly `Unauthorized` |
/// | `InvalidResponse` | response       | Body was not a GraphQL response object   |
/// | `Configuration`   | local          | Bad endpoint, conflicting documents      |
/// | `InvalidArgument` | local          | Input cannot be encoded into a request   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Generic transport failure that does not fit a more specific category.
    #[error("transport error")]
    Transport,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Request timed out in the transport.
    #[error("timeout")]
    Timeout,

    /// The server answered with a non-empty `errors` array.
    ///
    /// The error message is every reported message joined by a newline,
    /// in the order the server sent them.
    #[error("response error")]
    Response,

    /// The server rejected the operation because the caller is not
    /// authenticated.
    ///
    /// This is a [`Response`](ErrorKind::Response) error whose joined message
    /// is exactly `Unauthorized`.
    #[error("unauthorized")]
    Unauthorized,

    /// Response could not be interpreted (not JSON, not an object, or a
    /// requested root field is missing).
    #[error("invalid response")]
    InvalidResponse,

    /// Configuration error (invalid URL, conflicting fragments,
    /// incompatible cache synchronization shapes).
    #[error("configuration error")]
    Configuration,

    /// Invalid argument supplied by the caller.
    #[error("invalid argument")]
    InvalidArgument,
}

impl ErrorKind {
    /// Returns `true` if the error means the network call itself did not
    /// complete.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jobboard::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_transport());
    /// assert!(!ErrorKind::Response.is_transport());
    /// ```
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::Transport | ErrorKind::Connection | ErrorKind::Timeout
        )
    }

    /// Returns `true` if the server answered and reported the failure.
    #[inline]
    pub fn is_response(&self) -> bool {
        matches!(self, ErrorKind::Response | ErrorKind::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transport() {
        assert!(ErrorKind::Transport.is_transport());
        assert!(ErrorKind::Connection.is_transport());
        assert!(ErrorKind::Timeout.is_transport());

        assert!(!ErrorKind::Response.is_transport());
        assert!(!ErrorKind::Unauthorized.is_transport());
        assert!(!ErrorKind::InvalidResponse.is_transport());
        assert!(!ErrorKind::Configuration.is_transport());
        assert!(!ErrorKind::InvalidArgument.is_transport());
    }

    #[test]
    fn test_is_response() {
        assert!(ErrorKind::Response.is_response());
        assert!(ErrorKind::Unauthorized.is_response());
        assert!(!ErrorKind::InvalidResponse.is_response());
        assert!(!ErrorKind::Connection.is_response());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorKind::Transport), "transport error");
        assert_eq!(format!("{}", ErrorKind::Connection), "connection error");
        assert_eq!(format!("{}", ErrorKind::Timeout), "timeout");
        assert_eq!(format!("{}", ErrorKind::Response), "response error");
        assert_eq!(format!("{}", ErrorKind::Unauthorized), "unauthorized");
        assert_eq!(format!("{}", ErrorKind::InvalidResponse), "invalid response");
        assert_eq!(format!("{}", ErrorKind::Configuration), "configuration error");
        assert_eq!(format!("{}", ErrorKind::InvalidArgument), "invalid argument");
    }

    #[test]
    fn test_error_kind_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorKind::Timeout);
        set.insert(ErrorKind::Response);
        set.insert(ErrorKind::Timeout);
        assert_eq!(set.len(), 2);
    }
}
