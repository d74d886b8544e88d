//! Error types for the job board client.
//!
//! Every failed operation surfaces as exactly one [`Error`]. The
//! [`ErrorKind`] separates three classes:
//!
//! - transport failures (`Transport`, `Connection`, `Timeout`): the HTTP call
//!   did not complete
//! - response failures (`Response`, `Unauthorized`): the server answered with
//!   a non-empty `errors` array; all messages are joined by `\n`
//! - local failures (`InvalidResponse`, `Configuration`, `InvalidArgument`)
//!
//! ```rust
//! use jobboard::Error;
//!
//! let err = Error::response(["Job not found", "Company not found"]);
//! assert_eq!(err.message(), "Job not found\nCompany not found");
//! ```

mod core;
mod kind;

pub use self::core::Error;
pub(crate) use self::core::UNAUTHORIZED_MESSAGE;
pub use self::kind::ErrorKind;

/// A specialized `Result` type for job board operations.
pub type Result<T> = std::result::Result<T, Error>;
