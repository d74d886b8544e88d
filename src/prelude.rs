//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use jobboard::prelude::*;
//! ```
//!
//! This provides access to:
//! - Core client types
//! - Error types
//! - Login state providers
//! - Job board data types

pub use crate::{
    auth::{Anonymous, AuthContext, AuthProvider, Session, StaticToken},
    client::{Client, ClientBuilder},
    config::{CacheConfig, FetchPolicy},
    error::{Error, ErrorKind, Result},
    jobs::{Company, CompanyJob, CompanyRef, CreateJobInput, Job, JobSummary},
};
