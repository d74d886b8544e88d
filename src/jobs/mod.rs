//! Job board domain operations.
//!
//! | Operation | Document | Policy |
//! |-----------|----------|--------|
//! | [`Client::load_jobs`](crate::Client::load_jobs) | `JobsQuery` | network-only |
//! | [`Client::load_job`](crate::Client::load_job) | `JobQuery` | cache-first |
//! | [`Client::load_company`](crate::Client::load_company) | `CompanyQuery` | cache-first |
//! | [`Client::create_job`](crate::Client::create_job) | `CreateJobMutation` | mutation, synced into `JobQuery` |
//!
//! The cache-first policies follow the client's
//! [`CacheConfig`](crate::CacheConfig); with the cache disabled every load
//! sends a request.

mod documents;
mod operations;
mod types;

pub use documents::{COMPANY_FIELD, Documents, JOB_FIELD, JOBS_FIELD, job_detail};
pub use types::{Company, CompanyJob, CompanyRef, CreateJobInput, Job, JobSummary};
