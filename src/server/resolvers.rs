//! Field resolvers over a [`Store`].

use std::sync::Arc;

use serde::Deserialize;

use super::store::{CompanyRecord, JobRecord, NewJob, Store};
use crate::error::UNAUTHORIZED_MESSAGE;

/// The authenticated caller, decoded from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Id of the user the token was issued to.
    pub user_id: String,
}

impl Identity {
    /// Creates an identity for `user_id`.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Input of `createJob`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewJobInput {
    /// Job title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Resolver failures, reported to clients as `errors[].message`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    /// No identity, or one whose user no longer exists.
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,
    /// A referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record type.
        kind: &'static str,
        /// Requested id.
        id: String,
    },
    /// The store failed or returned inconsistent data.
    #[error("store error: {0}")]
    Store(String),
}

/// Resolves the job board's query and mutation fields.
#[derive(Debug)]
pub struct Resolvers<S> {
    store: Arc<S>,
}

impl<S> Clone for Resolvers<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> Resolvers<S> {
    /// Creates resolvers over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// `Query.jobs`
    pub fn jobs(&self) -> Vec<JobRecord> {
        self.store.jobs()
    }

    /// `Query.job(id)`
    pub fn job(&self, id: &str) -> Option<JobRecord> {
        self.store.job(id)
    }

    /// `Query.company(id)`
    pub fn company(&self, id: &str) -> Option<CompanyRecord> {
        self.store.company(id)
    }

    /// `Job.company`, looked up from the job's company id.
    pub fn job_company(&self, job: &JobRecord) -> Result<CompanyRecord, ResolverError> {
        self.store
            .company(&job.company_id)
            .ok_or_else(|| ResolverError::NotFound {
                kind: "Company",
                id: job.company_id.clone(),
            })
    }

    /// `Company.jobs`
    pub fn company_jobs(&self, company: &CompanyRecord) -> Vec<JobRecord> {
        self.store.jobs_by_company(&company.id)
    }

    /// `Mutation.createJob(input)`
    ///
    /// The job is posted for the caller's company; the input cannot choose
    /// one.
    ///
    /// # Errors
    ///
    /// [`ResolverError::Unauthorized`] without an identity or for an unknown
    /// user.
    pub fn create_job(
        &self,
        identity: Option<&Identity>,
        input: NewJobInput,
    ) -> Result<JobRecord, ResolverError> {
        let identity = identity.ok_or(ResolverError::Unauthorized)?;
        let user = self
            .store
            .user(&identity.user_id)
            .ok_or(ResolverError::Unauthorized)?;

        let id = self.store.insert_job(NewJob {
            company_id: user.company_id,
            title: input.title,
            description: input.description,
        });
        tracing::debug!(job = %id, user = %identity.user_id, "job created");

        self.store.job(&id).ok_or_else(|| {
            ResolverError::Store(format!("inserted job {} could not be read back", id))
        })
    }
}
