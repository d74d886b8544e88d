//! Job board operations on [`Client`].

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::documents::{COMPANY_FIELD, JOB_FIELD, JOBS_FIELD};
use super::types::{Company, CreateJobInput, Job, JobSummary};
use crate::config::FetchPolicy;
use crate::graphql::Variables;
use crate::{Client, Error, Result};

impl Client {
    /// Loads every job with its id, title and company.
    ///
    /// Always sends a request, so a newly posted job shows up. The result
    /// is still stored for later cache-first reads.
    ///
    /// # Errors
    ///
    /// Transport failures and GraphQL errors.
    pub async fn load_jobs(&self) -> Result<Vec<JobSummary>> {
        let data = self
            .query_with_policy(&self.documents().jobs, Variables::new(), FetchPolicy::NetworkOnly)
            .await?;
        root_field(data, JOBS_FIELD)
    }

    /// Loads one job, answering from the cache when possible.
    ///
    /// Returns `None` when no job has this id.
    ///
    /// # Errors
    ///
    /// Transport failures and GraphQL errors.
    pub async fn load_job(&self, id: &str) -> Result<Option<Job>> {
        let data = self
            .query_with_policy(&self.documents().job, id_variables(id), FetchPolicy::CacheFirst)
            .await?;
        root_field(data, JOB_FIELD)
    }

    /// Loads a company and its jobs, answering from the cache when
    /// possible.
    ///
    /// Returns `None` when no company has this id.
    ///
    /// # Errors
    ///
    /// Transport failures and GraphQL errors.
    pub async fn load_company(&self, id: &str) -> Result<Option<Company>> {
        let data = self
            .query_with_policy(&self.documents().company, id_variables(id), FetchPolicy::CacheFirst)
            .await?;
        root_field(data, COMPANY_FIELD)
    }

    /// Posts a job for the logged-in user's company.
    ///
    /// On success the returned job is written into the cache record
    /// [`load_job`](Self::load_job) reads, so loading it next needs no
    /// request.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Unauthorized`](crate::ErrorKind::Unauthorized) when not
    /// logged in; otherwise transport failures and GraphQL errors. The
    /// cache is untouched on error.
    pub async fn create_job(&self, input: &CreateJobInput) -> Result<Job> {
        let docs = self.documents();
        let mut variables = Variables::new();
        variables.insert("input".to_string(), serde_json::to_value(input)?);

        let data = self.mutate(&docs.create_job, variables).await?;
        if self.config().enabled {
            docs.create_job_sync.write(self.cache(), &data)?;
        }

        let job: Option<Job> = root_field(data, JOB_FIELD)?;
        job.ok_or_else(|| Error::invalid_response("createJob returned null"))
    }
}

fn id_variables(id: &str) -> Variables {
    let mut variables = Variables::new();
    variables.insert("id".to_string(), json!(id));
    variables
}

/// Deserializes `data[field]`, failing if `data` has no such key.
fn root_field<T: DeserializeOwned>(data: Value, field: &str) -> Result<T> {
    let Value::Object(mut map) = data else {
        return Err(Error::invalid_response(format!(
            "expected an object with `{}`",
            field
        )));
    };
    let value = map
        .remove(field)
        .ok_or_else(|| Error::invalid_response(format!("response has no `{}` field", field)))?;
    Ok(serde_json::from_value(value)?)
}
