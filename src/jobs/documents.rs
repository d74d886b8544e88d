//! The job board's operation documents.

use std::sync::Arc;

use crate::Result;
use crate::cache::CacheSynchronizer;
use crate::graphql::{Field, Fragment, Operation, SelectionSet};

/// Root field of [`Documents::jobs`].
pub const JOBS_FIELD: &str = "jobs";
/// Root field of [`Documents::job`] and the response key of
/// [`Documents::create_job`].
pub const JOB_FIELD: &str = "job";
/// Root field of [`Documents::company`].
pub const COMPANY_FIELD: &str = "company";

/// The `JobDetail` fragment: a job's id, title, company and description.
pub fn job_detail() -> Arc<Fragment> {
    Fragment::new(
        "JobDetail",
        "Job",
        SelectionSet::new()
            .field("id")
            .field("title")
            .field(Field::new("company").select(SelectionSet::new().field("id").field("name")))
            .field("description"),
    )
}

/// Built operations, shared by every clone of a client.
///
/// `job` and `create_job` both select through the one `JobDetail`
/// fragment, so a created job can be written where `job` reads it.
#[derive(Debug, Clone)]
pub struct Documents {
    /// `JobsQuery`: every job with id, title and company.
    pub jobs: Arc<Operation>,
    /// `JobQuery($id)`: one job's detail.
    pub job: Arc<Operation>,
    /// `CompanyQuery($id)`: a company and its jobs.
    pub company: Arc<Operation>,
    /// `CreateJobMutation($input)`: posts a job, returned as `job`.
    pub create_job: Arc<Operation>,
    /// Writes the `create_job` result into the `job` record.
    pub create_job_sync: CacheSynchronizer,
}

impl Documents {
    /// Builds the documents.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an operation fails to build.
    pub fn new() -> Result<Self> {
        let detail = job_detail();

        let jobs = Arc::new(
            Operation::query("JobsQuery")
                .field(
                    Field::new(JOBS_FIELD).select(
                        SelectionSet::new()
                            .field("id")
                            .field("title")
                            .field(
                                Field::new("company")
                                    .select(SelectionSet::new().field("id").field("name")),
                            ),
                    ),
                )
                .build()?,
        );

        let job = Arc::new(
            Operation::query("JobQuery")
                .variable("id", "ID!")
                .field(Field::new(JOB_FIELD).var("id").select(SelectionSet::new().spread(&detail)))
                .build()?,
        );

        let company = Arc::new(
            Operation::query("CompanyQuery")
                .variable("id", "ID!")
                .field(
                    Field::new(COMPANY_FIELD).var("id").select(
                        SelectionSet::new()
                            .field("id")
                            .field("name")
                            .field("description")
                            .field(
                                Field::new("jobs")
                                    .select(SelectionSet::new().field("id").field("title")),
                            ),
                    ),
                )
                .build()?,
        );

        let create_job = Arc::new(
            Operation::mutation("CreateJobMutation")
                .variable("input", "CreateJobInput!")
                .field(
                    Field::new("createJob")
                        .alias(JOB_FIELD)
                        .var("input")
                        .select(SelectionSet::new().spread(&detail)),
                )
                .build()?,
        );

        let create_job_sync =
            CacheSynchronizer::new(&create_job, JOB_FIELD, Arc::clone(&job), JOB_FIELD, "id")?;

        Ok(Self {
            jobs,
            job,
            company,
            create_job,
            create_job_sync,
        })
    }

    /// Returns every operation.
    pub fn all(&self) -> [&Arc<Operation>; 4] {
        [&self.jobs, &self.job, &self.company, &self.create_job]
    }
}
