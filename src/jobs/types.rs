//! Typed results of the job board operations.

use serde::{Deserialize, Serialize};

/// A company as embedded in a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    /// Company id.
    pub id: String,
    /// Company name.
    pub name: String,
}

/// A job as listed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    /// Job id.
    pub id: String,
    /// Job title.
    pub title: String,
    /// Hiring company.
    pub company: CompanyRef,
}

/// A job with its full detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job id.
    pub id: String,
    /// Job title.
    pub title: String,
    /// Hiring company.
    pub company: CompanyRef,
    /// Free-text description.
    pub description: Option<String>,
}

/// A job as listed on its company's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyJob {
    /// Job id.
    pub id: String,
    /// Job title.
    pub title: String,
}

/// A company with its open jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company id.
    pub id: String,
    /// Company name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Jobs the company has posted.
    pub jobs: Vec<CompanyJob>,
}

/// Fields of a new job. The company is taken from the caller's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJobInput {
    /// Job title.
    pub title: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateJobInput {
    /// Creates an input with a title and description.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
        }
    }
}
