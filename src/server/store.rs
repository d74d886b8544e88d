//! Records and the database collaborator behind the resolvers.

use parking_lot::RwLock;
use uuid::Uuid;

/// A stored job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Job id.
    pub id: String,
    /// Id of the company that posted it.
    pub company_id: String,
    /// Job title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// A job to insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    /// Id of the posting company.
    pub company_id: String,
    /// Job title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// A stored company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    /// Company id.
    pub id: String,
    /// Company name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// A stored user, who posts jobs for one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// User id.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Company the user posts for.
    pub company_id: String,
}

/// Database access used by the resolvers.
pub trait Store: Send + Sync {
    /// Returns every job in insertion order.
    fn jobs(&self) -> Vec<JobRecord>;

    /// Returns a job by id.
    fn job(&self, id: &str) -> Option<JobRecord>;

    /// Returns a company by id.
    fn company(&self, id: &str) -> Option<CompanyRecord>;

    /// Returns the jobs of a company in insertion order.
    fn jobs_by_company(&self, company_id: &str) -> Vec<JobRecord>;

    /// Returns a user by id.
    fn user(&self, id: &str) -> Option<UserRecord>;

    /// Inserts a job and returns its new id.
    fn insert_job(&self, job: NewJob) -> String;
}

#[derive(Debug, Default)]
struct Tables {
    jobs: Vec<JobRecord>,
    companies: Vec<CompanyRecord>,
    users: Vec<UserRecord>,
}

/// A [`Store`] held in memory.
///
/// ```rust
/// use jobboard::server::{CompanyRecord, InMemoryStore, JobRecord, Store};
///
/// let store = InMemoryStore::new()
///     .with_company(CompanyRecord { id: "c1".into(), name: "Acme".into(), description: None })
///     .with_job(JobRecord {
///         id: "j1".into(),
///         company_id: "c1".into(),
///         title: "Engineer".into(),
///         description: None,
///     });
///
/// assert_eq!(store.jobs_by_company("c1").len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a company.
    #[must_use]
    pub fn with_company(self, company: CompanyRecord) -> Self {
        self.tables.write().companies.push(company);
        self
    }

    /// Adds a job with a caller-chosen id.
    #[must_use]
    pub fn with_job(self, job: JobRecord) -> Self {
        self.tables.write().jobs.push(job);
        self
    }

    /// Adds a user.
    #[must_use]
    pub fn with_user(self, user: UserRecord) -> Self {
        self.tables.write().users.push(user);
        self
    }

    /// Returns the number of jobs.
    pub fn job_count(&self) -> usize {
        self.tables.read().jobs.len()
    }
}

impl Store for InMemoryStore {
    fn jobs(&self) -> Vec<JobRecord> {
        self.tables.read().jobs.clone()
    }

    fn job(&self, id: &str) -> Option<JobRecord> {
        self.tables.read().jobs.iter().find(|j| j.id == id).cloned()
    }

    fn company(&self, id: &str) -> Option<CompanyRecord> {
        self.tables.read().companies.iter().find(|c| c.id == id).cloned()
    }

    fn jobs_by_company(&self, company_id: &str) -> Vec<JobRecord> {
        self.tables
            .read()
            .jobs
            .iter()
            .filter(|j| j.company_id == company_id)
            .cloned()
            .collect()
    }

    fn user(&self, id: &str) -> Option<UserRecord> {
        self.tables.read().users.iter().find(|u| u.id == id).cloned()
    }

    fn insert_job(&self, job: NewJob) -> String {
        let id = Uuid::new_v4().simple().to_string();
        self.tables.write().jobs.push(JobRecord {
            id: id.clone(),
            company_id: job.company_id,
            title: job.title,
            description: job.description,
        });
        id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn job(id: &str, company_id: &str) -> JobRecord {
        JobRecord {
            id: id.into(),
            company_id: company_id.into(),
            title: "Engineer".into(),
            description: None,
        }
    }

    #[test]
    fn test_lookup() {
        let store = InMemoryStore::new()
            .with_job(job("j1", "c1"))
            .with_job(job("j2", "c2"))
            .with_job(job("j3", "c1"));

        assert_eq!(store.job("j2").unwrap().company_id, "c2");
        assert!(store.job("j4").is_none());
        let ids: Vec<_> = store.jobs_by_company("c1").into_iter().map(|j| j.id).collect();
        assert_eq!(ids, ["j1", "j3"]);
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let store = InMemoryStore::new();
        let new = NewJob {
            company_id: "c1".into(),
            title: "T".into(),
            description: Some("D".into()),
        };
        let a = store.insert_job(new.clone());
        let b = store.insert_job(new);

        assert_ne!(a, b);
        assert_eq!(store.job_count(), 2);
        assert_eq!(store.job(&a).unwrap().description.as_deref(), Some("D"));
        assert_eq!(store.jobs().last().unwrap().id, b);
    }
}
