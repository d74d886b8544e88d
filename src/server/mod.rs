//! Resolver layer of the job board.
//!
//! Resolves `Query.jobs`, `Query.job`, `Query.company`, the nested
//! `Job.company` and `Company.jobs` lookups, and `Mutation.createJob`, which
//! requires an authenticated [`Identity`]. Data comes from a [`Store`];
//! [`InMemoryStore`] keeps it in memory.
//!
//! [`InMemoryServer`](crate::testing::InMemoryServer) serves these resolvers
//! through the [`Transport`](crate::transport::Transport) trait.

mod resolvers;
mod store;

pub use resolvers::{Identity, NewJobInput, ResolverError, Resolvers};
pub use store::{CompanyRecord, InMemoryStore, JobRecord, NewJob, Store, UserRecord};
