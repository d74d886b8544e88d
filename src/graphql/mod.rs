//! GraphQL operations and their dispatch.
//!
//! - [`Operation`]: a named query or mutation built from [`Field`]s,
//!   [`SelectionSet`]s and shared [`Fragment`]s
//! - [`Dispatcher`]: sends operations and applies the [`FetchPolicy`]
//!   against the cache
//!
//! [`FetchPolicy`]: crate::config::FetchPolicy

mod dispatcher;
mod envelope;
mod operation;

pub use dispatcher::Dispatcher;
pub use envelope::{GraphQLRequest, GraphQLResponse, Variables};
pub use operation::{
    Argument, Field, Fragment, Operation, OperationBuilder, OperationKind, Selection,
    SelectionSet, TYPENAME_FIELD, VariableDefinition,
};
