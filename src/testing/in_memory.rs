//! InMemoryServer for testing against real resolver semantics.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::Error;
use crate::auth::{AUTHORIZATION, HeaderSet};
use crate::graphql::{Field, Operation, OperationKind, SelectionSet, TYPENAME_FIELD};
use crate::jobs::Documents;
use crate::server::{
    CompanyRecord, Identity, InMemoryStore, JobRecord, NewJobInput, Resolvers, Store, UserRecord,
};
use crate::transport::{Transport, TransportKind, TransportRequest, TransportStats};

/// A transport that executes requests in-process against [`Resolvers`].
///
/// Unlike [`MockTransport`](super::MockTransport), `InMemoryServer` answers
/// from a real [`Store`]: nested `Job.company` and `Company.jobs` are looked
/// up, `createJob` inserts, and authorization is enforced.
///
/// Operations are recognized by their exact text, so only registered
/// operations can be executed. Every operation of a [`Documents`] is
/// registered on construction.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use jobboard::Client;
/// use jobboard::auth::StaticToken;
/// use jobboard::jobs::Documents;
/// use jobboard::testing::{InMemoryServer, sample_store};
///
/// let server = Arc::new(InMemoryServer::new(Arc::new(sample_store()), &Documents::new().unwrap()));
/// let token = server.issue_token("u1");
///
/// let client = Client::builder()
///     .auth(StaticToken::new(token))
///     .build_with_transport(server.clone())
///     .unwrap();
/// # drop(client);
/// ```
pub struct InMemoryServer<S = InMemoryStore> {
    resolvers: Resolvers<S>,
    operations: RwLock<HashMap<String, Arc<Operation>>>,
    tokens: RwLock<HashMap<String, Identity>>,
    request_count: AtomicU64,
}

impl<S: Store> InMemoryServer<S> {
    /// Creates a server over `store` that accepts the operations of
    /// `documents`.
    pub fn new(store: Arc<S>, documents: &Documents) -> Self {
        let server = Self {
            resolvers: Resolvers::new(store),
            operations: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashMap::new()),
            request_count: AtomicU64::new(0),
        };
        for operation in documents.all() {
            server.register(Arc::clone(operation));
        }
        server
    }

    /// Accepts one more operation.
    pub fn register(&self, operation: Arc<Operation>) {
        self.operations
            .write()
            .insert(operation.text().to_string(), operation);
    }

    /// Issues a bearer token that authenticates as `user_id`.
    pub fn issue_token(&self, user_id: impl Into<String>) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens
            .write()
            .insert(token.clone(), Identity::new(user_id));
        token
    }

    /// Invalidates a token. Requests carrying it become anonymous.
    pub fn revoke_token(&self, token: &str) -> bool {
        self.tokens.write().remove(token).is_some()
    }

    /// Returns the number of requests served.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns the resolvers.
    pub fn resolvers(&self) -> &Resolvers<S> {
        &self.resolvers
    }

    /// Executes `operation` and returns the response body.
    pub fn execute(
        &self,
        operation: &Operation,
        variables: &Map<String, Value>,
        identity: Option<&Identity>,
    ) -> Value {
        let mut execution = Execution {
            resolvers: &self.resolvers,
            variables,
            identity,
            errors: Vec::new(),
        };

        let mut data = Map::new();
        for field in operation.resolved().fields() {
            let value = execution.root(operation.kind(), field);
            data.insert(field.response_key().to_string(), value);
        }

        let mut body = Map::new();
        body.insert("data".to_string(), Value::Object(data));
        if !execution.errors.is_empty() {
            body.insert("errors".to_string(), error_entries(&execution.errors));
        }
        Value::Object(body)
    }

    fn identity(&self, headers: &HeaderSet) -> Option<Identity> {
        let token = headers.get(AUTHORIZATION)?.strip_prefix("Bearer ")?;
        self.tokens.read().get(token).cloned()
    }
}

impl<S> std::fmt::Debug for InMemoryServer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryServer")
            .field("operations", &self.operations.read().len())
            .field("request_count", &self.request_count.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl<S: Store + 'static> Transport for InMemoryServer<S> {
    async fn post(&self, request: TransportRequest) -> Result<Value, Error> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let identity = self.identity(&request.headers);

        let Some(query) = request.query() else {
            return Ok(json!({"errors": [{"message": "Must provide query string."}]}));
        };
        let operation = self.operations.read().get(query).cloned();
        let Some(operation) = operation else {
            tracing::warn!("unregistered operation");
            return Ok(json!({"errors": [{"message": "Unknown operation"}]}));
        };

        let variables = match request.variables() {
            Some(Value::Object(variables)) => variables.clone(),
            _ => Map::new(),
        };

        tracing::debug!(
            operation = operation.name(),
            authenticated = identity.is_some(),
            "executing in memory"
        );
        Ok(self.execute(&operation, &variables, identity.as_ref()))
    }

    fn kind(&self) -> TransportKind {
        TransportKind::InMemory
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            requests_sent: self.request_count(),
            requests_failed: 0,
        }
    }
}

enum Parent {
    Job(JobRecord),
    Company(CompanyRecord),
}

impl Parent {
    fn typename(&self) -> &'static str {
        match self {
            Parent::Job(_) => "Job",
            Parent::Company(_) => "Company",
        }
    }
}

struct Execution<'a, S> {
    resolvers: &'a Resolvers<S>,
    variables: &'a Map<String, Value>,
    identity: Option<&'a Identity>,
    errors: Vec<String>,
}

impl<S: Store> Execution<'_, S> {
    fn root(&mut self, kind: OperationKind, field: &Field) -> Value {
        let resolvers = self.resolvers;
        match (kind, field.name()) {
            (OperationKind::Query, "jobs") => {
                let jobs = resolvers.jobs();
                self.list(jobs.into_iter().map(Parent::Job), field.selection())
            }
            (OperationKind::Query, "job") => match self.id_argument(field) {
                Some(id) => match resolvers.job(&id) {
                    Some(job) => self.object(Parent::Job(job), field.selection()),
                    None => Value::Null,
                },
                None => Value::Null,
            },
            (OperationKind::Query, "company") => match self.id_argument(field) {
                Some(id) => match resolvers.company(&id) {
                    Some(company) => self.object(Parent::Company(company), field.selection()),
                    None => Value::Null,
                },
                None => Value::Null,
            },
            (OperationKind::Mutation, "createJob") => {
                let input = field
                    .argument("input")
                    .map(|arg| arg.resolve(self.variables))
                    .unwrap_or(Value::Null);
                let input: NewJobInput = match serde_json::from_value(input) {
                    Ok(input) => input,
                    Err(e) => {
                        self.errors.push(format!("Invalid input: {}", e));
                        return Value::Null;
                    }
                };
                match resolvers.create_job(self.identity, input) {
                    Ok(job) => self.object(Parent::Job(job), field.selection()),
                    Err(e) => {
                        self.errors.push(e.to_string());
                        Value::Null
                    }
                }
            }
            (kind, name) => {
                let root = match kind {
                    OperationKind::Query => "Query",
                    OperationKind::Mutation => "Mutation",
                };
                self.unknown_field(name, root)
            }
        }
    }

    fn object(&mut self, parent: Parent, selection: &SelectionSet) -> Value {
        let resolvers = self.resolvers;
        let mut out = Map::new();
        for field in selection.fields() {
            let value = match (&parent, field.name()) {
                (_, TYPENAME_FIELD) => json!(parent.typename()),
                (Parent::Job(job), "id") => json!(job.id),
                (Parent::Job(job), "title") => json!(job.title),
                (Parent::Job(job), "description") => json!(job.description),
                (Parent::Job(job), "company") => match resolvers.job_company(job) {
                    Ok(company) => self.object(Parent::Company(company), field.selection()),
                    Err(e) => {
                        self.errors.push(e.to_string());
                        Value::Null
                    }
                },
                (Parent::Company(company), "id") => json!(company.id),
                (Parent::Company(company), "name") => json!(company.name),
                (Parent::Company(company), "description") => json!(company.description),
                (Parent::Company(company), "jobs") => {
                    let jobs = resolvers.company_jobs(company);
                    self.list(jobs.into_iter().map(Parent::Job), field.selection())
                }
                (parent, name) => self.unknown_field(name, parent.typename()),
            };
            out.insert(field.response_key().to_string(), value);
        }
        Value::Object(out)
    }

    fn list(&mut self, items: impl Iterator<Item = Parent>, selection: &SelectionSet) -> Value {
        Value::Array(items.map(|item| self.object(item, selection)).collect())
    }

    fn id_argument(&mut self, field: &Field) -> Option<String> {
        match field.argument("id").map(|arg| arg.resolve(self.variables)) {
            Some(Value::String(id)) => Some(id),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => {
                self.errors
                    .push(format!("Argument \"id\" of field \"{}\" is required", field.name()));
                None
            }
        }
    }

    fn unknown_field(&mut self, name: &str, typename: &str) -> Value {
        self.errors
            .push(format!("Cannot query field \"{}\" on type \"{}\"", name, typename));
        Value::Null
    }
}

fn error_entries(messages: &[String]) -> Value {
    Value::Array(messages.iter().map(|m| json!({"message": m})).collect())
}

/// A small store: company `c1` "Acme" with job `j1` "Engineer", and user
/// `u1` who posts for `c1`.
pub fn sample_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_company(CompanyRecord {
            id: "c1".into(),
            name: "Acme".into(),
            description: Some("Makes everything".into()),
        })
        .with_job(JobRecord {
            id: "j1".into(),
            company_id: "c1".into(),
            title: "Engineer".into(),
            description: Some("Build things".into()),
        })
        .with_user(UserRecord {
            id: "u1".into(),
            email: "alice@acme.test".into(),
            company_id: "c1".into(),
        })
}
