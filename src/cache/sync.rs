//! Writes mutation results into the slot a query reads.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::key::CacheKey;
use super::store::Cache;
use crate::graphql::{Operation, OperationKind};
use crate::{Error, Result};

/// Copies the entity a mutation returns into the cache record of the query
/// that loads that entity by id.
///
/// Construction checks that the mutation selects at least every field the
/// query reads, so a later cache-first read of the query is always a hit.
#[derive(Debug, Clone)]
pub struct CacheSynchronizer {
    mutation_name: String,
    mutation_field: String,
    query: Arc<Operation>,
    query_field: String,
    id_variable: String,
}

impl CacheSynchronizer {
    /// Binds `mutation_field` of `mutation` to `query_field` of `query`,
    /// keyed by the query variable `id_variable`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the operation kinds are wrong, a
    /// field or the variable is missing, or the mutation's selection does
    /// not cover the query's.
    pub fn new(
        mutation: &Operation,
        mutation_field: &str,
        query: Arc<Operation>,
        query_field: &str,
        id_variable: &str,
    ) -> Result<Self> {
        if mutation.kind() != OperationKind::Mutation {
            return Err(Error::configuration(format!("`{}` is not a mutation", mutation.name())));
        }
        if query.kind() != OperationKind::Query {
            return Err(Error::configuration(format!("`{}` is not a query", query.name())));
        }

        let produced = mutation.root_field(mutation_field).ok_or_else(|| {
            Error::configuration(format!(
                "mutation `{}` has no field `{}`",
                mutation.name(),
                mutation_field
            ))
        })?;
        let read = query.root_field(query_field).ok_or_else(|| {
            Error::configuration(format!("query `{}` has no field `{}`", query.name(), query_field))
        })?;
        if !query.variables().iter().any(|v| v.name == id_variable) {
            return Err(Error::configuration(format!(
                "query `{}` declares no variable `${}`",
                query.name(),
                id_variable
            )));
        }
        if !produced.selection().covers(read.selection()) {
            return Err(Error::configuration(format!(
                "mutation `{}` does not select every field query `{}` reads",
                mutation.name(),
                query.name()
            )));
        }

        Ok(Self {
            mutation_name: mutation.name().to_string(),
            mutation_field: mutation_field.to_string(),
            query,
            query_field: query_field.to_string(),
            id_variable: id_variable.to_string(),
        })
    }

    /// Returns the query whose record this synchronizer writes.
    pub fn query(&self) -> &Operation {
        &self.query
    }

    /// Returns the cache key the query uses for `id`.
    pub fn key_for(&self, id: impl Into<String>) -> CacheKey {
        let mut variables = Map::new();
        variables.insert(self.id_variable.clone(), Value::String(id.into()));
        CacheKey::new(self.query.name(), &variables)
    }

    /// Stores the mutation's entity as the query's result for its id.
    ///
    /// # Errors
    ///
    /// Returns an invalid-response error if `mutation_data` lacks the
    /// entity object or its `id`.
    pub fn write(&self, cache: &Cache, mutation_data: &Value) -> Result<CacheKey> {
        let entity = mutation_data
            .get(&self.mutation_field)
            .filter(|v| v.is_object())
            .ok_or_else(|| {
                Error::invalid_response(format!(
                    "`{}` returned no `{}` object",
                    self.mutation_name, self.mutation_field
                ))
            })?;
        // Ids are ID scalars; loads pass them as strings.
        let id = match entity.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(Error::invalid_response(format!(
                    "`{}` result has no id",
                    self.mutation_name
                )));
            }
        };

        let key = self.key_for(id);
        let mut record = Map::new();
        record.insert(self.query_field.clone(), entity.clone());
        cache.put(&key, &Value::Object(record));

        tracing::debug!(mutation = %self.mutation_name, %key, "mutation result written to cache");
        Ok(key)
    }
}
