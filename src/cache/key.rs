//! Cache record and entity identities.

use std::fmt;

use serde_json::{Map, Value};

use crate::graphql::TYPENAME_FIELD;

/// Identity of a cached operation result: operation name plus variables.
///
/// Variables are held in canonical form (object keys sorted at every depth),
/// so key equality is structural equality of the variable values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: String,
    variables: String,
}

impl CacheKey {
    /// Creates a key for `operation` run with `variables`.
    pub fn new(operation: impl Into<String>, variables: &Map<String, Value>) -> Self {
        let mut variables_json = String::new();
        write_canonical(&Value::Object(variables.clone()), &mut variables_json);
        Self {
            operation: operation.into(),
            variables: variables_json,
        }
    }

    /// Returns the operation name.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the canonical JSON of the variables.
    pub fn variables(&self) -> &str {
        &self.variables
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.operation, self.variables)
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(value, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}

/// Identity of a normalized entity, `Typename:id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    typename: String,
    id: String,
}

impl EntityKey {
    /// Creates an entity key.
    pub fn new(typename: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            typename: typename.into(),
            id: id.into(),
        }
    }

    /// Derives the key of a result object from its `__typename` and `id`.
    ///
    /// Returns `None` for objects lacking either; numeric ids are accepted.
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let typename = object.get(TYPENAME_FIELD)?.as_str()?;
        let id = match object.get("id")? {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return None,
        };
        Some(Self::new(typename, id))
    }

    /// Returns the type name.
    pub fn typename(&self) -> &str {
        &self.typename
    }

    /// Returns the id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.typename, self.id)
    }
}
