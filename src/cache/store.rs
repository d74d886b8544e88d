//! Normalized result cache.
//!
//! Operation results are split into entity records, keyed by
//! `__typename` and `id`, and per-operation records holding references to
//! them. Writing an entity under one operation is visible through every
//! other record that references it.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use serde_json::{Map, Value};

use super::key::{CacheKey, EntityKey};
use crate::graphql::{SelectionSet, TYPENAME_FIELD};

type Fields = BTreeMap<String, Node>;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(Value),
    Ref(EntityKey),
    List(Vec<Node>),
    Object(Fields),
}

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<CacheKey, Node>,
    entities: HashMap<EntityKey, Fields>,
}

/// Process-wide store of operation results.
///
/// All methods take `&self`; the lock is held only for the duration of each
/// call, never across an await. Concurrent writers of the same key race and
/// the last write wins.
///
/// ```rust
/// use jobboard::cache::{Cache, CacheKey};
/// use serde_json::{json, Map};
///
/// let cache = Cache::new();
/// let key = CacheKey::new("JobsQuery", &Map::new());
/// cache.put(&key, &json!({"jobs": [{"__typename": "Job", "id": "j1", "title": "Engineer"}]}));
///
/// assert_eq!(cache.get(&key).unwrap()["jobs"][0]["title"], "Engineer");
/// assert_eq!(cache.entity_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Cache {
    tables: RwLock<Tables>,
}

impl Cache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `graph` as the result for `key`.
    ///
    /// Identifiable objects are merged field-wise into their entity records;
    /// fields present in `graph` overwrite, others are kept.
    pub fn put(&self, key: &CacheKey, graph: &Value) {
        let mut tables = self.tables.write();
        let root = tables.normalize(graph);
        tables.records.insert(key.clone(), root);
    }

    /// Merges the identifiable objects of `graph` into the entity records
    /// without storing an operation record.
    ///
    /// Returns the key of `graph` itself when it is an entity.
    pub fn write_entity(&self, graph: &Value) -> Option<EntityKey> {
        let mut tables = self.tables.write();
        match tables.normalize(graph) {
            Node::Ref(key) => Some(key),
            _ => None,
        }
    }

    /// Returns the full stored result for `key`.
    ///
    /// An entity reached again below itself is cut to `__typename` and `id`.
    /// Returns `None` when nothing is stored or a referenced entity was
    /// evicted.
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        let tables = self.tables.read();
        let root = tables.records.get(key)?;
        tables.expand(root, &mut Vec::new())
    }

    /// Returns the stored result for `key` shaped exactly like `selection`.
    ///
    /// Returns `None` if any selected field is missing, so that partial data
    /// is never served. A stored object without `__typename` omits it.
    pub fn read(&self, key: &CacheKey, selection: &SelectionSet) -> Option<Value> {
        let tables = self.tables.read();
        let root = tables.records.get(key)?;
        tables.project(root, selection)
    }

    /// Returns `true` if a result is stored for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.tables.read().records.contains_key(key)
    }

    /// Removes the result stored for `key`. Entities stay.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.tables.write().records.remove(key).is_some()
    }

    /// Returns an entity with its references expanded.
    pub fn entity(&self, key: &EntityKey) -> Option<Value> {
        let tables = self.tables.read();
        let fields = tables.entities.get(key)?;
        let mut path = vec![key.clone()];
        tables.expand_fields(fields, &mut path)
    }

    /// Removes an entity. Records referencing it miss until rewritten.
    pub fn evict_entity(&self, key: &EntityKey) -> bool {
        self.tables.write().entities.remove(key).is_some()
    }

    /// Removes everything.
    pub fn clear(&self) {
        let mut tables = self.tables.write();
        tables.records.clear();
        tables.entities.clear();
    }

    /// Returns the number of stored operation results.
    pub fn len(&self) -> usize {
        self.tables.read().records.len()
    }

    /// Returns `true` if no operation result is stored.
    pub fn is_empty(&self) -> bool {
        self.tables.read().records.is_empty()
    }

    /// Returns the number of normalized entities.
    pub fn entity_count(&self) -> usize {
        self.tables.read().entities.len()
    }
}

impl Tables {
    fn normalize(&mut self, value: &Value) -> Node {
        match value {
            Value::Array(items) => Node::List(items.iter().map(|v| self.normalize(v)).collect()),
            Value::Object(map) => {
                let fields: Fields = map
                    .iter()
                    .map(|(k, v)| (k.clone(), self.normalize(v)))
                    .collect();
                match EntityKey::from_object(map) {
                    Some(key) => {
                        self.entities.entry(key.clone()).or_default().extend(fields);
                        Node::Ref(key)
                    }
                    None => Node::Object(fields),
                }
            }
            other => Node::Leaf(other.clone()),
        }
    }

    fn expand(&self, node: &Node, path: &mut Vec<EntityKey>) -> Option<Value> {
        match node {
            Node::Leaf(value) => Some(value.clone()),
            Node::List(items) => items
                .iter()
                .map(|item| self.expand(item, path))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            Node::Object(fields) => self.expand_fields(fields, path),
            Node::Ref(key) => {
                if path.contains(key) {
                    return Some(stub(key));
                }
                let fields = self.entities.get(key)?;
                path.push(key.clone());
                let value = self.expand_fields(fields, path);
                path.pop();
                value
            }
        }
    }

    fn expand_fields(&self, fields: &Fields, path: &mut Vec<EntityKey>) -> Option<Value> {
        let mut out = Map::new();
        for (name, node) in fields {
            out.insert(name.clone(), self.expand(node, path)?);
        }
        Some(Value::Object(out))
    }

    fn project(&self, node: &Node, selection: &SelectionSet) -> Option<Value> {
        match node {
            Node::Leaf(value) => Some(value.clone()),
            Node::List(items) => items
                .iter()
                .map(|item| self.project(item, selection))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            Node::Object(fields) => self.project_fields(fields, selection),
            Node::Ref(key) => {
                let fields = self.entities.get(key)?;
                self.project_fields(fields, selection)
            }
        }
    }

    fn project_fields(&self, fields: &Fields, selection: &SelectionSet) -> Option<Value> {
        // A scalar field holding a JSON object comes back whole.
        if selection.is_empty() {
            return self.expand_fields(fields, &mut Vec::new());
        }
        let mut out = Map::new();
        for field in selection.fields() {
            let key = field.response_key();
            match fields.get(key) {
                Some(node) => {
                    out.insert(key.to_string(), self.project(node, field.selection())?);
                }
                None if key == TYPENAME_FIELD => {}
                None => return None,
            }
        }
        Some(Value::Object(out))
    }
}

fn stub(key: &EntityKey) -> Value {
    let mut out = Map::new();
    out.insert(TYPENAME_FIELD.to_string(), Value::String(key.typename().to_string()));
    out.insert("id".to_string(), Value::String(key.id().to_string()));
    Value::Object(out)
}
