//! Operation documents built from immutable selection values.
//!
//! Operations are assembled from [`Field`]s, [`SelectionSet`]s and shared
//! [`Fragment`]s, then built once into an [`Operation`] that carries both the
//! operation text sent over the wire and the resolved selection the cache
//! reads through.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use serde_json::Value;

use crate::{Error, Result};

/// Field every nested object selection requests so results can be normalized.
pub const TYPENAME_FIELD: &str = "__typename";

// ============================================================================
// Operation Kind
// ============================================================================

/// Whether an operation reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// A read.
    Query,
    /// A write.
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
        }
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// A field argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Bound to an operation variable, `$name`.
    Variable(String),
    /// An inline literal.
    Literal(Value),
}

impl Argument {
    /// Binds the argument to the variable `name`.
    pub fn variable(name: impl Into<String>) -> Self {
        Argument::Variable(name.into())
    }

    /// Resolves the argument against a set of variables.
    ///
    /// Unbound variables resolve to `null`.
    pub fn resolve(&self, variables: &serde_json::Map<String, Value>) -> Value {
        match self {
            Argument::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
            Argument::Literal(value) => value.clone(),
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Literal(value)
    }
}

// ============================================================================
// Fields and Selection Sets
// ============================================================================

/// A selected field, with optional alias, arguments and sub-selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    alias: Option<String>,
    arguments: Vec<(String, Argument)>,
    selection: SelectionSet,
}

impl Field {
    /// Selects the field `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: Vec::new(),
            selection: SelectionSet::new(),
        }
    }

    /// Returns the result under `alias` instead of the field name.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds an argument.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Argument>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    /// Adds an argument bound to the variable of the same name.
    #[must_use]
    pub fn var(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let variable = Argument::variable(name.clone());
        self.arg(name, variable)
    }

    /// Replaces the sub-selection.
    #[must_use]
    pub fn select(mut self, selection: SelectionSet) -> Self {
        self.selection = selection;
        self
    }

    /// Returns the schema field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the key the field appears under in a response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns the arguments in declaration order.
    pub fn arguments(&self) -> &[(String, Argument)] {
        &self.arguments
    }

    /// Returns an argument by name.
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| value)
    }

    /// Returns the sub-selection; empty for scalar fields.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

/// One entry of a selection set.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A field.
    Field(Field),
    /// A spread of a named fragment, `...Name`.
    Spread(Arc<Fragment>),
}

/// An ordered selection of fields and fragment spreads.
///
/// ```rust
/// use jobboard::graphql::{Field, SelectionSet};
///
/// let company = SelectionSet::new().field("id").field("name");
/// let job = SelectionSet::new()
///     .field("id")
///     .field("title")
///     .field(Field::new("company").select(company));
/// assert_eq!(job.fields().count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    items: Vec<Selection>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.items.push(Selection::Field(field.into()));
        self
    }

    /// Appends a spread of `fragment`.
    #[must_use]
    pub fn spread(mut self, fragment: &Arc<Fragment>) -> Self {
        self.items.push(Selection::Spread(Arc::clone(fragment)));
        self
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the entries in order.
    pub fn items(&self) -> &[Selection] {
        &self.items
    }

    /// Iterates over the directly selected fields, skipping spreads.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.items.iter().filter_map(|item| match item {
            Selection::Field(field) => Some(field),
            Selection::Spread(_) => None,
        })
    }

    /// Returns the directly selected field with the given response key.
    pub fn get(&self, response_key: &str) -> Option<&Field> {
        self.fields().find(|f| f.response_key() == response_key)
    }

    /// Returns `true` if every field `other` selects is also selected here,
    /// with the same name and arguments, recursively.
    ///
    /// Both sets are expected to be resolved (no spreads).
    pub fn covers(&self, other: &SelectionSet) -> bool {
        other.fields().all(|theirs| match self.get(theirs.response_key()) {
            Some(ours) => {
                ours.name == theirs.name
                    && ours.arguments == theirs.arguments
                    && ours.selection.covers(&theirs.selection)
            }
            None => false,
        })
    }

    /// Expands spreads and merges fields sharing a response key.
    ///
    /// With `typename` set, `__typename` is added to every nested object
    /// selection that does not already request it.
    fn resolve(&self, typename: bool) -> Result<SelectionSet> {
        let mut merged: Vec<Field> = Vec::new();
        self.flatten_into(&mut merged)?;

        let mut items = Vec::with_capacity(merged.len() + 1);
        for mut field in merged {
            if !field.selection.is_empty() {
                let mut nested = field.selection.resolve(typename)?;
                if typename && nested.get(TYPENAME_FIELD).is_none() {
                    nested.items.push(Selection::Field(Field::new(TYPENAME_FIELD)));
                }
                field.selection = nested;
            }
            items.push(Selection::Field(field));
        }
        Ok(SelectionSet { items })
    }

    fn flatten_into(&self, out: &mut Vec<Field>) -> Result<()> {
        for item in &self.items {
            match item {
                Selection::Spread(fragment) => fragment.selection.flatten_into(out)?,
                Selection::Field(field) => {
                    match out.iter_mut().find(|f| f.response_key() == field.response_key()) {
                        Some(existing) => {
                            if existing.name != field.name || existing.arguments != field.arguments {
                                return Err(Error::configuration(format!(
                                    "conflicting selections for `{}`",
                                    field.response_key()
                                )));
                            }
                            existing
                                .selection
                                .items
                                .extend(field.selection.items.iter().cloned());
                        }
                        None => out.push(field.clone()),
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Fragments
// ============================================================================

/// A named, reusable selection shape bound to a type.
///
/// Fragments are shared by reference between operations. Spreading the same
/// fragment several times yields one definition in the operation text.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    name: String,
    type_condition: String,
    selection: SelectionSet,
}

impl Fragment {
    /// Creates a fragment `name` on `type_condition`.
    pub fn new(
        name: impl Into<String>,
        type_condition: impl Into<String>,
        selection: SelectionSet,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            type_condition: type_condition.into(),
            selection,
        })
    }

    /// Returns the fragment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type the fragment applies to.
    pub fn type_condition(&self) -> &str {
        &self.type_condition
    }

    /// Returns the fragment's selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }
}

// ============================================================================
// Operations
// ============================================================================

/// A declared operation variable, `$name: Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    /// Variable name without `$`.
    pub name: String,
    /// GraphQL type, e.g. `ID!`.
    pub type_name: String,
}

/// A named query or mutation, built once.
///
/// ```rust
/// use jobboard::graphql::{Field, Operation, SelectionSet};
///
/// let op = Operation::query("JobQuery")
///     .variable("id", "ID!")
///     .field(Field::new("job").var("id").select(SelectionSet::new().field("id")))
///     .build()
///     .unwrap();
///
/// assert!(op.text().starts_with("query JobQuery($id: ID!) {"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    name: String,
    variables: Vec<VariableDefinition>,
    resolved: SelectionSet,
    text: String,
}

impl Operation {
    /// Starts a query named `name`.
    pub fn query(name: impl Into<String>) -> OperationBuilder {
        OperationBuilder::new(OperationKind::Query, name.into())
    }

    /// Starts a mutation named `name`.
    pub fn mutation(name: impl Into<String>) -> OperationBuilder {
        OperationBuilder::new(OperationKind::Mutation, name.into())
    }

    /// Returns the operation kind.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Returns the operation name, also used as its cache identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared variables.
    pub fn variables(&self) -> &[VariableDefinition] {
        &self.variables
    }

    /// Returns the operation text sent as `query`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the selection with fragments expanded and `__typename` added
    /// to nested objects.
    pub fn resolved(&self) -> &SelectionSet {
        &self.resolved
    }

    /// Returns a root field of the resolved selection by response key.
    pub fn root_field(&self, response_key: &str) -> Option<&Field> {
        self.resolved.get(response_key)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// Builder for [`Operation`].
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    kind: OperationKind,
    name: String,
    variables: Vec<VariableDefinition>,
    selection: SelectionSet,
}

impl OperationBuilder {
    fn new(kind: OperationKind, name: String) -> Self {
        Self {
            kind,
            name,
            variables: Vec::new(),
            selection: SelectionSet::new(),
        }
    }

    /// Declares a variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.variables.push(VariableDefinition {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// Adds a root field.
    #[must_use]
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.selection = self.selection.field(field);
        self
    }

    /// Resolves the selection and renders the operation text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the name is empty, two different
    /// fragments share a name, a field is selected twice with different
    /// arguments, or an argument references an undeclared variable.
    pub fn build(self) -> Result<Operation> {
        if self.name.is_empty() {
            return Err(Error::configuration("operation name cannot be empty"));
        }
        if self.selection.is_empty() {
            return Err(Error::configuration(format!(
                "operation `{}` selects nothing",
                self.name
            )));
        }

        let mut fragments = Vec::new();
        collect_fragments(&self.selection, &mut fragments)?;

        let resolved = self.selection.resolve(true)?;
        check_variables(&resolved, &self.variables, &self.name)?;

        let mut text = String::new();
        let _ = write!(text, "{} {}", self.kind, self.name);
        if !self.variables.is_empty() {
            let defs = self
                .variables
                .iter()
                .map(|v| format!("${}: {}", v.name, v.type_name))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(text, "({})", defs);
        }
        text.push_str(" {\n");
        render_items(&self.selection, 1, false, &mut text);
        text.push('}');

        for fragment in &fragments {
            let _ = write!(
                text,
                "\n\nfragment {} on {} {{\n",
                fragment.name, fragment.type_condition
            );
            render_items(&fragment.selection, 1, true, &mut text);
            text.push('}');
        }

        Ok(Operation {
            kind: self.kind,
            name: self.name,
            variables: self.variables,
            resolved,
            text,
        })
    }
}

/// Collects every fragment reachable from `selection`, first use first.
fn collect_fragments(selection: &SelectionSet, out: &mut Vec<Arc<Fragment>>) -> Result<()> {
    for item in &selection.items {
        match item {
            Selection::Field(field) => collect_fragments(&field.selection, out)?,
            Selection::Spread(fragment) => {
                match out.iter().find(|f| f.name == fragment.name) {
                    Some(known) if **known == **fragment => {}
                    Some(_) => {
                        return Err(Error::configuration(format!(
                            "fragment `{}` is defined twice with different selections",
                            fragment.name
                        )));
                    }
                    None => {
                        out.push(Arc::clone(fragment));
                        collect_fragments(&fragment.selection, out)?;
                    }
                }
            }
        }
    }
    Ok(())
}

fn check_variables(
    selection: &SelectionSet,
    declared: &[VariableDefinition],
    operation: &str,
) -> Result<()> {
    for field in selection.fields() {
        for (_, argument) in field.arguments() {
            if let Argument::Variable(name) = argument {
                if !declared.iter().any(|v| &v.name == name) {
                    return Err(Error::configuration(format!(
                        "operation `{}` uses undeclared variable `${}`",
                        operation, name
                    )));
                }
            }
        }
        check_variables(field.selection(), declared, operation)?;
    }
    Ok(())
}

fn render_items(selection: &SelectionSet, depth: usize, object: bool, out: &mut String) {
    let indent = "  ".repeat(depth);
    for item in &selection.items {
        match item {
            Selection::Spread(fragment) => {
                let _ = writeln!(out, "{}...{}", indent, fragment.name);
            }
            Selection::Field(field) => {
                out.push_str(&indent);
                if let Some(alias) = &field.alias {
                    let _ = write!(out, "{}: ", alias);
                }
                out.push_str(&field.name);
                if !field.arguments.is_empty() {
                    let args = field
                        .arguments
                        .iter()
                        .map(|(name, value)| format!("{}: {}", name, render_argument(value)))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let _ = write!(out, "({})", args);
                }
                if field.selection.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(" {\n");
                    render_items(&field.selection, depth + 1, true, out);
                    let _ = writeln!(out, "{}}}", indent);
                }
            }
        }
    }
    if object && selection.get(TYPENAME_FIELD).is_none() {
        let _ = writeln!(out, "{}{}", indent, TYPENAME_FIELD);
    }
}

fn render_argument(argument: &Argument) -> String {
    match argument {
        Argument::Variable(name) => format!("${}", name),
        Argument::Literal(value) => render_literal(value),
    }
}

/// Renders a JSON value as a GraphQL input literal.
fn render_literal(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let items = items.iter().map(render_literal).collect::<Vec<_>>();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let sorted: BTreeMap<_, _> = map.iter().collect();
            let fields = sorted
                .into_iter()
                .map(|(k, v)| format!("{}: {}", k, render_literal(v)))
                .collect::<Vec<_>>();
            format!("{{{}}}", fields.join(", "))
        }
        // Strings, numbers, booleans and null share JSON's spelling.
        other => other.to_string(),
    }
}
