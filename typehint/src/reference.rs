//! Schema reference handles and the table that resolves them.
//!
//! A [`Reference`] is what the enclosing generator hands to
//! [`TypeNode::from_reference`](crate::ir::TypeNode::from_reference): the
//! display name of a generated model plus the module defining it.
//! [`ReferenceTable`] is a simple in-memory resolver keyed by the schema
//! path (e.g. `#/components/schemas/Pet`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TypeError, TypeResult};
use crate::ir::TypeNode;

/// A resolved reference to a named schema declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Schema path this reference was resolved from.
    pub path: String,

    /// Display name of the generated declaration.
    pub name: String,

    /// Module the declaration is emitted into, if not the current one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
}

impl Reference {
    /// Create a reference to a declaration in the current module.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            module_name: None,
        }
    }

    /// Set the defining module.
    pub fn with_module(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = Some(module_name.into());
        self
    }
}

/// Resolves schema paths to references.
pub trait ReferenceResolver {
    /// Look up the reference registered for a schema path.
    fn resolve(&self, path: &str) -> Option<&Reference>;

    /// Check whether any registered reference carries this display name.
    fn has_name(&self, name: &str) -> bool;
}

/// An insertion-ordered reference table.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    references: IndexMap<String, Reference>,
}

impl ReferenceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reference under its path, replacing any previous entry.
    pub fn add(&mut self, reference: Reference) -> Option<Reference> {
        self.references.insert(reference.path.clone(), reference)
    }

    /// Get a reference by path.
    pub fn get(&self, path: &str) -> Option<&Reference> {
        self.references.get(path)
    }

    /// Number of registered references.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Iterate references in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.references.values()
    }

    /// List the node's unresolved type names that no registered reference
    /// provides, in discovery order.
    pub fn unresolved<'a>(&self, node: &'a TypeNode) -> Vec<&'a str> {
        node.unresolved_types()
            .iter()
            .map(String::as_str)
            .filter(|name| !self.has_name(name))
            .collect()
    }

    /// Fail if any of the node's named types is still unresolved.
    pub fn check_resolved(&self, node: &TypeNode) -> TypeResult<()> {
        let missing = self.unresolved(node);
        if missing.is_empty() {
            return Ok(());
        }
        debug!(missing = ?missing, "Type hint references unknown declarations");
        Err(TypeError::UnresolvedReference {
            names: missing.into_iter().map(str::to_string).collect(),
        })
    }
}

impl ReferenceResolver for ReferenceTable {
    fn resolve(&self, path: &str) -> Option<&Reference> {
        self.get(path)
    }

    fn has_name(&self, name: &str) -> bool {
        self.references.values().any(|reference| reference.name == name)
    }
}

impl FromIterator<Reference> for ReferenceTable {
    fn from_iter<T: IntoIterator<Item = Reference>>(iter: T) -> Self {
        let mut table = ReferenceTable::new();
        for reference in iter {
            table.add(reference);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet() -> Reference {
        Reference::new("#/components/schemas/Pet", "Pet").with_module("models")
    }

    #[test]
    fn test_reference_builder() {
        let reference = pet();
        assert_eq!(reference.name, "Pet");
        assert_eq!(reference.module_name.as_deref(), Some("models"));
    }

    #[test]
    fn test_table_resolves_by_path() {
        let table: ReferenceTable = [pet()].into_iter().collect();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.resolve("#/components/schemas/Pet").map(|r| r.name.as_str()),
            Some("Pet")
        );
        assert!(table.resolve("#/components/schemas/Owner").is_none());
    }

    #[test]
    fn test_add_replaces() {
        let mut table = ReferenceTable::new();
        assert!(table.add(pet()).is_none());
        let previous = table.add(Reference::new("#/components/schemas/Pet", "Animal"));
        assert_eq!(previous.map(|r| r.name), Some("Pet".to_string()));
        assert!(table.has_name("Animal"));
        assert!(!table.has_name("Pet"));
    }

    #[test]
    fn test_check_resolved() {
        let table: ReferenceTable = [pet()].into_iter().collect();
        let node = TypeNode::builder()
            .with_child(TypeNode::from_reference(&pet(), false))
            .with_child(TypeNode::from_model_name("Owner", false))
            .build();

        assert_eq!(table.unresolved(&node), vec!["Owner"]);
        match table.check_resolved(&node) {
            Err(TypeError::UnresolvedReference { names }) => assert_eq!(names, vec!["Owner"]),
            other => panic!("expected unresolved reference, got {:?}", other),
        }

        let resolved = TypeNode::from_reference(&pet(), true);
        assert!(table.check_resolved(&resolved).is_ok());
    }
}
