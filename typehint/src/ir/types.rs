//! Type node definitions.
//!
//! A [`TypeNode`] is either a named leaf (`int`, `datetime`, a model
//! name) or a composite of child nodes, decorated with three orthogonal
//! wrapper flags: list, dict and optional. The set of imports a hint needs
//! and the model names it still depends on are folded bottom-up once, when
//! the node is built, and are read-only afterwards.
//!
//! # Rendering
//!
//! | Node | Python 3.7+ | Python 3.6 |
//! |------|-------------|------------|
//! | scalar `int` | `int` | `int` |
//! | reference `Pet` | `Pet` | `'Pet'` |
//! | children `A`, `B` | `Union[A, B]` | `Union[A, B]` |
//! | list of `int` | `List[int]` | `List[int]` |
//! | dict of `int` | `Dict[str, int]` | `Dict[str, int]` |
//! | optional list of `int` | `Optional[List[int]]` | `Optional[List[int]]` |
//! | call `Field` with `default=1` | `Field(default=1)` | `Field(default=1)` |

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::imports::{Import, IMPORT_DICT, IMPORT_LIST, IMPORT_OPTIONAL, IMPORT_UNION};
use crate::ir::traverse::AllNodes;
use crate::reference::Reference;
use crate::version::PythonVersion;

/// One type expression and its aggregated import/dependency metadata.
///
/// Nodes are built with [`TypeNodeBuilder`] (or one of the shortcut
/// constructors) and never change afterwards; each declaration owns its
/// own tree.
///
/// # Example
///
/// ```rust
/// use typehint::ir::TypeNode;
///
/// let pet = TypeNode::from_model_name("Pet", false);
/// let hint = TypeNode::builder()
///     .with_child(TypeNode::scalar("int"))
///     .with_child(pet)
///     .with_optional(true)
///     .build();
///
/// assert_eq!(hint.type_hint(), "Optional[Union[int, Pet]]");
/// assert!(hint.unresolved_types().contains("Pet"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    name: Option<String>,
    reference: Option<Reference>,
    children: Vec<TypeNode>,
    is_func: bool,
    kwargs: IndexMap<String, String>,
    version: PythonVersion,
    is_model_ref: bool,
    is_optional: bool,
    is_list: bool,
    is_dict: bool,

    // Folded at build time.
    unresolved_types: IndexSet<String>,
    imports: IndexSet<Import>,
}

impl TypeNode {
    /// Start building a node field by field.
    pub fn builder() -> TypeNodeBuilder {
        TypeNodeBuilder::new()
    }

    /// Create a leaf for a built-in scalar name such as `int` or `str`.
    pub fn scalar(name: impl Into<String>) -> Self {
        TypeNodeBuilder::new().with_name(name).build()
    }

    /// Create a leaf naming a generated model that has not been resolved
    /// against the reference table yet.
    pub fn from_model_name(model_name: impl Into<String>, is_list: bool) -> Self {
        TypeNodeBuilder::model_name(model_name)
            .with_list(is_list)
            .build()
    }

    /// Create a leaf for a resolved schema reference.
    pub fn from_reference(reference: &Reference, is_list: bool) -> Self {
        TypeNodeBuilder::reference(reference)
            .with_list(is_list)
            .build()
    }

    /// Combine several nodes into a union. A single node collapses to
    /// itself when rendered.
    pub fn union_of(children: impl IntoIterator<Item = TypeNode>) -> Self {
        let children: Vec<TypeNode> = children.into_iter().collect();
        let version = children.first().map(TypeNode::version).unwrap_or_default();
        TypeNodeBuilder::new()
            .with_children(children)
            .with_version(version)
            .build()
    }

    /// Wrap a node as `Optional[...]`.
    pub fn optional_of(inner: TypeNode) -> Self {
        TypeNodeBuilder::wrapping(inner).with_optional(true).build()
    }

    /// Wrap a node as `List[...]`.
    pub fn list_of(inner: TypeNode) -> Self {
        TypeNodeBuilder::wrapping(inner).with_list(true).build()
    }

    /// Wrap a node as `Dict[str, ...]`.
    pub fn dict_of(inner: TypeNode) -> Self {
        TypeNodeBuilder::wrapping(inner).with_dict(true).build()
    }

    /// The literal type name, if this is a named leaf.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The resolved reference, if any.
    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    /// Module defining the referenced declaration.
    pub fn module_name(&self) -> Option<&str> {
        self.reference.as_ref()?.module_name.as_deref()
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[TypeNode] {
        &self.children
    }

    /// Call arguments for constructor-call nodes, in insertion order.
    pub fn kwargs(&self) -> &IndexMap<String, String> {
        &self.kwargs
    }

    /// The dialect this node was built for.
    pub fn version(&self) -> PythonVersion {
        self.version
    }

    /// Whether this node renders as a call expression.
    pub fn is_func(&self) -> bool {
        self.is_func
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    pub fn is_dict(&self) -> bool {
        self.is_dict
    }

    /// Whether the name denotes a model declaration rather than a scalar.
    pub fn is_reference(&self) -> bool {
        self.reference.is_some() || self.is_model_ref
    }

    /// Model names in this subtree still needing resolution, in discovery
    /// order.
    pub fn unresolved_types(&self) -> &IndexSet<String> {
        &self.unresolved_types
    }

    /// Imports required by this subtree, deduplicated, first-seen order.
    pub fn imports(&self) -> &IndexSet<Import> {
        &self.imports
    }

    /// Iterate every node of the subtree, children first and this node
    /// last. Each call starts a fresh traversal.
    pub fn all_nodes(&self) -> AllNodes<'_> {
        AllNodes::new(self)
    }

    /// Render with the dialect the node was built for.
    pub fn type_hint(&self) -> String {
        self.render(self.version)
    }

    /// Render the type expression for the given dialect.
    ///
    /// Never fails: a node with no name, no children and no flags renders
    /// as the empty string.
    pub fn render(&self, version: PythonVersion) -> String {
        let mut hint = match self.named() {
            Some(name) if self.is_reference() && version.defers_references() => {
                format!("'{}'", name)
            }
            Some(name) => name.to_string(),
            None => {
                let mut hints: Vec<String> =
                    self.children.iter().map(|c| c.render(version)).collect();
                match hints.len() {
                    0 => String::new(),
                    1 => hints.remove(0),
                    _ => format!("Union[{}]", hints.join(", ")),
                }
            }
        };

        if self.is_list {
            hint = wrap("List", "", hint);
        }
        if self.is_dict {
            hint = wrap("Dict", "str, ", hint);
        }
        if self.is_optional {
            hint = wrap("Optional", "", hint);
        }

        if self.is_func {
            let args: Vec<String> = self
                .kwargs
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            return format!("{}({})", hint, args.join(", "));
        }
        hint
    }

    fn named(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_hint())
    }
}

/// Apply a generic wrapper, leaving the bare helper name when there is
/// nothing to wrap.
fn wrap(helper: &str, prefix: &str, inner: String) -> String {
    if inner.is_empty() {
        helper.to_string()
    } else {
        format!("{}[{}{}]", helper, prefix, inner)
    }
}

/// Builder for [`TypeNode`].
///
/// All aggregation happens in [`build`](TypeNodeBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct TypeNodeBuilder {
    name: Option<String>,
    reference: Option<Reference>,
    children: Vec<TypeNode>,
    is_func: bool,
    kwargs: IndexMap<String, String>,
    version: PythonVersion,
    is_model_ref: bool,
    is_optional: bool,
    is_list: bool,
    is_dict: bool,
    imports: Vec<Import>,
}

impl TypeNodeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a model name that still needs resolution.
    pub fn model_name(model_name: impl Into<String>) -> Self {
        Self {
            name: Some(model_name.into()),
            is_model_ref: true,
            ..Self::default()
        }
    }

    /// Start from a resolved reference.
    pub fn reference(reference: &Reference) -> Self {
        Self {
            name: Some(reference.name.clone()),
            reference: Some(reference.clone()),
            ..Self::default()
        }
    }

    /// Start a wrapper around a single existing node, inheriting its
    /// dialect.
    pub fn wrapping(inner: TypeNode) -> Self {
        let version = inner.version;
        Self::new().with_child(inner).with_version(version)
    }

    /// Set the literal type name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: TypeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes.
    pub fn with_children(mut self, children: impl IntoIterator<Item = TypeNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the dialect.
    pub fn with_version(mut self, version: PythonVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_optional(mut self, is_optional: bool) -> Self {
        self.is_optional = is_optional;
        self
    }

    pub fn with_list(mut self, is_list: bool) -> Self {
        self.is_list = is_list;
        self
    }

    pub fn with_dict(mut self, is_dict: bool) -> Self {
        self.is_dict = is_dict;
        self
    }

    /// Render as a call expression instead of a plain annotation.
    pub fn as_call(mut self) -> Self {
        self.is_func = true;
        self
    }

    /// Add a call argument, rendered verbatim as `key=value`.
    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// Require an extra import beyond the ones implied by the flags.
    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    /// Require several extra imports.
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Finish the node, folding in the children's imports and unresolved
    /// names.
    pub fn build(self) -> TypeNode {
        let mut unresolved_types = IndexSet::new();
        let is_reference = self.reference.is_some() || self.is_model_ref;
        if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
            if is_reference {
                unresolved_types.insert(name.to_string());
            }
        }

        let mut imports: IndexSet<Import> = self.imports.into_iter().collect();
        for (needed, import) in [
            (self.is_list, IMPORT_LIST),
            (self.is_dict, IMPORT_DICT),
            (self.is_optional, IMPORT_OPTIONAL),
            (self.children.len() > 1, IMPORT_UNION),
        ] {
            if needed {
                imports.insert(import);
            }
        }

        for child in &self.children {
            unresolved_types.extend(child.unresolved_types.iter().cloned());
            imports.extend(child.imports.iter().copied());
        }

        trace!(
            name = ?self.name,
            children = self.children.len(),
            imports = imports.len(),
            unresolved = unresolved_types.len(),
            "Built type node"
        );

        TypeNode {
            name: self.name,
            reference: self.reference,
            children: self.children,
            is_func: self.is_func,
            kwargs: self.kwargs,
            version: self.version,
            is_model_ref: self.is_model_ref,
            is_optional: self.is_optional,
            is_list: self.is_list,
            is_dict: self.is_dict,
            unresolved_types,
            imports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::{IMPORT_ANY, IMPORT_UUID};

    fn pet() -> Reference {
        Reference::new("#/components/schemas/Pet", "Pet").with_module("models.pet")
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    #[test]
    fn test_scalar_leaf() {
        let node = TypeNode::scalar("int");
        assert_eq!(node.type_hint(), "int");
        assert!(node.unresolved_types().is_empty());
        assert!(node.imports().is_empty());
        assert!(!node.is_reference());
    }

    #[test]
    fn test_model_name_is_unresolved() {
        let node = TypeNode::from_model_name("Pet", false);
        assert!(node.is_reference());
        assert!(node.reference().is_none());
        assert_eq!(node.unresolved_types().len(), 1);
        assert!(node.unresolved_types().contains("Pet"));
    }

    #[test]
    fn test_from_reference() {
        let node = TypeNode::from_reference(&pet(), true);
        assert_eq!(node.name(), Some("Pet"));
        assert_eq!(node.module_name(), Some("models.pet"));
        assert!(node.unresolved_types().contains("Pet"));
        assert_eq!(node.type_hint(), "List[Pet]");
        assert_eq!(node.imports().iter().copied().collect::<Vec<_>>(), vec![IMPORT_LIST]);
    }

    #[test]
    fn test_empty_name_counts_as_absent() {
        let node = TypeNodeBuilder::model_name("").with_list(true).build();
        assert!(node.unresolved_types().is_empty());
        assert_eq!(node.type_hint(), "List");
    }

    // =========================================================================
    // Wrappers
    // =========================================================================

    #[test]
    fn test_optional_wraps_list() {
        let node = TypeNode::builder()
            .with_name("int")
            .with_list(true)
            .with_optional(true)
            .build();
        assert_eq!(node.type_hint(), "Optional[List[int]]");
        assert_eq!(
            node.imports().iter().copied().collect::<Vec<_>>(),
            vec![IMPORT_LIST, IMPORT_OPTIONAL]
        );
    }

    #[test]
    fn test_list_of_optional_needs_child() {
        let node = TypeNode::list_of(TypeNode::optional_of(TypeNode::scalar("int")));
        assert_eq!(node.type_hint(), "List[Optional[int]]");
        assert_eq!(
            node.imports().iter().copied().collect::<Vec<_>>(),
            vec![IMPORT_LIST, IMPORT_OPTIONAL]
        );
    }

    #[test]
    fn test_dict_wrapper() {
        let node = TypeNode::dict_of(TypeNode::scalar("str"));
        assert_eq!(node.type_hint(), "Dict[str, str]");
    }

    #[test]
    fn test_all_wrappers_in_order() {
        let node = TypeNode::builder()
            .with_name("int")
            .with_dict(true)
            .with_list(true)
            .with_optional(true)
            .build();
        assert_eq!(node.type_hint(), "Optional[Dict[str, List[int]]]");
    }

    #[test]
    fn test_wrappers_around_empty_inner() {
        assert_eq!(TypeNode::builder().with_list(true).build().type_hint(), "List");
        assert_eq!(TypeNode::builder().with_dict(true).build().type_hint(), "Dict");
        assert_eq!(
            TypeNode::builder().with_optional(true).build().type_hint(),
            "Optional"
        );
    }

    // =========================================================================
    // Composites
    // =========================================================================

    #[test]
    fn test_empty_node_renders_empty() {
        assert_eq!(TypeNode::builder().build().type_hint(), "");
    }

    #[test]
    fn test_single_child_collapses() {
        let child = TypeNode::builder().with_name("int").with_list(true).build();
        let node = TypeNode::union_of([child.clone()]);
        assert_eq!(node.type_hint(), child.type_hint());
        assert!(!node.imports().contains(&IMPORT_UNION));
    }

    #[test]
    fn test_union_of_three() {
        let node = TypeNode::union_of([
            TypeNode::scalar("A"),
            TypeNode::scalar("B"),
            TypeNode::scalar("C"),
        ]);
        assert_eq!(node.type_hint(), "Union[A, B, C]");
        let unions = node.imports().iter().filter(|i| **i == IMPORT_UNION).count();
        assert_eq!(unions, 1);
    }

    #[test]
    fn test_nested_union_imports_deduplicated() {
        let inner = TypeNode::union_of([TypeNode::scalar("int"), TypeNode::scalar("str")]);
        let node = TypeNode::builder()
            .with_child(inner)
            .with_child(TypeNode::scalar("bool"))
            .with_optional(true)
            .build();
        assert_eq!(node.type_hint(), "Optional[Union[Union[int, str], bool]]");
        assert_eq!(
            node.imports().iter().copied().collect::<Vec<_>>(),
            vec![IMPORT_OPTIONAL, IMPORT_UNION]
        );
    }

    #[test]
    fn test_explicit_imports_come_first() {
        let node = TypeNode::builder()
            .with_name("UUID")
            .with_import(IMPORT_UUID)
            .with_list(true)
            .with_child(TypeNode::builder().with_name("Any").with_import(IMPORT_ANY).build())
            .build();
        assert_eq!(
            node.imports().iter().copied().collect::<Vec<_>>(),
            vec![IMPORT_UUID, IMPORT_LIST, IMPORT_ANY]
        );
    }

    #[test]
    fn test_unresolved_types_union_over_children() {
        let node = TypeNode::union_of([
            TypeNode::from_model_name("Pet", false),
            TypeNode::from_model_name("Owner", true),
            TypeNode::from_model_name("Pet", false),
        ]);
        assert_eq!(
            node.unresolved_types().iter().collect::<Vec<_>>(),
            vec!["Pet", "Owner"]
        );
    }

    // =========================================================================
    // Dialects
    // =========================================================================

    #[test]
    fn test_reference_quoted_for_36() {
        let node = TypeNode::optional_of(TypeNode::from_reference(&pet(), false));
        assert_eq!(node.render(PythonVersion::Py37), "Optional[Pet]");
        assert_eq!(node.render(PythonVersion::Py36), "Optional['Pet']");
    }

    #[test]
    fn test_scalar_never_quoted() {
        let node = TypeNode::scalar("int");
        assert_eq!(node.render(PythonVersion::Py36), "int");
    }

    #[test]
    fn test_type_hint_uses_own_version() {
        let node = TypeNodeBuilder::model_name("Pet")
            .with_version(PythonVersion::Py36)
            .build();
        assert_eq!(node.type_hint(), "'Pet'");
        assert_eq!(node.to_string(), "'Pet'");
    }

    #[test]
    fn test_wrapping_inherits_version() {
        let inner = TypeNodeBuilder::model_name("Pet")
            .with_version(PythonVersion::Py36)
            .build();
        let node = TypeNode::list_of(inner);
        assert_eq!(node.version(), PythonVersion::Py36);
        assert_eq!(node.type_hint(), "List['Pet']");
    }

    // =========================================================================
    // Calls
    // =========================================================================

    #[test]
    fn test_call_with_kwargs() {
        let node = TypeNode::builder()
            .with_name("Field")
            .as_call()
            .with_kwarg("default", "1")
            .build();
        assert_eq!(node.type_hint(), "Field(default=1)");
    }

    #[test]
    fn test_call_without_kwargs() {
        let node = TypeNode::builder().with_name("Field").as_call().build();
        assert_eq!(node.type_hint(), "Field()");
    }

    #[test]
    fn test_call_kwargs_keep_insertion_order() {
        let node = TypeNode::builder()
            .with_name("conint")
            .as_call()
            .with_kwarg("le", "10")
            .with_kwarg("ge", "0")
            .build();
        assert_eq!(node.type_hint(), "conint(le=10, ge=0)");
    }

    #[test]
    fn test_call_wraps_after_flags() {
        let node = TypeNode::builder()
            .with_name("x")
            .with_list(true)
            .with_optional(true)
            .as_call()
            .with_kwarg("k", "1")
            .build();
        assert_eq!(node.type_hint(), "Optional[List[x]](k=1)");
        assert_eq!(
            node.imports().iter().copied().collect::<Vec<_>>(),
            vec![IMPORT_LIST, IMPORT_OPTIONAL]
        );
    }

    #[test]
    fn test_call_without_callee() {
        let node = TypeNode::builder().as_call().build();
        assert_eq!(node.type_hint(), "()");
        assert_eq!(node.render(PythonVersion::Py36), "()");
        assert!(node.imports().is_empty());
        assert!(node.unresolved_types().is_empty());
    }
}
