//! Type factory trait definition.
//!
//! This module defines the `TypeFactory` trait that maps a schema-level
//! [`Classification`] to a freshly built [`TypeNode`]. Each implementation
//! targets one output ecosystem (pydantic models, plain dataclasses, ...)
//! and is fixed to one [`PythonVersion`] for its whole lifetime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::imports::{Import, IMPORT_ANY};
use crate::ir::{TypeNode, TypeNodeBuilder};
use crate::reference::Reference;
use crate::version::PythonVersion;

/// Trait for type factories.
///
/// Implement this trait to support a new target ecosystem. The scalar
/// table of an implementation is plain data; only [`build`] is required.
///
/// # Example
///
/// ```rust
/// use typehint::factory::{BuildArgs, Classification, PydanticTypeFactory, TypeFactory};
/// use typehint::version::PythonVersion;
///
/// let factory = PydanticTypeFactory::new(PythonVersion::Py37);
/// let node = factory
///     .build(Classification::Integer, &BuildArgs::new().with_list(true))
///     .unwrap();
/// assert_eq!(node.type_hint(), "List[int]");
/// ```
///
/// [`build`]: TypeFactory::build
pub trait TypeFactory: Send + Sync {
    /// Short name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// The dialect baked into every node this factory builds.
    fn version(&self) -> PythonVersion;

    /// Build the node for a classification.
    ///
    /// Returns [`TypeError::UnsupportedClassification`] when the target
    /// has no representation for it; never returns a partial node.
    fn build(&self, classification: Classification, args: &BuildArgs) -> TypeResult<TypeNode>;

    /// Build a leaf naming a generated model that is not resolved yet.
    fn model_name(&self, model_name: &str, is_list: bool) -> TypeNode {
        TypeNodeBuilder::model_name(model_name)
            .with_list(is_list)
            .with_version(self.version())
            .build()
    }

    /// Build a leaf for a resolved reference.
    fn reference(&self, reference: &Reference, is_list: bool) -> TypeNode {
        TypeNodeBuilder::reference(reference)
            .with_list(is_list)
            .with_version(self.version())
            .build()
    }

    /// Combine nodes into a union carrying this factory's dialect.
    fn union(&self, children: Vec<TypeNode>) -> TypeNode {
        TypeNodeBuilder::new()
            .with_children(children)
            .with_version(self.version())
            .build()
    }
}

/// Schema-level type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Integer,
    Int32,
    Int64,
    Number,
    Float,
    Double,
    Decimal,
    Time,
    String,
    Byte,
    Binary,
    Date,
    DateTime,
    Password,
    Email,
    Uuid,
    Uuid1,
    Uuid2,
    Uuid3,
    Uuid4,
    Uuid5,
    Uri,
    Hostname,
    Ipv4,
    Ipv6,
    Boolean,
    Object,
    Null,
    Array,
    Any,
}

impl Classification {
    /// Every classification, in declaration order.
    pub const ALL: [Classification; 30] = [
        Classification::Integer,
        Classification::Int32,
        Classification::Int64,
        Classification::Number,
        Classification::Float,
        Classification::Double,
        Classification::Decimal,
        Classification::Time,
        Classification::String,
        Classification::Byte,
        Classification::Binary,
        Classification::Date,
        Classification::DateTime,
        Classification::Password,
        Classification::Email,
        Classification::Uuid,
        Classification::Uuid1,
        Classification::Uuid2,
        Classification::Uuid3,
        Classification::Uuid4,
        Classification::Uuid5,
        Classification::Uri,
        Classification::Hostname,
        Classification::Ipv4,
        Classification::Ipv6,
        Classification::Boolean,
        Classification::Object,
        Classification::Null,
        Classification::Array,
        Classification::Any,
    ];

    /// Get the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Integer => "integer",
            Classification::Int32 => "int32",
            Classification::Int64 => "int64",
            Classification::Number => "number",
            Classification::Float => "float",
            Classification::Double => "double",
            Classification::Decimal => "decimal",
            Classification::Time => "time",
            Classification::String => "string",
            Classification::Byte => "byte",
            Classification::Binary => "binary",
            Classification::Date => "date",
            Classification::DateTime => "date_time",
            Classification::Password => "password",
            Classification::Email => "email",
            Classification::Uuid => "uuid",
            Classification::Uuid1 => "uuid1",
            Classification::Uuid2 => "uuid2",
            Classification::Uuid3 => "uuid3",
            Classification::Uuid4 => "uuid4",
            Classification::Uuid5 => "uuid5",
            Classification::Uri => "uri",
            Classification::Hostname => "hostname",
            Classification::Ipv4 => "ipv4",
            Classification::Ipv6 => "ipv6",
            Classification::Boolean => "boolean",
            Classification::Object => "object",
            Classification::Null => "null",
            Classification::Array => "array",
            Classification::Any => "any",
        }
    }

    /// Check if this is an integer classification.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Classification::Integer | Classification::Int32 | Classification::Int64
        )
    }

    /// Check if this is a floating point classification.
    pub fn is_float(&self) -> bool {
        matches!(
            self,
            Classification::Number | Classification::Float | Classification::Double
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| TypeError::InvalidClassification(s.to_string()))
    }
}

/// Construction arguments passed to [`TypeFactory::build`].
///
/// Numeric bounds are kept as literal source text (`"0"`, `"1.5"`) and
/// are emitted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildArgs {
    pub gt: Option<String>,
    pub ge: Option<String>,
    pub lt: Option<String>,
    pub le: Option<String>,
    pub multiple_of: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub regex: Option<String>,

    /// Wrap the result as `List[...]`.
    pub is_list: bool,
    /// Wrap the result as `Optional[...]`.
    pub is_optional: bool,
}

impl BuildArgs {
    /// Create empty arguments.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gt(mut self, value: impl Into<String>) -> Self {
        self.gt = Some(value.into());
        self
    }

    pub fn with_ge(mut self, value: impl Into<String>) -> Self {
        self.ge = Some(value.into());
        self
    }

    pub fn with_lt(mut self, value: impl Into<String>) -> Self {
        self.lt = Some(value.into());
        self
    }

    pub fn with_le(mut self, value: impl Into<String>) -> Self {
        self.le = Some(value.into());
        self
    }

    pub fn with_multiple_of(mut self, value: impl Into<String>) -> Self {
        self.multiple_of = Some(value.into());
        self
    }

    pub fn with_min_length(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    pub fn with_max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    pub fn with_list(mut self, is_list: bool) -> Self {
        self.is_list = is_list;
        self
    }

    pub fn with_optional(mut self, is_optional: bool) -> Self {
        self.is_optional = is_optional;
        self
    }

    /// Numeric constraints as call arguments, in `gt, ge, lt, le,
    /// multiple_of` order.
    pub fn numeric_kwargs(&self) -> Vec<(&'static str, String)> {
        [
            ("gt", &self.gt),
            ("ge", &self.ge),
            ("lt", &self.lt),
            ("le", &self.le),
            ("multiple_of", &self.multiple_of),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }

    /// String constraints as call arguments, in `min_length, max_length,
    /// regex` order. The pattern is emitted as a Python string literal.
    pub fn string_kwargs(&self) -> Vec<(&'static str, String)> {
        let mut kwargs = Vec::new();
        if let Some(min) = self.min_length {
            kwargs.push(("min_length", min.to_string()));
        }
        if let Some(max) = self.max_length {
            kwargs.push(("max_length", max.to_string()));
        }
        if let Some(pattern) = &self.regex {
            kwargs.push(("regex", pattern_literal(pattern)));
        }
        kwargs
    }

    /// Check if any constraint is set.
    pub fn has_constraints(&self) -> bool {
        !self.numeric_kwargs().is_empty() || !self.string_kwargs().is_empty()
    }
}

/// A scalar table entry: the rendered name plus the imports it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    pub name: &'static str,
    pub imports: &'static [Import],
}

impl Scalar {
    pub const fn new(name: &'static str, imports: &'static [Import]) -> Self {
        Self { name, imports }
    }

    /// Build the leaf node for this entry.
    pub fn node(&self, version: PythonVersion) -> TypeNode {
        TypeNodeBuilder::new()
            .with_name(self.name)
            .with_imports(self.imports.iter().copied())
            .with_version(version)
            .build()
    }
}

/// `Any`, shared by every ecosystem.
pub const ANY: Scalar = Scalar::new("Any", &[IMPORT_ANY]);

/// Build a constructor-call node such as `conint(ge=0)`.
pub(crate) fn call_node(
    callee: &'static str,
    import: Import,
    kwargs: Vec<(&'static str, String)>,
    version: PythonVersion,
) -> TypeNode {
    kwargs
        .into_iter()
        .fold(TypeNodeBuilder::new(), |builder, (key, value)| {
            builder.with_kwarg(key, value)
        })
        .with_name(callee)
        .as_call()
        .with_import(import)
        .with_version(version)
        .build()
}

/// Wrap a built node according to the list/optional arguments.
pub(crate) fn apply_wrappers(node: TypeNode, args: &BuildArgs) -> TypeNode {
    if !args.is_list && !args.is_optional {
        return node;
    }
    TypeNodeBuilder::wrapping(node)
        .with_list(args.is_list)
        .with_optional(args.is_optional)
        .build()
}

/// Format a pattern as a Python string literal.
///
/// Raw strings are used whenever Python can represent the pattern as one:
/// the delimiter must not occur inside and there must be no dangling
/// trailing backslash. Anything else becomes an escaped plain literal.
pub(crate) fn pattern_literal(pattern: &str) -> String {
    let trailing = pattern.chars().rev().take_while(|c| *c == '\\').count();
    let raw_safe = trailing % 2 == 0 && !pattern.contains(['\n', '\r']);
    if raw_safe && !pattern.contains('\'') {
        return format!("r'{}'", pattern);
    }
    if raw_safe && !pattern.contains('"') {
        return format!("r\"{}\"", pattern);
    }

    let mut literal = String::with_capacity(pattern.len() + 2);
    literal.push('\'');
    for c in pattern.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            other => literal.push(other),
        }
    }
    literal.push('\'');
    literal
}

/// Convenience for implementations declining a classification.
pub(crate) fn unsupported<T>(
    factory: &dyn TypeFactory,
    classification: Classification,
) -> TypeResult<T> {
    Err(TypeError::unsupported(
        classification,
        factory.name(),
        factory.version(),
    ))
}
