//! # typehint
//!
//! The type-expression model of a schema-to-Python code generator.
//!
//! A schema walker asks a [`TypeFactory`] for one [`TypeNode`] per schema
//! construct, composes nodes into larger ones (list of, optional of, union
//! of), renders the finished tree into a `typing` hint and reads off the
//! imports and unresolved model names the emitted module needs.
//!
//! ## Quick Start
//!
//! ```rust
//! use typehint::factory::{BuildArgs, Classification, PydanticTypeFactory, TypeFactory};
//! use typehint::imports::Imports;
//! use typehint::ir::TypeNode;
//! use typehint::version::PythonVersion;
//!
//! let factory = PydanticTypeFactory::new(PythonVersion::Py36);
//! let id = factory.build(Classification::Uuid, &BuildArgs::new()).unwrap();
//! let owner = factory.model_name("Owner", false);
//! let hint = TypeNode::optional_of(factory.union(vec![id, owner]));
//!
//! assert_eq!(hint.type_hint(), "Optional[Union[UUID, 'Owner']]");
//! assert_eq!(hint.unresolved_types().len(), 1);
//!
//! let imports: Imports = hint.imports().iter().collect();
//! assert_eq!(
//!     imports.dump(),
//!     "from typing import Optional, Union\nfrom uuid import UUID"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`ir`] - [`TypeNode`], its builder and post-order traversal
//! - [`factory`] - the [`TypeFactory`] trait, [`Classification`] and the
//!   pydantic / dataclass implementations
//! - [`imports`] - helper-symbol constants and the [`Imports`] collector
//! - [`reference`] - schema references and the [`ReferenceTable`]
//! - [`version`] - the [`PythonVersion`] rendering dialect
//! - [`config`] - `typehint.toml` loading
//! - [`error`] - error types
//!
//! [`Imports`]: imports::Imports
//! [`ReferenceTable`]: reference::ReferenceTable

pub mod config;
pub mod error;
pub mod factory;
pub mod imports;
pub mod ir;
pub mod reference;
pub mod version;

// Re-export main types for convenience
pub use config::{Config, ConfigManager, FactoryConfig, FactoryKind};
pub use error::{ConfigError, TypeError, TypeResult};
pub use factory::{
    BuildArgs, Classification, DataclassTypeFactory, PydanticTypeFactory, TypeFactory,
};
pub use ir::{TypeNode, TypeNodeBuilder};
pub use reference::{Reference, ReferenceResolver, ReferenceTable};
pub use version::PythonVersion;
