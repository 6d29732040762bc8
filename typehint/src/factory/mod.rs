//! Type factories.
//!
//! This module defines the [`TypeFactory`] trait and its implementations
//! for the supported output ecosystems.
//!
//! # Components
//!
//! - [`TypeFactory`] - Maps a [`Classification`] to a [`TypeNode`](crate::ir::TypeNode)
//! - [`PydanticTypeFactory`] - pydantic field types, including `con*` constrained types
//! - [`DataclassTypeFactory`] - standard-library types for plain dataclasses

pub mod dataclass;
pub mod pydantic;
pub mod traits;

pub use dataclass::DataclassTypeFactory;
pub use pydantic::PydanticTypeFactory;
pub use traits::{BuildArgs, Classification, Scalar, TypeFactory};
