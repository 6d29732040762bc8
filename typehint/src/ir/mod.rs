//! Type expression model.
//!
//! This module defines [`TypeNode`], the schema-agnostic tree that
//! represents the type of one generated field or declaration, together
//! with its builder and traversal.

mod proptest;
pub mod traverse;
pub mod types;

pub use traverse::AllNodes;
pub use types::{TypeNode, TypeNodeBuilder};
