//! Property-based tests for the type model.
//!
//! Covers determinism, monotone aggregation of imports and unresolved
//! names, union/collapse rendering and post-order traversal.
