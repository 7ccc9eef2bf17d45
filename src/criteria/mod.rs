//! Criteria trees
//!
//! The governance platform stores membership criteria as a tree of exactly three tiers: a
//! [`Level1`] root over [`Level2`] groups over [`Level3`] leaf predicates. The
//! [`CriteriaCompiler`] lowers an [`Expression`](crate::expr::Expression) into that shape and
//! [`render`] turns a tree back into expression text.
//!
//! Trees serialize to the platform's JSON wire format with serde.

mod comparison_operation;
mod compiler;
mod criteria_error;
mod criteria_tree;
mod renderer;

pub use comparison_operation::ComparisonOperation;
pub use compiler::{CriteriaCompiler, Variant, compile_dimension, compile_role};
pub use criteria_error::CriteriaError;
pub use criteria_tree::{CriteriaKey, KeyType, LeafValue, Level1, Level2, Level3, LogicalOperation, PROPERTY_PREFIX};
pub use renderer::render;
