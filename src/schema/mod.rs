//! Schema construction DSL
//!
//! Builds JSON-Schema-like (draft-04 dialect) fragments describing operator
//! hyperparameters:
//! - [`node`] - the base mapping every fragment is built on
//! - [`leaf`] - fragments with no schema children (Bool, Int, Float, ...)
//! - [`combinator`] - fragments composed from children (AnyOf, Object, ...)

mod combinator;
mod leaf;
mod node;

pub use combinator::{AllOf, AnyOf, Array, Object};
pub use leaf::{Bool, Distribution, Enum, Float, Int, Json, Not, Null, Str};
pub use node::SchemaNode;
