//! Operator schema documents and the availability registry

mod document;
mod registry;

pub use document::{ApplyKind, OperatorDocument, SchemaSlot, Tags};
pub use registry::Registry;
