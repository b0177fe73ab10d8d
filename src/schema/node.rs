//! Base schema node
//!
//! A [`SchemaNode`] is an order-preserving mapping from JSON Schema keys to
//! values. Every key present was explicitly set from a concrete value; the
//! "field was never set" case is carried as `Option::None` and never reaches
//! the mapping, while an explicit JSON `null` (`Some(Value::Null)`) is a real
//! value and does reach it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An in-memory JSON Schema fragment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaNode {
    map: Map<String, Value>,
}

impl SchemaNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self { map: Map::new() }
    }

    /// Create a node seeded with the shared metadata fields.
    ///
    /// `default` and `description` are written only when provided. Optimizer
    /// relevance is the default and is encoded by key *absence*:
    /// `forOptimizer` is written (as `false`) only when relevance is
    /// explicitly disabled, keeping emitted documents compact.
    pub fn with_meta(desc: Option<String>, default: Option<Value>, for_optimizer: bool) -> Self {
        let mut node = Self::new();
        node.set("default", default);
        node.set("description", desc.map(Value::String));
        if !for_optimizer {
            node.set("forOptimizer", Some(Value::Bool(false)));
        }
        node
    }

    /// Write `key` iff `value` is set; `None` is a no-op.
    pub fn set(&mut self, key: &str, value: Option<Value>) {
        if let Some(value) = value {
            self.map.insert(key.to_string(), value);
        }
    }

    /// Remove a key if present.
    pub fn unset(&mut self, key: &str) {
        self.map.remove(key);
    }

    /// Look up a key in the underlying mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Whether the node's `forOptimizer` flag has been disabled.
    pub fn is_for_optimizer(&self) -> bool {
        self.map.get("forOptimizer") != Some(&Value::Bool(false))
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    /// Consume the node, yielding its mapping.
    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    /// Consume the node, yielding a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

impl From<Map<String, Value>> for SchemaNode {
    fn from(map: Map<String, Value>) -> Self {
        Self { map }
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        node.into_value()
    }
}
