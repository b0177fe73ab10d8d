//! Combinator schema fragments
//!
//! Builders that compose child fragments: union (`anyOf`), intersection
//! (`allOf`), arrays, and structured objects. A combinator consumes its
//! children at construction time and keeps only their mappings; no child
//! object or back-reference survives, so plain value semantics hold
//! throughout.

use serde_json::{Map, Value};

use crate::schema::node::SchemaNode;

/// Union of alternatives: `{"anyOf": [...]}`.
///
/// Branch order is preserved for documentation purposes; validation-wise any
/// one match suffices. An empty union is legal.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyOf {
    node: SchemaNode,
    branches: Vec<Value>,
}

impl AnyOf {
    pub fn new() -> Self {
        Self {
            node: SchemaNode::new(),
            branches: Vec::new(),
        }
    }

    /// Append one alternative branch
    pub fn with_variant(mut self, child: impl Into<SchemaNode>) -> Self {
        self.branches.push(child.into().into_value());
        self
    }

    /// Attach a human-readable description
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.node.set("description", Some(Value::String(desc.into())));
        self
    }

    /// Set the default value; `Value::Null` is a legal explicit default
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.node.set("default", Some(default.into()));
        self
    }

    /// Mark this fragment irrelevant to hyperparameter search
    pub fn not_for_optimizer(mut self) -> Self {
        self.node.set("forOptimizer", Some(Value::Bool(false)));
        self
    }
}

impl Default for AnyOf {
    fn default() -> Self {
        Self::new()
    }
}

impl From<AnyOf> for SchemaNode {
    fn from(c: AnyOf) -> SchemaNode {
        let mut node = c.node;
        node.set("anyOf", Some(Value::Array(c.branches)));
        node
    }
}

/// Intersection of requirements: `{"allOf": [...]}`.
///
/// Intersections are always optimizer-relevant by construction, so no
/// suppression method is exposed.
#[derive(Debug, Clone, PartialEq)]
pub struct AllOf {
    node: SchemaNode,
    branches: Vec<Value>,
}

impl AllOf {
    pub fn new() -> Self {
        Self {
            node: SchemaNode::new(),
            branches: Vec::new(),
        }
    }

    /// Append one required branch
    pub fn with_branch(mut self, child: impl Into<SchemaNode>) -> Self {
        self.branches.push(child.into().into_value());
        self
    }

    /// Attach a human-readable description
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.node.set("description", Some(Value::String(desc.into())));
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.node.set("default", Some(default.into()));
        self
    }
}

impl Default for AllOf {
    fn default() -> Self {
        Self::new()
    }
}

impl From<AllOf> for SchemaNode {
    fn from(c: AllOf) -> SchemaNode {
        let mut node = c.node;
        node.set("allOf", Some(Value::Array(c.branches)));
        node
    }
}

/// Homogeneous sequence: `{"type": "array", "items": <child>}`.
///
/// Requires exactly one item schema, enforced by the constructor signature.
/// Size bounds come in validation and search ("ForOptimizer") flavors,
/// independently settable.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    node: SchemaNode,
}

impl Array {
    pub fn new(items: impl Into<SchemaNode>) -> Self {
        let mut node = SchemaNode::new();
        node.set("type", Some(Value::String("array".into())));
        node.set("items", Some(items.into().into_value()));
        Self { node }
    }

    /// Attach a human-readable description
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.node.set("description", Some(Value::String(desc.into())));
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.node.set("default", Some(default.into()));
        self
    }

    /// Mark this fragment irrelevant to hyperparameter search
    pub fn not_for_optimizer(mut self) -> Self {
        self.node.set("forOptimizer", Some(Value::Bool(false)));
        self
    }

    /// Minimum item count accepted by validation
    pub fn with_min_items(mut self, n: u64) -> Self {
        self.node.set("minItems", Some(n.into()));
        self
    }

    /// Minimum item count explored by the tuner
    pub fn with_min_items_for_optimizer(mut self, n: u64) -> Self {
        self.node.set("minItemsForOptimizer", Some(n.into()));
        self
    }

    /// Maximum item count accepted by validation
    pub fn with_max_items(mut self, n: u64) -> Self {
        self.node.set("maxItems", Some(n.into()));
        self
    }

    /// Maximum item count explored by the tuner
    pub fn with_max_items_for_optimizer(mut self, n: u64) -> Self {
        self.node.set("maxItemsForOptimizer", Some(n.into()));
        self
    }

    /// Free-form subtype tag for implementation-specific array kinds,
    /// e.g. `"tuple"`. Emitted as the `laleType` key.
    pub fn with_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.node.set("laleType", Some(Value::String(tag.into())));
        self
    }
}

impl From<Array> for SchemaNode {
    fn from(c: Array) -> SchemaNode {
        c.node
    }
}

/// Structured object: named properties, a `required` list, and an
/// `additionalProperties` flag. Property insertion order is preserved in the
/// emitted mapping for stable output, though it carries no semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    node: SchemaNode,
    properties: Map<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        let mut node = SchemaNode::new();
        node.set("type", Some(Value::String("object".into())));
        Self {
            node,
            properties: Map::new(),
        }
    }

    /// Attach a human-readable description
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.node.set("description", Some(Value::String(desc.into())));
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.node.set("default", Some(default.into()));
        self
    }

    /// Mark this fragment irrelevant to hyperparameter search
    pub fn not_for_optimizer(mut self) -> Self {
        self.node.set("forOptimizer", Some(Value::Bool(false)));
        self
    }

    /// Names of properties that must be present, in the given order
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<Value> = names.into_iter().map(|n| Value::String(n.into())).collect();
        self.node.set("required", Some(Value::Array(names)));
        self
    }

    /// Whether properties beyond the named ones are accepted
    pub fn with_additional_properties(mut self, allowed: bool) -> Self {
        self.node.set("additionalProperties", Some(Value::Bool(allowed)));
        self
    }

    /// Names of the properties an external tuner should search over.
    /// The customization engine keeps this list consistent as properties
    /// are replaced or removed.
    pub fn with_relevant_to_optimizer<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<Value> = names.into_iter().map(|n| Value::String(n.into())).collect();
        self.node.set("relevantToOptimizer", Some(Value::Array(names)));
        self
    }

    /// Add one named property schema
    pub fn with_prop(mut self, name: impl Into<String>, child: impl Into<SchemaNode>) -> Self {
        self.properties.insert(name.into(), child.into().into_value());
        self
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Object> for SchemaNode {
    fn from(c: Object) -> SchemaNode {
        let mut node = c.node;
        node.set("properties", Some(Value::Object(c.properties)));
        node
    }
}
