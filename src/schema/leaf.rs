//! Leaf schema fragments
//!
//! Builders for schema fragments with no nested schema children: boolean,
//! integer, number, string, enumeration, null, negation, and a verbatim
//! JSON passthrough. Numeric leaves carry two independent families of
//! bounds: validation bounds (`minimum`, `maximum`, ...) and search bounds
//! (`minimumForOptimizer`, ...) consumed by an external tuner. Either family
//! may be set, set differently, or omitted, independently of the other.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::schema::node::SchemaNode;

/// Sampling distribution hint for an external hyperparameter tuner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    /// Sample uniformly over the search range
    Uniform,
    /// Sample log-uniformly over the search range
    LogUniform,
}

impl Distribution {
    fn tag(self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::LogUniform => "loguniform",
        }
    }
}

/// Shared metadata builders and the `SchemaNode` conversion.
macro_rules! impl_meta {
    ($ty:ident) => {
        impl $ty {
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

        impl From<$ty> for SchemaNode {
            fn from(leaf: $ty) -> SchemaNode {
                leaf.node
            }
        }
    };
}

/// Numeric bound builders shared by [`Int`] and [`Float`].
macro_rules! impl_bounds {
    ($ty:ident, $num:ty) => {
        impl $ty {
            /// Inclusive lower validation bound
            pub fn with_minimum(mut self, v: $num) -> Self {
                self.node.set("minimum", Some(v.into()));
                self
            }

            /// Make the lower validation bound exclusive
            pub fn with_exclusive_minimum(mut self, exclusive: bool) -> Self {
                self.node.set("exclusiveMinimum", Some(Value::Bool(exclusive)));
                self
            }

            /// Lower bound of the tuner's search range
            pub fn with_minimum_for_optimizer(mut self, v: $num) -> Self {
                self.node.set("minimumForOptimizer", Some(v.into()));
                self
            }

            /// Make the search-range lower bound exclusive
            pub fn with_exclusive_minimum_for_optimizer(mut self, exclusive: bool) -> Self {
                self.node
                    .set("exclusiveMinimumForOptimizer", Some(Value::Bool(exclusive)));
                self
            }

            /// Inclusive upper validation bound
            pub fn with_maximum(mut self, v: $num) -> Self {
                self.node.set("maximum", Some(v.into()));
                self
            }

            /// Make the upper validation bound exclusive
            pub fn with_exclusive_maximum(mut self, exclusive: bool) -> Self {
                self.node.set("exclusiveMaximum", Some(Value::Bool(exclusive)));
                self
            }

            /// Upper bound of the tuner's search range
            pub fn with_maximum_for_optimizer(mut self, v: $num) -> Self {
                self.node.set("maximumForOptimizer", Some(v.into()));
                self
            }

            /// Make the search-range upper bound exclusive
            pub fn with_exclusive_maximum_for_optimizer(mut self, exclusive: bool) -> Self {
                self.node
                    .set("exclusiveMaximumForOptimizer", Some(Value::Bool(exclusive)));
                self
            }

            /// Sampling distribution over the search range
            pub fn with_distribution(mut self, d: Distribution) -> Self {
                self.node.set("distribution", Some(Value::String(d.tag().into())));
                self
            }
        }
    };
}

/// Boolean parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Bool {
    node: SchemaNode,
}

impl Bool {
    pub fn new() -> Self {
        let mut node = SchemaNode::new();
        node.set("type", Some(Value::String("boolean".into())));
        Self { node }
    }
}

impl_meta!(Bool);

impl Default for Bool {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Int {
    node: SchemaNode,
}

impl Int {
    pub fn new() -> Self {
        let mut node = SchemaNode::new();
        node.set("type", Some(Value::String("integer".into())));
        Self { node }
    }

    /// Tag the upper bound as derived from the fitted data rather than a
    /// constant, e.g. `"X/maxItems"`. Emitted as the `laleMaximum` key.
    pub fn with_data_maximum(mut self, pointer: impl Into<String>) -> Self {
        self.node.set("laleMaximum", Some(Value::String(pointer.into())));
        self
    }
}

impl_meta!(Int);
impl_bounds!(Int, i64);

impl Default for Int {
    fn default() -> Self {
        Self::new()
    }
}

/// Floating-point parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Float {
    node: SchemaNode,
}

impl Float {
    pub fn new() -> Self {
        let mut node = SchemaNode::new();
        node.set("type", Some(Value::String("number".into())));
        Self { node }
    }
}

impl_meta!(Float);
impl_bounds!(Float, f64);

impl Default for Float {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-form string parameter.
///
/// Strings are not searchable, so a fresh `Str` is marked
/// `forOptimizer: false`; call [`Str::for_optimizer`] to opt back in.
#[derive(Debug, Clone, PartialEq)]
pub struct Str {
    node: SchemaNode,
}

impl Str {
    pub fn new() -> Self {
        let mut node = SchemaNode::new();
        node.set("type", Some(Value::String("string".into())));
        node.set("forOptimizer", Some(Value::Bool(false)));
        Self { node }
    }

    /// Re-enable optimizer relevance (drops the suppression key entirely,
    /// since relevance is encoded by key absence)
    pub fn for_optimizer(mut self) -> Self {
        self.node.unset("forOptimizer");
        self
    }
}

impl_meta!(Str);

impl Default for Str {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of literal values, in input order.
///
/// An empty enumeration is legal and describes "no legal values"; it is a
/// building block for combinators, not something end users instantiate.
#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    node: SchemaNode,
}

impl Enum {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut node = SchemaNode::new();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        node.set("enum", Some(Value::Array(values)));
        Self { node }
    }

    /// The empty enumeration
    pub fn empty() -> Self {
        Self::new(Vec::<Value>::new())
    }
}

impl_meta!(Enum);

impl Default for Enum {
    fn default() -> Self {
        Self::empty()
    }
}

/// A parameter fixed to JSON `null`, i.e. `{"enum": [null]}`.
///
/// Represents "parameter set to none"; it carries no default of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Null {
    node: SchemaNode,
}

impl Null {
    pub fn new() -> Self {
        let mut node = SchemaNode::new();
        node.set("enum", Some(Value::Array(vec![Value::Null])));
        Self { node }
    }

    /// Attach a human-readable description
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.node.set("description", Some(Value::String(desc.into())));
        self
    }

    /// Mark this fragment irrelevant to hyperparameter search
    pub fn not_for_optimizer(mut self) -> Self {
        self.node.set("forOptimizer", Some(Value::Bool(false)));
        self
    }
}

impl From<Null> for SchemaNode {
    fn from(leaf: Null) -> SchemaNode {
        leaf.node
    }
}

impl Default for Null {
    fn default() -> Self {
        Self::new()
    }
}

/// Logical negation of a child fragment: `{"not": <child>}`.
///
/// Negations carry no description or default.
#[derive(Debug, Clone, PartialEq)]
pub struct Not {
    node: SchemaNode,
}

impl Not {
    pub fn new(body: impl Into<SchemaNode>) -> Self {
        let mut node = SchemaNode::new();
        node.set("not", Some(body.into().into_value()));
        Self { node }
    }
}

impl From<Not> for SchemaNode {
    fn from(leaf: Not) -> SchemaNode {
        leaf.node
    }
}

/// Verbatim passthrough of a pre-built mapping.
///
/// The escape hatch for fragments the DSL cannot otherwise express; the
/// mapping is used as-is, bypassing all field-specific construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Json {
    node: SchemaNode,
}

impl Json {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self { node: map.into() }
    }

    /// Build from a JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(SchemaError::InvalidFragment(format!(
                "verbatim schema fragment must be an object, got {other}"
            ))),
        }
    }
}

impl From<Json> for SchemaNode {
    fn from(leaf: Json) -> SchemaNode {
        leaf.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool_minimal() {
        let node: SchemaNode = Bool::new().into();
        assert_eq!(node.into_value(), json!({"type": "boolean"}));
    }

    #[test]
    fn test_int_bounds_and_distribution() {
        let node: SchemaNode = Int::new()
            .with_minimum_for_optimizer(10)
            .with_maximum_for_optimizer(100)
            .with_distribution(Distribution::Uniform)
            .with_default(100)
            .into();
        assert_eq!(
            node.into_value(),
            json!({
                "type": "integer",
                "minimumForOptimizer": 10,
                "maximumForOptimizer": 100,
                "distribution": "uniform",
                "default": 100,
            })
        );
    }

    #[test]
    fn test_validation_and_search_bounds_independent() {
        let node: SchemaNode = Float::new()
            .with_minimum(0.0)
            .with_maximum_for_optimizer(0.1)
            .into();
        assert_eq!(node.get("minimum"), Some(&json!(0.0)));
        assert_eq!(node.get("maximumForOptimizer"), Some(&json!(0.1)));
        assert!(node.get("maximum").is_none(), "unset bounds stay unset");
        assert!(node.get("minimumForOptimizer").is_none());
    }

    #[test]
    fn test_str_suppressed_by_default() {
        let node: SchemaNode = Str::new().into();
        assert_eq!(node.get("forOptimizer"), Some(&json!(false)));

        let node: SchemaNode = Str::new().for_optimizer().into();
        assert!(node.get("forOptimizer").is_none());
    }

    #[test]
    fn test_enum_preserves_order_and_allows_empty() {
        let node: SchemaNode = Enum::new(["ls", "lad", "huber", "quantile"]).into();
        assert_eq!(
            node.into_value(),
            json!({"enum": ["ls", "lad", "huber", "quantile"]})
        );

        let node: SchemaNode = Enum::empty().into();
        assert_eq!(node.into_value(), json!({"enum": []}));
    }

    #[test]
    fn test_null_is_enum_of_null() {
        let node: SchemaNode = Null::new().into();
        assert_eq!(node.into_value(), json!({"enum": [null]}));

        let node: SchemaNode = Null::new().with_desc("fixed to none").into();
        assert_eq!(node.get("enum"), Some(&json!([null])));
        assert_eq!(node.get("description"), Some(&json!("fixed to none")));
    }

    #[test]
    fn test_not_wraps_child_mapping() {
        let node: SchemaNode = Not::new(Enum::new(["auto"])).into();
        assert_eq!(node.into_value(), json!({"not": {"enum": ["auto"]}}));
    }

    #[test]
    fn test_json_passthrough_verbatim() {
        let raw = json!({"laleType": "callable", "description": "a callback"});
        let node: SchemaNode = Json::from_value(raw.clone()).unwrap().into();
        assert_eq!(node.into_value(), raw);
    }

    #[test]
    fn test_json_rejects_non_object() {
        let err = Json::from_value(json!([1, 2, 3]));
        assert!(err.is_err(), "non-object passthrough must be rejected");
    }

    #[test]
    fn test_explicit_null_default() {
        let node: SchemaNode = Int::new().with_default(Value::Null).into();
        assert_eq!(node.get("default"), Some(&Value::Null));
    }

    #[test]
    fn test_data_derived_maximum_tag() {
        let node: SchemaNode = Int::new().with_minimum(1).with_data_maximum("X/maxItems").into();
        assert_eq!(node.get("laleMaximum"), Some(&json!("X/maxItems")));
    }
}
