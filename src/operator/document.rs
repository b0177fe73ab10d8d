//! Combined operator schema documents
//!
//! An [`OperatorDocument`] bundles the four schemas describing one ML
//! operator (hyperparameters, fit input, apply input, apply output) with
//! operator-level metadata. Documents are immutable once built; every
//! revision goes through the customization engine and yields a new document.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::schema::SchemaNode;

/// Which application method the operator exposes; controls the serialized
/// names of the apply-side schema slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyKind {
    /// Estimator: `input_predict` / `output_predict`
    Predict,
    /// Transformer: `input_transform` / `output_transform`
    Transform,
}

/// The four top-level schema slots of an operator document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaSlot {
    Hyperparams,
    InputFit,
    InputApply,
    OutputApply,
}

/// Pipeline-role tags: where in a pipeline the operator may sit and what it
/// is (e.g. `op: ["estimator", "regressor"]`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tags {
    pub pre: Vec<String>,
    pub op: Vec<String>,
    pub post: Vec<String>,
}

impl Tags {
    /// Tags for an operator with only `op` roles
    pub fn op<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            op: roles.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// The full structured description of one operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorDocument {
    name: String,
    description: Option<String>,
    documentation_url: Option<String>,
    import_from: Option<String>,
    tags: Tags,
    kind: ApplyKind,
    hyperparams: Value,
    input_fit: Value,
    input_apply: Value,
    output_apply: Value,
}

impl OperatorDocument {
    /// Create a document for an estimator-kind operator with empty schema
    /// slots; fill the slots with the `with_*` builders.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            documentation_url: None,
            import_from: None,
            tags: Tags::default(),
            kind: ApplyKind::Predict,
            hyperparams: Value::Object(Map::new()),
            input_fit: Value::Object(Map::new()),
            input_apply: Value::Object(Map::new()),
            output_apply: Value::Object(Map::new()),
        }
    }

    /// Operator-level description
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Link to the wrapped library's documentation
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Import path of the wrapped estimator
    pub fn with_import_from(mut self, path: impl Into<String>) -> Self {
        self.import_from = Some(path.into());
        self
    }

    /// Pipeline-role tags
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Mark the operator as a transformer (apply slots serialize as
    /// `input_transform` / `output_transform`)
    pub fn as_transformer(mut self) -> Self {
        self.kind = ApplyKind::Transform;
        self
    }

    /// Set the hyperparameters schema slot
    pub fn with_hyperparams(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.hyperparams = schema.into().into_value();
        self
    }

    /// Set the fit-input schema slot
    pub fn with_input_fit(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.input_fit = schema.into().into_value();
        self
    }

    /// Set the predict/transform-input schema slot
    pub fn with_input_apply(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.input_apply = schema.into().into_value();
        self
    }

    /// Set the predict/transform-output schema slot
    pub fn with_output_apply(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.output_apply = schema.into().into_value();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ApplyKind {
        self.kind
    }

    /// Borrow one schema slot
    pub fn slot(&self, slot: SchemaSlot) -> &Value {
        match slot {
            SchemaSlot::Hyperparams => &self.hyperparams,
            SchemaSlot::InputFit => &self.input_fit,
            SchemaSlot::InputApply => &self.input_apply,
            SchemaSlot::OutputApply => &self.output_apply,
        }
    }

    /// Borrow one schema slot mutably (crate-internal; public revision goes
    /// through the customization engine)
    pub(crate) fn slot_mut(&mut self, slot: SchemaSlot) -> &mut Value {
        match slot {
            SchemaSlot::Hyperparams => &mut self.hyperparams,
            SchemaSlot::InputFit => &mut self.input_fit,
            SchemaSlot::InputApply => &mut self.input_apply,
            SchemaSlot::OutputApply => &mut self.output_apply,
        }
    }

    /// Borrow the hyperparameters schema
    pub fn hyperparams(&self) -> &Value {
        &self.hyperparams
    }

    /// Emit the combined draft-04 schema document consumed by the
    /// delegation wrapper and the hyperparameter search procedure.
    pub fn to_value(&self) -> Value {
        let (input_key, output_key) = self.apply_slot_keys();

        let mut doc = Map::new();
        doc.insert(
            "$schema".into(),
            json!("http://json-schema.org/draft-04/schema#"),
        );
        if let Some(desc) = &self.description {
            doc.insert("description".into(), json!(desc));
        }
        if let Some(url) = &self.documentation_url {
            doc.insert("documentation_url".into(), json!(url));
        }
        if let Some(path) = &self.import_from {
            doc.insert("import_from".into(), json!(path));
        }
        doc.insert("type".into(), json!("object"));
        doc.insert(
            "tags".into(),
            json!({"pre": self.tags.pre, "op": self.tags.op, "post": self.tags.post}),
        );

        let mut slots = Map::new();
        slots.insert("hyperparams".into(), self.hyperparams.clone());
        slots.insert("input_fit".into(), self.input_fit.clone());
        slots.insert(input_key.into(), self.input_apply.clone());
        slots.insert(output_key.into(), self.output_apply.clone());
        doc.insert("properties".into(), Value::Object(slots));

        Value::Object(doc)
    }

    fn apply_slot_keys(&self) -> (&'static str, &'static str) {
        match self.kind {
            ApplyKind::Predict => ("input_predict", "output_predict"),
            ApplyKind::Transform => ("input_transform", "output_transform"),
        }
    }
}
