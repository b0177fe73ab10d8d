//! Schema customization engine
//!
//! Non-destructive, auditable patching of a published operator document:
//! a [`Customization`] is a pure edit set that, applied to a source
//! document, yields a new document while leaving the original untouched.
//! Version-gated layering of customizations lives in [`version_gate`].

mod version_gate;

pub use version_gate::{CustomizationChain, VersionGate};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Result, SchemaError};
use crate::operator::{OperatorDocument, SchemaSlot};
use crate::schema::SchemaNode;

/// One edit to a named hyperparameter.
///
/// Removal is a distinct constructor rather than an overloaded null-like
/// value: `Remove` deletes the property wherever it is referenced, while
/// setting a null-typed schema node constrains the property to the value
/// `null`. The two are unrelated operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    /// Replace or insert the property's sub-schema
    Set(SchemaNode),
    /// Delete the property from `properties`, `required`,
    /// `relevantToOptimizer`, and any constraint naming it
    Remove,
}

/// A deterministic edit set over one operator document.
///
/// Edits apply in insertion order; when two edits target the same property
/// the last one wins (logged as a warning).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Customization {
    property_edits: Vec<(String, PropertyEdit)>,
    slot_edits: Vec<(SchemaSlot, Value)>,
    set_as_available: bool,
}

impl Customization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or insert the sub-schema for hyperparameter `name`
    pub fn set_prop(mut self, name: impl Into<String>, schema: impl Into<SchemaNode>) -> Self {
        self.property_edits
            .push((name.into(), PropertyEdit::Set(schema.into())));
        self
    }

    /// Remove hyperparameter `name` entirely (a no-op if absent)
    pub fn remove_prop(mut self, name: impl Into<String>) -> Self {
        self.property_edits.push((name.into(), PropertyEdit::Remove));
        self
    }

    /// Replace one top-level schema slot wholesale
    pub fn replace_slot(mut self, slot: SchemaSlot, schema: impl Into<SchemaNode>) -> Self {
        self.slot_edits.push((slot, schema.into().into_value()));
        self
    }

    /// Whether the produced document should be published to the
    /// availability registry (default: produced but unpublished)
    pub fn set_as_available(mut self, available: bool) -> Self {
        self.set_as_available = available;
        self
    }

    /// Whether application of this edit set publishes its result
    pub fn publishes(&self) -> bool {
        self.set_as_available
    }
}

impl OperatorDocument {
    /// Apply an edit set, producing a new document.
    ///
    /// Pure: the same source and edit set always yield a structurally
    /// identical result, and `self` is never mutated.
    ///
    /// Removing a property and re-adding it converges with a direct
    /// replacement at the level of the property's own sub-schema. Two
    /// document-level effects of removal are not undone by a later set:
    /// cross-parameter constraint branches naming the property are dropped
    /// for good, and re-insertion appends the name at the tail of
    /// `required` / `relevantToOptimizer` rather than its old position.
    pub fn customize(&self, edits: &Customization) -> Result<OperatorDocument> {
        let mut doc = self.clone();

        for (slot, schema) in &edits.slot_edits {
            *doc.slot_mut(*slot) = schema.clone();
        }

        let mut touched: Vec<&str> = Vec::new();
        for (name, edit) in &edits.property_edits {
            if touched.contains(&name.as_str()) {
                warn!(property = %name, "conflicting edits for property, last wins");
            }
            touched.push(name);

            let hyperparams = doc.slot_mut(SchemaSlot::Hyperparams);
            match edit {
                PropertyEdit::Set(node) => set_property(hyperparams, name, node)?,
                PropertyEdit::Remove => remove_property(hyperparams, name)?,
            }
        }

        debug!(
            operator = self.name(),
            properties = edits.property_edits.len(),
            slots = edits.slot_edits.len(),
            "customized operator document"
        );
        Ok(doc)
    }
}

/// Locate the object schema inside a hyperparameters slot: either the slot
/// is a bare object schema, or an `allOf` whose first branch is the object
/// schema and whose remaining branches are cross-parameter constraints.
fn object_schema_mut<'a>(hyperparams: &'a mut Value) -> Result<&'a mut Map<String, Value>> {
    let has_all_of = hyperparams.get("allOf").is_some();
    if has_all_of {
        let branches = hyperparams
            .get_mut("allOf")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| {
                SchemaError::MalformedDocument("hyperparameters allOf is not an array".into())
            })?;
        branches
            .first_mut()
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                SchemaError::MalformedDocument(
                    "hyperparameters allOf has no leading object schema".into(),
                )
            })
    } else {
        hyperparams.as_object_mut().ok_or_else(|| {
            SchemaError::MalformedDocument("hyperparameters schema is not an object".into())
        })
    }
}

fn set_property(hyperparams: &mut Value, name: &str, node: &SchemaNode) -> Result<()> {
    let relevant = node.is_for_optimizer();
    let object = object_schema_mut(hyperparams)?;

    let existed = object
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| SchemaError::MalformedDocument("properties is not an object".into()))?
        .insert(name.to_string(), node.clone().into_value())
        .is_some();

    // A newly inserted hyperparameter joins the required list (every
    // constructor argument is required, defaults included) and, when
    // optimizer-relevant, the relevance list; replacements keep their
    // existing membership in both lists.
    if !existed {
        if let Some(required) = object.get_mut("required").and_then(Value::as_array_mut) {
            if !required.iter().any(|v| v.as_str() == Some(name)) {
                required.push(Value::String(name.to_string()));
            }
        }
    }

    if let Some(relevance) = object
        .get_mut("relevantToOptimizer")
        .and_then(Value::as_array_mut)
    {
        let present = relevance.iter().any(|v| v.as_str() == Some(name));
        if relevant && !present && !existed {
            relevance.push(Value::String(name.to_string()));
        } else if !relevant && present {
            // A suppressed replacement does leave the list: the published
            // search space must never widen past the node's own flag.
            relevance.retain(|v| v.as_str() != Some(name));
        }
    }
    Ok(())
}

fn remove_property(hyperparams: &mut Value, name: &str) -> Result<()> {
    {
        let object = object_schema_mut(hyperparams)?;
        if let Some(properties) = object.get_mut("properties").and_then(Value::as_object_mut) {
            properties.remove(name);
        }
        for list in ["required", "relevantToOptimizer"] {
            if let Some(names) = object.get_mut(list).and_then(Value::as_array_mut) {
                names.retain(|v| v.as_str() != Some(name));
            }
        }
    }

    // Cross-parameter constraints that name the removed property no longer
    // hold and are dropped with it.
    if let Some(branches) = hyperparams.get_mut("allOf").and_then(Value::as_array_mut) {
        let mut index = 0;
        branches.retain(|branch| {
            let keep = index == 0 || !mentions_property(branch, name);
            index += 1;
            keep
        });
    }
    Ok(())
}

/// Whether a constraint fragment references a property by name, looking
/// through nested `anyOf` / `allOf` / `not` structure.
fn mentions_property(fragment: &Value, name: &str) -> bool {
    let Some(map) = fragment.as_object() else {
        return false;
    };
    if let Some(properties) = map.get("properties").and_then(Value::as_object) {
        if properties.contains_key(name) {
            return true;
        }
    }
    for combinator in ["anyOf", "allOf"] {
        if let Some(branches) = map.get(combinator).and_then(Value::as_array) {
            if branches.iter().any(|b| mentions_property(b, name)) {
                return true;
            }
        }
    }
    if let Some(body) = map.get("not") {
        if mentions_property(body, name) {
            return true;
        }
    }
    false
}
