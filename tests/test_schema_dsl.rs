//! Integration test: schema DSL construction end-to-end

use hyperschema::operator::{OperatorDocument, SchemaSlot, Tags};
use hyperschema::schema::{
    AnyOf, Array, Bool, Distribution, Enum, Float, Int, Json, Not, Null, Object, SchemaNode, Str,
};
use serde_json::{json, Value};

#[test]
fn test_unset_fields_produce_no_keys() {
    let node: SchemaNode = Float::new().into();
    assert_eq!(
        node.into_value(),
        json!({"type": "number"}),
        "a bare numeric leaf carries only its type discriminator"
    );
}

#[test]
fn test_explicit_null_default_is_kept() {
    let node: SchemaNode = AnyOf::new()
        .with_variant(Int::new())
        .with_variant(Null::new())
        .with_default(Value::Null)
        .into();
    let value = node.into_value();
    assert_eq!(value["default"], Value::Null, "explicit null is a real value");
}

#[test]
fn test_null_and_empty_enum_shapes() {
    let node: SchemaNode = Null::new().into();
    assert_eq!(node.into_value(), json!({"enum": [null]}));

    let node: SchemaNode = Enum::empty().into();
    assert_eq!(node.into_value(), json!({"enum": []}));
}

#[test]
fn test_any_of_order_and_empty() {
    let a = Enum::new(["ls", "lad"]);
    let b = Int::new();
    let node: SchemaNode = AnyOf::new().with_variant(a).with_variant(b).into();
    assert_eq!(
        node.into_value(),
        json!({"anyOf": [{"enum": ["ls", "lad"]}, {"type": "integer"}]})
    );

    let node: SchemaNode = AnyOf::new().into();
    assert_eq!(node.into_value(), json!({"anyOf": []}));
}

#[test]
fn test_object_exact_shape() {
    let node: SchemaNode = Object::new()
        .with_required(["x"])
        .with_additional_properties(false)
        .with_prop("x", Int::new())
        .into();
    assert_eq!(
        node.into_value(),
        json!({
            "type": "object",
            "required": ["x"],
            "additionalProperties": false,
            "properties": {"x": {"type": "integer"}},
        })
    );
}

#[test]
fn test_all_ten_numeric_fields() {
    let node: SchemaNode = Float::new()
        .with_minimum(0.0)
        .with_exclusive_minimum(true)
        .with_minimum_for_optimizer(0.01)
        .with_exclusive_minimum_for_optimizer(false)
        .with_maximum(1.0)
        .with_exclusive_maximum(false)
        .with_maximum_for_optimizer(0.5)
        .with_exclusive_maximum_for_optimizer(true)
        .with_distribution(Distribution::LogUniform)
        .with_default(0.1)
        .into();
    let value = node.into_value();
    for key in [
        "minimum",
        "exclusiveMinimum",
        "minimumForOptimizer",
        "exclusiveMinimumForOptimizer",
        "maximum",
        "exclusiveMaximum",
        "maximumForOptimizer",
        "exclusiveMaximumForOptimizer",
        "distribution",
        "default",
    ] {
        assert!(value.get(key).is_some(), "field {key} should be present");
    }
    assert_eq!(value["distribution"], json!("loguniform"));
}

#[test]
fn test_negation_and_passthrough() {
    let node: SchemaNode = Not::new(Str::new()).into();
    assert_eq!(
        node.into_value(),
        json!({"not": {"type": "string", "forOptimizer": false}})
    );

    let raw = json!({"laleType": "callable", "forOptimizer": false});
    let node: SchemaNode = Json::from_value(raw.clone())
        .expect("object passthrough is accepted")
        .into();
    assert_eq!(node.into_value(), raw);
}

#[test]
fn test_combined_document_has_four_slots() {
    let doc = OperatorDocument::new("MinMaxScaler")
        .with_import_from("sklearn.preprocessing")
        .with_tags(Tags::op(["transformer"]))
        .as_transformer()
        .with_hyperparams(
            Object::new()
                .with_required(["copy"])
                .with_additional_properties(false)
                .with_prop("copy", Bool::new().with_default(true)),
        )
        .with_input_fit(
            Object::new()
                .with_required(["X"])
                .with_prop("X", Array::new(Array::new(Float::new()))),
        )
        .with_input_apply(
            Object::new()
                .with_required(["X"])
                .with_prop("X", Array::new(Array::new(Float::new()))),
        )
        .with_output_apply(Array::new(Array::new(Float::new())));

    let value = doc.to_value();
    assert_eq!(value["$schema"], json!("http://json-schema.org/draft-04/schema#"));
    let slots = value["properties"].as_object().unwrap();
    assert_eq!(slots.len(), 4);
    for key in ["hyperparams", "input_fit", "input_transform", "output_transform"] {
        assert!(slots.contains_key(key), "slot {key} should be present");
    }

    assert_eq!(doc.slot(SchemaSlot::Hyperparams)["properties"]["copy"]["default"], json!(true));
}

#[test]
fn test_document_serializes_to_json() {
    let doc = OperatorDocument::new("Op").with_hyperparams(
        Object::new().with_prop("alpha", Float::new().with_default(0.9)),
    );
    let text = serde_json::to_string(&doc.to_value()).expect("document must serialize");
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, doc.to_value());
}
