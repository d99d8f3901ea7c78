use json_remap::{
    register, Field, FieldValue, Model, PathError, Record, RemapError, Schema, SchemaModel,
};
use serde_json::json;
use std::sync::Arc;

fn address_model() -> SchemaModel {
    SchemaModel::new(
        Schema::new("Address")
            .field("first", Field::string("[first]").unwrap())
            .field("address1", Field::string("[address][address][0]").unwrap())
            .field("address2", Field::string("[address][address][1]").unwrap())
            .field("city", Field::string("[address][city]").unwrap()),
    )
}

#[test]
fn dump_merges_fields_into_one_document() {
    let mut record = Record::new();
    record.insert("first".into(), FieldValue::Str("Test".into()));
    record.insert("address1".into(), FieldValue::Str("100 Harvard Street".into()));
    record.insert("address2".into(), FieldValue::Str("#801B".into()));
    record.insert("city".into(), FieldValue::Str("Arden".into()));

    let doc = address_model().dump(&record).unwrap();
    assert_eq!(
        doc,
        json!({
            "first": "Test",
            "address": {
                "city": "Arden",
                "address": ["100 Harvard Street", "#801B"],
            },
        })
    );
}

#[test]
fn load_dump_roundtrip() {
    let doc = json!({
        "first": "Test",
        "address": {
            "city": "Arden",
            "address": ["100 Harvard Street", "#801B"],
        },
    });
    let model = address_model();
    let record = model.load(&doc).unwrap();
    assert_eq!(model.dump(&record).unwrap(), doc);
}

#[test]
fn roundtrip_values_differ_only_by_coercion() {
    let model = SchemaModel::new(
        Schema::new("Order").field("quantity", Field::integer("[quantity]").unwrap()),
    );
    // A string on the way in becomes a JSON number on the way out.
    let record = model.load(&json!({"quantity": "12"})).unwrap();
    assert_eq!(model.dump(&record).unwrap(), json!({"quantity": 12}));
}

#[test]
fn colliding_schema_fails_dump() {
    let model = SchemaModel::new(
        Schema::new("Colliding")
            .field("a", Field::string("[key]").unwrap())
            .field("b", Field::string("[key]").unwrap()),
    );
    let mut record = Record::new();
    record.insert("a".into(), FieldValue::Str("one".into()));
    record.insert("b".into(), FieldValue::Str("two".into()));

    let err = model.dump(&record).unwrap_err();
    assert!(matches!(err, RemapError::Path(PathError::InvalidTarget)));
}

#[test]
fn negative_position_fails_dump() {
    let model = SchemaModel::new(
        Schema::new("Negative").field("x", Field::string("[items][-1]").unwrap()),
    );
    let mut record = Record::new();
    record.insert("x".into(), FieldValue::Str("value".into()));

    let err = model.dump(&record).unwrap_err();
    assert!(matches!(err, RemapError::Path(PathError::InvalidPosition)));
}

#[test]
fn nested_roundtrip_through_registry() {
    // A self-referential schema resolved by name; registration happens after
    // the field referencing it is built.
    let node = SchemaModel::new(
        Schema::new("TreeNode")
            .field("label", Field::string("[label]").unwrap())
            .field("children", Field::nested("[children]", "TreeNode").unwrap()),
    );
    register(Arc::new(node));

    let model = json_remap::resolve("TreeNode").unwrap();
    let doc = json!({
        "label": "root",
        "children": [
            {"label": "left", "children": []},
            {"label": "right", "children": []},
        ],
    });

    let record = model.load(&doc).unwrap();
    let children = record["children"].as_records().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["label"].as_str(), Some("left"));

    assert_eq!(model.dump(&record).unwrap(), doc);
}
