use bigdecimal::BigDecimal;
use json_remap::{Field, FieldValue, Model, RemapError, Schema, SchemaModel};
use serde_json::json;
use std::sync::Arc;

#[test]
fn missing_value_uses_default() {
    let field = Field::passthrough("[key]").unwrap().missing(json!("value"));
    let value = field.deserialize(&json!({})).unwrap();
    assert_eq!(value.as_raw(), Some(&json!("value")));
}

#[test]
fn boolean_truthiness() {
    let field = Field::boolean("[key]").unwrap();
    assert_eq!(field.deserialize(&json!({"key": 1})).unwrap().as_bool(), Some(true));
    assert_eq!(field.deserialize(&json!({"key": 0})).unwrap().as_bool(), Some(false));
    assert_eq!(field.deserialize(&json!({"key": ""})).unwrap().as_bool(), Some(false));
}

#[test]
fn date_default_format() {
    let field = Field::date("[key]").unwrap();
    let value = field.deserialize(&json!({"key": "2015-01-31"})).unwrap();
    let date = value.as_date().unwrap();
    assert_eq!(
        (date.format("%Y").to_string(), date.format("%m").to_string(), date.format("%d").to_string()),
        ("2015".to_string(), "01".to_string(), "31".to_string())
    );
}

#[test]
fn date_custom_format() {
    let field = Field::date_format("[key]", "%m/%d/%Y").unwrap();
    let value = field.deserialize(&json!({"key": "01/31/2015"})).unwrap();
    assert_eq!(value.as_date().unwrap().format("%Y-%m-%d").to_string(), "2015-01-31");
}

#[test]
fn date_invalid_value() {
    let err = Field::date("[key]")
        .unwrap()
        .deserialize(&json!({"key": "AB"}))
        .unwrap_err();
    assert!(matches!(err, RemapError::Format { .. }));
}

#[test]
fn constant_field_value() {
    let field = Field::constant(json!("value"));
    let value = field.deserialize(&json!({})).unwrap();
    assert_eq!(value.as_raw(), Some(&json!("value")));
}

#[test]
fn decimal_exact_value() {
    let field = Field::decimal("[key]").unwrap();
    let value = field.deserialize(&json!({"key": "10.50"})).unwrap();
    assert_eq!(
        value.as_decimal().unwrap(),
        &"10.50".parse::<BigDecimal>().unwrap()
    );
}

#[test]
fn decimal_invalid_value() {
    let err = Field::decimal("[key]")
        .unwrap()
        .deserialize(&json!({"key": "AB"}))
        .unwrap_err();
    assert!(matches!(err, RemapError::NumericFormat(_)));
}

#[test]
fn integer_parse() {
    let field = Field::integer("[key]").unwrap();
    let value = field.deserialize(&json!({"key": "10"})).unwrap();
    assert_eq!(value.as_int(), Some(10));
}

#[test]
fn integer_invalid_value() {
    let err = Field::integer("[key]")
        .unwrap()
        .deserialize(&json!({"key": "AB"}))
        .unwrap_err();
    assert!(matches!(err, RemapError::NumericFormat(_)));
}

#[test]
fn function_field_maps_raw_value() {
    let field = Field::function("[x]", |_raw| Ok(FieldValue::Str("value".into()))).unwrap();
    let value = field.deserialize(&json!({"x": "anything"})).unwrap();
    assert_eq!(value.as_str(), Some("value"));
}

#[test]
fn list_wraps_scalars() {
    let field = Field::list("[x]").unwrap();
    let value = field.deserialize(&json!({"x": 1})).unwrap();
    assert_eq!(value.as_list(), Some([json!(1)].as_slice()));

    let value = field.deserialize(&json!({"x": ["hi"]})).unwrap();
    assert_eq!(value.as_list(), Some([json!("hi")].as_slice()));
}

#[test]
fn index_into_top_level_list() {
    let field = Field::passthrough("[1]").unwrap();
    let value = field.deserialize(&json!([1, 2, 3])).unwrap();
    assert_eq!(value.as_raw(), Some(&json!(2)));
}

#[test]
fn nested_model_field() {
    let inner = SchemaModel::new(
        Schema::new("Inner").field("number", Field::integer("[y]").unwrap()),
    );
    let field = Field::nested("[x]", Arc::new(inner) as Arc<dyn Model>).unwrap();

    let value = field.deserialize(&json!({"x": {"y": 1}})).unwrap();
    let record = value.as_record().unwrap();
    assert_eq!(record["number"].as_int(), Some(1));
}

#[test]
fn nested_model_field_over_list() {
    let inner = SchemaModel::new(
        Schema::new("Inner").field("number", Field::integer("[y]").unwrap()),
    );
    let field = Field::nested("[x]", Arc::new(inner) as Arc<dyn Model>).unwrap();

    let value = field
        .deserialize(&json!({"x": [{"y": 1}, {"y": 2}]}))
        .unwrap();
    let records = value.as_records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["number"].as_int(), Some(1));
    assert_eq!(records[1]["number"].as_int(), Some(2));
}

#[test]
fn string_cast() {
    let field = Field::string("[x]").unwrap();
    assert_eq!(
        field.deserialize(&json!({"x": 1})).unwrap().as_str(),
        Some("1")
    );
    assert_eq!(
        field.deserialize(&json!({"x": true})).unwrap().as_str(),
        Some("True")
    );
    assert_eq!(
        field.deserialize(&json!({"x": false})).unwrap().as_str(),
        Some("False")
    );
}
