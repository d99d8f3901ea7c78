//! Field descriptors: the per-field extraction, coercion, and write-back
//! strategy.
//!
//! A [`Field`] is schema, not state. It is constructed once at model
//! definition time and applied to any number of documents; deserialization
//! returns values separately and never mutates the descriptor.

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use json_remap_path::{get, put, Path, PathError};
use serde_json::Value;

use crate::error::RemapError;
use crate::registry::ModelRef;
use crate::value::FieldValue;

/// Default date format, ISO `YYYY-MM-DD`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A user-supplied validator. Receives the coerced value and signals
/// rejection through an error; it produces no value of its own.
pub type Validator = Arc<dyn Fn(&FieldValue) -> Result<(), RemapError> + Send + Sync>;

/// A user-supplied pure mapping over the raw extracted value.
pub type MapFn = Arc<dyn Fn(&Value) -> Result<FieldValue, RemapError> + Send + Sync>;

/// Coercion strategy of a field.
#[derive(Clone)]
pub enum Kind {
    /// Identity; the raw value is kept as-is.
    Pass,
    /// Truthiness cast.
    Bool,
    /// Date parse with a strftime-style format string.
    Date { format: String },
    /// Exact decimal parse.
    Decimal,
    /// Integer parse.
    Int,
    /// String cast.
    Str,
    /// Arrays pass through, anything else wraps as a one-element list.
    List,
    /// User function applied to the raw value.
    Function(MapFn),
    /// Fixed value regardless of the document.
    Constant(Value),
    /// Load through another model, element-wise for arrays.
    Nested(ModelRef),
}

/// One field of a model schema.
///
/// Owns an optional extraction path, a default for missing values, the
/// nullable/required flags, an optional validator, and its [`Kind`].
#[derive(Clone)]
pub struct Field {
    kind: Kind,
    path: Option<Path>,
    missing: Value,
    nullable: bool,
    required: bool,
    validator: Option<Validator>,
}

impl Field {
    /// A path-less field; the whole document is its raw value.
    pub fn new(kind: Kind) -> Field {
        Field {
            kind,
            path: None,
            missing: Value::Null,
            nullable: true,
            required: false,
            validator: None,
        }
    }

    /// A field extracting from `path`.
    pub fn at(kind: Kind, path: &str) -> Result<Field, PathError> {
        let mut field = Field::new(kind);
        field.path = Some(Path::from_str(path)?);
        Ok(field)
    }

    pub fn passthrough(path: &str) -> Result<Field, PathError> {
        Field::at(Kind::Pass, path)
    }

    pub fn boolean(path: &str) -> Result<Field, PathError> {
        Field::at(Kind::Bool, path)
    }

    pub fn date(path: &str) -> Result<Field, PathError> {
        Field::date_format(path, DEFAULT_DATE_FORMAT)
    }

    pub fn date_format(path: &str, format: &str) -> Result<Field, PathError> {
        Field::at(Kind::Date { format: format.to_string() }, path)
    }

    pub fn decimal(path: &str) -> Result<Field, PathError> {
        Field::at(Kind::Decimal, path)
    }

    pub fn integer(path: &str) -> Result<Field, PathError> {
        Field::at(Kind::Int, path)
    }

    pub fn string(path: &str) -> Result<Field, PathError> {
        Field::at(Kind::Str, path)
    }

    pub fn list(path: &str) -> Result<Field, PathError> {
        Field::at(Kind::List, path)
    }

    /// A field holding a fixed value; useful for stamping constants into
    /// loaded records. Has no path, so `dump` skips it.
    pub fn constant(value: Value) -> Field {
        Field::new(Kind::Constant(value))
    }

    pub fn function<F>(path: &str, f: F) -> Result<Field, PathError>
    where
        F: Fn(&Value) -> Result<FieldValue, RemapError> + Send + Sync + 'static,
    {
        Field::at(Kind::Function(Arc::new(f)), path)
    }

    pub fn nested(path: &str, model: impl Into<ModelRef>) -> Result<Field, PathError> {
        Field::at(Kind::Nested(model.into()), path)
    }

    /// Set the default used when the path does not resolve.
    pub fn missing(mut self, value: Value) -> Field {
        self.missing = value;
        self
    }

    /// Fail with `MissingField` when the path does not resolve.
    pub fn required(mut self) -> Field {
        self.required = true;
        self
    }

    /// Coerce raw nulls instead of short-circuiting them.
    pub fn not_nullable(mut self) -> Field {
        self.nullable = false;
        self
    }

    /// Attach a validator run against the coerced value.
    pub fn validate<F>(mut self, f: F) -> Field
    where
        F: Fn(&FieldValue) -> Result<(), RemapError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(f));
        self
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Extract and coerce this field's value from a document.
    ///
    /// An unresolvable path yields the `missing` default unless the field is
    /// required. A raw null short-circuits to `FieldValue::Null` when the
    /// field is nullable. The validator, if any, runs last against the
    /// coerced value.
    pub fn deserialize(&self, doc: &Value) -> Result<FieldValue, RemapError> {
        let value = match &self.path {
            None => self.convert(doc)?,
            Some(path) => match get(doc, path) {
                Ok(raw) => self.convert(raw)?,
                Err(PathError::NotFound) => {
                    if self.required {
                        return Err(RemapError::MissingField(path.to_string()));
                    }
                    let missing = self.missing.clone();
                    self.convert(&missing)?
                }
                Err(other) => return Err(other.into()),
            },
        };
        if let Some(validator) = &self.validator {
            validator(&value)?;
        }
        Ok(value)
    }

    /// Write a previously deserialized value back into a document at this
    /// field's path, merging with whatever other fields wrote before.
    pub fn serialize(&self, value: &FieldValue, target: Value) -> Result<Value, RemapError> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| RemapError::Serialize("field has no path".into()))?;
        let raw = self.to_raw(value)?;
        Ok(put(target, path, raw)?)
    }

    fn convert(&self, raw: &Value) -> Result<FieldValue, RemapError> {
        if raw.is_null() && self.nullable {
            return Ok(FieldValue::Null);
        }
        self.coerce(raw)
    }

    fn coerce(&self, raw: &Value) -> Result<FieldValue, RemapError> {
        match &self.kind {
            Kind::Pass => Ok(FieldValue::Raw(raw.clone())),
            Kind::Bool => Ok(FieldValue::Bool(truthy(raw))),
            Kind::Date { format } => coerce_date(raw, format),
            Kind::Decimal => coerce_decimal(raw),
            Kind::Int => coerce_int(raw),
            Kind::Str => Ok(FieldValue::Str(stringify(raw))),
            Kind::List => match raw {
                Value::Array(items) => Ok(FieldValue::List(items.clone())),
                other => Ok(FieldValue::List(vec![other.clone()])),
            },
            Kind::Function(f) => f(raw),
            Kind::Constant(value) => Ok(FieldValue::Raw(value.clone())),
            Kind::Nested(model) => {
                let model = model.resolve()?;
                match raw {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| model.load(item))
                        .collect::<Result<Vec<_>, _>>()
                        .map(FieldValue::Records),
                    other => model.load(other).map(FieldValue::Record),
                }
            }
        }
    }

    fn to_raw(&self, value: &FieldValue) -> Result<Value, RemapError> {
        let raw = match value {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Decimal(d) => Value::String(d.to_string()),
            FieldValue::Date(d) => {
                let format = match &self.kind {
                    Kind::Date { format } => format.as_str(),
                    _ => DEFAULT_DATE_FORMAT,
                };
                Value::String(d.format(format).to_string())
            }
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::List(items) => Value::Array(items.clone()),
            FieldValue::Raw(v) => v.clone(),
            FieldValue::Record(record) => match &self.kind {
                Kind::Nested(model) => model.resolve()?.dump(record)?,
                _ => {
                    return Err(RemapError::Serialize(
                        "record value outside a nested field".into(),
                    ))
                }
            },
            FieldValue::Records(records) => match &self.kind {
                Kind::Nested(model) => {
                    let model = model.resolve()?;
                    let docs = records
                        .iter()
                        .map(|record| model.dump(record))
                        .collect::<Result<Vec<_>, _>>()?;
                    Value::Array(docs)
                }
                _ => {
                    return Err(RemapError::Serialize(
                        "record value outside a nested field".into(),
                    ))
                }
            },
        };
        Ok(raw)
    }
}

/// Truthiness over a JSON value: null, zero, and empty
/// strings/arrays/objects are false.
fn truthy(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// String cast. Booleans keep their literal textual form.
fn stringify(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

fn coerce_date(raw: &Value, format: &str) -> Result<FieldValue, RemapError> {
    let text = raw.as_str().ok_or_else(|| RemapError::Format {
        value: raw.to_string(),
        format: format.to_string(),
    })?;
    NaiveDate::parse_from_str(text, format)
        .map(FieldValue::Date)
        .map_err(|_| RemapError::Format {
            value: text.to_string(),
            format: format.to_string(),
        })
}

fn coerce_decimal(raw: &Value) -> Result<FieldValue, RemapError> {
    let literal = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => return Err(RemapError::NumericFormat(other.to_string())),
    };
    literal
        .parse::<BigDecimal>()
        .map(FieldValue::Decimal)
        .map_err(|_| RemapError::NumericFormat(literal))
}

fn coerce_int(raw: &Value) -> Result<FieldValue, RemapError> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(FieldValue::Int)
            .ok_or_else(|| RemapError::NumericFormat(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(FieldValue::Int)
            .map_err(|_| RemapError::NumericFormat(s.clone())),
        Value::Bool(b) => Ok(FieldValue::Int(*b as i64)),
        other => Err(RemapError::NumericFormat(other.to_string())),
    }
}
