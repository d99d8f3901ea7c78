//! Model schemas and the load/dump orchestration.

use serde_json::{Map, Value};

use crate::error::RemapError;
use crate::fields::Field;
use crate::value::Record;

/// A named, ordered collection of fields, fixed at definition time.
///
/// Fields are declared explicitly; there is no run-time attribute discovery.
///
/// # Example
///
/// ```
/// use json_remap::{Field, Schema};
///
/// # fn build() -> Result<Schema, json_remap::PathError> {
/// let schema = Schema::new("Contact")
///     .field("first", Field::string("[first]")?)
///     .field("city", Field::string("[address][city]")?);
/// # Ok(schema)
/// # }
/// ```
pub struct Schema {
    name: String,
    fields: Vec<(String, Field)>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Schema {
        Schema {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Declaration order is preserved and is the order
    /// fields are applied during load and dump.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Schema {
        self.fields.push((name.into(), field));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[(String, Field)] {
        &self.fields
    }
}

/// A flat view over one remote endpoint's documents.
///
/// Implementors supply the schema and may override the `post_load` and
/// `make_request` hooks; the orchestration methods are provided.
pub trait Model: Send + Sync {
    fn schema(&self) -> &Schema;

    /// Hook for derived fields, run after every field has loaded.
    fn post_load(&self, record: Record) -> Result<Record, RemapError> {
        Ok(record)
    }

    /// Transport hook; arguments from [`Model::connect`] pass through
    /// opaquely. Concrete models talking to an endpoint override this.
    fn make_request(&self, _args: &[Value]) -> Result<String, RemapError> {
        Err(RemapError::Transport("make_request is not implemented".into()))
    }

    /// Marshal a document into a flat record.
    fn load(&self, doc: &Value) -> Result<Record, RemapError> {
        let mut record = Record::new();
        for (name, field) in self.schema().fields() {
            record.insert(name.clone(), field.deserialize(doc)?);
        }
        self.post_load(record)
    }

    /// Parse JSON text and load it.
    fn loads(&self, text: &str) -> Result<Record, RemapError> {
        let doc: Value = serde_json::from_str(text)?;
        self.load(&doc)
    }

    /// Fetch a response through the transport hook and load it.
    fn connect(&self, args: &[Value]) -> Result<Record, RemapError> {
        let body = self.make_request(args)?;
        self.loads(&body)
    }

    /// Structure a flat record back into a nested document.
    ///
    /// Fields without a path, and fields absent from the record, are
    /// skipped. Each remaining field merges its value into the shared
    /// output document; structurally colliding paths fail the whole dump.
    fn dump(&self, record: &Record) -> Result<Value, RemapError> {
        let mut doc = Value::Object(Map::new());
        for (name, field) in self.schema().fields() {
            if !field.has_path() {
                continue;
            }
            if let Some(value) = record.get(name) {
                doc = field.serialize(value, doc)?;
            }
        }
        Ok(doc)
    }
}

/// A model that is nothing but its schema. Suits nested models that need no
/// hooks.
pub struct SchemaModel {
    schema: Schema,
}

impl SchemaModel {
    pub fn new(schema: Schema) -> SchemaModel {
        SchemaModel { schema }
    }
}

impl Model for SchemaModel {
    fn schema(&self) -> &Schema {
        &self.schema
    }
}
