//! Declarative field mapping between nested JSON documents and flat typed
//! records.
//!
//! REST endpoints rarely agree on response shape. This crate lets a client
//! declare, once, where each field of interest lives inside a nested
//! response - as a bracketed path such as `[address][city]` - and what type
//! it coerces to. Loading a document produces a flat typed [`Record`];
//! dumping a record rebuilds the nested document along the same paths.
//!
//! # Example
//!
//! ```
//! use json_remap::{Field, Model, Schema, SchemaModel};
//! use serde_json::json;
//!
//! let model = SchemaModel::new(
//!     Schema::new("Contact")
//!         .field("first", Field::string("[first]").unwrap())
//!         .field("city", Field::string("[address][city]").unwrap())
//!         .field("street", Field::string("[address][address][0]").unwrap()),
//! );
//!
//! let record = model
//!     .load(&json!({
//!         "first": "Test",
//!         "address": {"city": "Arden", "address": ["100 Harvard Street"]},
//!     }))
//!     .unwrap();
//! assert_eq!(record["city"].as_str(), Some("Arden"));
//!
//! let doc = model.dump(&record).unwrap();
//! assert_eq!(doc["address"]["address"][0], json!("100 Harvard Street"));
//! ```

pub mod error;
pub mod fields;
pub mod model;
pub mod registry;
pub mod value;

pub use error::RemapError;
pub use fields::{Field, Kind, MapFn, Validator, DEFAULT_DATE_FORMAT};
pub use model::{Model, Schema, SchemaModel};
pub use registry::{register, resolve, ModelRef};
pub use value::{FieldValue, Record};

// The path layer is part of the public contract; re-export it whole.
pub use json_remap_path as path;
pub use json_remap_path::{Path, PathError};
