//! Bracketed field paths.
//!
//! This crate implements the path half of a declarative field-mapping
//! engine: a path such as `[address][address][0]` names one location inside
//! a nested JSON document. Paths resolve in both directions - [`get`]
//! navigates an existing document, [`put`] constructs and merges the
//! structure needed for the path to resolve to a value.
//!
//! # Example
//!
//! ```
//! use json_remap_path::{get, put, Path};
//! use serde_json::json;
//!
//! let path: Path = "[address][city]".parse().unwrap();
//!
//! // Navigate into an existing document.
//! let doc = json!({"address": {"city": "Arden"}});
//! assert_eq!(get(&doc, &path).unwrap(), &json!("Arden"));
//!
//! // Build the same shape from scratch.
//! let built = put(json!({}), &path, json!("Arden")).unwrap();
//! assert_eq!(built, doc);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Key, Path};

mod assign;
mod get;
pub use assign::put;
pub use get::get;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path segment could not be resolved during navigation.
    #[error("NOT_FOUND")]
    NotFound,
    /// A negative array position was requested during a merge.
    #[error("INVALID_POSITION")]
    InvalidPosition,
    /// An array slot already holds a terminal value.
    #[error("POSITION_OCCUPIED")]
    PositionOccupied,
    /// The key kind does not match the existing container, or the write
    /// would overwrite an existing leaf.
    #[error("INVALID_TARGET")]
    InvalidTarget,
    /// The path string was empty.
    #[error("EMPTY_PATH")]
    Empty,
    /// The path string was not a bracketed segment sequence.
    #[error("MALFORMED_PATH")]
    Malformed,
}
