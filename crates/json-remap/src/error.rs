//! Error taxonomy for load and dump operations.
//!
//! Any field failure aborts the whole operation; there is no partial-record
//! recovery and no retry logic in this layer.

use json_remap_path::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemapError {
    /// A required field's path did not resolve in the source document.
    #[error("required field at {0} not found")]
    MissingField(String),

    /// A raw value did not match the field's date format.
    #[error("invalid date {value:?} for format {format:?}")]
    Format { value: String, format: String },

    /// A raw value was not a valid numeric literal.
    #[error("invalid numeric literal {0:?}")]
    NumericFormat(String),

    /// The field's validator rejected the coerced value.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Malformed JSON text.
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Path navigation or merge failure, including structural collisions
    /// between two fields' serialize paths.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The value or field can not be written back into a document.
    #[error("can not serialize: {0}")]
    Serialize(String),

    /// No model with this name has been registered.
    #[error("unknown model {0:?}")]
    UnknownModel(String),

    /// The transport hook failed or is not implemented.
    #[error("transport error: {0}")]
    Transport(String),
}

impl RemapError {
    /// Build a validation error from any displayable message.
    pub fn validation(message: impl Into<String>) -> RemapError {
        RemapError::Validation(message.into())
    }
}
