//! Structural merge of one value into a growing document.
//!
//! Each call to [`put`] contributes a single path into a shared output
//! document, so an object built field by field accumulates siblings instead
//! of being replaced wholesale. Colliding writes are rejected rather than
//! silently overwritten.

use serde_json::{Map, Value};

use crate::types::{Key, Path};
use crate::PathError;

/// Merge `value` into `target` so that `path` resolves to it.
///
/// Consumes the target document and returns the merged document. Callers
/// thread the result through successive calls, one per field.
///
/// # Errors
///
/// - `PathError::InvalidPosition` - a negative array position was requested
/// - `PathError::PositionOccupied` - an array slot already holds a terminal
///   value
/// - `PathError::InvalidTarget` - the key kind does not match the existing
///   container, or the write would overwrite an existing leaf
///
/// # Example
///
/// ```
/// use json_remap_path::{put, Path};
/// use serde_json::json;
///
/// let city: Path = "[address][city]".parse().unwrap();
/// let street: Path = "[address][street][0]".parse().unwrap();
///
/// let doc = put(json!({}), &city, json!("Arden")).unwrap();
/// let doc = put(doc, &street, json!("100 Harvard Street")).unwrap();
/// assert_eq!(
///     doc,
///     json!({"address": {"city": "Arden", "street": ["100 Harvard Street"]}})
/// );
/// ```
pub fn put(target: Value, path: &Path, value: Value) -> Result<Value, PathError> {
    assign_from_keys(value, path.keys(), target)
}

fn position_of(index: i64) -> Result<usize, PathError> {
    usize::try_from(index).map_err(|_| PathError::InvalidPosition)
}

/// Build a minimal nested structure bottom-up from a key sequence.
///
/// Keys are consumed innermost-first: a name key wraps the value in a
/// single-entry object, an index key wraps it in an array padded with nulls
/// up to that position.
fn build_from_keys(keys: &[Key], value: Value) -> Result<Value, PathError> {
    let mut built = value;
    for key in keys.iter().rev() {
        built = match key {
            Key::Name(name) => {
                let mut map = Map::new();
                map.insert(name.clone(), built);
                Value::Object(map)
            }
            Key::Index(index) => {
                let position = position_of(*index)?;
                let mut items = vec![Value::Null; position];
                items.push(built);
                Value::Array(items)
            }
        };
    }
    Ok(built)
}

/// Assign a value at an array position, padding with nulls as needed.
///
/// A null slot is filled with the structure built from the remaining keys.
/// An object slot is merged into recursively. Any other occupied slot is a
/// terminal value and the write is rejected.
fn assign_to_position(
    index: i64,
    value: Value,
    mut items: Vec<Value>,
    remaining: &[Key],
) -> Result<Value, PathError> {
    let position = position_of(index)?;
    while items.len() < position + 1 {
        items.push(Value::Null);
    }

    let slot = items[position].take();
    items[position] = match slot {
        Value::Null => build_from_keys(remaining, value)?,
        Value::Object(map) if !remaining.is_empty() => {
            assign_from_keys(value, remaining, Value::Object(map))?
        }
        _ => return Err(PathError::PositionOccupied),
    };
    Ok(Value::Array(items))
}

/// Merge dispatcher over the current target shape.
fn assign_from_keys(value: Value, keys: &[Key], target: Value) -> Result<Value, PathError> {
    let Some((first, rest)) = keys.split_first() else {
        return Err(PathError::Empty);
    };
    match target {
        Value::Object(mut map) => {
            let Key::Name(name) = first else {
                // Objects can not be addressed by array position.
                return Err(PathError::InvalidTarget);
            };
            match map.remove(name) {
                Some(existing) => {
                    if rest.is_empty() {
                        // Two leaves at the same location; never overwrite.
                        return Err(PathError::InvalidTarget);
                    }
                    let merged = assign_from_keys(value, rest, existing)?;
                    map.insert(name.clone(), merged);
                }
                None => {
                    if let Value::Object(built) = build_from_keys(keys, value)? {
                        map.extend(built);
                    }
                }
            }
            Ok(Value::Object(map))
        }
        Value::Array(items) => {
            let Key::Index(index) = first else {
                return Err(PathError::InvalidTarget);
            };
            assign_to_position(*index, value, items, rest)
        }
        Value::Null => build_from_keys(keys, value),
        _ => Err(PathError::InvalidTarget),
    }
}
