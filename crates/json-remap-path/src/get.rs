//! Path navigation over a document.

use serde_json::Value;

use crate::types::{Key, Path};
use crate::PathError;

/// Get a reference to the value a path resolves to.
///
/// Descends one key at a time: an index key steps into an array
/// (bounds-checked), a name key steps into an object. Any mismatch between
/// key kind and container kind, an out-of-range index, or an absent key is
/// `PathError::NotFound`.
///
/// # Example
///
/// ```
/// use json_remap_path::{get, Path};
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [10, 20]}});
/// let path: Path = "[a][b][1]".parse().unwrap();
/// assert_eq!(get(&doc, &path).unwrap(), &json!(20));
///
/// // A single index applies directly to a top-level array.
/// let list = json!([1, 2, 3]);
/// assert_eq!(get(&list, &"[1]".parse().unwrap()).unwrap(), &json!(2));
/// ```
pub fn get<'a>(doc: &'a Value, path: &Path) -> Result<&'a Value, PathError> {
    let mut current = doc;
    for key in path.keys() {
        current = match (key, current) {
            (Key::Index(index), Value::Array(items)) => usize::try_from(*index)
                .ok()
                .and_then(|position| items.get(position))
                .ok_or(PathError::NotFound)?,
            (Key::Name(name), Value::Object(map)) => {
                map.get(name).ok_or(PathError::NotFound)?
            }
            _ => return Err(PathError::NotFound),
        };
    }
    Ok(current)
}
