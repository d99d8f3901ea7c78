//! Path types for bracketed field paths.

use std::fmt;
use std::str::FromStr;

use crate::PathError;

/// A single step in a field path.
///
/// Segments that parse as decimal integers address array positions; every
/// other segment addresses an object key. Negative indexes are representable
/// so that the merge side can reject them explicitly instead of silently
/// treating `-1` as an object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Array position, e.g. `[0]`.
    Index(i64),
    /// Object key, e.g. `[name]`.
    Name(String),
}

impl Key {
    fn parse(segment: &str) -> Key {
        match segment.parse::<i64>() {
            Ok(index) => Key::Index(index),
            Err(_) => Key::Name(segment.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "[{index}]"),
            Key::Name(name) => write!(f, "[{name}]"),
        }
    }
}

/// An ordered, non-empty sequence of [`Key`] steps.
///
/// The string form is `[seg1][seg2]...[segN]`. There is no escaping
/// mechanism, so a key can not contain a literal bracket.
///
/// # Example
///
/// ```
/// use json_remap_path::{Key, Path};
///
/// let path: Path = "[address][address][0]".parse().unwrap();
/// assert_eq!(path.keys().len(), 3);
/// assert_eq!(path.keys()[2], Key::Index(0));
/// assert_eq!(path.to_string(), "[address][address][0]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    keys: Vec<Key>,
}

impl Path {
    /// Parse a bracketed path string.
    ///
    /// # Errors
    ///
    /// - `PathError::Empty` - the input is empty
    /// - `PathError::Malformed` - missing outer brackets or a stray bracket
    ///   inside a segment
    pub fn parse(input: &str) -> Result<Path, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        let inner = input
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(PathError::Malformed)?;
        let mut keys = Vec::new();
        for segment in inner.split("][") {
            if segment.contains('[') || segment.contains(']') {
                return Err(PathError::Malformed);
            }
            keys.push(Key::parse(segment));
        }
        Ok(Path { keys })
    }

    /// The ordered key steps of this path.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.keys {
            write!(f, "{key}")?;
        }
        Ok(())
    }
}
