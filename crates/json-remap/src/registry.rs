//! Process-wide model registry.
//!
//! Nested fields may reference their model by name instead of by value,
//! resolved lazily at deserialize time. That breaks definition-order cycles
//! between mutually-referential schemas. Registration is an explicit call at
//! model definition time; entries live for the whole process.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;

use crate::error::RemapError;
use crate::model::Model;

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<String, Arc<dyn Model>>> = RwLock::new(HashMap::new());
}

/// Register a model under its schema name, replacing any previous entry.
pub fn register(model: Arc<dyn Model>) {
    let name = model.schema().name().to_string();
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name, model);
}

/// Resolve a registered model by name.
pub fn resolve(name: &str) -> Result<Arc<dyn Model>, RemapError> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
        .ok_or_else(|| RemapError::UnknownModel(name.to_string()))
}

/// A nested field's model reference: held directly, or looked up in the
/// registry when first needed.
#[derive(Clone)]
pub enum ModelRef {
    Direct(Arc<dyn Model>),
    Named(String),
}

impl ModelRef {
    pub fn resolve(&self) -> Result<Arc<dyn Model>, RemapError> {
        match self {
            ModelRef::Direct(model) => Ok(model.clone()),
            ModelRef::Named(name) => resolve(name),
        }
    }
}

impl From<Arc<dyn Model>> for ModelRef {
    fn from(model: Arc<dyn Model>) -> ModelRef {
        ModelRef::Direct(model)
    }
}

impl From<&str> for ModelRef {
    fn from(name: &str) -> ModelRef {
        ModelRef::Named(name.to_string())
    }
}
