//! Field registry
//!
//! One field manager per element, shared behind a lock so input handling
//! can mutate message collections while the layer holds the map.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use vellum_dom::{Document, ElementId};

use crate::field::{Field, FieldConfig};
use crate::Result;

#[derive(Clone, Default)]
pub struct FieldRegistry {
    fields: Arc<RwLock<HashMap<ElementId, Arc<Mutex<Field>>>>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a field manager for `element`, replacing any
    /// previous registration for the same element.
    pub fn register(
        &self,
        doc: &Document,
        element: ElementId,
        config: FieldConfig,
    ) -> Result<Arc<Mutex<Field>>> {
        let field = Arc::new(Mutex::new(Field::new(doc, element, config)?));
        self.fields.write().insert(element, Arc::clone(&field));
        tracing::debug!(element = %element, "field registered");
        Ok(field)
    }

    pub fn get(&self, element: ElementId) -> Option<Arc<Mutex<Field>>> {
        self.fields.read().get(&element).cloned()
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.fields.read().contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.fields.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }
}
