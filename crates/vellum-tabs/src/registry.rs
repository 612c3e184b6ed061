//! Controller registry
//!
//! One controller per element, created on first use and kept for the
//! lifetime of the element. Entries are never disposed; the handles they
//! hold stay valid because detached nodes are retained by the document.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use vellum_dom::{Document, ElementId};

use crate::controller::TabController;
use crate::Result;

#[derive(Clone, Default)]
pub struct TabRegistry {
    controllers: Arc<RwLock<HashMap<ElementId, Arc<TabController>>>>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: ElementId) -> Option<Arc<TabController>> {
        self.controllers.read().get(&element).cloned()
    }

    /// Return the controller for `element`, constructing and registering
    /// one if this is the first time the element is seen.
    pub fn get_or_create(
        &self,
        doc: &mut Document,
        element: ElementId,
    ) -> Result<Arc<TabController>> {
        if let Some(controller) = self.get(element) {
            return Ok(controller);
        }

        let controller = Arc::new(TabController::new(doc, element)?);
        self.controllers
            .write()
            .insert(element, Arc::clone(&controller));
        tracing::debug!(element = %element, "tab controller registered");
        Ok(controller)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.controllers.read().contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.controllers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.read().is_empty()
    }
}
