//! Borrowed view of the shared widget machinery
//!
//! Controller operations need the document, the event bus and the
//! transition queue together. Bundling the borrows keeps every
//! signature down to one parameter.

use vellum_dom::Document;
use vellum_events::EventBus;

use crate::transition::TransitionQueue;

pub struct WidgetContext<'a> {
    pub doc: &'a mut Document,
    pub bus: &'a EventBus,
    pub transitions: &'a mut TransitionQueue,
}

impl<'a> WidgetContext<'a> {
    pub fn new(
        doc: &'a mut Document,
        bus: &'a EventBus,
        transitions: &'a mut TransitionQueue,
    ) -> Self {
        Self {
            doc,
            bus,
            transitions,
        }
    }
}
