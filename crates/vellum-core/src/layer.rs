//! Widget layer
//!
//! Owns the shared machinery and exposes the host-facing entry points:
//! clicks, keyboard input, value changes and transition-end signals come
//! in here and are routed to the owning controller or field manager.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use vellum_dom::{Document, ElementId};
use vellum_events::{EventBus, Key};
use vellum_forms::{Field, FieldConfig, FieldRegistry, Template};
use vellum_tabs::{selectors, TabRegistry, TransitionQueue, WidgetContext};

use crate::config::Config;
use crate::Result;

pub struct WidgetLayer {
    doc: Document,
    bus: EventBus,
    tabs: TabRegistry,
    fields: FieldRegistry,
    transitions: TransitionQueue,
    config: Config,
}

impl WidgetLayer {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            doc: Document::new(),
            bus: EventBus::new(),
            tabs: TabRegistry::new(),
            fields: FieldRegistry::new(),
            transitions: TransitionQueue::new(config.transition_fallback()),
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initial-active discovery, run once after the document is built.
    /// Every item carrying the activation marker that is already active
    /// gets a controller eagerly, so keyboard handling and attribute
    /// sync are wired before any interaction.
    pub fn bootstrap(&mut self) -> Result<usize> {
        let initial: Vec<ElementId> = self
            .doc
            .element_ids()
            .filter(|&e| {
                selectors::has_toggle_marker(&self.doc, e) && selectors::is_active(&self.doc, e)
            })
            .collect();

        let mut created = 0;
        for element in initial {
            if !self.tabs.contains(element) {
                self.tabs.get_or_create(&mut self.doc, element)?;
                created += 1;
            }
        }

        tracing::info!(controllers = created, "widget layer bootstrapped");
        Ok(created)
    }

    /// Click entry point. Resolves the nearest marked ancestor of the
    /// clicked node and shows it unless disabled. Returns whether the
    /// host should suppress the default click action.
    pub fn handle_click(&mut self, target: ElementId) -> Result<bool> {
        let Some(element) = self.doc.closest(target, selectors::has_toggle_marker) else {
            return Ok(false);
        };

        let suppress = selectors::is_hyperlink(&self.doc, element);

        let outer = selectors::outer_element(&self.doc, element);
        if selectors::is_disabled(&self.doc, element) || selectors::is_disabled(&self.doc, outer) {
            tracing::debug!(element = %element, "click on disabled item ignored");
            return Ok(suppress);
        }

        let controller = self.tabs.get_or_create(&mut self.doc, element)?;
        let mut ctx = WidgetContext::new(&mut self.doc, &self.bus, &mut self.transitions);
        controller.show(&mut ctx);
        Ok(suppress)
    }

    /// Keyboard entry point. Only elements that already have a
    /// controller respond. Returns whether the host should suppress the
    /// default key action.
    pub fn handle_keydown(&mut self, target: ElementId, key: Key) -> Result<bool> {
        let Some(controller) = self.tabs.get(target) else {
            return Ok(false);
        };

        let mut ctx = WidgetContext::new(&mut self.doc, &self.bus, &mut self.transitions);
        Ok(controller.keydown(&mut ctx, &self.tabs, key)?)
    }

    /// Value-change entry point for form controls. Clears any appended
    /// feedback on the changed field.
    pub fn handle_input(&mut self, target: ElementId) -> bool {
        let Some(field) = self.fields.get(target) else {
            return false;
        };

        field.lock().clear_appended(&mut self.doc);
        true
    }

    /// Transition-end signal from the animation host.
    pub fn handle_transition_end(&mut self, element: ElementId) -> bool {
        self.transitions.complete(element, &mut self.doc, &self.bus)
    }

    /// Run completions whose fallback deadline has passed.
    pub fn expire_transitions(&mut self, now: Instant) -> usize {
        self.transitions.expire_due(now, &mut self.doc, &self.bus)
    }

    /// Drain every pending completion.
    pub fn settle(&mut self) -> usize {
        self.transitions.settle(&mut self.doc, &self.bus)
    }

    pub fn has_pending_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Declarative method dispatch onto a tab controller.
    pub fn invoke(&mut self, target: ElementId, method: &str) -> Result<()> {
        let controller = self.tabs.get_or_create(&mut self.doc, target)?;
        let mut ctx = WidgetContext::new(&mut self.doc, &self.bus, &mut self.transitions);
        controller.invoke(&mut ctx, method)?;
        Ok(())
    }

    pub fn register_field(
        &mut self,
        element: ElementId,
        config: FieldConfig,
    ) -> Result<Arc<Mutex<Field>>> {
        Ok(self.fields.register(&self.doc, element, config)?)
    }

    pub fn field(&self, element: ElementId) -> Option<Arc<Mutex<Field>>> {
        self.fields.get(element)
    }

    /// Show feedback next to a registered field. Returns false when the
    /// element has no field manager.
    pub fn append_feedback(
        &mut self,
        element: ElementId,
        feedback: impl Into<Template>,
        extra_class: Option<&str>,
    ) -> bool {
        let Some(field) = self.fields.get(element) else {
            return false;
        };

        field.lock().append_feedback(&mut self.doc, feedback, extra_class);
        true
    }
}

impl Default for WidgetLayer {
    fn default() -> Self {
        Self::new()
    }
}
