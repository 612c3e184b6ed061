//! Event bus with per-element scoped listeners

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use vellum_dom::ElementId;

use crate::event::{EventKind, WidgetEvent};

type Handler = Arc<Mutex<Box<dyn FnMut(&mut WidgetEvent) + Send>>>;

/// Dispatches [`WidgetEvent`]s to listeners scoped by (element, kind).
///
/// Dispatch snapshots the listener list before running it, so a handler
/// may register or remove listeners without deadlocking the bus.
#[derive(Default)]
pub struct EventBus {
    listeners: Mutex<HashMap<(ElementId, EventKind), Vec<Handler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `kind` events on `target`.
    pub fn on<F>(&self, target: ElementId, kind: EventKind, handler: F)
    where
        F: FnMut(&mut WidgetEvent) + Send + 'static,
    {
        self.listeners
            .lock()
            .entry((target, kind))
            .or_default()
            .push(Arc::new(Mutex::new(Box::new(handler))));
    }

    /// Remove all listeners for `kind` on `target`.
    pub fn off(&self, target: ElementId, kind: EventKind) {
        self.listeners.lock().remove(&(target, kind));
    }

    /// Dispatch an event to its listeners and hand it back so the caller
    /// can inspect the prevented flag.
    ///
    /// Each handler's own lock is held while it runs: a handler may
    /// register listeners or dispatch further events, but must not
    /// dispatch an event that is delivered back to itself.
    pub fn dispatch(&self, mut event: WidgetEvent) -> WidgetEvent {
        let handlers: Vec<Handler> = self
            .listeners
            .lock()
            .get(&(event.target, event.kind))
            .map(|list| list.to_vec())
            .unwrap_or_default();

        tracing::trace!(
            kind = %event.kind,
            target = %event.target,
            listeners = handlers.len(),
            "dispatch"
        );

        for handler in handlers {
            let mut handler = handler.lock();
            (*handler)(&mut event);
        }

        event
    }

    pub fn listener_count(&self, target: ElementId, kind: EventKind) -> usize {
        self.listeners
            .lock()
            .get(&(target, kind))
            .map(Vec::len)
            .unwrap_or(0)
    }
}
