//! Widget notifications and input vocabulary

use serde::{Deserialize, Serialize};
use vellum_dom::ElementId;

/// The four tab lifecycle notifications, namespaced to this widget.
///
/// `Hide`/`Show` fire before any mutation and are cancellable;
/// `Hidden`/`Shown` fire after the matching transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Hide,
    Show,
    Hidden,
    Shown,
}

impl EventKind {
    /// Whether listeners may cancel the triggering operation.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, EventKind::Hide | EventKind::Show)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Hide => "hide.vl.tab",
            EventKind::Show => "show.vl.tab",
            EventKind::Hidden => "hidden.vl.tab",
            EventKind::Shown => "shown.vl.tab",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keyboard input routed into the widget layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// One dispatched notification.
#[derive(Debug, Clone)]
pub struct WidgetEvent {
    pub kind: EventKind,
    /// Element the event fires on
    pub target: ElementId,
    /// The counterpart item: incoming for hide/hidden, outgoing for
    /// show/shown (absent when there was no active sibling)
    pub related_target: Option<ElementId>,
    default_prevented: bool,
}

impl WidgetEvent {
    pub fn new(kind: EventKind, target: ElementId, related_target: Option<ElementId>) -> Self {
        Self {
            kind,
            target,
            related_target,
            default_prevented: false,
        }
    }

    /// Flag the event as prevented. Ignored for non-cancellable kinds.
    pub fn prevent_default(&mut self) {
        if self.kind.is_cancellable() {
            self.default_prevented = true;
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
