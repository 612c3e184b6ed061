//! Vellum event dispatch
//!
//! Widget notifications are dispatched through an [`EventBus`] with
//! listeners scoped to one element and one event kind. The `hide` and
//! `show` notifications are cancellable: a listener may flag the event as
//! prevented, which aborts the triggering operation before any mutation.

mod bus;
mod event;

pub use bus::EventBus;
pub use event::{EventKind, Key, WidgetEvent};
