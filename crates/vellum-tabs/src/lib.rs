//! Vellum tab activation
//!
//! Owns the activation protocol for tab/pill/list navigation: which item
//! and which linked panel are active, the cancellable hide/show handshake,
//! ARIA synchronization, keyboard navigation and nested dropdown visuals.
//! The document's class/attribute state is the source of truth; controllers
//! hold no activation state of their own.

mod context;
mod controller;
mod error;
mod registry;
pub mod selectors;
mod transition;

pub use context::WidgetContext;
pub use controller::TabController;
pub use error::TabError;
pub use registry::TabRegistry;
pub use transition::{Completion, TransitionQueue};

pub type Result<T> = std::result::Result<T, TabError>;
