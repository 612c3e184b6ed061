//! Vellum Core
//!
//! Central coordination layer for the Vellum widget toolkit. Owns the
//! document, the event bus, the transition queue and the tab/field
//! registries, and routes host input (clicks, keys, value changes,
//! transition-end signals) to the right widget.

mod config;
mod error;
mod layer;

pub use config::Config;
pub use error::CoreError;
pub use layer::WidgetLayer;

// Re-export core components
pub use vellum_dom::{Document, Element, ElementId, ElementSpec};
pub use vellum_events::{EventBus, EventKind, Key, WidgetEvent};
pub use vellum_forms::{
    Field, FieldConfig, FieldError, FieldRegistry, FeedbackKind, Messages, Template,
    DEFAULT_MESSAGE_KEY,
};
pub use vellum_tabs::{TabController, TabError, TabRegistry, TransitionQueue, WidgetContext};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
