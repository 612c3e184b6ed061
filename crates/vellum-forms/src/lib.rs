//! Vellum field feedback
//!
//! Per-field feedback bookkeeping: keyed message collections for error,
//! help and success text, a single appended feedback node per field, and
//! `aria-describedby` capture/restore around it.

mod error;
mod field;
mod messages;
mod registry;
mod template;

pub use error::FieldError;
pub use field::{Field, FieldConfig, FeedbackKind, DEFAULT_MESSAGE_KEY};
pub use messages::Messages;
pub use registry::FieldRegistry;
pub use template::Template;

pub type Result<T> = std::result::Result<T, FieldError>;
