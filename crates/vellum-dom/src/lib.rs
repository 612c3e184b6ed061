//! Vellum markup tree
//!
//! The in-memory element tree the widget layer operates on. Widgets never
//! render anything; they read and mutate the structural state held here:
//! classes, attributes, focus and the forced-reflow counter.

mod document;
mod element;

pub use document::Document;
pub use element::{Element, ElementId, ElementSpec};
