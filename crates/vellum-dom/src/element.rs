//! Element data and construction

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable handle for one element in a [`Document`](crate::Document).
///
/// Handles stay valid for the lifetime of the document; elements are
/// detached rather than deallocated, so an id never dangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name ("a", "button", "div", ...)
    pub tag: String,
    /// Markup id attribute, if any
    pub id: Option<String>,
    /// CSS classes in insertion order
    pub classes: Vec<String>,
    /// All other attributes
    pub attributes: BTreeMap<String, String>,
    /// Plain text content, if any
    pub text: Option<String>,
    /// Parent element, None for roots and detached nodes
    pub(crate) parent: Option<ElementId>,
    /// Child elements in document order
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Declarative description of an element, used to build test and template
/// markup without a parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
