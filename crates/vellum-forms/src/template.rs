//! Renderable feedback content
//!
//! A [`Template`] is a small declarative description of the node a piece
//! of feedback renders into. Rendering produces a fresh element every
//! call; templates themselves are plain data and can be stored, cloned
//! and re-rendered.

use serde::{Deserialize, Serialize};
use vellum_dom::{Document, ElementId, ElementSpec};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    tag: String,
    classes: Vec<String>,
    text: Option<String>,
}

impl Template {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            text: None,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Whether there is anything to show.
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, |t| t.trim().is_empty())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn to_spec(&self) -> ElementSpec {
        let mut spec = ElementSpec::new(self.tag.clone());
        for class in &self.classes {
            spec = spec.class(class.clone());
        }
        if let Some(text) = &self.text {
            spec = spec.text(text.clone());
        }
        spec
    }

    /// Render into a fresh detached element.
    pub fn render(&self, doc: &mut Document) -> ElementId {
        doc.create(self.to_spec())
    }
}

/// Plain text becomes a `div` container around the text.
impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::new("div").text(text)
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::new("div").text(text)
    }
}
