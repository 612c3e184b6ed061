//! Keyed message collection
//!
//! An insertion-ordered map from key to rendered-message template. Every
//! stored message is wrapped with the collection's configured style
//! classes, so callers only hand over content.

use serde::{Deserialize, Serialize};

use crate::template::Template;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Messages {
    extra_class: String,
    entries: Vec<(String, Template)>,
}

impl Messages {
    /// `extra_class` is a space-separated class list applied to every
    /// message set on this collection.
    pub fn new(extra_class: impl Into<String>) -> Self {
        Self {
            extra_class: extra_class.into(),
            entries: Vec::new(),
        }
    }

    /// Store `message` under `key`, wrapped in the collection's style
    /// classes. Replacing an existing key keeps its insertion position.
    pub fn set(&mut self, key: impl Into<String>, message: impl Into<Template>) {
        let key = key.into();
        let mut template = message.into();
        for class in self.extra_class.split_whitespace() {
            template = template.class(class);
        }

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = template,
            None => self.entries.push((key, template)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Template> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, template)| template)
    }

    /// Earliest-inserted entry, if any.
    pub fn get_first(&self) -> Option<&Template> {
        self.entries.first().map(|(_, template)| template)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Template> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
