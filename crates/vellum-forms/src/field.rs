//! Field feedback manager
//!
//! One manager per form control. It owns three keyed message collections
//! (error, help, success), appends at most one feedback node next to the
//! control at a time, and keeps `aria-describedby` pointing at whatever
//! is currently shown, restoring the original value on clear.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vellum_dom::{Document, ElementId};

use crate::error::FieldError;
use crate::messages::Messages;
use crate::template::Template;
use crate::Result;

const ARIA_DESCRIBED_BY: &str = "aria-describedby";
const CLASS_FIELD_ERROR: &str = "is-invalid";
const CLASS_FIELD_SUCCESS: &str = "is-valid";

/// Reserved key for configuration-supplied default messages.
pub const DEFAULT_MESSAGE_KEY: &str = "default";

/// Visual placement of feedback text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    #[default]
    Feedback,
    Tooltip,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Feedback => "feedback",
            FeedbackKind::Tooltip => "tooltip",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub name: String,
    pub kind: FeedbackKind,
    /// Default invalid message, seeded into the error collection
    pub invalid: String,
    /// Default valid message, seeded into the success collection
    pub valid: String,
}

#[derive(Debug)]
pub struct Field {
    element: ElementId,
    name: String,
    tip_id: String,
    initial_described_by: Option<String>,
    errors: Messages,
    helps: Messages,
    successes: Messages,
}

impl Field {
    pub fn new(doc: &Document, element: ElementId, config: FieldConfig) -> Result<Self> {
        if config.name.is_empty() {
            return Err(FieldError::MissingName);
        }
        if !doc.contains(element) {
            return Err(FieldError::MissingElement(config.name));
        }

        let tip_id = format!("{}-feedback-{}", config.name, Uuid::new_v4());
        // An empty captured value behaves like an absent attribute.
        let initial_described_by = doc
            .attr(element, ARIA_DESCRIBED_BY)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let kind = config.kind.as_str();
        let mut field = Self {
            element,
            name: config.name,
            tip_id,
            initial_described_by,
            errors: Messages::new(format!("invalid-{kind} {CLASS_FIELD_ERROR}")),
            helps: Messages::new(format!("info-{kind}")),
            successes: Messages::new(format!("valid-{kind} {CLASS_FIELD_SUCCESS}")),
        };

        if !config.invalid.is_empty() {
            field.errors.set(DEFAULT_MESSAGE_KEY, config.invalid);
        }
        if !config.valid.is_empty() {
            field.successes.set(DEFAULT_MESSAGE_KEY, config.valid);
        }

        tracing::debug!(field = %field.name, element = %element, "field manager created");
        Ok(field)
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tip_id(&self) -> &str {
        &self.tip_id
    }

    pub fn error_messages(&self) -> &Messages {
        &self.errors
    }

    pub fn error_messages_mut(&mut self) -> &mut Messages {
        &mut self.errors
    }

    pub fn help_messages(&self) -> &Messages {
        &self.helps
    }

    pub fn help_messages_mut(&mut self) -> &mut Messages {
        &mut self.helps
    }

    pub fn success_messages(&self) -> &Messages {
        &self.successes
    }

    pub fn success_messages_mut(&mut self) -> &mut Messages {
        &mut self.successes
    }

    /// Remove the appended feedback node, strip the control's state
    /// classes and restore the captured `aria-describedby`. Run on every
    /// value change of the control.
    pub fn clear_appended(&self, doc: &mut Document) {
        let Some(appended) = doc.element_by_id(&self.tip_id) else {
            return;
        };

        doc.detach(appended);
        doc.remove_classes(self.element, &[CLASS_FIELD_ERROR, CLASS_FIELD_SUCCESS]);

        match &self.initial_described_by {
            Some(initial) => doc.set_attr(self.element, ARIA_DESCRIBED_BY, initial),
            None => doc.remove_attr(self.element, ARIA_DESCRIBED_BY),
        }
    }

    /// Show `feedback` next to the control, replacing whatever was
    /// appended before. Empty content is a no-op. The node gets the
    /// field's stable tip id and `aria-describedby` grows to include it.
    pub fn append_feedback(
        &self,
        doc: &mut Document,
        feedback: impl Into<Template>,
        extra_class: Option<&str>,
    ) {
        let template = feedback.into();
        if template.is_empty() {
            return;
        }

        self.clear_appended(doc);

        let node = doc.create(template.to_spec().id(self.tip_id.clone()));
        if let Some(extra) = extra_class {
            doc.add_class(node, extra);
        }
        doc.insert_after(self.element, node);

        let described_by = match &self.initial_described_by {
            Some(initial) => format!("{initial} {}", self.tip_id),
            None => self.tip_id.clone(),
        };
        doc.set_attr(self.element, ARIA_DESCRIBED_BY, &described_by);
        tracing::debug!(field = %self.name, "feedback appended");
    }
}
