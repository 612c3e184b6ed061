//! Transition completion queue
//!
//! Each activation or deactivation of a node defers its completion work
//! until the node's visual transition settles. Completion is a one-shot:
//! whichever of the transition-end signal or the fallback deadline arrives
//! first resolves it, and the pending entry is removed before it runs so
//! the loser of the race is a no-op.

use std::time::{Duration, Instant};

use vellum_dom::{Document, ElementId};
use vellum_events::EventBus;

/// Deferred completion work for one node.
pub type Completion = Box<dyn FnOnce(&mut Document, &EventBus) + Send>;

struct Pending {
    element: ElementId,
    deadline: Instant,
    complete: Completion,
}

pub struct TransitionQueue {
    pending: Vec<Pending>,
    fallback: Duration,
}

impl TransitionQueue {
    pub fn new(fallback: Duration) -> Self {
        Self {
            pending: Vec::new(),
            fallback,
        }
    }

    pub fn fallback(&self) -> Duration {
        self.fallback
    }

    /// Queue completion work for `element`. Runs immediately when the node
    /// is not animated; otherwise waits for [`complete`](Self::complete)
    /// or the fallback deadline.
    pub fn queue(
        &mut self,
        doc: &mut Document,
        bus: &EventBus,
        element: ElementId,
        animated: bool,
        complete: Completion,
    ) {
        if !animated {
            complete(doc, bus);
            return;
        }

        tracing::debug!(element = %element, fallback_ms = self.fallback.as_millis() as u64, "transition pending");
        self.pending.push(Pending {
            element,
            deadline: Instant::now() + self.fallback,
            complete,
        });
    }

    /// Transition-end signal for `element`. Resolves the oldest pending
    /// completion for that node; returns false when nothing was pending.
    pub fn complete(&mut self, element: ElementId, doc: &mut Document, bus: &EventBus) -> bool {
        let Some(position) = self.pending.iter().position(|p| p.element == element) else {
            return false;
        };

        let entry = self.pending.remove(position);
        tracing::debug!(element = %element, "transition completed");
        (entry.complete)(doc, bus);
        true
    }

    /// Run every completion whose fallback deadline has passed. Guards
    /// against transitions whose end signal never arrives.
    pub fn expire_due(&mut self, now: Instant, doc: &mut Document, bus: &EventBus) -> usize {
        let mut expired = 0;
        while let Some(position) = self.pending.iter().position(|p| p.deadline <= now) {
            let entry = self.pending.remove(position);
            tracing::debug!(element = %entry.element, "transition fallback expired");
            (entry.complete)(doc, bus);
            expired += 1;
        }
        expired
    }

    /// Drain all pending completions in queue order.
    pub fn settle(&mut self, doc: &mut Document, bus: &EventBus) -> usize {
        let mut settled = 0;
        while !self.pending.is_empty() {
            let entry = self.pending.remove(0);
            (entry.complete)(doc, bus);
            settled += 1;
        }
        settled
    }

    pub fn has_pending(&self, element: ElementId) -> bool {
        self.pending.iter().any(|p| p.element == element)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
