//! Document arena
//!
//! Elements live in a flat arena addressed by [`ElementId`]. Detaching a
//! node keeps its slot alive so outstanding handles never dangle; the
//! widget layer relies on that for its never-destroyed controller cache.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::element::{Element, ElementId, ElementSpec};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Document {
    nodes: Vec<Element>,
    /// Markup id -> element, maintained on attach/detach
    ids: HashMap<String, ElementId>,
    /// Element currently holding input focus
    focused: Option<ElementId>,
    /// Bumped on every forced reflow, readable by the animation host
    reflow_count: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element from a spec.
    pub fn create(&mut self, spec: ElementSpec) -> ElementId {
        let id = ElementId(self.nodes.len());
        let mut element = Element::new(spec.tag);
        element.id = spec.id;
        element.classes = spec.classes;
        element.attributes = spec.attributes;
        element.text = spec.text;
        self.nodes.push(element);

        if let Some(markup_id) = self.nodes[id.0].id.clone() {
            self.ids.insert(markup_id, id);
        }

        id
    }

    /// Create an element and append it to `parent` in one step.
    pub fn insert(&mut self, spec: ElementSpec, parent: ElementId) -> ElementId {
        let id = self.create(spec);
        self.append_child(parent, id);
        id
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn contains(&self, id: ElementId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Every handle ever created, attached or detached.
    pub fn element_ids(&self) -> impl Iterator<Item = ElementId> {
        (0..self.nodes.len()).map(ElementId)
    }

    pub fn tag(&self, id: ElementId) -> &str {
        &self.nodes[id.0].tag
    }

    pub fn markup_id(&self, id: ElementId) -> Option<&str> {
        self.nodes[id.0].id.as_deref()
    }

    pub fn element_by_id(&self, markup_id: &str) -> Option<ElementId> {
        self.ids.get(markup_id).copied()
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }

    // === Tree structure ===

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.nodes[id.0].children
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);

        if let Some(markup_id) = self.nodes[child.0].id.clone() {
            self.ids.insert(markup_id, child);
        }
    }

    /// Insert `child` as the next sibling of `anchor`.
    pub fn insert_after(&mut self, anchor: ElementId, child: ElementId) {
        let Some(parent) = self.nodes[anchor.0].parent else {
            return;
        };

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == anchor)
            .map(|p| p + 1)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[parent.0].children.insert(position, child);

        if let Some(markup_id) = self.nodes[child.0].id.clone() {
            self.ids.insert(markup_id, child);
        }
    }

    /// Detach an element from its parent. The slot stays alive so existing
    /// handles remain valid; the markup-id index no longer resolves to it.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }

        if let Some(markup_id) = self.nodes[id.0].id.clone() {
            if self.ids.get(&markup_id) == Some(&id) {
                self.ids.remove(&markup_id);
            }
        }

        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    // === Classes ===

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if !self.has_class(id, class) {
            self.nodes[id.0].classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.nodes[id.0].classes.retain(|c| c != class);
    }

    pub fn remove_classes(&mut self, id: ElementId, classes: &[&str]) {
        self.nodes[id.0]
            .classes
            .retain(|c| !classes.contains(&c.as_str()));
    }

    // === Attributes ===

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, id: ElementId, name: &str) -> bool {
        self.nodes[id.0].attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        self.nodes[id.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Idempotent attribute sync: only writes when the attribute is absent.
    pub fn set_attr_if_absent(&mut self, id: ElementId, name: &str, value: &str) {
        if !self.has_attr(id, name) {
            self.set_attr(id, name, value);
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        self.nodes[id.0].attributes.remove(name);
    }

    // === Focus ===

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn focus(&mut self, id: ElementId) {
        if self.focused != Some(id) {
            tracing::trace!(element = %id, "focus");
            self.focused = Some(id);
        }
    }

    pub fn blur(&mut self, id: ElementId) {
        if self.focused == Some(id) {
            tracing::trace!(element = %id, "blur");
            self.focused = None;
        }
    }

    // === Reflow ===

    /// Force a reflow. The animation host reads the counter to restart
    /// CSS transitions after a class flip.
    pub fn reflow(&mut self, id: ElementId) {
        tracing::trace!(element = %id, "forced reflow");
        self.reflow_count += 1;
    }

    pub fn reflow_count(&self) -> u64 {
        self.reflow_count
    }

    // === Scoped queries ===

    /// Nearest element matching `matches`, starting at `id` itself and
    /// walking up through ancestors.
    pub fn closest<F>(&self, id: ElementId, matches: F) -> Option<ElementId>
    where
        F: Fn(&Document, ElementId) -> bool,
    {
        let mut current = Some(id);
        while let Some(node) = current {
            if matches(self, node) {
                return Some(node);
            }
            current = self.nodes[node.0].parent;
        }
        None
    }

    /// Direct children of `parent` matching `matches`, in document order.
    pub fn children_matching<F>(&self, parent: ElementId, matches: F) -> Vec<ElementId>
    where
        F: Fn(&Document, ElementId) -> bool,
    {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .filter(|&c| matches(self, c))
            .collect()
    }

    /// Descendants of `parent` down to `max_depth` levels (1 = direct
    /// children), matching `matches`, in document order.
    pub fn descendants_matching<F>(
        &self,
        parent: ElementId,
        max_depth: usize,
        matches: F,
    ) -> Vec<ElementId>
    where
        F: Fn(&Document, ElementId) -> bool,
    {
        let mut found = Vec::new();
        self.collect_descendants(parent, max_depth, &matches, &mut found);
        found
    }

    fn collect_descendants<F>(
        &self,
        parent: ElementId,
        depth_left: usize,
        matches: &F,
        found: &mut Vec<ElementId>,
    ) where
        F: Fn(&Document, ElementId) -> bool,
    {
        if depth_left == 0 {
            return;
        }

        for &child in &self.nodes[parent.0].children {
            if matches(self, child) {
                found.push(child);
            }
            self.collect_descendants(child, depth_left - 1, matches, found);
        }
    }

    /// First descendant of `parent` (any depth) matching `matches`.
    pub fn find_first<F>(&self, parent: ElementId, matches: F) -> Option<ElementId>
    where
        F: Fn(&Document, ElementId) -> bool,
    {
        self.find_first_inner(parent, &matches)
    }

    fn find_first_inner<F>(&self, parent: ElementId, matches: &F) -> Option<ElementId>
    where
        F: Fn(&Document, ElementId) -> bool,
    {
        for &child in &self.nodes[parent.0].children {
            if matches(self, child) {
                return Some(child);
            }
            if let Some(found) = self.find_first_inner(child, matches) {
                return Some(found);
            }
        }
        None
    }
}
