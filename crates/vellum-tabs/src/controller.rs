//! Tab activation controller
//!
//! One controller per navigation item. A controller remembers only its
//! element and the enclosing group; everything else (which sibling is
//! active, panel links, dropdown ancestry) is read from the document at
//! call time.
//!
//! `show` runs the full handshake: cancellable `hide` on the active
//! sibling and `show` on the target, then the deactivation and activation
//! sequences over each item/panel pair. Per node the immediate phase
//! moves focus and the visual "show" class; the completion phase, run
//! through the transition queue, flips the "active" class, ARIA state and
//! dropdown visuals and emits the `hidden`/`shown` notification.

use vellum_dom::{Document, ElementId};
use vellum_events::{EventKind, Key, WidgetEvent};

use crate::context::WidgetContext;
use crate::error::TabError;
use crate::registry::TabRegistry;
use crate::selectors;
use crate::Result;

#[derive(Debug)]
pub struct TabController {
    element: ElementId,
    group: ElementId,
}

impl TabController {
    /// Attach a controller to `element`. Fails when the element has no
    /// enclosing tab group; on success the group's ARIA attributes are
    /// synchronized once.
    pub fn new(doc: &mut Document, element: ElementId) -> Result<Self> {
        let group = doc
            .closest(element, selectors::is_group)
            .ok_or(TabError::MissingGroup(element))?;

        sync_group_attributes(doc, group);
        tracing::debug!(element = %element, group = %group, "tab controller created");

        Ok(Self { element, group })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn group(&self) -> ElementId {
        self.group
    }

    /// Activate this item and its linked panel, deactivating the active
    /// sibling pair. No-op when already active; aborted without mutation
    /// when a listener cancels either handshake notification.
    pub fn show(&self, ctx: &mut WidgetContext<'_>) {
        if selectors::is_active(ctx.doc, self.element) {
            return;
        }

        let active = self.active_child(ctx.doc);

        let hide_prevented = match active {
            Some(sibling) => ctx
                .bus
                .dispatch(WidgetEvent::new(
                    EventKind::Hide,
                    sibling,
                    Some(self.element),
                ))
                .is_default_prevented(),
            None => false,
        };
        let show_prevented = ctx
            .bus
            .dispatch(WidgetEvent::new(EventKind::Show, self.element, active))
            .is_default_prevented();

        if hide_prevented || show_prevented {
            tracing::debug!(element = %self.element, "activation cancelled by listener");
            return;
        }

        tracing::debug!(element = %self.element, outgoing = ?active, "activating");
        if let Some(sibling) = active {
            deactivate(ctx, sibling, Some(self.element));
        }
        activate(ctx, self.element, active);
    }

    /// Move along the group's children on a horizontal arrow key, with
    /// wrap-around, skipping disabled entries. The candidate receives
    /// focus and is shown. Returns whether the host should suppress the
    /// default key action.
    pub fn keydown(
        &self,
        ctx: &mut WidgetContext<'_>,
        registry: &TabRegistry,
        key: Key,
    ) -> Result<bool> {
        let forward = match key {
            Key::ArrowRight => true,
            Key::ArrowLeft => false,
            Key::Other => return Ok(false),
        };

        let suppress = selectors::is_hyperlink(ctx.doc, self.element);
        let siblings = self.children(ctx.doc);

        if let Some(candidate) = next_enabled(ctx.doc, &siblings, self.element, forward) {
            ctx.doc.focus(candidate);
            let controller = registry.get_or_create(ctx.doc, candidate)?;
            controller.show(ctx);
        }

        Ok(suppress)
    }

    /// Method dispatch for declarative invocations.
    pub fn invoke(&self, ctx: &mut WidgetContext<'_>, method: &str) -> Result<()> {
        match method {
            "show" => {
                self.show(ctx);
                Ok(())
            }
            other => Err(TabError::NoSuchMethod(other.to_string())),
        }
    }

    /// Whether this controller's element is currently active.
    pub fn is_active(&self, doc: &Document) -> bool {
        selectors::is_active(doc, self.element)
    }

    fn children(&self, doc: &Document) -> Vec<ElementId> {
        group_children(doc, self.group)
    }

    fn active_child(&self, doc: &Document) -> Option<ElementId> {
        self.children(doc)
            .into_iter()
            .find(|&child| selectors::is_active(doc, child))
    }
}

/// Inner items of a group: direct children first, falling back to a
/// two-level scan for markup that wraps items in intermediate containers.
fn group_children(doc: &Document, group: ElementId) -> Vec<ElementId> {
    let direct = doc.children_matching(group, selectors::is_inner_item);
    if !direct.is_empty() {
        return direct;
    }
    doc.descendants_matching(group, 2, selectors::is_inner_item)
}

/// The item/panel pair an activation walks: the element itself plus its
/// linked panel when one resolves.
fn activation_pair(doc: &Document, element: ElementId) -> Vec<ElementId> {
    let mut pair = vec![element];
    if let Some(panel) = selectors::linked_panel(doc, element) {
        if panel != element {
            pair.push(panel);
        }
    }
    pair
}

fn activate(ctx: &mut WidgetContext<'_>, element: ElementId, related: Option<ElementId>) {
    let pair = activation_pair(ctx.doc, element);

    for &node in &pair {
        ctx.doc.focus(node);
        if ctx.doc.has_class(node, selectors::CLASS_FADE) {
            ctx.doc.add_class(node, selectors::CLASS_SHOW);
        }
    }

    // Panel first so that for unanimated nodes the panel settles before
    // the item's shown notification fires.
    for &node in pair.iter().rev() {
        let node_related = if node == element { related } else { None };
        let animated = ctx.doc.has_class(node, selectors::CLASS_FADE);

        ctx.transitions.queue(
            ctx.doc,
            ctx.bus,
            node,
            animated,
            Box::new(move |doc, bus| {
                doc.add_class(node, selectors::CLASS_ACTIVE);
                if doc.attr(node, selectors::ATTR_ROLE) != Some(selectors::ROLE_TAB) {
                    return;
                }

                doc.remove_attr(node, "tabindex");
                doc.set_attr(node, "aria-selected", "true");
                toggle_dropdown(doc, node, true);
                bus.dispatch(WidgetEvent::new(EventKind::Shown, node, node_related));
                doc.reflow(node);
            }),
        );
    }
}

fn deactivate(ctx: &mut WidgetContext<'_>, element: ElementId, related: Option<ElementId>) {
    let pair = activation_pair(ctx.doc, element);

    for &node in &pair {
        ctx.doc.remove_class(node, selectors::CLASS_SHOW);
        ctx.doc.blur(node);
    }

    for &node in pair.iter().rev() {
        let node_related = if node == element { related } else { None };
        let animated = ctx.doc.has_class(node, selectors::CLASS_FADE);

        ctx.transitions.queue(
            ctx.doc,
            ctx.bus,
            node,
            animated,
            Box::new(move |doc, bus| {
                doc.remove_class(node, selectors::CLASS_ACTIVE);
                if doc.attr(node, selectors::ATTR_ROLE) != Some(selectors::ROLE_TAB) {
                    return;
                }

                doc.set_attr(node, "aria-selected", "false");
                doc.set_attr(node, "tabindex", "-1");
                toggle_dropdown(doc, node, false);
                bus.dispatch(WidgetEvent::new(EventKind::Hidden, node, node_related));
            }),
        );
    }
}

/// Next enabled sibling from `from` in the given direction, wrapping at
/// either end. Returns None when `from` is not in the list or every other
/// entry is disabled.
fn next_enabled(
    doc: &Document,
    siblings: &[ElementId],
    from: ElementId,
    forward: bool,
) -> Option<ElementId> {
    let start = siblings.iter().position(|&s| s == from)?;
    let len = siblings.len();

    let mut index = start;
    for _ in 0..len {
        index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if index == start {
            return None;
        }
        if !selectors::is_disabled(doc, siblings[index]) {
            return Some(siblings[index]);
        }
    }
    None
}

/// Sync the three cooperating dropdown indicators with the item's state
/// and mirror it on the wrapper's `aria-expanded`. Best-effort visual
/// sync only; no dropdown component is involved.
fn toggle_dropdown(doc: &mut Document, element: ElementId, open: bool) {
    let outer = selectors::outer_element(doc, element);
    if !doc.has_class(outer, selectors::CLASS_DROPDOWN) {
        return;
    }

    let parts = [
        (selectors::CLASS_DROPDOWN_TOGGLE, selectors::CLASS_ACTIVE),
        (selectors::CLASS_DROPDOWN_MENU, selectors::CLASS_SHOW),
        (selectors::CLASS_DROPDOWN_ITEM, selectors::CLASS_ACTIVE),
    ];
    for (find_class, flip_class) in parts {
        if let Some(part) = doc.find_first(outer, |d, e| d.has_class(e, find_class)) {
            if open {
                doc.add_class(part, flip_class);
            } else {
                doc.remove_class(part, flip_class);
            }
        }
    }

    doc.set_attr(outer, "aria-expanded", if open { "true" } else { "false" });
}

fn sync_group_attributes(doc: &mut Document, group: ElementId) {
    doc.set_attr_if_absent(group, selectors::ATTR_ROLE, selectors::ROLE_TABLIST);
    for child in group_children(doc, group) {
        sync_child_attributes(doc, child);
    }
}

/// Lazy ARIA bookkeeping for one child, run when the group first gets a
/// controller. Only fills in what the markup left out.
fn sync_child_attributes(doc: &mut Document, child: ElementId) {
    let active = selectors::is_active(doc, child);

    doc.set_attr(child, "aria-selected", if active { "true" } else { "false" });

    let outer = selectors::outer_element(doc, child);
    if outer != child {
        doc.set_attr_if_absent(outer, selectors::ATTR_ROLE, selectors::ROLE_PRESENTATION);
    }

    if !active {
        doc.set_attr(child, "tabindex", "-1");
    }
    doc.set_attr_if_absent(child, selectors::ATTR_ROLE, selectors::ROLE_TAB);

    if let Some(panel) = selectors::linked_panel(doc, child) {
        doc.set_attr_if_absent(panel, selectors::ATTR_ROLE, selectors::ROLE_TABPANEL);
        doc.set_attr_if_absent(panel, "tabindex", "0");
        if let Some(markup_id) = doc.markup_id(child) {
            let markup_id = markup_id.to_string();
            doc.set_attr_if_absent(panel, "aria-labelledby", &markup_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;
    use vellum_dom::ElementSpec;
    use vellum_events::EventBus;
    use crate::transition::TransitionQueue;

    struct Fixture {
        doc: Document,
        bus: EventBus,
        transitions: TransitionQueue,
        nav: ElementId,
        tabs: Vec<ElementId>,
        panels: Vec<ElementId>,
    }

    impl Fixture {
        /// `<ul class="nav">` with three links targeting three panels;
        /// the first link and panel start active.
        fn new() -> Self {
            let mut doc = Document::new();
            let root = doc.create(ElementSpec::new("div"));
            let nav = doc.insert(ElementSpec::new("ul").class("nav").attr("role", "tablist"), root);
            let content = doc.insert(ElementSpec::new("div"), root);

            let mut tabs = Vec::new();
            let mut panels = Vec::new();
            for (index, name) in ["home", "profile", "contact"].into_iter().enumerate() {
                let mut link = ElementSpec::new("a")
                    .id(format!("{name}-tab"))
                    .class("nav-link")
                    .attr("data-toggle", "tab")
                    .attr("href", format!("#{name}"))
                    .attr("role", "tab");
                let mut panel = ElementSpec::new("div").id(name);
                if index == 0 {
                    link = link.class("active");
                    panel = panel.class("active");
                }
                tabs.push(doc.insert(link, nav));
                panels.push(doc.insert(panel, content));
            }

            Self {
                doc,
                bus: EventBus::new(),
                transitions: TransitionQueue::new(Duration::from_millis(300)),
                nav,
                tabs,
                panels,
            }
        }

        fn ctx(&mut self) -> WidgetContext<'_> {
            WidgetContext::new(&mut self.doc, &self.bus, &mut self.transitions)
        }

        fn controller(&mut self, index: usize) -> TabController {
            let element = self.tabs[index];
            TabController::new(&mut self.doc, element).unwrap()
        }
    }

    #[test]
    fn test_construction_requires_group() {
        let mut doc = Document::new();
        let loose = doc.create(ElementSpec::new("a").class("nav-link"));

        let error = TabController::new(&mut doc, loose).unwrap_err();
        assert!(matches!(error, TabError::MissingGroup(e) if e == loose));
    }

    #[test]
    fn test_construction_syncs_aria() {
        let mut fixture = Fixture::new();
        fixture.controller(0);

        let doc = &fixture.doc;
        assert_eq!(doc.attr(fixture.nav, "role"), Some("tablist"));
        assert_eq!(doc.attr(fixture.tabs[0], "aria-selected"), Some("true"));
        assert_eq!(doc.attr(fixture.tabs[1], "aria-selected"), Some("false"));
        assert_eq!(doc.attr(fixture.tabs[1], "tabindex"), Some("-1"));
        assert!(!doc.has_attr(fixture.tabs[0], "tabindex"));
        assert_eq!(doc.attr(fixture.panels[1], "role"), Some("tabpanel"));
        assert_eq!(doc.attr(fixture.panels[1], "tabindex"), Some("0"));
        assert_eq!(
            doc.attr(fixture.panels[1], "aria-labelledby"),
            Some("profile-tab")
        );
    }

    #[test]
    fn test_show_moves_active_pair() {
        let mut fixture = Fixture::new();
        let controller = fixture.controller(1);
        controller.show(&mut fixture.ctx());

        let doc = &fixture.doc;
        assert!(doc.has_class(fixture.tabs[1], "active"));
        assert!(doc.has_class(fixture.panels[1], "active"));
        assert!(!doc.has_class(fixture.tabs[0], "active"));
        assert!(!doc.has_class(fixture.panels[0], "active"));
        assert_eq!(doc.attr(fixture.tabs[1], "aria-selected"), Some("true"));
        assert_eq!(doc.attr(fixture.tabs[0], "aria-selected"), Some("false"));
        assert_eq!(doc.attr(fixture.tabs[0], "tabindex"), Some("-1"));
        assert!(!doc.has_attr(fixture.tabs[1], "tabindex"));
    }

    #[test]
    fn test_show_on_active_is_noop() {
        let mut fixture = Fixture::new();
        let controller = fixture.controller(0);

        let events = Arc::new(Mutex::new(0usize));
        let seen = Arc::clone(&events);
        fixture.bus.on(fixture.tabs[0], EventKind::Show, move |_| {
            *seen.lock() += 1;
        });

        controller.show(&mut fixture.ctx());
        assert_eq!(*events.lock(), 0);
        assert!(fixture.doc.has_class(fixture.tabs[0], "active"));
    }

    #[test]
    fn test_handshake_order_and_related_targets() {
        let mut fixture = Fixture::new();
        let controller = fixture.controller(1);

        let log = Arc::new(Mutex::new(Vec::new()));
        for (element, kinds) in [
            (fixture.tabs[0], [EventKind::Hide, EventKind::Hidden]),
            (fixture.tabs[1], [EventKind::Show, EventKind::Shown]),
        ] {
            for kind in kinds {
                let log = Arc::clone(&log);
                fixture.bus.on(element, kind, move |event| {
                    log.lock().push((event.kind, event.target, event.related_target));
                });
            }
        }

        controller.show(&mut fixture.ctx());

        let outgoing = fixture.tabs[0];
        let incoming = fixture.tabs[1];
        assert_eq!(
            log.lock().as_slice(),
            &[
                (EventKind::Hide, outgoing, Some(incoming)),
                (EventKind::Show, incoming, Some(outgoing)),
                (EventKind::Hidden, outgoing, Some(incoming)),
                (EventKind::Shown, incoming, Some(outgoing)),
            ]
        );
    }

    #[test]
    fn test_cancelling_hide_aborts_without_mutation() {
        let mut fixture = Fixture::new();
        let controller = fixture.controller(1);

        fixture.bus.on(fixture.tabs[0], EventKind::Hide, |event| {
            event.prevent_default();
        });

        // The show notification still fires; only the mutation is aborted.
        let shows = Arc::new(Mutex::new(0usize));
        let seen = Arc::clone(&shows);
        fixture.bus.on(fixture.tabs[1], EventKind::Show, move |_| {
            *seen.lock() += 1;
        });

        controller.show(&mut fixture.ctx());
        assert_eq!(*shows.lock(), 1);
        assert!(fixture.doc.has_class(fixture.tabs[0], "active"));
        assert!(!fixture.doc.has_class(fixture.tabs[1], "active"));
    }

    #[test]
    fn test_cancelling_show_aborts_without_mutation() {
        let mut fixture = Fixture::new();
        let controller = fixture.controller(1);

        fixture.bus.on(fixture.tabs[1], EventKind::Show, |event| {
            event.prevent_default();
        });

        controller.show(&mut fixture.ctx());
        assert!(fixture.doc.has_class(fixture.tabs[0], "active"));
        assert!(!fixture.doc.has_class(fixture.tabs[1], "active"));
    }

    #[test]
    fn test_fade_staging_and_one_shot_completion() {
        let mut fixture = Fixture::new();
        for &node in fixture.tabs.iter().chain(&fixture.panels) {
            fixture.doc.add_class(node, "fade");
        }
        fixture.doc.add_class(fixture.tabs[0], "show");
        fixture.doc.add_class(fixture.panels[0], "show");

        let controller = fixture.controller(1);
        controller.show(&mut fixture.ctx());

        // Immediate phase: visual class flips, activation still pending.
        assert!(fixture.doc.has_class(fixture.tabs[1], "show"));
        assert!(!fixture.doc.has_class(fixture.tabs[0], "show"));
        assert!(!fixture.doc.has_class(fixture.tabs[1], "active"));
        assert!(fixture.doc.has_class(fixture.tabs[0], "active"));

        let tab = fixture.tabs[1];
        assert!(fixture
            .transitions
            .complete(tab, &mut fixture.doc, &fixture.bus));
        assert!(fixture.doc.has_class(tab, "active"));

        // The fallback side of the race is a no-op.
        assert!(!fixture
            .transitions
            .complete(tab, &mut fixture.doc, &fixture.bus));

        fixture.transitions.settle(&mut fixture.doc, &fixture.bus);
        assert!(!fixture.doc.has_class(fixture.tabs[0], "active"));
        assert!(fixture.doc.has_class(fixture.panels[1], "active"));
        assert!(fixture.transitions.is_empty());
    }

    #[test]
    fn test_reflow_forced_after_activation() {
        let mut fixture = Fixture::new();
        let controller = fixture.controller(1);

        let before = fixture.doc.reflow_count();
        controller.show(&mut fixture.ctx());
        assert!(fixture.doc.reflow_count() > before);
    }

    #[test]
    fn test_keyboard_wraps_and_skips_disabled() {
        let mut fixture = Fixture::new();
        fixture.doc.add_class(fixture.tabs[1], "disabled");
        let registry = TabRegistry::new();

        // Right from the first skips the disabled middle entry.
        let controller = fixture.controller(0);
        let suppress = controller
            .keydown(&mut fixture.ctx(), &registry, Key::ArrowRight)
            .unwrap();
        assert!(suppress);
        assert!(fixture.doc.has_class(fixture.tabs[2], "active"));

        // Right from the last wraps to the first.
        let controller = fixture.controller(2);
        controller
            .keydown(&mut fixture.ctx(), &registry, Key::ArrowRight)
            .unwrap();
        assert!(fixture.doc.has_class(fixture.tabs[0], "active"));

        // Left from the first wraps to the last.
        let controller = fixture.controller(0);
        controller
            .keydown(&mut fixture.ctx(), &registry, Key::ArrowLeft)
            .unwrap();
        assert!(fixture.doc.has_class(fixture.tabs[2], "active"));
    }

    #[test]
    fn test_keydown_ignores_other_keys() {
        let mut fixture = Fixture::new();
        let registry = TabRegistry::new();
        let controller = fixture.controller(0);

        let suppress = controller
            .keydown(&mut fixture.ctx(), &registry, Key::Other)
            .unwrap();
        assert!(!suppress);
        assert!(fixture.doc.has_class(fixture.tabs[0], "active"));
    }

    #[test]
    fn test_invoke_unknown_method() {
        let mut fixture = Fixture::new();
        let controller = fixture.controller(1);

        let error = controller.invoke(&mut fixture.ctx(), "hide").unwrap_err();
        assert!(matches!(error, TabError::NoSuchMethod(name) if name == "hide"));
    }

    #[test]
    fn test_two_level_children_fallback() {
        let mut fixture = Fixture::new();

        // Wrap each link in a nav-item container.
        let links: Vec<ElementId> = fixture.tabs.clone();
        for link in links {
            let wrapper = fixture.doc.create(ElementSpec::new("li").class("nav-item"));
            fixture.doc.insert_after(link, wrapper);
            fixture.doc.append_child(wrapper, link);
        }

        let controller = fixture.controller(1);
        controller.show(&mut fixture.ctx());

        assert!(fixture.doc.has_class(fixture.tabs[1], "active"));
        assert!(!fixture.doc.has_class(fixture.tabs[0], "active"));
        // Wrappers picked up the presentation role during sync.
        let wrapper = fixture.doc.parent(fixture.tabs[0]).unwrap();
        assert_eq!(fixture.doc.attr(wrapper, "role"), Some("presentation"));
    }

    #[test]
    fn test_dropdown_visuals_follow_item_state() {
        let mut fixture = Fixture::new();

        // A dropdown entry inside the nav, wrapped in a dropdown container.
        let dropdown = fixture
            .doc
            .create(ElementSpec::new("li").class("nav-item").class("dropdown"));
        fixture.doc.append_child(fixture.nav, dropdown);
        let toggle = fixture.doc.insert(
            ElementSpec::new("a").class("nav-link").class("dropdown-toggle"),
            dropdown,
        );
        let menu = fixture
            .doc
            .insert(ElementSpec::new("div").class("dropdown-menu"), dropdown);
        let entry = fixture.doc.insert(
            ElementSpec::new("a")
                .class("dropdown-item")
                .attr("data-toggle", "tab")
                .attr("role", "tab"),
            menu,
        );

        let controller = TabController::new(&mut fixture.doc, entry).unwrap();
        controller.show(&mut fixture.ctx());

        assert!(fixture.doc.has_class(toggle, "active"));
        assert!(fixture.doc.has_class(menu, "show"));
        assert!(fixture.doc.has_class(entry, "active"));
        assert_eq!(fixture.doc.attr(dropdown, "aria-expanded"), Some("true"));

        // Deactivating the entry closes the dropdown visuals again.
        deactivate(&mut fixture.ctx(), entry, None);

        assert!(!fixture.doc.has_class(toggle, "active"));
        assert!(!fixture.doc.has_class(menu, "show"));
        assert!(!fixture.doc.has_class(entry, "active"));
        assert_eq!(fixture.doc.attr(dropdown, "aria-expanded"), Some("false"));
    }
}
