//! Class and role vocabulary
//!
//! The controller never reads visual state directly; everything it needs
//! is expressed through these predicates so the concrete class/attribute
//! encoding stays in one place.

use vellum_dom::{Document, ElementId};

pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_SHOW: &str = "show";
pub const CLASS_FADE: &str = "fade";
pub const CLASS_DISABLED: &str = "disabled";

pub const CLASS_DROPDOWN: &str = "dropdown";
pub const CLASS_DROPDOWN_TOGGLE: &str = "dropdown-toggle";
pub const CLASS_DROPDOWN_MENU: &str = "dropdown-menu";
pub const CLASS_DROPDOWN_ITEM: &str = "dropdown-item";

pub const CLASS_NAV: &str = "nav";
pub const CLASS_NAV_LINK: &str = "nav-link";
pub const CLASS_NAV_ITEM: &str = "nav-item";
pub const CLASS_LIST_GROUP: &str = "list-group";
pub const CLASS_LIST_GROUP_ITEM: &str = "list-group-item";

pub const ATTR_ROLE: &str = "role";
pub const ATTR_TOGGLE: &str = "data-toggle";
pub const ATTR_TARGET: &str = "data-target";

pub const ROLE_TAB: &str = "tab";
pub const ROLE_TABLIST: &str = "tablist";
pub const ROLE_TABPANEL: &str = "tabpanel";
pub const ROLE_PRESENTATION: &str = "presentation";

/// Toggle-kind values the click entry point manages.
pub const TOGGLE_KINDS: [&str; 3] = ["tab", "pill", "list"];

/// Active state read accessor; the "active" class is the source of truth.
pub fn is_active(doc: &Document, element: ElementId) -> bool {
    doc.has_class(element, CLASS_ACTIVE)
}

pub fn is_disabled(doc: &Document, element: ElementId) -> bool {
    doc.has_class(element, CLASS_DISABLED) || doc.has_attr(element, "disabled")
}

/// A tab group: list/nav container or anything with an explicit tablist role.
pub fn is_group(doc: &Document, element: ElementId) -> bool {
    doc.has_class(element, CLASS_NAV)
        || doc.has_class(element, CLASS_LIST_GROUP)
        || doc.attr(element, ATTR_ROLE) == Some(ROLE_TABLIST)
}

/// The conventional outer wrapper of an item (list entry container).
pub fn is_outer(doc: &Document, element: ElementId) -> bool {
    doc.has_class(element, CLASS_NAV_ITEM) || doc.has_class(element, CLASS_LIST_GROUP_ITEM)
}

/// Inner interactive item, excluding dropdown toggles.
pub fn is_inner_item(doc: &Document, element: ElementId) -> bool {
    if doc.has_class(element, CLASS_DROPDOWN_TOGGLE) {
        return false;
    }

    doc.has_class(element, CLASS_NAV_LINK)
        || doc.has_class(element, CLASS_LIST_GROUP_ITEM)
        || doc.attr(element, ATTR_ROLE) == Some(ROLE_TAB)
        || has_toggle_marker(doc, element)
}

/// Whether the element carries the declarative activation marker.
pub fn has_toggle_marker(doc: &Document, element: ElementId) -> bool {
    doc.attr(element, ATTR_TOGGLE)
        .map(|kind| TOGGLE_KINDS.contains(&kind))
        .unwrap_or(false)
}

pub fn is_hyperlink(doc: &Document, element: ElementId) -> bool {
    matches!(doc.tag(element), "a" | "area")
}

/// Nearest outer wrapper, falling back to the element itself.
pub fn outer_element(doc: &Document, element: ElementId) -> ElementId {
    doc.closest(element, is_outer).unwrap_or(element)
}

/// Resolve the panel an item points at, via the explicit target attribute
/// or an href fragment.
pub fn linked_panel(doc: &Document, element: ElementId) -> Option<ElementId> {
    let reference = doc
        .attr(element, ATTR_TARGET)
        .or_else(|| doc.attr(element, "href").filter(|href| href.starts_with('#')))?;

    doc.element_by_id(reference.trim_start_matches('#'))
}
