//! Namespace Normalizer
//!
//! Rewrites every element tag in a subtree to its local name and drops the
//! `xmlns` declaration attributes so the qualification cannot reappear on
//! serialization.

use crate::xml::{Element, Node};

/// Strip namespace qualification from `element` and every descendant, in
/// place. Comments and processing instructions are left untouched and
/// sibling order is preserved. Idempotent.
pub fn strip_namespaces(element: &mut Element) {
    if let Some(idx) = element.name.rfind(':') {
        element.name = element.name.split_off(idx + 1);
    }

    element
        .attributes
        .retain(|key, _| key != "xmlns" && !key.starts_with("xmlns:"));

    for child in &mut element.children {
        if let Node::Element(child) = child {
            strip_namespaces(child);
        }
    }
}
