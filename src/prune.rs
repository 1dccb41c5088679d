//! Documentation Pruner
//!
//! GPO reports embed per-setting help text in `Explain` elements. None of it
//! is configuration, so it is removed wholesale before serialization.

use crate::xml::{Element, Node};

const EXPLAIN: &str = "Explain";

/// Remove every `Explain` descendant of `element`, at any depth, preserving
/// the order of surviving siblings. No-op when there are no matches.
pub fn remove_explain_sections(element: &mut Element) {
    element.children.retain(|node| {
        !matches!(node, Node::Element(child) if child.local_name() == EXPLAIN)
    });

    for child in &mut element.children {
        if let Node::Element(child) = child {
            remove_explain_sections(child);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::xml::Parser;

    fn parse_root(input: &str) -> Element {
        Parser::new(input.as_bytes()).parse().unwrap().root
    }

    fn count_explains(element: &Element) -> usize {
        element
            .child_elements()
            .map(|child| {
                usize::from(child.local_name() == "Explain") + count_explains(child)
            })
            .sum()
    }

    #[test]
    fn test_removes_nested_explains() {
        let mut root = parse_root(
            "<Computer><Explain>doc</Explain><Policy><Explain>more</Explain><S>A</S></Policy></Computer>",
        );
        remove_explain_sections(&mut root);
        assert_eq!(count_explains(&root), 0);

        // Surviving structure is intact.
        let policy = root.child_elements().next().unwrap();
        assert_eq!(policy.name, "Policy");
        assert_eq!(policy.child_elements().next().unwrap().text(), Some("A"));
    }

    #[test]
    fn test_matches_namespaced_explain() {
        let mut root = parse_root(r#"<C><ns:Explain xmlns:ns="u">doc</ns:Explain><S>x</S></C>"#);
        remove_explain_sections(&mut root);
        assert_eq!(count_explains(&root), 0);
        assert_eq!(root.child_elements().count(), 1);
    }

    #[test]
    fn test_preserves_sibling_order() {
        let mut root = parse_root("<C><A/><Explain/><B/><Explain/><D/></C>");
        remove_explain_sections(&mut root);
        let names: Vec<_> = root.child_elements().map(|e| e.name.clone()).collect();
        assert_eq!(names, ["A", "B", "D"]);
    }

    #[test]
    fn test_no_matches_is_noop() {
        let mut root = parse_root("<C><A>x</A></C>");
        let before = root.clone();
        remove_explain_sections(&mut root);
        assert_eq!(root, before);
    }
}
