//! Dual Serializer
//!
//! One depth-first traversal renders the canonical tree in two layouts: an
//! indented form for human inspection and a single-line compact form that
//! minimizes the character count of the payload handed to the feedback
//! service. Attributes are deliberately not serialized in either form;
//! downstream consumers operate on structural and textual content only.

use crate::xml::{Element, Node};

/// Declaration emitted ahead of the root element in both layouts
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

/// Output layout policy for the shared traversal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Multi-line, 2 spaces per nesting level
    Indented,
    /// Whole document on one line, no inter-element whitespace
    Compact,
}

/// Render `element` as an indented multi-line document
pub fn render_indented(element: &Element) -> String {
    render(element, Layout::Indented)
}

/// Render `element` as a compact single-line document
pub fn render_compact(element: &Element) -> String {
    render(element, Layout::Compact)
}

fn render(element: &Element, layout: Layout) -> String {
    let mut output = String::new();
    output.push_str(XML_DECLARATION);
    if layout == Layout::Indented {
        output.push('\n');
    }
    write_element(element, layout, 0, &mut output);
    output
}

fn write_element(element: &Element, layout: Layout, depth: usize, output: &mut String) {
    let indent = match layout {
        Layout::Indented => "  ".repeat(depth),
        Layout::Compact => String::new(),
    };

    output.push_str(&indent);
    output.push('<');
    output.push_str(&element.name);
    output.push('>');
    if let Some(text) = element.text() {
        output.push_str(&escape_text(text));
    }
    if layout == Layout::Indented {
        output.push('\n');
    }

    for child in &element.children {
        if let Node::Element(child) = child {
            write_element(child, layout, depth + 1, output);
        }
    }

    output.push_str(&indent);
    output.push_str("</");
    output.push_str(&element.name);
    output.push('>');
    if layout == Layout::Indented {
        output.push('\n');
    }
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::xml::Parser;

    fn parse_root(input: &str) -> Element {
        Parser::new(input.as_bytes()).parse().unwrap().root
    }

    #[test]
    fn test_compact_layout() {
        let root = parse_root("<GPO><Computer><Setting>A</Setting></Computer></GPO>");
        assert_eq!(
            render_compact(&root),
            "<?xml version='1.0' encoding='utf-8'?><GPO><Computer><Setting>A</Setting></Computer></GPO>"
        );
    }

    #[test]
    fn test_indented_layout() {
        let root = parse_root("<GPO><Computer><Setting>A</Setting></Computer></GPO>");
        let expected = "<?xml version='1.0' encoding='utf-8'?>\n\
                        <GPO>\n\
                        \x20 <Computer>\n\
                        \x20   <Setting>A\n\
                        \x20   </Setting>\n\
                        \x20 </Computer>\n\
                        </GPO>\n";
        assert_eq!(render_indented(&root), expected);
    }

    #[test]
    fn test_whitespace_only_text_is_absent() {
        let mut setting = Element::new("Setting");
        setting.children.push(Node::Text("   \n  ".to_string()));
        assert_eq!(
            render_compact(&setting),
            "<?xml version='1.0' encoding='utf-8'?><Setting></Setting>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let mut setting = Element::new("Setting");
        setting.children.push(Node::Text("a < b & c".to_string()));
        assert_eq!(
            render_compact(&setting),
            "<?xml version='1.0' encoding='utf-8'?><Setting>a &lt; b &amp; c</Setting>"
        );
    }

    #[test]
    fn test_comments_and_pis_not_rendered() {
        let root = parse_root("<GPO><!--c--><?pi?><A>x</A></GPO>");
        assert_eq!(
            render_compact(&root),
            "<?xml version='1.0' encoding='utf-8'?><GPO><A>x</A></GPO>"
        );
    }

    #[test]
    fn test_layouts_agree_on_content() {
        let root = parse_root("<GPO><Computer><S>A</S></Computer><User><S>B</S></User></GPO>");
        let compact = render_compact(&root);
        let indented = render_indented(&root);

        let squeeze = |s: &str| {
            s.lines()
                .map(str::trim)
                .collect::<Vec<_>>()
                .concat()
        };
        // The indented form splits "<S>A" and "</S>" across lines; stripping
        // layout whitespace must recover exactly the compact form.
        assert_eq!(squeeze(&indented), compact);
    }
}
