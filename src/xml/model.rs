//! XML data model
//!
//! The tree preserves comments and processing instructions as ordinary
//! nodes so that transformation passes have to handle them, but only
//! elements carry structure the pipeline cares about.

use indexmap::IndexMap;

/// XML document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// XML element
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Tag name, possibly namespace-qualified (`ns:Computer`) in source form
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

/// XML tree node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Tag name with any namespace prefix removed
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Leading text content: the text node preceding the first non-text
    /// child, trimmed. Whitespace-only text is treated as absent.
    pub fn text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            _ => None,
        }
    }

    /// Iterate over element children, skipping other node kinds
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(child) => Some(child),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_strips_prefix() {
        let element = Element::new("ns:Computer");
        assert_eq!(element.local_name(), "Computer");

        let plain = Element::new("User");
        assert_eq!(plain.local_name(), "User");
    }

    #[test]
    fn test_text_trims_and_ignores_whitespace() {
        let mut element = Element::new("Setting");
        element.children.push(Node::Text("  A  ".to_string()));
        assert_eq!(element.text(), Some("A"));

        let mut blank = Element::new("Setting");
        blank.children.push(Node::Text("   \n  ".to_string()));
        assert_eq!(blank.text(), None);
    }

    #[test]
    fn test_text_only_before_first_child() {
        let mut element = Element::new("a");
        element.children.push(Node::Element(Element::new("b")));
        element.children.push(Node::Text("tail".to_string()));
        assert_eq!(element.text(), None);
    }
}
