//! Subtree Selector
//!
//! Locates the Computer and User configuration sections anywhere in the
//! report, detaches them by ownership transfer, and reassembles them under
//! a fresh `GPO` root.

use crate::error::{Error, ErrorKind, Result};
use crate::xml::{Document, Element, Node};

const COMPUTER: &str = "Computer";
const USER: &str = "User";

/// Name of the synthetic root the extracted sections are attached to
pub const CANONICAL_ROOT: &str = "GPO";

/// Extract the Computer and User sections from `doc` and attach them, in
/// that order, to a new `GPO` root element. The rest of the document is
/// dropped. Fails with a missing-section error if either is absent.
///
/// Both sections are located before anything is detached, so with duplicate
/// candidates the first match in document order wins even when one section
/// is nested inside the other.
pub fn extract_sections(doc: Document) -> Result<Element> {
    let mut source = doc.root;

    let computer_path = find_first(&source, COMPUTER).ok_or_else(|| missing(COMPUTER))?;
    let user_path = find_first(&source, USER).ok_or_else(|| missing(USER))?;

    // Detaching the later match first keeps the earlier path valid: removal
    // only shifts sibling indices after the removed position.
    let (computer, user) = if user_path > computer_path {
        let user = detach_at(&mut source, &user_path).ok_or_else(|| missing(USER))?;
        let computer = detach_at(&mut source, &computer_path).ok_or_else(|| missing(COMPUTER))?;
        (computer, user)
    } else {
        let computer = detach_at(&mut source, &computer_path).ok_or_else(|| missing(COMPUTER))?;
        let user = detach_at(&mut source, &user_path).ok_or_else(|| missing(USER))?;
        (computer, user)
    };

    let mut canonical = Element::new(CANONICAL_ROOT);
    canonical.children.push(Node::Element(computer));
    canonical.children.push(Node::Element(user));
    Ok(canonical)
}

/// Preorder search for the first descendant whose local name matches
/// `target`, returning its path as child indices from `element`.
fn find_first(element: &Element, target: &str) -> Option<Vec<usize>> {
    for (index, node) in element.children.iter().enumerate() {
        let Node::Element(child) = node else {
            continue;
        };
        if child.local_name() == target {
            return Some(vec![index]);
        }
        if let Some(mut path) = find_first(child, target) {
            path.insert(0, index);
            return Some(path);
        }
    }
    None
}

/// Detach the element at `path`, transferring ownership to the caller
fn detach_at(element: &mut Element, path: &[usize]) -> Option<Element> {
    let (&index, rest) = path.split_first()?;
    if index >= element.children.len() {
        return None;
    }

    if rest.is_empty() {
        match element.children.remove(index) {
            Node::Element(found) => Some(found),
            other => {
                element.children.insert(index, other);
                None
            }
        }
    } else {
        match element.children.get_mut(index)? {
            Node::Element(child) => detach_at(child, rest),
            _ => None,
        }
    }
}

fn missing(section: &str) -> Error {
    Error::new(ErrorKind::MissingSection {
        section: section.to_string(),
    })
}
