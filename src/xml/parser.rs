//! Recursive-descent XML parser
//!
//! Namespace-qualified names are kept verbatim; resolution happens in the
//! normalization pass. Comments and processing instructions inside element
//! content are kept as tree nodes. Whitespace-only text is not stored.

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::xml::cursor::Cursor;
use crate::xml::model::{Document, Element, Node};

/// XML parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new XML parser
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Parse an XML document
    pub fn parse(&mut self) -> Result<Document> {
        self.cursor.skip_whitespace();
        let root = self.parse_prolog_and_root()?;
        self.cursor.skip_whitespace();

        // Comments and processing instructions may trail the root element.
        loop {
            if self.cursor.peek_bytes(4) == Some(b"<!--") {
                self.cursor.advance_by(4);
                self.take_until(b"-->")?;
                self.cursor.skip_whitespace();
                continue;
            }
            if self.cursor.current() == Some(b'<') && self.cursor.peek(1) == Some(b'?') {
                self.cursor.advance_by(2);
                self.take_until(b"?>")?;
                self.cursor.skip_whitespace();
                continue;
            }
            break;
        }

        if !self.cursor.is_eof() {
            return Err(self.error_here("content after document root"));
        }

        Ok(Document { root })
    }

    /// Skip the declaration, DOCTYPE and comments preceding the root element
    fn parse_prolog_and_root(&mut self) -> Result<Element> {
        self.expect_byte(b'<')?;

        if self.cursor.current() == Some(b'?') {
            self.cursor.advance();
            self.take_until(b"?>")?;
            self.cursor.skip_whitespace();
            return self.parse_prolog_and_root();
        }

        if self.cursor.current() == Some(b'!') {
            self.skip_declaration_or_comment()?;
            self.cursor.skip_whitespace();
            return self.parse_prolog_and_root();
        }

        if self.cursor.current() == Some(b'/') {
            return Err(self.error_here("unexpected closing tag"));
        }

        self.parse_element_body()
    }

    /// Parse an element, cursor positioned just past the opening `<`
    fn parse_element_body(&mut self) -> Result<Element> {
        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.current() == Some(b'/') {
            self.cursor.advance();
            self.expect_byte(b'>')?;
            return Ok(Element {
                name,
                attributes,
                children: Vec::new(),
            });
        }

        self.expect_byte(b'>')?;

        let mut children = Vec::new();
        loop {
            if self.cursor.current() == Some(b'<') && self.cursor.peek(1) == Some(b'/') {
                self.cursor.advance_by(2);
                let close_name = self.parse_name()?;
                if close_name != name {
                    return Err(self.error_here("mismatched closing tag"));
                }
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;
                break;
            }

            if self.cursor.peek_bytes(4) == Some(b"<!--") {
                self.cursor.advance_by(4);
                let comment = self.take_until(b"-->")?;
                children.push(Node::Comment(comment));
                continue;
            }

            if self.cursor.peek_bytes(9) == Some(b"<![CDATA[") {
                self.cursor.advance_by(9);
                let text = self.take_until(b"]]>")?;
                if !text.trim().is_empty() {
                    children.push(Node::Text(text));
                }
                continue;
            }

            if self.cursor.current() == Some(b'<') && self.cursor.peek(1) == Some(b'?') {
                self.cursor.advance_by(2);
                let target = self.take_until(b"?>")?;
                children.push(Node::ProcessingInstruction(target));
                continue;
            }

            if self.cursor.current() == Some(b'<') && self.cursor.peek(1) == Some(b'!') {
                self.cursor.advance();
                self.skip_declaration_or_comment()?;
                continue;
            }

            if self.cursor.current() == Some(b'<') {
                self.cursor.advance();
                let child = self.parse_element_body()?;
                children.push(Node::Element(child));
                continue;
            }

            if self.cursor.is_eof() {
                return Err(self.error_here("unterminated element"));
            }

            if let Some(text) = self.parse_text()? {
                children.push(Node::Text(text));
            }
        }

        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here("unexpected end of input")),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error_here("duplicate attribute"));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(self.error_here("expected quoted attribute value")),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = bytes_to_string(raw)?;
                return decode_entities(&text);
            }
            self.cursor.advance();
        }

        Err(self.error_here("unterminated attribute value"))
    }

    fn parse_text(&mut self) -> Result<Option<String>> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = bytes_to_string(raw)?;
        let text = decode_entities(&text)?;

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();

        let Some(first) = self.cursor.current() else {
            return Err(self.error_here("expected name"));
        };
        if !is_name_start(first) {
            return Err(self.error_here("invalid name"));
        }

        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        bytes_to_string(self.cursor.slice_from(start))
    }

    fn skip_declaration_or_comment(&mut self) -> Result<()> {
        // cursor currently at '!'
        if self.cursor.peek(1) == Some(b'-') && self.cursor.peek(2) == Some(b'-') {
            self.cursor.advance_by(3);
            self.take_until(b"-->")?;
            return Ok(());
        }

        self.take_until(b">").map(|_| ())
    }

    /// Consume up to and including `pattern`, returning the bytes before it
    fn take_until(&mut self, pattern: &[u8]) -> Result<String> {
        let start = self.cursor.pos();
        while self.cursor.current().is_some() {
            if self.cursor.peek_bytes(pattern.len()) == Some(pattern) {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(pattern.len());
                return bytes_to_string(raw);
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated markup"))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.current() == Some(expected) {
            self.cursor.advance();
            Ok(())
        } else {
            Err(self.error_here("unexpected token"))
        }
    }

    fn error_here(&self, message: &str) -> Error {
        Error::with_message(
            ErrorKind::Malformed,
            Some(self.cursor.position()),
            message.to_string(),
        )
    }
}

fn bytes_to_string(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(|s| s.to_string())
        .map_err(|_| Error::new(ErrorKind::InvalidUtf8))
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entities(input: &str) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            result.push(ch);
            continue;
        }

        let mut entity = String::new();
        for next in chars.by_ref() {
            if next == ';' {
                break;
            }
            entity.push(next);
        }

        let decoded = match entity.as_str() {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(&entity),
        };

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                return Err(Error::with_message(
                    ErrorKind::InvalidEntity,
                    None,
                    format!("invalid xml entity: &{entity};"),
                ));
            }
        }
    }

    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(input.as_bytes()).parse()
    }

    #[test]
    fn test_parse_simple_element() {
        let doc = parse("<GPO></GPO>").unwrap();
        assert_eq!(doc.root.name, "GPO");
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_parse_namespaced_nested() {
        let doc = parse(r#"<ns:GPO xmlns:ns="uri"><ns:Setting>A</ns:Setting></ns:GPO>"#).unwrap();
        assert_eq!(doc.root.name, "ns:GPO");
        assert_eq!(doc.root.local_name(), "GPO");
        assert_eq!(doc.root.attributes.get("xmlns:ns"), Some(&"uri".to_string()));

        let child = doc.root.child_elements().next().unwrap();
        assert_eq!(child.local_name(), "Setting");
        assert_eq!(child.text(), Some("A"));
    }

    #[test]
    fn test_parse_keeps_comments_and_pis() {
        let doc = parse("<root><!-- note --><?pi data?><a>x</a></root>").unwrap();
        assert_eq!(doc.root.children.len(), 3);
        assert!(matches!(&doc.root.children[0], Node::Comment(c) if c == " note "));
        assert!(matches!(
            &doc.root.children[1],
            Node::ProcessingInstruction(t) if t == "pi data"
        ));
        assert!(matches!(&doc.root.children[2], Node::Element(_)));
    }

    #[test]
    fn test_parse_skips_prolog() {
        let doc = parse("<?xml version='1.0'?>\n<!-- header -->\n<root/>").unwrap();
        assert_eq!(doc.root.name, "root");
    }

    #[test]
    fn test_parse_drops_whitespace_text() {
        let doc = parse("<root>\n  <a>  </a>\n</root>").unwrap();
        assert_eq!(doc.root.children.len(), 1);
        let a = doc.root.child_elements().next().unwrap();
        assert!(a.children.is_empty());
    }

    #[test]
    fn test_parse_decodes_entities() {
        let doc = parse("<a>x &amp; y &#x41;</a>").unwrap();
        assert_eq!(doc.root.text(), Some("x & y A"));
    }

    #[test]
    fn test_parse_mismatched_tag_is_error() {
        let err = parse("<a><b></a></b>").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Malformed);
        assert!(err.message().contains("mismatched"));
    }

    #[test]
    fn test_parse_trailing_comments_and_pis_tolerated() {
        let doc = parse("<a>x</a>\n<!-- footer -->\n<?done?>").unwrap();
        assert_eq!(doc.root.text(), Some("x"));
    }

    #[test]
    fn test_parse_trailing_content_is_error() {
        let err = parse("<a></a><b></b>").unwrap_err();
        assert!(err.message().contains("after document root"));
    }

    #[test]
    fn test_parse_self_closing() {
        let doc = parse("<root><child /></root>").unwrap();
        let child = doc.root.child_elements().next().unwrap();
        assert_eq!(child.name, "child");
        assert!(child.children.is_empty());
    }
}
