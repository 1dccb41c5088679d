//! gpoaudit - Group Policy report normalization
//!
//! Turns an XML GPO report into a canonical, namespace-free tree holding
//! only the Computer and User configuration sections (documentation
//! stripped), serialized both as an indented log-friendly document and as a
//! compact single line for text analysis.
//!
//! # Quick Start
//!
//! ```
//! use gpoaudit::{canonicalize_str, render_compact};
//! # fn main() -> Result<(), gpoaudit::Error> {
//! let report = "<Report><Computer><Setting>A</Setting></Computer><User/></Report>";
//! let canonical = canonicalize_str(report)?;
//! let compact = render_compact(&canonical);
//! assert!(compact.ends_with("<GPO><Computer><Setting>A</Setting></Computer><User></User></GPO>"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result};

pub mod xml;
pub use xml::{Document, Element, Node, Parser};

pub mod normalize;
pub use normalize::strip_namespaces;

pub mod select;
pub use select::{extract_sections, CANONICAL_ROOT};

pub mod prune;
pub use prune::remove_explain_sections;

pub mod render;
pub use render::{render_compact, render_indented, Layout, XML_DECLARATION};

pub mod pipeline;
pub use pipeline::{canonicalize, canonicalize_file, canonicalize_str, run_pipeline};

/// Parse a report from string
pub fn parse_report_str(s: &str) -> Result<Document> {
    Parser::new(s.as_bytes()).parse()
}

/// Parse a report from bytes
pub fn parse_report_bytes(bytes: &[u8]) -> Result<Document> {
    Parser::new(bytes).parse()
}
