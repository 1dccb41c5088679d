//! Pipeline Orchestrator
//!
//! Sequences parse, extraction, pruning and normalization over one input
//! report and writes both serialized forms. No output file is touched until
//! the canonical tree has been fully built, so a failing input never leaves
//! partial results behind.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, ErrorKind, Result};
use crate::normalize::strip_namespaces;
use crate::prune::remove_explain_sections;
use crate::render::{render_compact, render_indented};
use crate::select::extract_sections;
use crate::xml::{Document, Element, Node};

/// Process the report at `input` and write the indented form to
/// `indented_path` and the compact form to `compact_path`, overwriting any
/// prior content at either destination.
pub fn run_pipeline(input: &Path, indented_path: &Path, compact_path: &Path) -> Result<()> {
    let canonical = canonicalize_file(input)?;

    write_output(indented_path, &render_indented(&canonical))?;
    info!("formatted report written to {}", indented_path.display());

    write_output(compact_path, &render_compact(&canonical))?;
    info!("compressed report written to {}", compact_path.display());

    Ok(())
}

/// Read and canonicalize the report at `input` without writing anything
pub fn canonicalize_file(input: &Path) -> Result<Element> {
    if !input.exists() {
        return Err(Error::new(ErrorKind::FileNotFound {
            path: input.display().to_string(),
        }));
    }

    let is_xml = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
    if !is_xml {
        return Err(Error::new(ErrorKind::NotXml {
            path: input.display().to_string(),
        }));
    }

    let content = std::fs::read(input).map_err(|e| {
        Error::new(ErrorKind::ReadFailed {
            path: input.display().to_string(),
            reason: e.to_string(),
        })
    })?;

    debug!("parsing report ({} bytes)", content.len());
    let doc = crate::parse_report_bytes(&content)?;
    canonicalize(doc)
}

/// Canonicalize an in-memory report string
pub fn canonicalize_str(input: &str) -> Result<Element> {
    let doc = crate::parse_report_str(input)?;
    canonicalize(doc)
}

/// Build the canonical document: extract the Computer and User sections,
/// prune their documentation, and strip namespaces from the result.
pub fn canonicalize(doc: Document) -> Result<Element> {
    let mut canonical = extract_sections(doc)?;

    for child in &mut canonical.children {
        if let Node::Element(section) = child {
            remove_explain_sections(section);
        }
    }

    strip_namespaces(&mut canonical);
    Ok(canonical)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    let write_error = |e: std::io::Error| {
        Error::new(ErrorKind::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    };

    // The handle closes on drop even when write_all fails partway.
    let mut file = File::create(path).map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)
}
