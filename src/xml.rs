//! XML parsing and data model

pub mod cursor;
pub mod model;
pub mod parser;

pub use model::{Document, Element, Node};
pub use parser::Parser;
