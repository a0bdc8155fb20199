//! Labeled XML tree and the tag lookup used by the renderers.
//!
//! - [`tree`] - The read-only [`XmlTree`] node type and its text convention
//! - [`lookup`] - First-child-by-tag search ([`find_child`])
//! - [`parser`] - Builds an [`XmlTree`] from XML text using `quick-xml`

mod lookup;
mod parser;
mod tree;

pub use lookup::{child_element, find_child};
pub use parser::{parse_document, XmlError, MAX_XML_DEPTH};
pub use tree::{NodeKind, TreeError, XmlTree};
