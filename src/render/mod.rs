//! HTML rendering of an RSS channel tree.
//!
//! The output is a fixed-shape document: a page header built from channel
//! metadata, one table row per `<item>`, and a closing footer. Every line is
//! written to a caller-supplied [`std::io::Write`] sink.
//!
//! - [`header`] - `<html>` prologue, channel heading, and the table header row
//! - [`item`] - One `<tr>` per item, with literal fallbacks for missing fields
//! - [`footer`] - Closing tags
//! - [`pipeline`] - Walks the document root and drives the three renderers
//!
//! # Example
//!
//! ```
//! use rsshtml::render::{render_to_string, RenderOptions};
//! use rsshtml::xml::parse_document;
//!
//! let root = parse_document(
//!     "<rss><channel><title>F</title><link>http://f</link><description>D</description></channel></rss>",
//! )
//! .unwrap();
//! let html = render_to_string(&root, &RenderOptions::default()).unwrap();
//! assert!(html.starts_with("<html>\n"));
//! ```

mod footer;
mod header;
mod item;
mod pipeline;

use std::borrow::Cow;

use thiserror::Error;

use crate::xml::XmlTree;

pub use footer::render_footer;
pub use header::render_header;
pub use item::{render_item_row, NO_DATE, NO_SOURCE, NO_TITLE};
pub use pipeline::{render, render_to_string, RenderOptions, RenderSummary};

/// Errors that abort a render call.
///
/// Missing item-level fields are never errors; they render as fallback text.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A required channel element (`title`, `link`, `description`) is absent
    /// or has no text content.
    #[error("channel is missing required <{0}> element")]
    MissingChannelElement(&'static str),

    /// A renderer was handed a node of the wrong shape.
    #[error("expected <{expected}> element, found {found}")]
    Precondition {
        expected: &'static str,
        found: String,
    },

    /// The document root is not `<rss version="2.0">` (only checked on request).
    #[error("document is not RSS 2.0 (root <{label}>, version {version:?})")]
    NotRss2 {
        label: String,
        version: Option<String>,
    },

    /// Writing to the output sink failed.
    #[error("failed to write HTML output: {0}")]
    Io(#[from] std::io::Error),
}

/// Checks that `node` is an element labeled `expected`.
fn ensure_element(node: &XmlTree, expected: &'static str) -> Result<(), RenderError> {
    if node.is_tag() && node.label() == expected {
        return Ok(());
    }
    let found = if node.is_tag() {
        format!("<{}>", node.label())
    } else {
        "a text node".to_string()
    };
    Err(RenderError::Precondition { expected, found })
}

/// Escapes feed text before it is placed into the HTML output.
fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}
