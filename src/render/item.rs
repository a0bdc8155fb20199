use std::io::Write;

use super::{ensure_element, escape, RenderError};
use crate::xml::{child_element, XmlTree};

/// Cell text for an item without `<pubDate>`.
pub const NO_DATE: &str = "No date available";
/// Cell text for an item without `<source>`.
pub const NO_SOURCE: &str = "No source available";
/// Cell text for an item without `<title>`.
pub const NO_TITLE: &str = "No description available";

/// Writes one table row for an `<item>` element.
///
/// The row always has three cells in the order date, source, news. Each
/// optional field falls back independently to a literal when the element is
/// missing or carries no text:
///
/// | Field | Present | Absent |
/// |---|---|---|
/// | `pubDate` | its text | [`NO_DATE`] |
/// | `source` | anchor to its `url` attribute | [`NO_SOURCE`] |
/// | `title` | anchor to `link` text, or plain title if no link | [`NO_TITLE`] |
///
/// # Errors
///
/// Only [`RenderError::Precondition`] for a non-`<item>` node and
/// [`RenderError::Io`] for sink failures. Missing fields never fail.
pub fn render_item_row<W: Write + ?Sized>(item: &XmlTree, out: &mut W) -> Result<(), RenderError> {
    ensure_element(item, "item")?;

    let date = match optional_text(item, "pubDate") {
        Some(date) => escape(date).into_owned(),
        None => NO_DATE.to_string(),
    };
    let source = source_cell(item);
    let news = news_cell(item);

    writeln!(out, "<tr>")?;
    writeln!(out, "   <td>{date}</td>")?;
    writeln!(out, "   <td>{source}</td>")?;
    writeln!(out, "   <td>{news}</td>")?;
    writeln!(out, "</tr>")?;

    Ok(())
}

fn optional_text<'a>(item: &'a XmlTree, tag: &str) -> Option<&'a str> {
    let text = child_element(item, tag).and_then(|element| element.text_of().ok());
    if text.is_none() {
        tracing::trace!(tag, "Item field absent, using fallback");
    }
    text
}

fn source_cell(item: &XmlTree) -> String {
    let Some(source) = child_element(item, "source") else {
        return NO_SOURCE.to_string();
    };
    let Ok(name) = source.text_of() else {
        return NO_SOURCE.to_string();
    };
    match source.attribute("url") {
        Some(url) => format!("<a href ={}>{}</a>", escape(url), escape(name)),
        None => escape(name).into_owned(),
    }
}

// Title absent wins over everything; the link only matters once a title exists.
fn news_cell(item: &XmlTree) -> String {
    match optional_text(item, "title") {
        None => NO_TITLE.to_string(),
        Some(title) => match optional_text(item, "link") {
            Some(link) => format!("<a href ={}>{}</a>", escape(link), escape(title)),
            None => escape(title).into_owned(),
        },
    }
}
