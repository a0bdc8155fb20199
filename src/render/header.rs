use std::io::Write;

use super::{ensure_element, escape, RenderError};
use crate::xml::{child_element, XmlTree};

/// Writes the HTML prologue, channel heading, and the opening of the news table.
///
/// `channel` must be a `<channel>` element with `title`, `link` and
/// `description` children that carry text. All three are resolved before
/// anything is written, so a structural error leaves the sink untouched.
///
/// # Errors
///
/// - [`RenderError::Precondition`] if `channel` is not a `<channel>` element
/// - [`RenderError::MissingChannelElement`] if a required child is absent or empty
/// - [`RenderError::Io`] if the sink rejects a write
pub fn render_header<W: Write + ?Sized>(channel: &XmlTree, out: &mut W) -> Result<(), RenderError> {
    ensure_element(channel, "channel")?;

    let title = escape(required_text(channel, "title")?);
    let link = escape(required_text(channel, "link")?);
    let description = escape(required_text(channel, "description")?);

    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<title>{title}</title>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "   <h1>")?;
    writeln!(out, "       <a href={link}>{title}</a>")?;
    writeln!(out, "   </h1>")?;
    writeln!(out, "   <p>{description}</p>")?;
    writeln!(out, "<table border=\"1\">")?;
    writeln!(out, " <tbody>")?;
    writeln!(out, "  <tr>")?;
    writeln!(out, "      <th>Date</th>")?;
    writeln!(out, "      <th>Source</th>")?;
    writeln!(out, "      <th>News</th>")?;
    writeln!(out, " </tr>")?;

    Ok(())
}

fn required_text<'a>(channel: &'a XmlTree, tag: &'static str) -> Result<&'a str, RenderError> {
    let element = child_element(channel, tag).ok_or(RenderError::MissingChannelElement(tag))?;
    element.text_of().map_err(|e| {
        tracing::debug!(tag, error = %e, "Required channel element has no text");
        RenderError::MissingChannelElement(tag)
    })
}
