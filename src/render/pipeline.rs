use std::io::Write;

use super::{render_footer, render_header, render_item_row, RenderError};
use crate::xml::XmlTree;

/// Knobs for [`render`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Reject documents whose root is not `<rss version="2.0">`.
    /// Off by default: any root whose first child is a channel is rendered.
    pub require_rss2: bool,
}

/// Counts reported after a successful render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Number of `<item>` rows written.
    pub items: usize,
    /// Number of channel children that were not items.
    pub skipped: usize,
}

/// Renders a parsed RSS document as HTML into `out`.
///
/// The channel is taken to be the first child of `root`. The header is written
/// once, then one row per `<item>` child element of the channel in document
/// order, then the footer. Other elements and text children are skipped.
///
/// # Errors
///
/// - [`RenderError::Precondition`] if `root` has no children or its first child
///   is not a `<channel>` element
/// - [`RenderError::NotRss2`] if `options.require_rss2` is set and the root fails the check
/// - [`RenderError::MissingChannelElement`] from the header
/// - [`RenderError::Io`] for sink failures
///
/// Nothing is written when the call fails before the header is emitted.
pub fn render<W: Write + ?Sized>(
    root: &XmlTree,
    out: &mut W,
    options: &RenderOptions,
) -> Result<RenderSummary, RenderError> {
    if options.require_rss2 {
        check_rss2(root)?;
    }

    let channel = root.child(0).ok_or_else(|| RenderError::Precondition {
        expected: "channel",
        found: format!("empty <{}>", root.label()),
    })?;

    render_header(channel, out)?;

    let mut summary = RenderSummary::default();
    for child in channel.children() {
        if child.is_tag() && child.label() == "item" {
            render_item_row(child, out)?;
            summary.items += 1;
        } else {
            summary.skipped += 1;
        }
    }

    render_footer(out)?;

    tracing::debug!(
        items = summary.items,
        skipped = summary.skipped,
        "Rendered channel"
    );
    Ok(summary)
}

/// Renders into an in-memory string. See [`render`].
pub fn render_to_string(root: &XmlTree, options: &RenderOptions) -> Result<String, RenderError> {
    let mut out = Vec::new();
    render(root, &mut out, options)?;
    // Every fragment written is a &str, so the buffer is valid UTF-8
    String::from_utf8(out).map_err(|e| {
        RenderError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn check_rss2(root: &XmlTree) -> Result<(), RenderError> {
    let version = root.attribute("version");
    if root.is_tag() && root.label() == "rss" && version == Some("2.0") {
        return Ok(());
    }
    tracing::warn!(root = %root.label(), version = ?version, "Document is not RSS 2.0");
    Err(RenderError::NotRss2 {
        label: root.label().to_string(),
        version: version.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(tag: &str, text: &str) -> XmlTree {
        XmlTree::element(tag).with_text(text)
    }

    fn channel() -> XmlTree {
        XmlTree::element("channel")
            .with_child(field("title", "Feed"))
            .with_child(field("link", "http://feed"))
            .with_child(field("description", "Desc"))
    }

    fn rss(channel: XmlTree) -> XmlTree {
        XmlTree::element("rss")
            .with_attribute("version", "2.0")
            .with_child(channel)
    }

    #[test]
    fn test_channel_without_items() {
        let html = render_to_string(&rss(channel()), &RenderOptions::default()).unwrap();
        assert!(html.contains(" </tr>\n  </tbody>\n </table>\n</body>\n</html>\n"));
        assert_eq!(html.matches("<tr>").count(), 1); // header row only
    }

    #[test]
    fn test_only_items_are_rendered() {
        let root = rss(channel()
            .with_child(field("title", "T0").with_attribute("x", "y"))
            .with_child(XmlTree::element("item").with_child(field("title", "T1")))
            .with_child(field("language", "en"))
            .with_child(XmlTree::element("item").with_child(field("title", "T2"))));

        let mut out = Vec::new();
        let summary = render(&root, &mut out, &RenderOptions::default()).unwrap();
        assert_eq!(summary, RenderSummary { items: 2, skipped: 5 });

        let html = String::from_utf8(out).unwrap();
        let t1 = html.find("<td>T1</td>").unwrap();
        let t2 = html.find("<td>T2</td>").unwrap();
        assert!(t1 < t2);
        assert!(!html.contains("en</td>"));
    }

    #[test]
    fn test_text_labeled_item_is_skipped() {
        let root = rss(channel()
            .with_text("item")
            .with_child(
                XmlTree::element("item")
                    .with_text("title")
                    .with_child(field("title", "Real")),
            ));

        let mut out = Vec::new();
        let summary = render(&root, &mut out, &RenderOptions::default()).unwrap();
        assert_eq!(summary, RenderSummary { items: 1, skipped: 4 });

        let html = String::from_utf8(out).unwrap();
        assert!(html.contains("   <td>Real</td>\n"));
    }

    #[test]
    fn test_empty_root_is_precondition_error() {
        let err = render_to_string(&XmlTree::element("rss"), &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::Precondition { expected: "channel", .. }));
    }

    #[test]
    fn test_first_child_must_be_channel() {
        let root = XmlTree::element("rss").with_child(XmlTree::element("item"));
        let err = render_to_string(&root, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::Precondition { .. }));
    }

    #[test]
    fn test_structural_error_writes_nothing() {
        let root = rss(XmlTree::element("channel").with_child(field("title", "Feed")));
        let mut out = Vec::new();
        let err = render(&root, &mut out, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::MissingChannelElement("link")));
        assert!(out.is_empty());
    }

    #[test]
    fn test_version_not_checked_by_default() {
        let root = XmlTree::element("feed").with_child(channel());
        assert!(render_to_string(&root, &RenderOptions::default()).is_ok());
    }

    #[test]
    fn test_require_rss2_rejects_other_roots() {
        let options = RenderOptions { require_rss2: true };

        let wrong_label = XmlTree::element("feed")
            .with_attribute("version", "2.0")
            .with_child(channel());
        assert!(matches!(
            render_to_string(&wrong_label, &options),
            Err(RenderError::NotRss2 { .. })
        ));

        let wrong_version = XmlTree::element("rss")
            .with_attribute("version", "0.91")
            .with_child(channel());
        let err = render_to_string(&wrong_version, &options).unwrap_err();
        assert!(err.to_string().contains("0.91"));

        let no_version = XmlTree::element("rss").with_child(channel());
        assert!(render_to_string(&no_version, &options).is_err());
    }

    #[test]
    fn test_require_rss2_accepts_rss2() {
        let options = RenderOptions { require_rss2: true };
        assert!(render_to_string(&rss(channel()), &options).is_ok());
    }
}
