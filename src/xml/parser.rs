use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::XmlTree;

/// SEC-003: Maximum element nesting depth.
/// Prevents unbounded stack growth from maliciously nested documents.
pub const MAX_XML_DEPTH: usize = 64;

/// Errors that can occur while building an [`XmlTree`] from XML text.
#[derive(Debug, Error)]
pub enum XmlError {
    /// SEC-003: Nesting depth exceeds safety limit.
    #[error("XML nesting depth exceeds maximum of {0} levels")]
    MaxDepthExceeded(usize),

    /// The document is not well-formed.
    #[error("XML parse error: {0}")]
    Malformed(String),

    /// The document contains no root element.
    #[error("XML document has no root element")]
    Empty,
}

fn malformed(e: impl std::fmt::Display) -> XmlError {
    XmlError::Malformed(e.to_string())
}

/// Parses an XML document into a labeled tree.
///
/// Element names and attribute values are decoded and unescaped. Text and
/// CDATA become text nodes, with adjacent fragments merged into one node so
/// that [`XmlTree::text_of`] sees the whole value. Each merged run is trimmed
/// once when its element closes, and whitespace-only runs are dropped.
/// Comments, processing instructions, the XML declaration and DOCTYPE are
/// ignored.
///
/// # Security
///
/// SEC-002: `quick-xml` (0.37) never parses `<!ENTITY>` declarations. Only the
/// five XML builtins and numeric character references resolve; any custom
/// entity reference fails with [`XmlError::Malformed`].
pub fn parse_document(content: &str) -> Result<XmlTree, XmlError> {
    // No per-event trimming: whitespace between adjacent text and CDATA
    // fragments must survive the merge. Runs are trimmed on `Event::End`.
    let mut reader = Reader::from_str(content);

    let mut buf = Vec::new();
    let mut open: Vec<XmlTree> = Vec::new();
    let mut root: Option<XmlTree> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                // SEC-003: Reject excessively nested documents
                if open.len() >= MAX_XML_DEPTH {
                    return Err(XmlError::MaxDepthExceeded(MAX_XML_DEPTH));
                }
                open.push(element_from_start(&e, &reader)?);
            }
            Ok(Event::Empty(e)) => {
                let element = element_from_start(&e, &reader)?;
                attach(&mut open, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let mut element = open
                    .pop()
                    .ok_or_else(|| malformed("closing tag without matching opening tag"))?;
                element.trim_text_children();
                attach(&mut open, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(malformed)?;
                push_text(&mut open, &text);
            }
            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e).map_err(malformed)?;
                push_text(&mut open, text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(e)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.last() {
        return Err(XmlError::Malformed(format!(
            "unclosed element <{}>",
            unclosed.label()
        )));
    }

    root.ok_or(XmlError::Empty)
}

fn element_from_start(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlTree, XmlError> {
    let qname = e.name();
    let name = std::str::from_utf8(qname.as_ref()).map_err(malformed)?;
    let mut element = XmlTree::element(name);

    for attr_result in e.attributes() {
        let attr = match attr_result {
            Ok(attr) => attr,
            Err(e) => {
                tracing::warn!(element = %name, error = %e, "Skipping malformed XML attribute");
                continue;
            }
        };
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(malformed)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(malformed)?;
        element.set_attribute(key, value);
    }

    Ok(element)
}

/// Hands a finished element to its parent, or makes it the document root.
fn attach(
    open: &mut [XmlTree],
    root: &mut Option<XmlTree>,
    element: XmlTree,
) -> Result<(), XmlError> {
    match open.last_mut() {
        Some(parent) => {
            parent.push_child(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError::Malformed(format!(
            "multiple root elements (second is <{}>)",
            element.label()
        ))),
    }
}

fn push_text(open: &mut [XmlTree], text: &str) {
    if text.is_empty() {
        return;
    }
    let Some(parent) = open.last_mut() else {
        if !text.trim().is_empty() {
            tracing::debug!("Ignoring character data outside the root element");
        }
        return;
    };
    match parent.last_child_mut() {
        Some(last) if !last.is_tag() => last.append_text(text),
        _ => parent.push_child(XmlTree::text(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <!-- generated -->
  <channel>
    <title>Feed</title>
    <link>http://feed</link>
    <description>Desc</description>
    <item>
      <title>T1</title>
      <source url="http://s">S</source>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss_structure() {
        let root = parse_document(RSS).expect("Failed to parse RSS document");
        assert_eq!(root.label(), "rss");
        assert_eq!(root.attribute("version"), Some("2.0"));
        assert_eq!(root.number_of_children(), 1);

        let channel = root.child(0).unwrap();
        assert_eq!(channel.label(), "channel");
        let labels: Vec<_> = channel.children().iter().map(XmlTree::label).collect();
        assert_eq!(labels, ["title", "link", "description", "item"]);
        assert_eq!(channel.child(0).unwrap().text_of(), Ok("Feed"));

        let source = channel.child(3).unwrap().child(1).unwrap();
        assert_eq!(source.attribute("url"), Some("http://s"));
        assert_eq!(source.text_of(), Ok("S"));
    }

    #[test]
    fn test_self_closing_element() {
        let root = parse_document(r#"<item><enclosure url="http://e"/></item>"#).unwrap();
        let enclosure = root.child(0).unwrap();
        assert!(enclosure.is_tag());
        assert_eq!(enclosure.number_of_children(), 0);
        assert_eq!(enclosure.attribute("url"), Some("http://e"));
    }

    #[test]
    fn test_entities_unescaped() {
        let root =
            parse_document(r#"<title a="x&amp;y">Tom &amp; Jerry &#169; &lt;3</title>"#).unwrap();
        assert_eq!(root.text_of(), Ok("Tom & Jerry \u{a9} <3"));
        assert_eq!(root.attribute("a"), Some("x&y"));
    }

    #[test]
    fn test_cdata_merged_with_text() {
        let root = parse_document("<description>Hello <![CDATA[<b>world</b>]]></description>")
            .unwrap();
        assert_eq!(root.number_of_children(), 1);
        assert_eq!(root.text_of(), Ok("Hello <b>world</b>"));
    }

    #[test]
    fn test_cdata_keeps_surrounding_spaces() {
        let root = parse_document(
            "<description>Read more <![CDATA[about <b>this</b>]]> today</description>",
        )
        .unwrap();
        assert_eq!(root.text_of(), Ok("Read more about <b>this</b> today"));
    }

    #[test]
    fn test_merged_text_trimmed_once() {
        let root = parse_document("<title>\n   Padded <![CDATA[value]]>  \n</title>").unwrap();
        assert_eq!(root.text_of(), Ok("Padded value"));
    }

    #[test]
    fn test_whitespace_between_elements_dropped() {
        let root = parse_document("<item>\n  <title>T</title>\n  <link>L</link>\n</item>").unwrap();
        assert_eq!(root.number_of_children(), 2);
        assert!(root.children().iter().all(XmlTree::is_tag));
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(parse_document(""), Err(XmlError::Empty)));
        assert!(matches!(
            parse_document(r#"<?xml version="1.0"?>"#),
            Err(XmlError::Empty)
        ));
    }

    #[test]
    fn test_malformed_xml_error() {
        assert!(parse_document("<not valid xml").is_err());
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("<a>").is_err());
        assert!(parse_document("<a/><b/>").is_err());
    }

    #[test]
    fn test_xxe_entity_not_expanded() {
        // SEC-002: custom entities must never expand to external content
        let doc = r#"<?xml version="1.0"?>
<!DOCTYPE rss [<!ENTITY xxe SYSTEM "file:///etc/passwd">]>
<rss><channel><title>&xxe;</title></channel></rss>"#;

        match parse_document(doc) {
            Ok(root) => {
                let title = root.child(0).and_then(|c| c.child(0)).unwrap();
                assert!(!title.text_of().unwrap_or("").contains("root:"));
            }
            Err(e) => assert!(matches!(e, XmlError::Malformed(_))),
        }
    }

    #[test]
    fn test_deeply_nested_rejected() {
        let mut doc = String::new();
        for _ in 0..(MAX_XML_DEPTH + 1) {
            doc.push_str("<x>");
        }
        for _ in 0..(MAX_XML_DEPTH + 1) {
            doc.push_str("</x>");
        }
        let err = parse_document(&doc).unwrap_err();
        assert!(matches!(err, XmlError::MaxDepthExceeded(MAX_XML_DEPTH)));
        assert!(err.to_string().contains("64"));
    }

    #[test]
    fn test_nesting_at_depth_limit_allowed() {
        let mut doc = String::new();
        for _ in 0..MAX_XML_DEPTH {
            doc.push_str("<x>");
        }
        for _ in 0..MAX_XML_DEPTH {
            doc.push_str("</x>");
        }
        assert!(parse_document(&doc).is_ok());
    }
}
