use thiserror::Error;

/// Errors raised when reading values out of an [`XmlTree`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The element has no text child to read a value from.
    #[error("<{0}> has no text content")]
    NoText(String),
}

/// Whether a node is an element (tag) or a run of character data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
}

/// A read-only labeled tree produced by [`parse_document`](super::parse_document).
///
/// For an element node the label is the tag name; for a text node it is the
/// literal text. Text nodes never have children or attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlTree {
    kind: NodeKind,
    label: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlTree>,
}

impl XmlTree {
    /// Creates an element node with no attributes and no children.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element,
            label: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a text (leaf) node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            label: text.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: XmlTree) -> Self {
        self.push_child(child);
        self
    }

    /// Appends a single text child; shorthand for `with_child(XmlTree::text(..))`.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(XmlTree::text(text))
    }

    /// Sets an attribute, replacing any earlier value under the same name.
    ///
    /// No-op on text nodes.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if self.kind == NodeKind::Text {
            return;
        }
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Appends a child. No-op on text nodes, which are always leaves.
    pub fn push_child(&mut self, child: XmlTree) {
        if self.kind == NodeKind::Element {
            self.children.push(child);
        }
    }

    pub(crate) fn last_child_mut(&mut self) -> Option<&mut XmlTree> {
        self.children.last_mut()
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        if self.kind == NodeKind::Text {
            self.label.push_str(text);
        }
    }

    /// Trims each text child and removes the ones left empty.
    pub(crate) fn trim_text_children(&mut self) {
        self.children.retain_mut(|child| {
            if child.kind != NodeKind::Text {
                return true;
            }
            let trimmed = child.label.trim();
            if trimmed.len() != child.label.len() {
                child.label = trimmed.to_string();
            }
            !child.label.is_empty()
        });
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_tag(&self) -> bool {
        self.kind == NodeKind::Element
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[XmlTree] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&XmlTree> {
        self.children.get(index)
    }

    pub fn number_of_children(&self) -> usize {
        self.children.len()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the text content of an element: the label of its first child.
    ///
    /// Fails when the element has no children or the first child is itself an
    /// element. Calling this on a text node fails too, since text nodes are leaves.
    pub fn text_of(&self) -> Result<&str, TreeError> {
        match self.children.first() {
            Some(first) if first.kind == NodeKind::Text => Ok(&first.label),
            _ => Err(TreeError::NoText(self.label.clone())),
        }
    }
}
