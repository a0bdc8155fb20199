use super::XmlTree;

/// Finds the index of the first child element of `node` whose tag equals `tag`.
///
/// The match is exact and case-sensitive. Text children never match, even when
/// their text equals `tag`. Absence is an ordinary result, not an error: a node
/// without children, or without a matching child, yields `None`.
pub fn find_child(node: &XmlTree, tag: &str) -> Option<usize> {
    node.children()
        .iter()
        .position(|child| child.is_tag() && child.label() == tag)
}

/// Returns the first child of `node` labeled `tag`, resolved through [`find_child`].
pub fn child_element<'a>(node: &'a XmlTree, tag: &str) -> Option<&'a XmlTree> {
    find_child(node, tag).and_then(|index| node.child(index))
}
