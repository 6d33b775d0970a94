//! The IR tree node.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::serde_helpers::deserialize_unique_attrs;

/// A node of the IR tree.
///
/// Equality and hashing are structural: two nodes are equal when their
/// [canonical forms](Node::canonical) are identical, regardless of the order
/// in which attributes were inserted or of which code path built them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    tag: String,
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "deserialize_unique_attrs"
    )]
    attrs: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// Create a leaf node with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value under the same key.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Remove an attribute if present.
    pub fn without_attr(mut self, key: &str) -> Self {
        self.attrs.shift_remove(key);
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes, in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// The node's kind.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns true if this node has the given tag.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Look up an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn attr_count(&self) -> usize {
        self.attrs.len()
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        self.walk().count()
    }

    /// Height of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Rebuild this node with each child passed through `f`.
    pub fn map_children(mut self, f: impl FnMut(Node) -> Node) -> Self {
        self.children = self.children.into_iter().map(f).collect();
        self
    }

    /// Rebuild this node keeping only the children accepted by `keep`.
    pub fn retain_children(mut self, keep: impl FnMut(&Node) -> bool) -> Self {
        self.children.retain(keep);
        self
    }

    /// Rebuild the tree top-down.
    ///
    /// `f` is offered every node in pre-order. Returning `Some(replacement)`
    /// substitutes the whole subtree and stops the descent there; returning
    /// `None` keeps the node and continues into its children.
    pub fn rewrite(&self, f: &mut impl FnMut(&Node) -> Option<Node>) -> Node {
        if let Some(replacement) = f(self) {
            return replacement;
        }
        Node {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            children: self.children.iter().map(|c| c.rewrite(f)).collect(),
        }
    }

    pub(crate) fn sorted_attrs(&self) -> Vec<(&str, &str)> {
        let mut attrs: Vec<_> = self.attrs().collect();
        attrs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        attrs
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_node(
            node: &Node,
            depth: usize,
            f: &mut std::fmt::Formatter<'_>,
        ) -> std::fmt::Result {
            write!(f, "{}{}", "  ".repeat(depth), node.tag)?;
            for (key, value) in node.attrs() {
                write!(f, " {}={:?}", key, value)?;
            }
            writeln!(f)?;
            for child in &node.children {
                write_node(child, depth + 1, f)?;
            }
            Ok(())
        }

        write_node(self, 0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Node {
        Node::new("program")
            .with_child(Node::new("decl").with_attr("name", "x").with_child(
                Node::new("literal").with_attr("value", "1"),
            ))
            .with_child(Node::new("ref").with_attr("name", "x"))
    }

    #[test]
    fn test_builder_and_accessors() {
        let node = program();
        assert_eq!(node.tag(), "program");
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.children()[0].attr("name"), Some("x"));
        assert_eq!(node.children()[0].attr("missing"), None);
        assert!(node.children()[1].is("ref"));
        assert!(node.children()[1].is_leaf());
    }

    #[test]
    fn test_with_attr_replaces_value() {
        let node = Node::new("n").with_attr("k", "1").with_attr("k", "2");
        assert_eq!(node.attr_count(), 1);
        assert_eq!(node.attr("k"), Some("2"));
    }

    #[test]
    fn test_size_and_depth() {
        let node = program();
        assert_eq!(node.size(), 4);
        assert_eq!(node.depth(), 3);
        assert_eq!(Node::new("leaf").depth(), 1);
    }

    #[test]
    fn test_rewrite_replaces_subtree() {
        let node = program();
        let rewritten = node.rewrite(&mut |n| {
            n.is("ref")
                .then(|| Node::new("literal").with_attr("value", "1"))
        });

        assert_eq!(rewritten.children()[1].tag(), "literal");
        // the input is untouched
        assert_eq!(node.children()[1].tag(), "ref");
    }

    #[test]
    fn test_retain_children() {
        let node = program().retain_children(|c| !c.is("decl"));
        assert_eq!(node.children().len(), 1);
        assert!(node.children()[0].is("ref"));
    }

    #[test]
    fn test_display_outline() {
        let rendered = program().to_string();
        assert_eq!(
            rendered,
            "program\n  decl name=\"x\"\n    literal value=\"1\"\n  ref name=\"x\"\n"
        );
    }
}
