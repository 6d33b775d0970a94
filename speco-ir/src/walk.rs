//! Pre-order traversal.

use crate::Node;

/// Pre-order iterator over a subtree, created by [`Node::walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl Node {
    /// Visit this node and all of its descendants in pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Find the first node (pre-order) matching the predicate.
    pub fn find(&self, mut pred: impl FnMut(&Node) -> bool) -> Option<&Node> {
        self.walk().find(|n| pred(n))
    }

    /// Count the nodes in this subtree matching the predicate.
    pub fn count(&self, mut pred: impl FnMut(&Node) -> bool) -> usize {
        self.walk().filter(|n| pred(n)).count()
    }
}
