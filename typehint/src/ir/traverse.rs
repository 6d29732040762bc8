//! Post-order traversal over a [`TypeNode`] subtree.

use std::iter::FusedIterator;

use crate::ir::TypeNode;

/// Lazy post-order iterator returned by [`TypeNode::all_nodes`].
///
/// Yields every descendant before its parent, with the root last.
#[derive(Debug, Clone)]
pub struct AllNodes<'a> {
    // (node, index of the next child to descend into)
    stack: Vec<(&'a TypeNode, usize)>,
}

impl<'a> AllNodes<'a> {
    pub(crate) fn new(root: &'a TypeNode) -> Self {
        Self {
            stack: vec![(root, 0)],
        }
    }
}

impl<'a> Iterator for AllNodes<'a> {
    type Item = &'a TypeNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let node = top.0;
            if let Some(child) = node.children().get(top.1) {
                top.1 += 1;
                self.stack.push((child, 0));
            } else {
                self.stack.pop();
                return Some(node);
            }
        }
    }
}

impl FusedIterator for AllNodes<'_> {}
