//! Non-destructive traversal of a forest.

use tracing::instrument;

use crate::domain::node::HierarchyNode;

/// Pre-order iterator yielding `(level, node)` without consuming the forest.
pub struct PreOrder<'a, T> {
    stack: Vec<(usize, &'a T)>,
}

impl<'a, T> PreOrder<'a, T> {
    fn new(roots: &'a [T]) -> Self {
        Self {
            stack: roots.iter().rev().map(|n| (0, n)).collect(),
        }
    }
}

impl<'a, T: HierarchyNode> Iterator for PreOrder<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (level, node) = self.stack.pop()?;
        if let Some(children) = node.children() {
            // Push children in reverse order for left-to-right traversal
            self.stack
                .extend(children.iter().rev().map(|c| (level + 1, c)));
        }
        Some((level, node))
    }
}

pub fn iter<T: HierarchyNode>(roots: &[T]) -> PreOrder<'_, T> {
    PreOrder::new(roots)
}

/// Recompute `level` and `is_leaf` on every node, keeping the tree intact.
#[instrument(level = "debug", skip_all, fields(roots = roots.len()))]
pub fn annotate<T: HierarchyNode>(roots: &mut [T]) {
    let mut pending: Vec<(&mut T, usize)> = roots.iter_mut().map(|n| (n, 0)).collect();

    while let Some((node, level)) = pending.pop() {
        let leaf = node.child_count() == 0;
        node.set_level(level);
        node.set_leaf(leaf);
        if let Some(children) = node.children_mut() {
            pending.extend(children.iter_mut().map(|c| (c, level + 1)));
        }
    }
}

/// Number of levels in the forest, 0 when empty.
pub fn depth<T: HierarchyNode>(roots: &[T]) -> usize {
    iter(roots).map(|(level, _)| level + 1).max().unwrap_or(0)
}

/// Ids of all nodes without children, in pre-order.
pub fn leaf_ids<T: HierarchyNode>(roots: &[T]) -> Vec<String> {
    iter(roots)
        .filter(|(_, node)| node.child_count() == 0)
        .map(|(_, node)| node.id().to_string())
        .collect()
}

pub fn count<T: HierarchyNode>(roots: &[T]) -> usize {
    iter(roots).count()
}
