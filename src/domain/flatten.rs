//! Tree to flat list conversion.

use tracing::{instrument, trace};

use crate::domain::node::HierarchyNode;

/// Flatten a forest into pre-order, recomputing `level` and `is_leaf`.
///
/// Every node is detached from its children on the way (`children` becomes
/// absent), so the input tree no longer exists afterwards. Roots get level 0,
/// each child its parent's level plus one. An explicit stack keeps deep trees
/// off the call stack.
#[instrument(level = "debug", skip_all, fields(roots = roots.len()))]
pub fn flatten<T: HierarchyNode>(roots: Vec<T>) -> Vec<T> {
    let mut flat = Vec::with_capacity(roots.len());
    let mut pending: Vec<(T, usize)> = roots.into_iter().rev().map(|n| (n, 0)).collect();

    while let Some((mut node, level)) = pending.pop() {
        let children = node.take_children();
        node.set_level(level);
        node.set_leaf(children.as_ref().map_or(true, Vec::is_empty));
        trace!(id = node.id(), level, leaf = node.is_leaf(), "flattened");
        flat.push(node);

        if let Some(children) = children {
            pending.extend(children.into_iter().rev().map(|c| (c, level + 1)));
        }
    }
    flat
}
