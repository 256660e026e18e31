//! Depth-preserving sibling sort.

use std::cmp::Ordering;

use tracing::instrument;

use crate::domain::node::HierarchyNode;

/// Sort a sibling group, then the children of every member holding more than one child.
///
/// The sort is stable. A member with zero or one child is skipped together with
/// its whole subtree, so nested groups below a single-child chain keep their order.
/// Groups are processed from an explicit work stack, depth is unbounded.
#[instrument(level = "debug", skip_all, fields(siblings = siblings.len()))]
pub fn sort_recursive<T, F>(siblings: &mut [T], mut compare: F)
where
    T: HierarchyNode,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut pending: Vec<&mut [T]> = vec![siblings];

    while let Some(group) = pending.pop() {
        group.sort_by(&mut compare);
        for node in group {
            if node.child_count() <= 1 {
                continue;
            }
            if let Some(children) = node.children_mut() {
                pending.push(children.as_mut_slice());
            }
        }
    }
}
