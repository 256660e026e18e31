use std::collections::{HashMap, HashSet};

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::HierarchyNode;

/// Arena slot: the node plus the handles of the children attached during a build.
#[derive(Debug)]
struct Slot<T> {
    node: T,
    children: Vec<Index>,
}

/// Id-keyed arena holding a working set while parent links are resolved.
///
/// Nodes are addressed by generational `Index` handles instead of references,
/// so attaching a node never needs a borrow of its parent. The id map follows
/// last-writer-wins for duplicate ids.
#[derive(Debug)]
pub struct NodeArena<T> {
    arena: Arena<Slot<T>>,
    by_id: HashMap<String, Index>,
    roots: Vec<Index>,
}

impl<T: HierarchyNode> Default for NodeArena<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T: HierarchyNode> NodeArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
            roots: Vec::new(),
        }
    }

    pub fn insert(&mut self, node: T) -> Index {
        let id = node.id().to_string();
        let idx = self.arena.insert(Slot {
            node,
            children: Vec::new(),
        });
        if let Some(previous) = self.by_id.insert(id, idx) {
            trace!(?previous, ?idx, "duplicate id, last writer wins");
        }
        idx
    }

    pub fn lookup(&self, id: &str) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, idx: Index) -> Option<&T> {
        self.arena.get(idx).map(|slot| &slot.node)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Record `child` as the next child of `parent`.
    pub fn attach(&mut self, parent: Index, child: Index) {
        if let Some(slot) = self.arena.get_mut(parent) {
            slot.children.push(child);
        }
    }

    pub fn push_root(&mut self, idx: Index) {
        self.roots.push(idx);
    }

    /// Assemble the owned forest from the recorded links.
    ///
    /// Children recorded in the arena are appended after any children the node
    /// already carried. Nodes unreachable from a root sit on a parent cycle and
    /// abort the whole call.
    #[instrument(level = "debug", skip(self), fields(nodes = self.len(), roots = self.roots.len()))]
    pub fn into_forest(mut self) -> TreeResult<Vec<T>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let order = self.post_order();
        if order.len() < self.len() {
            let reached: HashSet<Index> = order.iter().copied().collect();
            let stuck = self
                .arena
                .iter()
                .find(|(idx, _)| !reached.contains(idx))
                .map(|(_, slot)| slot.node.id().to_string())
                .unwrap_or_default();
            return Err(TreeError::CycleDetected(stuck));
        }

        let mut finished: HashMap<Index, T> = HashMap::with_capacity(order.len());
        for idx in order {
            let Some(Slot { mut node, children }) = self.arena.remove(idx) else {
                continue;
            };
            for child_idx in children {
                if let Some(child) = finished.remove(&child_idx) {
                    node.push_child(child);
                }
            }
            finished.insert(idx, node);
        }

        Ok(self
            .roots
            .iter()
            .filter_map(|idx| finished.remove(idx))
            .collect())
    }

    /// Post-order over everything reachable from the roots, children before parents.
    fn post_order(&self) -> Vec<Index> {
        let mut order = Vec::with_capacity(self.arena.len());
        let mut stack: Vec<(Index, bool)> = self.roots.iter().rev().map(|&idx| (idx, false)).collect();

        while let Some((idx, expanded)) = stack.pop() {
            if expanded {
                order.push(idx);
                continue;
            }
            if let Some(slot) = self.arena.get(idx) {
                stack.push((idx, true));
                for &child in slot.children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::Node;

    #[test]
    fn given_duplicate_ids_when_looking_up_then_last_writer_wins() {
        let mut arena = NodeArena::default();
        let _first = arena.insert(Node::new("a", None));
        let second = arena.insert(Node::new("a", Some("x")));
        assert_eq!(arena.lookup("a"), Some(second));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn given_empty_arena_when_assembling_then_empty_forest() {
        let arena = NodeArena::<Node>::default();
        assert!(arena.is_empty());
        assert!(arena.into_forest().unwrap().is_empty());
    }

    #[test]
    fn given_links_when_assembling_then_children_keep_attach_order() {
        let mut arena = NodeArena::default();
        let r = arena.insert(Node::new("r", None));
        let a = arena.insert(Node::new("a", Some("r")));
        let b = arena.insert(Node::new("b", Some("r")));
        arena.push_root(r);
        arena.attach(r, b);
        arena.attach(r, a);

        let forest = arena.into_forest().unwrap();
        assert_eq!(forest.len(), 1);
        let ids: Vec<_> = forest[0]
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn given_unreachable_loop_when_assembling_then_cycle_error() {
        let mut arena = NodeArena::default();
        let a = arena.insert(Node::new("a", Some("b")));
        let b = arena.insert(Node::new("b", Some("a")));
        arena.attach(a, b);
        arena.attach(b, a);

        let result = arena.into_forest();
        assert!(matches!(result, Err(TreeError::CycleDetected(_))));
    }
}
