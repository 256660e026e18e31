//! Tree builder: reconstructs parent/child links from a flat working set.

use std::cmp::Ordering;
use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::NodeArena;
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::HierarchyNode;
use crate::domain::sort::sort_recursive;
use crate::domain::walk::annotate;

type Comparator<'c, T> = Box<dyn Fn(&T, &T) -> Ordering + 'c>;

/// Where a node ends up in the assembled forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Child(Index),
    Root,
}

/// Constructs a forest from nodes that reference their parent by id.
///
/// A node whose parent is missing from the working set (or that names itself
/// as parent) cannot be linked directly. If it carries its ancestry path, it is
/// re-attached to the ancestor recorded two positions above it, which bridges
/// exactly one missing level. Otherwise it becomes a root.
///
/// `level` and `is_leaf` are left as they came in unless [`relevel`](Self::relevel)
/// is enabled; [`flatten`](crate::domain::flatten) always recomputes them.
pub struct TreeBuilder<'c, T> {
    comparator: Option<Comparator<'c, T>>,
    relevel: bool,
}

impl<T> Default for TreeBuilder<'_, T> {
    fn default() -> Self {
        Self {
            comparator: None,
            relevel: false,
        }
    }
}

impl<T> fmt::Debug for TreeBuilder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("sorted", &self.comparator.is_some())
            .field("relevel", &self.relevel)
            .finish()
    }
}

impl<'c, T: HierarchyNode> TreeBuilder<'c, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort roots and, recursively, every sibling group with `compare`.
    pub fn sort_by<F>(mut self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'c,
    {
        self.comparator = Some(Box::new(compare));
        self
    }

    /// Recompute `level` and `is_leaf` on the assembled forest.
    pub fn relevel(mut self, relevel: bool) -> Self {
        self.relevel = relevel;
        self
    }

    /// Build the forest, consuming the working set.
    ///
    /// Returns the root-level nodes in input order (or comparator order).
    /// An empty input is returned unchanged.
    ///
    /// # Errors
    /// * [`TreeError::Configuration`] when a node needing compensation has an
    ///   empty path or delimiter.
    /// * [`TreeError::CycleDetected`] when parent links loop back on themselves.
    ///
    /// No partial forest is returned on error.
    #[instrument(level = "debug", skip_all, fields(nodes = nodes.len()))]
    pub fn build(&self, nodes: Vec<T>) -> TreeResult<Vec<T>> {
        if nodes.is_empty() {
            return Ok(nodes);
        }

        let mut arena = NodeArena::with_capacity(nodes.len());
        let handles: Vec<Index> = nodes.into_iter().map(|n| arena.insert(n)).collect();

        // Decide every placement against the complete index before linking anything
        let placements = handles
            .iter()
            .map(|&idx| Self::place(&arena, idx).map(|p| (idx, p)))
            .collect::<TreeResult<Vec<_>>>()?;

        for (idx, placement) in placements {
            match placement {
                Placement::Child(parent) => arena.attach(parent, idx),
                Placement::Root => arena.push_root(idx),
            }
        }

        let mut roots = arena.into_forest()?;

        if let Some(compare) = &self.comparator {
            sort_recursive(&mut roots, |a, b| compare(a, b));
        }
        if self.relevel {
            annotate(&mut roots);
        }

        debug!(roots = roots.len(), "forest built");
        Ok(roots)
    }

    fn place(arena: &NodeArena<T>, idx: Index) -> TreeResult<Placement> {
        let Some(node) = arena.get(idx) else {
            return Ok(Placement::Root);
        };
        let id = node.id();

        match node.parent_id() {
            Some(parent_id) if parent_id == id => {
                debug!(id, "node references itself as parent, kept as root");
                return Ok(Placement::Root);
            }
            Some(parent_id) => {
                if let Some(parent) = arena.lookup(parent_id) {
                    trace!(id, parent_id, "attached to parent");
                    return Ok(Placement::Child(parent));
                }
                debug!(id, parent_id, "parent missing from working set");
            }
            None => {}
        }

        Self::compensate(arena, node)
    }

    /// Bridge a single missing ancestor using the node's recorded path.
    fn compensate(arena: &NodeArena<T>, node: &T) -> TreeResult<Placement> {
        let id = node.id();
        let Some(ancestry) = node.ancestry() else {
            return Ok(Placement::Root);
        };
        if ancestry.delimiter.is_empty() {
            return Err(TreeError::Configuration {
                id: id.to_string(),
                reason: "split delimiter must not be empty".to_string(),
            });
        }
        if ancestry.path.is_empty() {
            return Err(TreeError::Configuration {
                id: id.to_string(),
                reason: "path must not be empty".to_string(),
            });
        }

        match ancestry.grandparent_of(id) {
            Some(ancestor_id) => match arena.lookup(ancestor_id) {
                Some(ancestor) => {
                    debug!(id, ancestor_id, "bridged missing parent");
                    Ok(Placement::Child(ancestor))
                }
                None => {
                    debug!(id, ancestor_id, "ancestor also missing, kept as root");
                    Ok(Placement::Root)
                }
            },
            None => Ok(Placement::Root),
        }
    }
}

/// Build a forest without sorting.
pub fn build_tree<T: HierarchyNode>(nodes: Vec<T>) -> TreeResult<Vec<T>> {
    TreeBuilder::new().build(nodes)
}

/// Build a forest and sort every sibling group with `compare`.
pub fn build_tree_sorted<T, F>(nodes: Vec<T>, compare: F) -> TreeResult<Vec<T>>
where
    T: HierarchyNode,
    F: Fn(&T, &T) -> Ordering,
{
    TreeBuilder::new().sort_by(compare).build(nodes)
}
