//! Convert hierarchical record sets between two shapes:
//!
//! - a flat list where each node names its parent by id, and
//! - a nested forest where each node owns its direct children.
//!
//! [`domain::build_tree`] turns the flat list into a forest, bridging a single
//! missing ancestor for nodes that record their ancestry path.
//! [`domain::flatten`] turns a forest back into a pre-order list with fresh
//! `level`/`is_leaf` values. [`domain::sort_recursive`] orders every sibling
//! group with one comparator.
//!
//! ```ignore
//! use flattree::domain::{build_tree, flatten, Node};
//!
//! let nodes = vec![Node::new("r", None), Node::new("a", Some("r"))];
//! let roots = build_tree(nodes)?;
//! let flat = flatten(roots);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    build_tree, build_tree_sorted, flatten, sort_recursive, Ancestry, HierarchyNode, Node,
    TreeBuilder, TreeError, TreeResult,
};
