//! Domain layer: node capabilities and the flat/tree conversions
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod flatten;
pub mod node;
pub mod render;
pub mod sort;
pub mod walk;

pub use arena::NodeArena;
pub use builder::{build_tree, build_tree_sorted, TreeBuilder};
pub use error::{TreeError, TreeResult};
pub use flatten::flatten;
pub use node::{Ancestry, HierarchyNode, Node};
pub use render::{render_forest, render_with, TreeNodeConvert};
pub use sort::sort_recursive;
pub use walk::{annotate, count, depth, leaf_ids, PreOrder};
