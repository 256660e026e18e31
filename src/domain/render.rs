//! Terminal rendering of a forest via `termtree`.

use termtree::Tree;
use tracing::instrument;

use crate::domain::node::HierarchyNode;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: HierarchyNode> TreeNodeConvert for T {
    fn to_tree_string(&self) -> Tree<String> {
        render_with(self, &|node: &T| node.id().to_string())
    }
}

/// Render one subtree, labelling every node with `label`.
pub fn render_with<T, F>(node: &T, label: &F) -> Tree<String>
where
    T: HierarchyNode,
    F: Fn(&T) -> String,
{
    let leaves: Vec<_> = node
        .children()
        .map(|children| children.iter().map(|c| render_with(c, label)).collect())
        .unwrap_or_default();

    Tree::new(label(node)).with_leaves(leaves)
}

/// Render a whole forest below a synthetic `title` root.
#[instrument(level = "debug", skip_all, fields(roots = roots.len()))]
pub fn render_forest<T, F>(roots: &[T], title: &str, label: &F) -> Tree<String>
where
    T: HierarchyNode,
    F: Fn(&T) -> String,
{
    if roots.is_empty() {
        return Tree::new("Empty tree".to_string());
    }
    Tree::new(title.to_string()).with_leaves(roots.iter().map(|r| render_with(r, label)))
}
