//! Tests for TreeBuilder (flat list to forest)

use flattree::domain::{build_tree, HierarchyNode, Node, TreeBuilder, TreeError};
use flattree::util::testing;
use rstest::rstest;

fn ids(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

fn child_ids(node: &Node) -> Vec<&str> {
    node.children.as_deref().map(ids).unwrap_or_default()
}

#[test]
fn given_empty_input_when_building_then_returns_empty() {
    testing::init_test_setup();
    let roots = build_tree::<Node>(Vec::new()).unwrap();
    assert!(roots.is_empty());
}

#[test]
fn given_flat_hierarchy_when_building_then_children_nested_in_input_order() {
    // Arrange
    let nodes = vec![
        Node::new("r", None),
        Node::new("a", Some("r")),
        Node::new("a1", Some("a")),
        Node::new("b", Some("r")),
        Node::new("s", None),
    ];

    // Act
    let roots = build_tree(nodes).unwrap();

    // Assert
    assert_eq!(ids(&roots), vec!["r", "s"]);
    assert_eq!(child_ids(&roots[0]), vec!["a", "b"]);
    assert_eq!(child_ids(&roots[0].children.as_ref().unwrap()[0]), vec!["a1"]);
    assert_eq!(roots[1].children, None);
}

#[rstest]
#[case::without_path(Node::new("A", Some("A")))]
#[case::with_path(Node::new("A", Some("A")).with_path("r/x/A", "/"))]
#[case::with_broken_path(Node::new("A", Some("A")).with_path("", ""))]
fn given_self_referencing_node_when_building_then_root(#[case] node: Node) {
    let nodes = vec![Node::new("r", None), node];
    let roots = build_tree(nodes).unwrap();
    assert_eq!(ids(&roots), vec!["r", "A"]);
    assert_eq!(roots[1].child_count(), 0);
}

#[test]
fn given_missing_parent_with_path_when_building_then_attached_two_levels_up() {
    // r
    // └── a        (b's parent "missing" was filtered out upstream)
    let nodes = vec![
        Node::new("r", None),
        Node::new("a", Some("r")),
        Node::new("b", Some("missing")).with_path("r/a/b", "/"),
    ];

    let roots = build_tree(nodes).unwrap();

    assert_eq!(ids(&roots), vec!["r"]);
    assert_eq!(child_ids(&roots[0]), vec!["a", "b"]);
    assert_eq!(roots[0].children.as_ref().unwrap()[0].child_count(), 0);
}

#[test]
fn given_two_missing_ancestors_when_building_then_no_compensation() {
    let nodes = vec![
        Node::new("r", None),
        Node::new("b", Some("a")).with_path("r/x/a/b", "/"),
    ];

    let roots = build_tree(nodes).unwrap();

    assert_eq!(ids(&roots), vec!["r", "b"]);
    assert_eq!(roots[0].child_count(), 0);
}

#[rstest]
#[case::first_position("b/x/y")]
#[case::second_position("r/b")]
#[case::not_in_path("r/x/y")]
fn given_node_too_close_to_path_root_when_building_then_root(#[case] path: &str) {
    let nodes = vec![
        Node::new("r", None),
        Node::new("b", Some("missing")).with_path(path, "/"),
    ];
    let roots = build_tree(nodes).unwrap();
    assert_eq!(ids(&roots), vec!["r", "b"]);
}

#[rstest]
#[case::empty_path("", "/")]
#[case::empty_delimiter("r/a/b", "")]
fn given_broken_ancestry_when_compensating_then_configuration_error(
    #[case] path: &str,
    #[case] delimiter: &str,
) {
    let nodes = vec![
        Node::new("r", None),
        Node::new("b", Some("missing")).with_path(path, delimiter),
    ];

    let result = build_tree(nodes);

    assert!(matches!(result, Err(TreeError::Configuration { ref id, .. }) if id == "b"));
}

#[test]
fn given_broken_ancestry_on_linked_node_when_building_then_not_checked() {
    let nodes = vec![
        Node::new("r", None),
        Node::new("a", Some("r")).with_path("", ""),
    ];
    let roots = build_tree(nodes).unwrap();
    assert_eq!(child_ids(&roots[0]), vec!["a"]);
}

#[test]
fn given_custom_delimiter_when_compensating_then_tokenizes_with_it() {
    let nodes = vec![
        Node::new("root.1", None),
        Node::new("leaf.3", Some("gone")).with_path("root.1|mid.2|leaf.3", "|"),
    ];
    let roots = build_tree(nodes).unwrap();
    assert_eq!(child_ids(&roots[0]), vec!["leaf.3"]);
}

#[test]
fn given_null_parent_without_path_when_building_then_root() {
    let roots = build_tree(vec![Node::new("a", None), Node::new("b", Some(""))]).unwrap();
    assert_eq!(ids(&roots), vec!["a", "b"]);
}

#[test]
fn given_parent_cycle_when_building_then_cycle_error() {
    let nodes = vec![
        Node::new("r", None),
        Node::new("a", Some("b")),
        Node::new("b", Some("a")),
    ];

    let result = build_tree(nodes);

    assert!(matches!(result, Err(TreeError::CycleDetected(_))));
}

#[test]
fn given_duplicate_ids_when_building_then_children_go_to_last_duplicate() {
    let nodes = vec![
        Node::new("p", None).with_attribute("copy", 1),
        Node::new("p", None).with_attribute("copy", 2),
        Node::new("c", Some("p")),
    ];

    let roots = build_tree(nodes).unwrap();

    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].child_count(), 0);
    assert_eq!(roots[1].attribute("copy"), Some(&2.into()));
    assert_eq!(child_ids(&roots[1]), vec!["c"]);
}

#[test]
fn given_node_with_existing_children_when_building_then_new_children_appended() {
    let nodes = vec![
        Node::new("r", None).with_children(vec![Node::new("old", Some("r"))]),
        Node::new("new", Some("r")),
    ];
    let roots = build_tree(nodes).unwrap();
    assert_eq!(child_ids(&roots[0]), vec!["old", "new"]);
}

#[test]
fn given_default_builder_when_building_then_levels_stay_stale() {
    let mut deep = Node::new("a", Some("r"));
    deep.level = 5;
    deep.is_leaf = false;

    let roots = TreeBuilder::new()
        .build(vec![Node::new("r", None), deep])
        .unwrap();

    let a = &roots[0].children.as_ref().unwrap()[0];
    assert_eq!(a.level, 5);
    assert!(!a.is_leaf);
}
