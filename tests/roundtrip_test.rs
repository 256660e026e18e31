//! Flatten/build round trips on continuous hierarchies

use flattree::domain::{build_tree, flatten, HierarchyNode, Node};
use rstest::{fixture, rstest};

fn snapshot(flat: &[Node]) -> Vec<(String, Option<String>, usize, bool)> {
    flat.iter()
        .map(|n| {
            (
                n.id.clone(),
                n.parent_id().map(str::to_string),
                n.level,
                n.is_leaf,
            )
        })
        .collect()
}

fn node(id: &str, parent: &str, children: Vec<Node>) -> Node {
    let parent = (!parent.is_empty()).then_some(parent);
    let node = Node::new(id, parent);
    if children.is_empty() {
        node
    } else {
        node.with_children(children)
    }
}

#[fixture]
fn org_chart() -> Vec<Node> {
    vec![
        node(
            "ceo",
            "",
            vec![
                node(
                    "cto",
                    "ceo",
                    vec![node("dev1", "cto", vec![]), node("dev2", "cto", vec![])],
                ),
                node("cfo", "ceo", vec![node("acct", "cfo", vec![])]),
            ],
        ),
        node("board", "", vec![]),
    ]
}

#[rstest]
fn given_continuous_tree_when_round_tripping_then_structure_preserved(org_chart: Vec<Node>) {
    let first = flatten(org_chart);
    let expected = snapshot(&first);

    let rebuilt = build_tree(first).unwrap();
    let second = flatten(rebuilt);

    assert_eq!(snapshot(&second), expected);
}

#[rstest]
fn given_round_trip_then_levels_match_parent_plus_one(org_chart: Vec<Node>) {
    let flat = flatten(build_tree(flatten(org_chart)).unwrap());

    for n in &flat {
        match n.parent_id() {
            None => assert_eq!(n.level, 0),
            Some(parent_id) => {
                let parent = flat.iter().find(|p| p.id == parent_id).unwrap();
                assert_eq!(n.level, parent.level + 1, "node {}", n.id);
                assert!(!parent.is_leaf);
            }
        }
    }
}

#[rstest]
#[case::single_root(vec![node("only", "", vec![])])]
#[case::chain(vec![node("a", "", vec![node("b", "a", vec![node("c", "b", vec![])])])])]
#[case::wide(vec![node("r", "", (0..10).map(|i| node(&format!("k{i}"), "r", vec![])).collect())])]
fn given_shapes_when_round_tripping_then_ids_preserved(#[case] tree: Vec<Node>) {
    let first = flatten(tree);
    let expected = snapshot(&first);
    assert_eq!(snapshot(&flatten(build_tree(first).unwrap())), expected);
}

#[test]
fn given_json_flat_list_when_building_then_serializes_as_tree() {
    let json = r#"[
        {"id": "r"},
        {"id": "a", "parentId": "r", "name": "A"},
        {"id": "b", "parentId": "gone", "path": "r/gone/b", "splitDelimiter": "/"}
    ]"#;
    let nodes: Vec<Node> = serde_json::from_str(json).unwrap();

    let roots = build_tree(nodes).unwrap();
    let value = serde_json::to_value(&roots).unwrap();

    assert_eq!(value[0]["id"], "r");
    assert_eq!(value[0]["children"][0]["name"], "A");
    assert_eq!(value[0]["children"][1]["id"], "b");
}
