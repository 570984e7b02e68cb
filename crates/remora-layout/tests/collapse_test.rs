use remora_core::convert;
use remora_layout::{ClusterTree, layout};
use serde_json::json;
use std::collections::BTreeMap;

fn visible_coords(tree: &ClusterTree) -> BTreeMap<String, (f64, f64)> {
    let mut out = BTreeMap::new();
    for id in tree.visible() {
        let n = tree.node(id);
        out.insert(tree.node_path(id), (n.x, n.y));
    }
    out
}

fn build(value: &serde_json::Value) -> ClusterTree {
    ClusterTree::build(&convert("input", value, None))
}

#[test]
fn toggle_on_a_leaf_is_a_no_op() {
    let mut tree = build(&json!({"a": 1}));
    let leaf = tree.find("/a").unwrap();

    assert!(!tree.toggle(leaf));
    assert!(tree.node(leaf).children.is_empty());
    assert!(tree.node(leaf).cached_children.is_empty());
    assert!(!tree.node(leaf).collapsed);
}

#[test]
fn collapsed_subtree_is_laid_out_as_a_leaf() {
    let mut tree = build(&json!({"a": 1, "b": {"c": 2, "d": 3}}));
    let b = tree.find("/b").unwrap();

    assert!(tree.toggle(b));
    layout(&mut tree, 2.0, 3.0);

    assert_eq!(
        visible_coords(&tree),
        [
            ("/".to_string(), (1.5, 0.0)),
            ("/a".to_string(), (0.75, 2.0)),
            ("/b".to_string(), (2.25, 2.0)),
        ]
        .into()
    );
    assert!(tree.node(b).collapsed);
    // The full child list survives the collapse.
    assert_eq!(tree.node(b).cached_children.len(), 2);
}

#[test]
fn double_toggle_restores_children_and_layout() {
    let mut tree = build(&json!({"a": 1, "b": {"c": 2, "d": 3}, "e": {"f": 4}}));
    let b = tree.find("/b").unwrap();

    layout(&mut tree, 400.0, 300.0);
    let before_children = tree.node(b).children.clone();
    let before_coords = visible_coords(&tree);

    assert!(tree.toggle(b));
    layout(&mut tree, 400.0, 300.0);
    assert!(tree.toggle(b));
    layout(&mut tree, 400.0, 300.0);

    assert_eq!(tree.node(b).children, before_children);
    assert!(!tree.node(b).collapsed);
    assert_eq!(visible_coords(&tree), before_coords);
}

#[test]
fn visible_excludes_collapsed_descendants_only() {
    let mut tree = build(&json!({"a": {"x": 1, "y": {"z": 2}}, "b": 3}));
    let a = tree.find("/a").unwrap();

    tree.toggle(a);
    let paths: Vec<String> = tree.visible().into_iter().map(|id| tree.node_path(id)).collect();
    assert_eq!(paths, vec!["/", "/a", "/b"]);

    tree.toggle(a);
    let paths: Vec<String> = tree.visible().into_iter().map(|id| tree.node_path(id)).collect();
    assert_eq!(paths, vec!["/", "/a", "/a/x", "/a/y", "/a/y/z", "/b"]);
}

#[test]
fn nested_collapse_states_are_independent() {
    let mut tree = build(&json!({"a": {"x": {"deep": 1}, "y": 2}}));
    let a = tree.find("/a").unwrap();
    let x = tree.find("/a/x").unwrap();

    // Collapse the inner node, then the outer one, then expand the outer one:
    // the inner node must still be collapsed.
    tree.toggle(x);
    tree.toggle(a);
    tree.toggle(a);

    let paths: Vec<String> = tree.visible().into_iter().map(|id| tree.node_path(id)).collect();
    assert_eq!(paths, vec!["/", "/a", "/a/x", "/a/y"]);
    assert!(tree.node(x).collapsed);
}
