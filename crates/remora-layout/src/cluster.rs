//! Port of d3-hierarchy's `cluster` (dendrogram) layout.
//!
//! Behavior is pinned to upstream `d3-hierarchy` with the default separation
//! (`1` between siblings, `2` otherwise): all visible leaves land at the full
//! depth-axis extent regardless of subtree size, internal nodes sit at the
//! mean of their children's cross-axis positions, and the whole figure is
//! scaled into the requested bounding box. Axis roles follow
//! `d3.cluster().size([height, width])`: the cross axis scales to `height`
//! and the depth axis to `width`.

use crate::tree::{ClusterTree, NodeId};
use tracing::debug;

fn separation(tree: &ClusterTree, a: NodeId, b: NodeId) -> f64 {
    if tree.node(a).parent == tree.node(b).parent {
        1.0
    } else {
        2.0
    }
}

fn leaf_left(tree: &ClusterTree, mut id: NodeId) -> NodeId {
    while let Some(&first) = tree.node(id).children.first() {
        id = first;
    }
    id
}

fn leaf_right(tree: &ClusterTree, mut id: NodeId) -> NodeId {
    while let Some(&last) = tree.node(id).children.last() {
        id = last;
    }
    id
}

/// Assigns `x`/`y` to every visible node so that cross-axis coordinates lie in
/// `[0, height]` and depth-axis coordinates in `[0, width]` (root at 0,
/// visible leaves at `width`). Collapsed subtrees contribute nothing; their
/// nodes keep stale coordinates until expanded and laid out again. Equal-weight
/// siblings keep input order.
pub fn layout(tree: &mut ClusterTree, width: f64, height: f64) {
    let order = tree.visible_post_order();
    debug!(nodes = order.len(), width, height, "cluster layout pass");

    // First walk: leaves take increasing separation-spaced slots, internal
    // nodes the mean of their children; depth-axis value is the height of the
    // subtree (leaves 0).
    let mut previous: Option<NodeId> = None;
    let mut slot = 0.0;
    for &id in &order {
        let children = tree.node(id).children.clone();
        if children.is_empty() {
            let x = match previous {
                Some(prev) => {
                    slot += separation(tree, id, prev);
                    slot
                }
                None => 0.0,
            };
            let node = tree.node_mut(id);
            node.x = x;
            node.y = 0.0;
            previous = Some(id);
        } else {
            let mean_x = children.iter().map(|&c| tree.node(c).x).sum::<f64>()
                / children.len() as f64;
            let max_y = children
                .iter()
                .map(|&c| tree.node(c).y)
                .fold(f64::NEG_INFINITY, f64::max);
            let node = tree.node_mut(id);
            node.x = mean_x;
            node.y = 1.0 + max_y;
        }
    }

    // Second walk: normalize into the bounding box with half-separation
    // margins on the two flank leaves.
    let root = tree.root();
    let left = leaf_left(tree, root);
    let right = leaf_right(tree, root);
    let x0 = tree.node(left).x - separation(tree, left, right) / 2.0;
    let x1 = tree.node(right).x + separation(tree, right, left) / 2.0;
    let span = x1 - x0;
    let root_y = tree.node(root).y;

    for &id in &order {
        let node = tree.node(id);
        let x = (node.x - x0) / span * height;
        let depth_ratio = if root_y > 0.0 { node.y / root_y } else { 1.0 };
        let y = (1.0 - depth_ratio) * width;
        let node = tree.node_mut(id);
        node.x = x;
        node.y = y;
    }
}
