//! Arena-backed collapsible cluster trees.
//!
//! A [`ClusterTree`] flattens a converted [`DataNode`] tree into a `Vec` of
//! nodes addressed by [`NodeId`] indices. Parent links are indices too, so the
//! structure has no reference cycles and no interior mutability. Collapsing a
//! node clears its active `children` while `cached_children` keeps the full
//! list for later restoration; visibility is always derived by walking active
//! children from the root.

use remora_core::{DataNode, FieldRef};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Stable handle of a node inside one [`ClusterTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct ClusterNode {
    pub key: String,
    /// Root-level group id (`"input"` / `"output"`), identical across a tree.
    pub side: String,
    pub type_name: &'static str,
    /// Distance from the root (root = 0). Fixed at build time.
    pub depth: usize,
    /// Cross-axis (sibling ordering) coordinate, set by the layout pass.
    pub x: f64,
    /// Depth-axis coordinate, set by the layout pass.
    pub y: f64,
    pub parent: Option<NodeId>,
    /// Active children. Empty exactly when the node is collapsed or a leaf.
    pub children: Vec<NodeId>,
    /// Full child list, retained across collapse.
    pub cached_children: Vec<NodeId>,
    pub collapsed: bool,
}

impl ClusterNode {
    pub fn is_leaf(&self) -> bool {
        self.cached_children.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ClusterTree {
    nodes: Vec<ClusterNode>,
    root: NodeId,
    by_path: FxHashMap<String, NodeId>,
}

impl ClusterTree {
    pub fn build(data: &DataNode) -> Self {
        let mut nodes = Vec::new();
        let root = push_node(&mut nodes, data, None, 0);
        let mut tree = Self {
            nodes,
            root,
            by_path: FxHashMap::default(),
        };
        for id in tree.descendants(tree.root) {
            tree.by_path.insert(tree.node_path(id), id);
        }
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Side id of the tree (shared by every node).
    pub fn side(&self) -> &str {
        &self.nodes[self.root.0].side
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &ClusterNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut ClusterNode {
        &mut self.nodes[id.0]
    }

    /// All nodes reachable through `cached_children`, preorder.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.nodes[id.0].cached_children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Currently visible nodes (active children from the root), preorder.
    /// A collapsed node is itself visible; its subtree is not.
    pub fn visible(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.nodes[id.0].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Currently visible nodes in post-order (children before parents),
    /// the traversal order the cluster layout pass requires.
    pub fn visible_post_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.post_order_into(self.root, &mut out);
        out
    }

    fn post_order_into(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[id.0].children {
            self.post_order_into(child, out);
        }
        out.push(id);
    }

    /// Visible parent→child links, preorder by source.
    pub fn links(&self) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        for id in self.visible() {
            for &child in &self.nodes[id.0].children {
                out.push((id, child));
            }
        }
        out
    }

    /// Toggles a node between expanded and collapsed. Returns `false` (and
    /// does nothing) for a true leaf; callers can skip re-layout in that case.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        let node = &mut self.nodes[id.0];
        if !node.children.is_empty() {
            node.children.clear();
            node.collapsed = true;
            debug!(key = %node.key, "subtree collapsed");
            true
        } else if !node.cached_children.is_empty() {
            node.children = node.cached_children.clone();
            node.collapsed = false;
            debug!(key = %node.key, "subtree expanded");
            true
        } else {
            false
        }
    }

    /// Addressing path of a node within its tree: `"/"` for the root, else
    /// the `/`-joined keys below the root (e.g. `"/b/c"`). Unique because
    /// sibling keys are unique in JSON.
    pub fn node_path(&self, id: NodeId) -> String {
        if id == self.root {
            return "/".to_string();
        }
        let mut keys = vec![self.nodes[id.0].key.as_str()];
        let mut cursor = self.nodes[id.0].parent;
        while let Some(parent) = cursor {
            if parent == self.root {
                break;
            }
            keys.push(self.nodes[parent.0].key.as_str());
            cursor = self.nodes[parent.0].parent;
        }
        keys.reverse();
        format!("/{}", keys.join("/"))
    }

    /// Root-relative parent path used in mapping records: slash-prefixed
    /// `/`-joined ancestor keys, the root's own key included, the node itself
    /// excluded. Children of a root labeled `input` get `"/input"`; the root
    /// has no ancestors and gets `""`.
    pub fn parent_path(&self, id: NodeId) -> String {
        let mut keys = Vec::new();
        let mut cursor = self.nodes[id.0].parent;
        while let Some(parent) = cursor {
            keys.push(self.nodes[parent.0].key.as_str());
            cursor = self.nodes[parent.0].parent;
        }
        if keys.is_empty() {
            return String::new();
        }
        keys.reverse();
        format!("/{}", keys.join("/"))
    }

    /// Looks a node up by its addressing path (see [`Self::node_path`]).
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    /// The field identifier a mapping record stores for this node.
    pub fn field_ref(&self, id: NodeId) -> FieldRef {
        let node = &self.nodes[id.0];
        FieldRef {
            parent_path: self.parent_path(id),
            key: node.key.clone(),
            type_name: node.type_name.to_string(),
        }
    }
}

fn push_node(
    nodes: &mut Vec<ClusterNode>,
    data: &DataNode,
    parent: Option<NodeId>,
    depth: usize,
) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(ClusterNode {
        key: data.key.clone(),
        side: data.side.clone(),
        type_name: data.type_name(),
        depth,
        x: 0.0,
        y: 0.0,
        parent,
        children: Vec::new(),
        cached_children: Vec::new(),
        collapsed: false,
    });

    for child in data.children() {
        let child_id = push_node(nodes, child, Some(id), depth + 1);
        nodes[id.0].children.push(child_id);
        nodes[id.0].cached_children.push(child_id);
    }

    id
}
