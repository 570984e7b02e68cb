//! Retained scene with keyed, idempotent updates.
//!
//! The scene mirrors the structure of a d3 data-joined canvas: one group per
//! tree side (markers, links, labels), a shared connections group and at most
//! one temporary drag marker/path pair. Every per-side collection is an
//! insertion-ordered map keyed by node path, so re-syncing after a
//! collapse/expand updates existing entries in place, drops vanished ones and
//! appends new ones. Syncing twice with the same tree is a no-op.

use crate::project::ClusterProjection;
use indexmap::IndexMap;
use remora_core::geom::{CanvasPoint, layout_point};
use remora_layout::ClusterTree;
use std::collections::HashSet;
use tracing::trace;

pub const MARKER_RADIUS: f64 = 4.0;
const LABEL_NUDGE_X: f64 = 10.0;
const LABEL_NUDGE_Y: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub center: CanvasPoint,
    pub radius: f64,
}

/// One curved parent→child path, keyed by the child's node path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkPath {
    pub source: CanvasPoint,
    pub target: CanvasPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub anchor: CanvasPoint,
    pub text: String,
    /// `text-anchor: end` when true (non-inverted side), `start` otherwise.
    pub anchor_end: bool,
    pub dx: f64,
    pub dy: f64,
}

/// A committed source→target connector across the two trees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub source: CanvasPoint,
    pub target: CanvasPoint,
}

/// Temporary artifacts of an in-flight drag: a marker following the pointer
/// and a path from the fixed anchor to that marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragArtifacts {
    pub anchor: CanvasPoint,
    pub marker: CanvasPoint,
}

/// A marker resolved by hit-testing; identifies a node on one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerHit {
    pub side: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SideScene {
    pub projection: ClusterProjection,
    pub markers: IndexMap<String, Marker>,
    pub links: IndexMap<String, LinkPath>,
    pub labels: IndexMap<String, Label>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    sides: IndexMap<String, SideScene>,
    connections: Vec<Connection>,
    drag: Option<DragArtifacts>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins one tree's current layout into the scene under its side id.
    pub fn sync_side(&mut self, tree: &ClusterTree, projection: ClusterProjection) {
        let side = self
            .sides
            .entry(tree.side().to_string())
            .or_insert_with(|| SideScene {
                projection,
                markers: IndexMap::new(),
                links: IndexMap::new(),
                labels: IndexMap::new(),
            });
        side.projection = projection;

        let mut live: HashSet<String> = HashSet::new();
        for id in tree.visible() {
            let node = tree.node(id);
            let path = tree.node_path(id);
            let center = projection.to_canvas(layout_point(node.x, node.y));

            side.markers.insert(
                path.clone(),
                Marker {
                    center,
                    radius: MARKER_RADIUS,
                },
            );
            side.labels.insert(
                path.clone(),
                Label {
                    anchor: center,
                    text: format!("{}: {}", node.key, node.type_name),
                    anchor_end: !projection.invert_axis,
                    dx: if projection.invert_axis {
                        LABEL_NUDGE_X
                    } else {
                        -LABEL_NUDGE_X
                    },
                    dy: LABEL_NUDGE_Y,
                },
            );
            live.insert(path);
        }

        let mut live_links: HashSet<String> = HashSet::new();
        for (source, target) in tree.links() {
            let path = tree.node_path(target);
            let s = tree.node(source);
            let t = tree.node(target);
            side.links.insert(
                path.clone(),
                LinkPath {
                    source: projection.to_canvas(layout_point(s.x, s.y)),
                    target: projection.to_canvas(layout_point(t.x, t.y)),
                },
            );
            live_links.insert(path);
        }

        side.markers.retain(|path, _| live.contains(path));
        side.labels.retain(|path, _| live.contains(path));
        side.links.retain(|path, _| live_links.contains(path));
        trace!(side = tree.side(), markers = side.markers.len(), "scene side synced");
    }

    pub fn side(&self, side: &str) -> Option<&SideScene> {
        self.sides.get(side)
    }

    pub fn sides(&self) -> impl Iterator<Item = (&String, &SideScene)> {
        self.sides.iter()
    }

    pub fn marker_center(&self, side: &str, path: &str) -> Option<CanvasPoint> {
        Some(self.sides.get(side)?.markers.get(path)?.center)
    }

    /// Topmost marker whose radius covers `p`, if any. Later-drawn markers
    /// win, matching SVG element stacking.
    pub fn marker_at(&self, p: CanvasPoint) -> Option<MarkerHit> {
        let mut hit = None;
        for (side, scene) in &self.sides {
            for (path, marker) in &scene.markers {
                let d = marker.center - p;
                if d.x * d.x + d.y * d.y <= marker.radius * marker.radius {
                    hit = Some(MarkerHit {
                        side: side.clone(),
                        path: path.clone(),
                    });
                }
            }
        }
        hit
    }

    pub(crate) fn set_drag(&mut self, artifacts: DragArtifacts) {
        self.drag = Some(artifacts);
    }

    pub(crate) fn clear_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag(&self) -> Option<&DragArtifacts> {
        self.drag.as_ref()
    }

    pub(crate) fn push_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}
