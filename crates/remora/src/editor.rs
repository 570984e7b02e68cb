//! The editing session: two facing trees, one scene, one mapping list.

use remora_core::geom::{CanvasPoint, ScreenPoint};
use remora_core::{Mapping, MappingSession, SidedField, convert};
use remora_layout::{ClusterTree, layout};
use remora_render::{
    ClusterProjection, DragGesture, DragOutcome, MarkerHit, Scene, ScreenTransform,
    SvgRenderOptions, render_scene,
};
use serde_json::Value;
use tracing::debug;

pub const INPUT_SIDE: &str = "input";
pub const OUTPUT_SIDE: &str = "output";

// Canvas split: each tree gets half the canvas minus a margin for labels,
// the input tree starts 40px in, and the mirrored output tree starts just
// right of the center line.
const CLUSTER_MARGIN: f64 = 200.0;
const INPUT_OFFSET: f64 = 40.0;
const OUTPUT_GAP: f64 = 160.0;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown side: {side}")]
    UnknownSide { side: String },
    #[error("unknown node path on side {side}: {path}")]
    UnknownNode { side: String, path: String },
    #[error("a drag gesture is already in progress")]
    GestureInProgress,
    #[error("no drag gesture in progress")]
    NoGesture,
    #[error(transparent)]
    Render(#[from] remora_render::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One editing session over an input record and an output record.
///
/// All methods are synchronous and run to completion, so a toggle's re-layout
/// and re-render are atomic with respect to further input.
pub struct MappingEditor {
    width: f64,
    height: f64,
    input: ClusterTree,
    output: ClusterTree,
    scene: Scene,
    session: MappingSession,
    transform: ScreenTransform,
    gesture: Option<DragGesture>,
}

impl MappingEditor {
    /// Converts both records, lays the trees out face to face inside the
    /// `width` x `height` canvas and paints the initial scene.
    pub fn new(input: &Value, output: &Value, width: f64, height: f64) -> Self {
        let mut editor = Self {
            width,
            height,
            input: ClusterTree::build(&convert(INPUT_SIDE, input, None)),
            output: ClusterTree::build(&convert(OUTPUT_SIDE, output, None)),
            scene: Scene::new(),
            session: MappingSession::new(INPUT_SIDE),
            transform: ScreenTransform::identity(),
            gesture: None,
        };
        editor.relayout();
        debug!(width, height, "mapping editor created");
        editor
    }

    fn cluster_width(&self) -> f64 {
        self.width / 2.0 - CLUSTER_MARGIN
    }

    fn input_projection(&self) -> ClusterProjection {
        ClusterProjection {
            cluster_width: self.cluster_width(),
            offset_width: INPUT_OFFSET,
            offset_height: 0.0,
            invert_axis: false,
        }
    }

    fn output_projection(&self) -> ClusterProjection {
        ClusterProjection {
            cluster_width: self.cluster_width(),
            offset_width: self.width / 2.0 + OUTPUT_GAP,
            offset_height: 0.0,
            invert_axis: true,
        }
    }

    fn relayout(&mut self) {
        let cluster_width = self.cluster_width();
        layout(&mut self.input, cluster_width, self.height);
        layout(&mut self.output, cluster_width, self.height);
        let input_projection = self.input_projection();
        let output_projection = self.output_projection();
        self.scene.sync_side(&self.input, input_projection);
        self.scene.sync_side(&self.output, output_projection);
    }

    fn tree(&self, side: &str) -> Result<&ClusterTree> {
        match side {
            INPUT_SIDE => Ok(&self.input),
            OUTPUT_SIDE => Ok(&self.output),
            _ => Err(Error::UnknownSide {
                side: side.to_string(),
            }),
        }
    }

    /// Describes how the canvas currently sits inside the pointer coordinate
    /// system; defaults to identity.
    pub fn set_screen_transform(&mut self, transform: ScreenTransform) {
        self.transform = transform;
    }

    /// Collapses or expands a node and re-renders the affected side only.
    /// Toggling a leaf changes nothing and skips the re-layout.
    pub fn toggle(&mut self, side: &str, path: &str) -> Result<()> {
        self.tree(side)?;
        let cluster_width = self.cluster_width();
        let height = self.height;
        let projection = if side == INPUT_SIDE {
            self.input_projection()
        } else {
            self.output_projection()
        };
        let tree = if side == INPUT_SIDE {
            &mut self.input
        } else {
            &mut self.output
        };

        let id = tree.find(path).ok_or_else(|| Error::UnknownNode {
            side: side.to_string(),
            path: path.to_string(),
        })?;
        if tree.toggle(id) {
            layout(tree, cluster_width, height);
            self.scene.sync_side(tree, projection);
        }
        Ok(())
    }

    /// Pointer-down on a node marker. One gesture at a time.
    pub fn begin_drag(&mut self, side: &str, path: &str, pointer: ScreenPoint) -> Result<()> {
        if self.gesture.is_some() {
            return Err(Error::GestureInProgress);
        }
        self.gesture = Some(DragGesture::start(
            &mut self.scene,
            side,
            path,
            pointer,
            &self.transform,
        )?);
        Ok(())
    }

    /// Pointer movement while held. A stray move without an active gesture is
    /// ignored, the way an unpressed pointer generates no drag events.
    pub fn drag_by(&mut self, dx: f64, dy: f64) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.move_by(&mut self.scene, dx, dy);
        }
    }

    /// Pointer-up. On a committed gesture the resolved pair is recorded (the
    /// `"input"`-side node always ends up as `sourceNode`) and the full list
    /// is broadcast to subscribers.
    pub fn end_drag(&mut self, pointer: ScreenPoint) -> Result<DragOutcome> {
        let gesture = self.gesture.take().ok_or(Error::NoGesture)?;
        let outcome = gesture.end(&mut self.scene, pointer, &self.transform)?;

        if let DragOutcome::Committed { source, target } = &outcome {
            let from = self.sided_field(source)?;
            let to = self.sided_field(target)?;
            self.session.record(from, to);
        }
        Ok(outcome)
    }

    fn sided_field(&self, hit: &MarkerHit) -> Result<SidedField> {
        let tree = self.tree(&hit.side)?;
        let id = tree.find(&hit.path).ok_or_else(|| Error::UnknownNode {
            side: hit.side.clone(),
            path: hit.path.clone(),
        })?;
        Ok(SidedField {
            side: hit.side.clone(),
            field: tree.field_ref(id),
        })
    }

    /// Canvas position of a node's marker, if that node is currently visible.
    /// Useful for hosts that need to place their own widgets, and for replay.
    pub fn marker_center(&self, side: &str, path: &str) -> Option<CanvasPoint> {
        self.scene.marker_center(side, path)
    }

    /// Recomputes both layouts and projections for a new bounding box.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.relayout();
        debug!(width, height, "canvas resized");
    }

    /// Serializes the current scene.
    pub fn svg(&self) -> String {
        render_scene(
            &self.scene,
            &SvgRenderOptions {
                width: self.width,
                height: self.height,
                ..Default::default()
            },
        )
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mappings(&self) -> &[Mapping] {
        self.session.mappings()
    }

    /// Registers a subscriber for mapping-list broadcasts: the full list
    /// after every committed drag, and the empty list on reset. Nothing is
    /// emitted at subscription time.
    pub fn subscribe(&mut self, callback: impl FnMut(&[Mapping]) + 'static) {
        self.session.subscribe(callback);
    }

    /// Clears the mapping list and broadcasts the empty list. Does not touch
    /// trees, collapse state or an in-flight gesture.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}
