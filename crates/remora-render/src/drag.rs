//! The drag-link gesture state machine.
//!
//! One [`DragGesture`] value exists per in-flight gesture and carries all of
//! its state explicitly (anchor, pointer offset, accumulated position), so the
//! three phases share no hidden captured variables. The lifecycle is
//! `start -> move_by* -> end`, ending in either a committed source/target pair
//! or a discard when the pointer is released over empty canvas.

use crate::project::ScreenTransform;
use crate::scene::{Connection, DragArtifacts, MarkerHit, Scene};
use crate::{Error, Result};
use remora_core::geom::{CanvasPoint, CanvasVector, ScreenPoint, canvas_vector};
use tracing::debug;

/// Outcome of a finished gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released over a marker: a permanent connection was drawn and the pair
    /// should be handed to the mapping recorder.
    Committed { source: MarkerHit, target: MarkerHit },
    /// Released over empty canvas; no mapping is created.
    Discarded,
}

/// One pointer-down→move→up interaction dragging a connector out of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    source: MarkerHit,
    /// Canvas position of the source marker; the temporary path stays pinned
    /// here for the whole gesture.
    anchor: CanvasPoint,
    /// Current position of the temporary marker (anchor + pointer offset +
    /// accumulated movement).
    position: CanvasPoint,
}

impl DragGesture {
    /// Pointer-down on a node marker.
    ///
    /// The pointer rarely sits exactly on the marker's anchor, so the
    /// constant pointer−anchor offset is captured once here and the temporary
    /// marker starts under the pointer rather than snapping to the anchor.
    pub fn start(
        scene: &mut Scene,
        side: &str,
        path: &str,
        pointer: ScreenPoint,
        transform: &ScreenTransform,
    ) -> Result<Self> {
        let side_scene = scene.side(side).ok_or_else(|| Error::UnknownSide {
            side: side.to_string(),
        })?;
        let anchor = side_scene
            .markers
            .get(path)
            .ok_or_else(|| Error::UnknownNode {
                side: side.to_string(),
                path: path.to_string(),
            })?
            .center;

        let pointer_canvas = transform.to_canvas(pointer)?;
        let offset: CanvasVector = pointer_canvas - anchor;
        let position = anchor + offset;

        scene.set_drag(DragArtifacts {
            anchor,
            marker: position,
        });
        debug!(side, path, "drag started");

        Ok(Self {
            source: MarkerHit {
                side: side.to_string(),
                path: path.to_string(),
            },
            anchor,
            position,
        })
    }

    /// Pointer movement while held: the temporary marker follows the movement
    /// delta and the temporary path is redrawn from the fixed anchor.
    pub fn move_by(&mut self, scene: &mut Scene, dx: f64, dy: f64) {
        self.position += canvas_vector(dx, dy);
        scene.set_drag(DragArtifacts {
            anchor: self.anchor,
            marker: self.position,
        });
    }

    /// Pointer-up. Removes the temporary artifacts, hit-tests the release
    /// point and, over a marker, draws the permanent connection to that
    /// marker's own canvas position (which already carries its side's offsets
    /// and mirroring).
    pub fn end(
        self,
        scene: &mut Scene,
        pointer: ScreenPoint,
        transform: &ScreenTransform,
    ) -> Result<DragOutcome> {
        scene.clear_drag();
        let release = transform.to_canvas(pointer)?;

        let Some(target) = scene.marker_at(release) else {
            debug!(side = %self.source.side, path = %self.source.path, "drag discarded");
            return Ok(DragOutcome::Discarded);
        };

        // The target center lookup cannot fail: the hit came from this scene.
        let target_center = scene
            .marker_center(&target.side, &target.path)
            .unwrap_or(release);
        scene.push_connection(Connection {
            source: self.anchor,
            target: target_center,
        });
        debug!(
            source = %self.source.path,
            target = %target.path,
            "drag committed"
        );

        Ok(DragOutcome::Committed {
            source: self.source,
            target,
        })
    }

    pub fn source(&self) -> &MarkerHit {
        &self.source
    }
}
