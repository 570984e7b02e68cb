//! Layout-space → canvas-space projection and pointer coordinate recovery.

use crate::{Error, Result};
use remora_core::geom::{
    CanvasPoint, CanvasToScreen, LayoutPoint, ScreenPoint, canvas_point,
};

/// Projects cluster layout coordinates onto the canvas.
///
/// The layout's cross axis (`x`) becomes the vertical canvas coordinate and
/// the depth axis (`y`) the horizontal one. With `invert_axis` the depth axis
/// is mirrored across `cluster_width`, which renders the output tree as a
/// mirror image facing the input tree. Offsets shift the whole tree to its
/// slot on the shared canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterProjection {
    pub cluster_width: f64,
    pub offset_width: f64,
    pub offset_height: f64,
    pub invert_axis: bool,
}

impl ClusterProjection {
    pub fn to_canvas(&self, p: LayoutPoint) -> CanvasPoint {
        let depth = if self.invert_axis {
            self.cluster_width - p.y + self.offset_width
        } else {
            p.y + self.offset_width
        };
        canvas_point(depth, p.x + self.offset_height)
    }
}

/// The canvas's current placement inside the pointer coordinate system.
///
/// The hosting document may scale or translate the canvas, so pointer events
/// arrive in a different space than the one we draw in. This wraps the
/// canvas→screen affine matrix and recovers canvas coordinates through its
/// inverse (the headless equivalent of `getScreenCTM().inverse()`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    canvas_to_screen: CanvasToScreen,
}

impl ScreenTransform {
    pub fn new(canvas_to_screen: CanvasToScreen) -> Self {
        Self { canvas_to_screen }
    }

    /// Canvas rendered 1:1 at the screen origin.
    pub fn identity() -> Self {
        Self {
            canvas_to_screen: CanvasToScreen::identity(),
        }
    }

    /// Converts a pointer position into canvas coordinates. Fails when the
    /// matrix is singular (degenerate scaling), which no real canvas placement
    /// produces.
    pub fn to_canvas(&self, p: ScreenPoint) -> Result<CanvasPoint> {
        let inverse = self
            .canvas_to_screen
            .inverse()
            .ok_or(Error::SingularTransform)?;
        Ok(inverse.transform_point(p))
    }
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self::identity()
    }
}
