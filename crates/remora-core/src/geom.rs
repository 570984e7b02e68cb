//! Typed 2-D geometry shared across the workspace.
//!
//! Layout space is the raw dendrogram coordinate system (`x` along the sibling
//! axis, `y` along the depth axis, both pre-offset). Canvas space is the pixel
//! coordinate system of the rendered SVG. Screen space is whatever coordinate
//! system pointer events arrive in; the canvas may be scaled/translated inside
//! it, so the two are related by an affine transform.

/// Unit tag for pre-projection cluster coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpace;

/// Unit tag for pixel coordinates on the rendered canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpace;

/// Unit tag for raw pointer/screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpace;

pub type LayoutPoint = euclid::Point2D<f64, LayoutSpace>;
pub type CanvasPoint = euclid::Point2D<f64, CanvasSpace>;
pub type CanvasVector = euclid::Vector2D<f64, CanvasSpace>;
pub type ScreenPoint = euclid::Point2D<f64, ScreenSpace>;
pub type CanvasToScreen = euclid::Transform2D<f64, CanvasSpace, ScreenSpace>;
pub type ScreenToCanvas = euclid::Transform2D<f64, ScreenSpace, CanvasSpace>;

pub fn layout_point(x: f64, y: f64) -> LayoutPoint {
    euclid::point2(x, y)
}

pub fn canvas_point(x: f64, y: f64) -> CanvasPoint {
    euclid::point2(x, y)
}

pub fn canvas_vector(x: f64, y: f64) -> CanvasVector {
    euclid::vec2(x, y)
}

pub fn screen_point(x: f64, y: f64) -> ScreenPoint {
    euclid::point2(x, y)
}
