#![forbid(unsafe_code)]

//! Headless rendering and interaction for the remora mapping editor.
//!
//! This crate owns everything between a laid-out cluster tree and the SVG
//! document: projecting layout coordinates into canvas space (with the
//! horizontal mirroring that makes the two trees face each other), keeping a
//! retained scene whose keyed entries update in place across re-layouts, the
//! drag-link gesture state machine, and SVG serialization.

pub mod drag;
pub mod project;
pub mod scene;
pub mod svg;

pub use drag::{DragGesture, DragOutcome};
pub use project::{ClusterProjection, ScreenTransform};
pub use scene::{MarkerHit, Scene};
pub use svg::{SvgRenderOptions, render_scene};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("screen transform is singular and cannot be inverted")]
    SingularTransform,
    #[error("unknown side: {side}")]
    UnknownSide { side: String },
    #[error("unknown node path on side {side}: {path}")]
    UnknownNode { side: String, path: String },
}

pub type Result<T> = std::result::Result<T, Error>;
