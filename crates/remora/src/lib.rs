#![forbid(unsafe_code)]

//! `remora` is a headless visual mapping editor: it renders two arbitrary
//! JSON records as facing dendrograms and turns pointer-drag gestures between
//! their fields into serializable mapping records.
//!
//! The heavy lifting lives in the member crates (`remora-core`,
//! `remora-layout`, `remora-render`); this crate ties them together in
//! [`MappingEditor`], one value per editing session.

mod editor;

pub use editor::{Error, INPUT_SIDE, MappingEditor, OUTPUT_SIDE, Result};
pub use remora_core::geom;
pub use remora_core::{
    DataNode, FieldRef, Mapping, MappingSession, NodeValue, ScalarKind, SidedField, convert,
    to_value,
};
pub use remora_layout::{ClusterNode, ClusterTree, NodeId, layout};

pub mod render {
    pub use remora_render::{
        ClusterProjection, DragGesture, DragOutcome, MarkerHit, Scene, ScreenTransform,
        SvgRenderOptions, render_scene,
    };
}
