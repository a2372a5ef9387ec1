//! Camera system for viewing a reconstructed model.
//!
//! Provides the camera state with a tagged perspective/orthographic
//! projection, bounds-driven framing presets, orbit navigation and frustum
//! visibility tests.

/// Core camera struct, projection types and GPU uniform.
pub mod core;
/// Camera placement from model bounds.
pub mod framer;
/// View frustum extraction and intersection tests.
pub mod frustum;
/// Orbit, pan and zoom navigation.
pub mod orbit;

pub use self::core::{
    CameraState, CameraUniform, Projection, ProjectionMode, ProjectionParams,
};
pub use framer::CameraFramer;
