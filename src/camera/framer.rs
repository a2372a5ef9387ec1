//! Camera placement derived from model bounds.
//!
//! Framing assumes the model has already been recentred on the world origin
//! (the loader guarantees this), so every preset targets the origin rather
//! than the bounds centre.
//!
//! - **All**: eye at `(d, d, d)`, a three-quarter view whose look is the same
//!   for any model aspect ratio.
//! - **Top**: eye at `(0, 2d, 0)`.
//! - **Side**: eye at `(2d, 0, 0)`.
//!
//! `d` is the largest bounds extent, or the fallback distance when that
//! extent is zero so the eye never lands on the target.

use glam::Vec3;

use super::core::{CameraState, Projection, ProjectionMode, ProjectionParams};
use crate::bounds::{compute_size, BoundingVolume};
use crate::options::CameraOptions;

/// Distance used for zero-extent models when the configured fallback is
/// unusable.
pub const FALLBACK_DISTANCE: f32 = 10.0;

/// Vertical field of view used when the configured one is unusable.
const DEFAULT_FOVY: f32 = 75.0;

/// Derives camera states and projection parameters from bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFramer {
    fovy: f32,
    frustum_height: f32,
    znear: f32,
    zfar: f32,
    fallback_distance: f32,
}

impl CameraFramer {
    /// Build a framer from camera options, replacing non-positive or
    /// non-finite values with defaults.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let positive_or = |v: f32, default: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                default
            }
        };
        let defaults = CameraOptions::default();
        let znear = positive_or(options.znear, defaults.znear);
        let zfar = positive_or(options.zfar, defaults.zfar).max(znear * 2.0);
        Self {
            fovy: positive_or(options.fovy, DEFAULT_FOVY).min(179.0),
            frustum_height: positive_or(
                options.ortho_frustum_height,
                defaults.ortho_frustum_height,
            ),
            znear,
            zfar,
            fallback_distance: positive_or(
                options.fallback_distance,
                FALLBACK_DISTANCE,
            ),
        }
    }

    /// Projection parameters for `mode` at the given aspect ratio.
    #[must_use]
    pub fn projection(
        &self,
        mode: ProjectionMode,
        aspect: f32,
    ) -> ProjectionParams {
        let projection = match mode {
            ProjectionMode::Perspective => {
                Projection::Perspective { fovy: self.fovy }
            }
            ProjectionMode::Orthographic => Projection::Orthographic {
                frustum_height: self.frustum_height,
            },
        };
        ProjectionParams {
            projection,
            aspect,
            znear: self.znear,
            zfar: self.zfar,
        }
    }

    /// Scalar driving every preset: the largest bounds extent, or the
    /// fallback distance for a zero-extent model.
    #[must_use]
    pub fn framing_distance(&self, bounds: &BoundingVolume) -> f32 {
        let max_dimension = compute_size(bounds).max_dimension;
        if max_dimension > 0.0 && max_dimension.is_finite() {
            max_dimension
        } else {
            self.fallback_distance
        }
    }

    /// Three-quarter view of the whole model.
    #[must_use]
    pub fn frame_all(
        &self,
        bounds: &BoundingVolume,
        mode: ProjectionMode,
        aspect: f32,
    ) -> CameraState {
        let d = self.framing_distance(bounds);
        self.looking_at_origin(Vec3::splat(d), mode, aspect)
    }

    /// Straight-down view.
    #[must_use]
    pub fn frame_top(
        &self,
        bounds: &BoundingVolume,
        mode: ProjectionMode,
        aspect: f32,
    ) -> CameraState {
        let d = self.framing_distance(bounds);
        self.looking_at_origin(Vec3::new(0.0, 2.0 * d, 0.0), mode, aspect)
    }

    /// View along the -X axis.
    #[must_use]
    pub fn frame_side(
        &self,
        bounds: &BoundingVolume,
        mode: ProjectionMode,
        aspect: f32,
    ) -> CameraState {
        let d = self.framing_distance(bounds);
        self.looking_at_origin(Vec3::new(2.0 * d, 0.0, 0.0), mode, aspect)
    }

    fn looking_at_origin(
        &self,
        position: Vec3,
        mode: ProjectionMode,
        aspect: f32,
    ) -> CameraState {
        let projection = self.projection(mode, aspect);
        let state = CameraState::new(position, Vec3::ZERO, projection);
        log::debug!(
            "framed camera at {position} ({mode:?}, aspect {aspect:.3})"
        );
        state
    }
}

impl Default for CameraFramer {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}
