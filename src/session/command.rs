//! The viewer's complete interactive vocabulary.
//!
//! Every UI control (navigation buttons, projection selector, container
//! resize, mouse gestures, appearance sliders) is represented as a
//! `ViewerCommand`. Consumers construct commands and pass them to
//! [`ViewerSession::execute`](super::ViewerSession::execute).

use glam::Vec2;

use crate::camera::ProjectionMode;

/// A discrete or parameterized operation the viewer can perform.
///
/// ```ignore
/// session.execute(ViewerCommand::TopView);
/// session.execute(ViewerCommand::Resize { width: 800, height: 600 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    // ── Presets ─────────────────────────────────────────────────────
    /// Frame the whole model from the three-quarter view.
    ResetView,

    /// Look straight down on the model.
    TopView,

    /// Look at the model along the -X axis.
    SideView,

    // ── Projection / viewport ───────────────────────────────────────
    /// Switch projection mode, keeping the current camera pose.
    SetProjection(ProjectionMode),

    /// Flip between perspective and orthographic.
    ToggleProjection,

    /// The container was resized.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },

    // ── Free navigation ─────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of mouse movement.
    Orbit {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of mouse movement.
    Pan {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    /// Navigation speed slider value (100 = default sensitivity).
    SetNavigationSpeed(f32),

    // ── Appearance ──────────────────────────────────────────────────
    /// Show or hide mesh materials.
    SetTexturesVisible(bool),

    /// Brightness as a fraction (1.0 = 100%), scales ambient light.
    SetBrightness(f32),
}

impl ViewerCommand {
    /// Whether the command needs a model to act on. Such commands are
    /// no-ops until a load has completed.
    #[must_use]
    pub fn requires_model(&self) -> bool {
        matches!(self, Self::ResetView | Self::TopView | Self::SideView)
    }
}
