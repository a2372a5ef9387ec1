//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! held buttons, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw events and
//! [`ViewerSession::execute`](crate::ViewerSession::execute).

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::options::Options;
use crate::session::ViewerCommand;

/// Maps key strings to [`ViewerCommand`] variants.
///
/// Key strings use the DOM `KeyboardEvent.code` / `winit::KeyCode` debug
/// format: `"KeyR"`, `"KeyT"`, `"Escape"`, etc.
///
/// Only *discrete* commands make sense as key bindings. Parameterized
/// commands like `Orbit` are produced by the mouse gesture interpreter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`ViewerCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Frame the whole model.
    ResetView,
    /// Top-down preset.
    TopView,
    /// Side preset.
    SideView,
    /// Flip perspective / orthographic.
    ToggleProjection,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`ViewerCommand`].
    fn to_command(self) -> ViewerCommand {
        match self {
            Self::ResetView => ViewerCommand::ResetView,
            Self::TopView => ViewerCommand::TopView,
            Self::SideView => ViewerCommand::SideView,
            Self::ToggleProjection => ViewerCommand::ToggleProjection,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyCommandTag::ResetView),
            ("KeyT".into(), KeyCommandTag::TopView),
            ("KeyS".into(), KeyCommandTag::SideView),
            ("KeyP".into(), KeyCommandTag::ToggleProjection),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewerCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: &str) {
        let _ = self.bindings.remove(key);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`ViewerCommand`]s.
///
/// Left-drag orbits, right-drag or shift-left-drag pans, and the wheel
/// zooms.
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(event) {
///     session.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("KeyT") {
///     session.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Last known cursor position, if any.
    mouse_pos: Option<Vec2>,
    /// Whether the left mouse button is held.
    left_pressed: bool,
    /// Whether the right mouse button is held.
    right_pressed: bool,
    /// Whether the shift modifier is held.
    shift_pressed: bool,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeyBindings::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            mouse_pos: None,
            left_pressed: false,
            right_pressed: false,
            shift_pressed: false,
            key_bindings,
        }
    }

    /// Last cursor position in pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Option<Vec2> {
        self.mouse_pos
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Create a processor with the key bindings from `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::with_key_bindings(options.keybindings.clone())
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left_pressed = pressed,
                    MouseButton::Right => self.right_pressed = pressed,
                    MouseButton::Middle => {}
                }
                None
            }
            InputEvent::Scroll { delta } => Some(ViewerCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
            InputEvent::Resized { width, height } => {
                Some(ViewerCommand::Resize { width, height })
            }
        }
    }

    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<ViewerCommand> {
        let previous = self.mouse_pos.replace(pos)?;
        let delta = pos - previous;
        if delta == Vec2::ZERO {
            return None;
        }
        if self.right_pressed || (self.left_pressed && self.shift_pressed) {
            Some(ViewerCommand::Pan { delta })
        } else if self.left_pressed {
            Some(ViewerCommand::Orbit { delta })
        } else {
            None
        }
    }
}
