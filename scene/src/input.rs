//! Input model: modifier keys, buttons, keys, and the pointer gesture state.
//!
//! The host forwards raw pointer/wheel/key events; the engine tracks the
//! gesture between pointer-down and pointer-up in [`InputState`]. A
//! pointer-down over a draggable object starts an object drag, anything else
//! starts an orbit drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ObjectId;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key name as reported by the browser (`"Delete"`, `"d"`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta in pixels (positive `dy` = down).
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f32,
    pub dy: f32,
}

/// Editor command bound to a key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Delete / Backspace.
    RemoveSelected,
    /// Escape: clear selection and cancel a flight.
    Escape,
    /// Ctrl/Cmd + D.
    DuplicateSelected,
}

impl Shortcut {
    /// Map a key chord to a shortcut, if bound.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        match key.0.as_str() {
            "Delete" | "Backspace" => Some(Self::RemoveSelected),
            "Escape" => Some(Self::Escape),
            "d" | "D" if modifiers.command() => Some(Self::DuplicateSelected),
            _ => None,
        }
    }
}

/// Gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    #[default]
    Idle,
    /// Dragging empty space (or a non-draggable object) orbits the camera.
    Orbiting {
        last_screen: Point,
        /// Pressed over no object and not moved since; releasing clears the
        /// selection.
        missed: bool,
    },
    /// Dragging a draggable object.
    DraggingObject {
        id: ObjectId,
        last_screen: Point,
        /// Whether the pointer moved since pointer-down; a press without
        /// movement is a click and selects the object.
        moved: bool,
    },
}
