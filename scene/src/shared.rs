//! Transient cross-component state that is never persisted.
//!
//! `SharedRefs` is owned by the engine and handed to the camera and
//! interaction phases each frame. Every field has exactly one writer:
//!
//! | Field | Writer | Readers |
//! |-------|--------|---------|
//! | `camera` | camera controller phase | interaction phase, host, slide capture |
//! | `pointer` | input handlers | camera parallax, interaction parallax/tilt |
//! | `dragging` | input handlers | interaction phase (tilt suppression, orbit freeze) |
//! | `scroll_offset` | input handlers | camera controller (scroll-bound mode) |
//! | `camera_mouse_offset` | camera controller phase | camera controller |

use glam::Vec3;

use crate::camera::{Camera, Point};
use crate::doc::{CameraPose, ObjectId};

/// Frame-coupled state shared between the camera controller and the
/// interaction engine.
#[derive(Debug, Clone, Default)]
pub struct SharedRefs {
    /// The live camera, mirrored every frame after the controller runs.
    pub camera: Camera,
    /// Normalized pointer position in `[-1, 1]`, or `None` when the pointer left the canvas.
    pub pointer: Option<Point>,
    /// Object currently being dragged, if any.
    pub dragging: Option<ObjectId>,
    /// Scroll position in `[0, 1]` used by scroll-bound slides.
    pub scroll_offset: f32,
    /// Smoothed camera drift added after slide interpolation.
    pub camera_mouse_offset: Vec3,
}

impl SharedRefs {
    /// Where the camera is right now, without touching the store.
    #[must_use]
    pub fn live_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    /// Whether any object drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Move the scroll offset by `delta`, clamped to `[0, 1]`.
    pub fn scroll_by(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll_offset = (self.scroll_offset + delta).clamp(0.0, 1.0);
        }
    }

    /// Set the scroll offset directly, clamped to `[0, 1]`.
    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll_offset = if offset.is_finite() { offset.clamp(0.0, 1.0) } else { 0.0 };
    }
}
