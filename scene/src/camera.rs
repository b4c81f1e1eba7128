#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use glam::{Mat4, Quat, Vec3};

use crate::consts::DEFAULT_FOV_DEG;
use crate::doc::CameraPose;

/// A point in screen space (CSS pixels) or normalized device space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Lerp that returns exactly `a` at `t = 0` and exactly `b` at `t = 1`.
#[must_use]
pub fn lerp3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Hermite smoothstep `t² (3 − 2t)` on a parameter clamped to `[0, 1]`.
#[must_use]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// The live perspective camera the host renders with.
///
/// `fov_deg` is the vertical field of view. Viewport dimensions are in CSS
/// pixels and feed the pixel-to-world conversion used by drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_deg: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let pose = CameraPose::default();
        Self {
            position: pose.position,
            target: pose.target,
            fov_deg: DEFAULT_FOV_DEG,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl Camera {
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    /// Unit vector from the camera toward its target; `-Z` when degenerate.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Camera-space right and up axes expressed in world space.
    #[must_use]
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        (right, up)
    }

    /// Orientation that looks from `position` at `target` with +Y up.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        Quat::from_mat4(&view.inverse())
    }

    /// World units covered by one screen pixel at `distance` from the camera.
    ///
    /// Zero when the viewport has no height yet.
    #[must_use]
    pub fn world_units_per_pixel(&self, distance: f32) -> f32 {
        if self.viewport_height <= 0.0 {
            return 0.0;
        }
        let half_fov = self.fov_deg.to_radians() * 0.5;
        2.0 * distance * half_fov.tan() / self.viewport_height
    }

    /// Convert a screen-space pixel delta at `distance` into a world offset
    /// on the camera's right/up plane. Screen `y` grows downward.
    #[must_use]
    pub fn pixel_delta_to_world(&self, delta: Point, distance: f32) -> Vec3 {
        let per_px = self.world_units_per_pixel(distance);
        let (right, up) = self.basis();
        right * (delta.x * per_px) - up * (delta.y * per_px)
    }

    /// Normalize a screen point into `[-1, 1]` on both axes, `+y` up.
    #[must_use]
    pub fn normalize_screen(&self, screen: Point) -> Point {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Point::default();
        }
        Point {
            x: (screen.x / self.viewport_width * 2.0 - 1.0).clamp(-1.0, 1.0),
            y: (1.0 - screen.y / self.viewport_height * 2.0).clamp(-1.0, 1.0),
        }
    }
}
