//! Per-object interaction layers.
//!
//! Every object is rendered as a stack of transforms, outermost first:
//!
//! | Layer | Source | Writer |
//! |-------|--------|--------|
//! | rest + hover | stored pose blended toward hover values | hover blend |
//! | interaction offset | drag or parallax | drag / parallax (never both in one frame) |
//! | mouse-follow tilt | shared across interactive objects | tilt |
//! | idle | float / rotate / orbit | idle animation |
//!
//! Each layer owns exactly one contribution, so hover scale and drag offset
//! never fight over the same transform. [`InteractionEngine::frame`] must run
//! after the camera controller in the same frame; drag and parallax read the
//! current camera distance.

#[cfg(test)]
#[path = "interaction_test.rs"]
mod interaction_test;

use std::collections::{HashMap, HashSet};

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::camera::{Point, lerp3};
use crate::consts::{
    DRAG_LERP, FLOAT_AMPLITUDE, FLOAT_ROTATION_INTENSITY, FLOAT_SPEED, HOVER_LERP, IDLE_ROTATE_SPEED, PARALLAX_LERP,
    PARALLAX_SCALE, SNAP_EPSILON, TILT_LERP, TILT_MAX_RAD,
};
use crate::doc::{Animation, ObjectId, Rgb, SceneObject};
use crate::resolve;
use crate::shared::SharedRefs;

/// Exponential step from `current` toward `target` that lands exactly on
/// `target` once within [`SNAP_EPSILON`].
#[must_use]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    let next = current + (target - current) * factor;
    if (target - next).abs() < SNAP_EPSILON { target } else { next }
}

fn approach3(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    let next = lerp3(current, target, factor);
    if next.distance(target) < SNAP_EPSILON { target } else { next }
}

// =============================================================================
// PER-OBJECT STATE
// =============================================================================

/// Pixel drag in progress on one object.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    /// Raw pointer travel since pointer-down, in CSS pixels.
    pub accumulated: Point,
    /// Interaction offset when the drag began.
    pub base_offset: Vec3,
}

/// Transient runtime state for one object. Never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectRuntime {
    /// Hover blend weight: 0 = rest, 1 = hover values.
    pub hover_t: f32,
    /// Interaction offset layer in world units.
    pub offset: Vec3,
    pub drag: Option<DragState>,
    /// Accumulated yaw of the `rotate` idle animation.
    pub yaw: f32,
    /// Accumulated angle of the `orbit` idle animation.
    pub orbit_angle: f32,
    /// Orbit position held while the object is dragged.
    pub frozen_orbit: Option<Vec3>,
}

impl ObjectRuntime {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

/// The composed layers for one object after a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectFrame {
    pub id: ObjectId,
    /// Rest pose blended toward hover values.
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Interaction offset (drag/parallax), world units.
    pub offset: Vec3,
    /// Mouse-follow tilt (XYZ Euler radians).
    pub tilt: Vec3,
    pub idle_position: Vec3,
    pub idle_rotation: Vec3,
    /// Blended color while a hover color is active; `None` means the stored color.
    pub color: Option<Rgb>,
}

impl ObjectFrame {
    /// World matrix of the mesh: rest/hover, then offset, tilt, idle.
    ///
    /// The offset is stored in world units and mapped into the rest layer's
    /// local space so a rotated or scaled object still moves with the pointer.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let rest_rotation = euler(self.rotation);
        let outer = Mat4::from_scale_rotation_translation(self.scale, rest_rotation, self.position);
        let local_offset = if self.scale.abs().min_element() > f32::EPSILON {
            (rest_rotation.inverse() * self.offset) / self.scale
        } else {
            Vec3::ZERO
        };
        outer
            * Mat4::from_translation(local_offset)
            * Mat4::from_quat(euler(self.tilt))
            * Mat4::from_rotation_translation(euler(self.idle_rotation), self.idle_position)
    }

    /// World position of the object's origin including the offset layer.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.position + self.offset
    }
}

fn euler(v: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, v.x, v.y, v.z)
}

// =============================================================================
// ENGINE
// =============================================================================

/// Hover, drag, parallax, tilt and idle animation for every object.
#[derive(Debug, Clone, Default)]
pub struct InteractionEngine {
    runtimes: HashMap<ObjectId, ObjectRuntime>,
    hovered: HashSet<ObjectId>,
    tilt: Vec3,
    tilt_enabled: bool,
    elapsed: f32,
}

impl InteractionEngine {
    #[must_use]
    pub fn new(tilt_enabled: bool) -> Self {
        Self { tilt_enabled, ..Self::default() }
    }

    #[must_use]
    pub fn runtime(&self, id: &str) -> Option<&ObjectRuntime> {
        self.runtimes.get(id)
    }

    #[must_use]
    pub fn tilt(&self) -> Vec3 {
        self.tilt
    }

    #[must_use]
    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.contains(id)
    }

    /// Forget all transient state (scene replaced).
    pub fn reset(&mut self) {
        self.runtimes.clear();
        self.hovered.clear();
        self.tilt = Vec3::ZERO;
    }

    // --- Pointer events ---

    pub fn pointer_over(&mut self, id: &str) {
        self.hovered.insert(id.to_owned());
    }

    pub fn pointer_out(&mut self, id: &str) {
        self.hovered.remove(id);
    }

    /// Start a drag on `obj`. Returns `false` if it is not draggable.
    pub fn begin_drag(&mut self, obj: &SceneObject) -> bool {
        if !obj.draggable {
            return false;
        }
        let runtime = self.runtimes.entry(obj.id.clone()).or_default();
        runtime.drag = Some(DragState { accumulated: Point::default(), base_offset: runtime.offset });
        if obj.animation == Animation::Orbit {
            runtime.frozen_orbit = Some(orbit_position(obj, runtime.orbit_angle));
        }
        true
    }

    /// Accumulate pointer travel for a drag in progress.
    pub fn drag_by(&mut self, id: &str, delta: Point) {
        if let Some(drag) = self.runtimes.get_mut(id).and_then(|r| r.drag.as_mut()) {
            drag.accumulated.x += delta.x;
            drag.accumulated.y += delta.y;
        }
    }

    /// Stop accumulating. The offset stays where it is.
    pub fn end_drag(&mut self, id: &str) {
        if let Some(runtime) = self.runtimes.get_mut(id) {
            runtime.drag = None;
            runtime.frozen_orbit = None;
        }
    }

    // --- Frame ---

    /// Advance every layer by `dt` seconds and compose the result.
    pub fn frame(&mut self, dt: f32, objects: &[SceneObject], shared: &SharedRefs) -> Vec<ObjectFrame> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.elapsed += dt;

        let live: HashSet<&str> = objects.iter().map(|o| o.id.as_str()).collect();
        self.runtimes.retain(|id, _| live.contains(id.as_str()));
        self.hovered.retain(|id| live.contains(id.as_str()));

        let active_groups: HashSet<&str> = objects
            .iter()
            .filter(|o| self.hovered.contains(&o.id))
            .filter_map(|o| o.hover_group.as_deref())
            .collect();

        self.update_tilt(shared);

        let mut frames = Vec::with_capacity(objects.len());
        for obj in objects {
            let hovered = self.hovered.contains(&obj.id)
                || obj.hover_group.as_deref().is_some_and(|g| active_groups.contains(g));
            let tilt = if self.tilt_enabled && obj.is_interactive() { self.tilt } else { Vec3::ZERO };
            let elapsed = self.elapsed;
            let runtime = self.runtimes.entry(obj.id.clone()).or_default();
            frames.push(step_object(runtime, obj, hovered, tilt, elapsed, dt, shared));
        }
        frames
    }

    fn update_tilt(&mut self, shared: &SharedRefs) {
        let target = match shared.pointer {
            Some(p) if self.tilt_enabled && !shared.is_dragging() => {
                Vec3::new(-p.y * TILT_MAX_RAD, p.x * TILT_MAX_RAD, 0.0)
            }
            _ => Vec3::ZERO,
        };
        self.tilt = approach3(self.tilt, target, TILT_LERP);
    }
}

fn step_object(
    runtime: &mut ObjectRuntime,
    obj: &SceneObject,
    hovered: bool,
    tilt: Vec3,
    elapsed: f32,
    dt: f32,
    shared: &SharedRefs,
) -> ObjectFrame {
    // Hover blend.
    let hover_target = if hovered && obj.has_hover() { 1.0 } else { 0.0 };
    runtime.hover_t = approach(runtime.hover_t, hover_target, HOVER_LERP);
    let t = runtime.hover_t;
    let blend = |rest: Vec3, hover: Option<Vec3>| hover.map_or(rest, |h| lerp3(rest, h, t));
    let position = blend(obj.position, obj.hover_position);
    let rotation = blend(obj.rotation, obj.hover_rotation);
    let scale = blend(obj.scale, obj.hover_scale);
    let color = match (Rgb::parse_hex(&obj.color), obj.hover_color.as_deref().and_then(Rgb::parse_hex)) {
        (Some(rest), Some(hover)) if t > 0.0 => Some(rest.lerp(hover, t)),
        _ => None,
    };

    // Interaction offset: drag owns it while dragging, parallax otherwise.
    let distance = shared.camera.position.distance(position + runtime.offset);
    if let Some(drag) = runtime.drag {
        let world = shared.camera.pixel_delta_to_world(drag.accumulated, distance);
        runtime.offset = approach3(runtime.offset, drag.base_offset + world, DRAG_LERP);
    } else if obj.parallax_intensity > 0.0 {
        let target = match shared.pointer {
            Some(p) => {
                let (right, up) = shared.camera.basis();
                let reach = PARALLAX_SCALE * obj.parallax_intensity / distance.max(1.0);
                (right * p.x + up * p.y) * reach
            }
            None => Vec3::ZERO,
        };
        runtime.offset = approach3(runtime.offset, target, PARALLAX_LERP);
    } else if !obj.draggable {
        // Parallax switched off: drift home. A dropped drag offset stays put.
        runtime.offset = approach3(runtime.offset, Vec3::ZERO, PARALLAX_LERP);
    }

    // Idle animation. Rotate and orbit hold still while this object is dragged.
    let dragging = runtime.is_dragging();
    let mut idle_position = Vec3::ZERO;
    let mut idle_rotation = Vec3::ZERO;
    match obj.animation {
        Animation::None => {}
        Animation::Float => {
            let phase = elapsed / 4.0 * FLOAT_SPEED;
            idle_position.y = phase.sin() * FLOAT_AMPLITUDE;
            idle_rotation = Vec3::new(phase.cos() / 8.0, phase.sin() / 8.0, phase.sin() / 20.0) * FLOAT_ROTATION_INTENSITY;
        }
        Animation::Rotate => {
            if !dragging {
                runtime.yaw += dt * IDLE_ROTATE_SPEED;
            }
            idle_rotation.y = runtime.yaw;
        }
        Animation::Orbit => {
            if !dragging {
                let (_, speed) = resolve::orbit(obj);
                runtime.orbit_angle += dt * speed;
            }
            idle_position = match runtime.frozen_orbit {
                Some(frozen) if dragging => frozen,
                _ => orbit_position(obj, runtime.orbit_angle),
            };
        }
    }

    ObjectFrame {
        id: obj.id.clone(),
        position,
        rotation,
        scale,
        offset: runtime.offset,
        tilt,
        idle_position,
        idle_rotation,
        color,
    }
}

/// Point on the horizontal orbit circle at `angle`.
fn orbit_position(obj: &SceneObject, angle: f32) -> Vec3 {
    let (radius, _) = resolve::orbit(obj);
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}
