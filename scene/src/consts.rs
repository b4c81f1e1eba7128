//! Shared numeric constants for the scene crate.

// ── Camera ──────────────────────────────────────────────────────

/// Default camera position for a fresh scene.
pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [5.0, 4.0, 5.0];

/// Default camera look-at target for a fresh scene.
pub const DEFAULT_CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

/// Vertical field of view in degrees.
pub const DEFAULT_FOV_DEG: f32 = 50.0;

/// Per-frame lerp factor while flying to a slide.
pub const FLY_LERP: f32 = 0.08;

/// Distance below which a flight snaps to its target pose.
pub const FLY_ARRIVE_EPSILON: f32 = 0.01;

/// Frames between throttled camera pose writes into the store.
pub const CAMERA_PERSIST_EVERY_FRAMES: u64 = 60;

/// Smallest accepted slide duration weight.
pub const MIN_SLIDE_DURATION: f32 = 0.1;

/// Duration weight given to new slides.
pub const DEFAULT_SLIDE_DURATION: f32 = 1.0;

/// Per-frame smoothing of the scroll-mode camera mouse offset.
pub const CAMERA_PARALLAX_LERP: f32 = 0.05;

/// World units the scroll-mode camera drifts at full pointer deflection.
pub const CAMERA_PARALLAX_INTENSITY: f32 = 0.3;

// ── Orbit controls ──────────────────────────────────────────────

/// Radians of orbit per viewport height of pointer travel, over 2π.
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;

/// Dolly scale applied per 100 px of wheel travel.
pub const ORBIT_ZOOM_STEP: f32 = 0.95;

/// Closest the orbit camera may get to its target.
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;

/// Farthest the orbit camera may get from its target.
pub const ORBIT_MAX_DISTANCE: f32 = 200.0;

/// Polar angle margin keeping the orbit camera off the poles.
pub const ORBIT_POLAR_MARGIN: f32 = 1e-3;

/// Scroll offset gained per pixel of wheel travel in scroll-bound mode.
pub const WHEEL_SCROLL_PER_PX: f32 = 0.001;

// ── Recording ───────────────────────────────────────────────────

/// Capture one camera sample every N rendered frames.
pub const RECORD_SAMPLE_EVERY_FRAMES: u64 = 2;

/// RDP tolerance in combined position+target world units.
pub const RECORDING_TOLERANCE: f32 = 0.05;

// ── Interaction ─────────────────────────────────────────────────

/// Per-frame blend factor toward hover / rest values.
pub const HOVER_LERP: f32 = 0.1;

/// Residual below which a blended value snaps onto its target.
pub const SNAP_EPSILON: f32 = 1e-4;

/// Per-frame smoothing applied to the drag offset layer.
pub const DRAG_LERP: f32 = 0.3;

/// Per-frame smoothing applied to the parallax offset layer.
pub const PARALLAX_LERP: f32 = 0.08;

/// World units of parallax at unit intensity, unit camera distance, full deflection.
pub const PARALLAX_SCALE: f32 = 1.5;

/// Max tilt in radians of the mouse-follow layer at full deflection.
pub const TILT_MAX_RAD: f32 = 0.15;

/// Per-frame smoothing of the mouse-follow tilt.
pub const TILT_LERP: f32 = 0.05;

/// Yaw rate of the `rotate` idle animation, radians per second.
pub const IDLE_ROTATE_SPEED: f32 = 0.5;

/// Angular frequency of the `float` idle animation.
pub const FLOAT_SPEED: f32 = 2.0;

/// Vertical amplitude of the `float` bob in world units.
pub const FLOAT_AMPLITUDE: f32 = 0.1;

/// Rotation amplitude of the `float` sway in radians.
pub const FLOAT_ROTATION_INTENSITY: f32 = 0.3;

// ── Store ───────────────────────────────────────────────────────

/// Offset applied to duplicated objects.
pub const DUPLICATE_OFFSET: [f32; 3] = [0.5, 0.0, 0.5];

/// Default resting height of newly added objects.
pub const DEFAULT_OBJECT_Y: f32 = 0.5;
