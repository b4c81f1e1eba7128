//! Document model: scene objects, slides, recordings, and the scene snapshot.
//!
//! This module defines the declarative data that describes a scene
//! (`SceneObject`, `Slide`, `CameraKeyframe`), the sparse-update type used by
//! the editor (`PartialSceneObject`), and the portable aggregate that is
//! persisted, exported and shared (`SceneSnapshot`).
//!
//! Snapshots arrive from untrusted places (local storage, share links,
//! published scenes), so [`SceneSnapshot::from_value`] parses each field
//! independently and falls back per field instead of rejecting the whole
//! document.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use glam::Vec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::camera::lerp3;
use crate::consts::{DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_TARGET, DEFAULT_SLIDE_DURATION, MIN_SLIDE_DURATION};

/// Unique identifier for a scene object (`obj-<n>`).
pub type ObjectId = String;

/// Unique identifier for a slide (`slide-<n>`).
pub type SlideId = String;

/// Id prefix for scene objects.
pub const OBJECT_ID_PREFIX: &str = "obj-";

/// Id prefix for slides.
pub const SLIDE_ID_PREFIX: &str = "slide-";

/// Primitive shape of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Geometry {
    Box,
    Sphere,
    Torus,
    RoundedBox,
    Dodecahedron,
    /// Flat coin-like cylinder.
    Cylinder,
    /// Extruded 3D text using the bundled font.
    Text3d,
    /// Externally loaded GLB/OBJ model referenced by `modelUrl`.
    #[serde(alias = "glb")]
    ExternalModel,
}

impl Geometry {
    /// All geometries in palette order.
    pub const ALL: [Self; 8] = [
        Self::Box,
        Self::Sphere,
        Self::Torus,
        Self::RoundedBox,
        Self::Dodecahedron,
        Self::Cylinder,
        Self::Text3d,
        Self::ExternalModel,
    ];

    /// Human-readable label used to name new objects.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Box => "Box",
            Self::Sphere => "Sphere",
            Self::Torus => "Torus",
            Self::RoundedBox => "RoundedBox",
            Self::Dodecahedron => "Dodecahedron",
            Self::Cylinder => "Coin",
            Self::Text3d => "Text",
            Self::ExternalModel => "Model",
        }
    }
}

/// Surface shading model of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Standard,
    /// Glass-like transmission material.
    #[serde(rename = "transmission", alias = "transmissive")]
    Transmissive,
    /// Noise-displaced surface.
    Distort,
    /// Sine-wobbled surface.
    Wobble,
}

/// Idle animation applied to the innermost layer of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    None,
    Float,
    Rotate,
    Orbit,
}

/// Editor-only tag recording which hover preset produced the hover fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverPreset {
    #[default]
    None,
    Lift,
    Grow,
    Spin,
    Tilt,
    Glow,
    Explode,
}

/// Which transform gizmo the editor shows for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`. Returns `None` for anything else.
    #[must_use]
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map(|v| f32::from(v) / 255.0);
        match digits.len() {
            6 => {
                let r = channel(&digits[0..2]);
                let g = channel(&digits[2..4]);
                let b = channel(&digits[4..6]);
                match (r, g, b) {
                    (Ok(r), Ok(g), Ok(b)) => Some(Self { r, g, b }),
                    _ => None,
                }
            }
            3 => {
                let expand = |i: usize| {
                    let c = &digits[i..=i];
                    channel(&format!("{c}{c}"))
                };
                match (expand(0), expand(1), expand(2)) {
                    (Ok(r), Ok(g), Ok(b)) => Some(Self { r, g, b }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Format as lowercase `#rrggbb`, clamping each channel.
    #[must_use]
    pub fn to_hex(self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Per-channel linear interpolation.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Scale every channel by `factor`, clamped to `[0, 1]`.
    #[must_use]
    pub fn brighten(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).min(1.0),
            g: (self.g * factor).min(1.0),
            b: (self.b * factor).min(1.0),
        }
    }
}

/// A camera position plus look-at target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Component-wise lerp of position and target.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            position: lerp3(self.position, other.position, t),
            target: lerp3(self.target, other.target, t),
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(DEFAULT_CAMERA_POSITION),
            target: Vec3::from_array(DEFAULT_CAMERA_TARGET),
        }
    }
}

/// One placeable entity in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub animation: Animation,
    /// Rest position.
    #[serde(default)]
    pub position: Vec3,
    /// Rest rotation (XYZ Euler radians).
    #[serde(default)]
    pub rotation: Vec3,
    /// Rest scale.
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_metalness")]
    pub metalness: f32,
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distort: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "glbUrl")]
    pub model_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "glbAnimation")]
    pub model_animation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_position: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_rotation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_scale: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_preset: Option<HoverPreset>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub draggable: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub parallax_intensity: f32,
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

fn default_color() -> String {
    crate::resolve::DEFAULT_COLOR.to_owned()
}

fn default_metalness() -> f32 {
    crate::resolve::DEFAULT_METALNESS
}

fn default_roughness() -> f32 {
    crate::resolve::DEFAULT_ROUGHNESS
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(v: &f32) -> bool {
    *v == 0.0
}

impl SceneObject {
    /// Whether any hover field is declared.
    #[must_use]
    pub fn has_hover(&self) -> bool {
        self.hover_position.is_some()
            || self.hover_rotation.is_some()
            || self.hover_scale.is_some()
            || self.hover_color.is_some()
    }

    /// Whether the object reacts to the pointer at all.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.has_hover() || self.draggable || self.parallax_intensity > 0.0
    }

    /// Apply a sparse update. Only present fields are written.
    pub fn apply_partial(&mut self, partial: &PartialSceneObject) {
        macro_rules! set {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = &partial.$field {
                    self.$field = v.clone();
                })*
            };
        }
        set!(
            name,
            geometry,
            material,
            animation,
            position,
            rotation,
            scale,
            color,
            metalness,
            roughness,
            text,
            transmission,
            thickness,
            distort,
            speed,
            texture_url,
            model_url,
            model_animation_name,
            orbit_radius,
            orbit_speed,
            hover_position,
            hover_rotation,
            hover_scale,
            hover_color,
            hover_group,
            hover_preset,
            draggable,
        );
        if let Some(v) = partial.parallax_intensity {
            self.parallax_intensity = v.max(0.0);
        }
    }
}

/// Sparse update for a scene object.
///
/// Required fields use `Option<T>`; optional fields use `Option<Option<T>>`
/// where `Some(None)` (JSON `null`) clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSceneObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metalness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f32>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub text: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub transmission: Option<Option<f32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub thickness: Option<Option<f32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub distort: Option<Option<f32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub speed: Option<Option<f32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub texture_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub model_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub model_animation_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub orbit_radius: Option<Option<f32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub orbit_speed: Option<Option<f32>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub hover_position: Option<Option<Vec3>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub hover_rotation: Option<Option<Vec3>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub hover_scale: Option<Option<Vec3>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub hover_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub hover_group: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub hover_preset: Option<Option<HoverPreset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallax_intensity: Option<f32>,
}

impl PartialSceneObject {
    /// Whether the update touches any pose field.
    #[must_use]
    pub fn touches_pose(&self) -> bool {
        self.position.is_some() || self.rotation.is_some() || self.scale.is_some()
    }
}

/// Distinguish a missing key (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A named camera bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    pub name: String,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Caption shown over the embed while this slide is current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Relative weight sizing this slide's segment of the scroll range.
    #[serde(default = "default_slide_duration")]
    pub duration: f32,
}

fn default_slide_duration() -> f32 {
    DEFAULT_SLIDE_DURATION
}

impl Slide {
    /// The slide's stored camera pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.camera_position, self.camera_target)
    }
}

/// A recorded camera sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraKeyframe {
    /// Seconds since recording start.
    pub time: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraKeyframe {
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }
}

/// The portable scene aggregate: what gets persisted, exported and shared.
///
/// UI-only state (selection, transform mode, pending fly-to) lives in the
/// store and never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    pub objects: Vec<SceneObject>,
    pub environment: String,
    pub bg_color: String,
    pub slides: Vec<Slide>,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub camera_recording: Vec<CameraKeyframe>,
}

/// Default environment preset name.
pub const DEFAULT_ENVIRONMENT: &str = "city";

/// Default background color.
pub const DEFAULT_BG_COLOR: &str = "#0a0a0a";

/// Environment presets offered by the editor.
pub const ENVIRONMENTS: [&str; 10] = [
    "city", "studio", "sunset", "dawn", "night", "forest", "apartment", "lobby", "park", "warehouse",
];

impl Default for SceneSnapshot {
    fn default() -> Self {
        let pose = CameraPose::default();
        Self {
            objects: Vec::new(),
            environment: DEFAULT_ENVIRONMENT.to_owned(),
            bg_color: DEFAULT_BG_COLOR.to_owned(),
            slides: Vec::new(),
            camera_position: pose.position,
            camera_target: pose.target,
            camera_recording: Vec::new(),
        }
    }
}

/// Error returned when a snapshot cannot be used at all.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The input was not valid JSON.
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The input was JSON but not an object.
    #[error("snapshot must be a JSON object")]
    NotAnObject,
}

/// A recoverable problem found while parsing a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotIssue {
    /// A top-level field was absent; its default was used.
    MissingField(&'static str),
    /// A top-level field had the wrong shape; its default was used.
    InvalidField { field: &'static str, reason: String },
    /// An object entry could not be parsed and was dropped.
    InvalidObject { index: usize, reason: String },
    /// A slide entry could not be parsed and was dropped.
    InvalidSlide { index: usize, reason: String },
    /// A slide duration was not positive and was raised to the minimum.
    DurationClamped { slide: SlideId },
    /// A keyframe went backwards in time and was dropped.
    KeyframeOutOfOrder { index: usize },
}

impl SceneSnapshot {
    /// Parse a snapshot from a JSON string, degrading per field.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the text is not JSON or not an object.
    pub fn from_json_str(raw: &str) -> Result<(Self, Vec<SnapshotIssue>), SnapshotError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Parse a snapshot from a JSON value, degrading per field.
    ///
    /// Every top-level field is read independently: a missing or malformed
    /// field falls back to its default, a malformed object or slide entry is
    /// dropped, and each fallback is reported as a [`SnapshotIssue`].
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotAnObject`] if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<(Self, Vec<SnapshotIssue>), SnapshotError> {
        let Value::Object(mut map) = value else {
            return Err(SnapshotError::NotAnObject);
        };
        let mut issues = Vec::new();
        let defaults = Self::default();

        let objects = match map.remove("objects") {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value::<SceneObject>(item) {
                    Ok(obj) => Some(obj),
                    Err(e) => {
                        issues.push(SnapshotIssue::InvalidObject { index, reason: e.to_string() });
                        None
                    }
                })
                .collect(),
            Some(_) => {
                issues.push(SnapshotIssue::InvalidField { field: "objects", reason: "expected array".into() });
                Vec::new()
            }
            None => {
                issues.push(SnapshotIssue::MissingField("objects"));
                Vec::new()
            }
        };

        let mut slides: Vec<Slide> = match map.remove("slides") {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value::<Slide>(item) {
                    Ok(slide) => Some(slide),
                    Err(e) => {
                        issues.push(SnapshotIssue::InvalidSlide { index, reason: e.to_string() });
                        None
                    }
                })
                .collect(),
            Some(_) => {
                issues.push(SnapshotIssue::InvalidField { field: "slides", reason: "expected array".into() });
                Vec::new()
            }
            // Slides are optional in older snapshots.
            None => Vec::new(),
        };
        for slide in &mut slides {
            if slide.duration.is_nan() || slide.duration < MIN_SLIDE_DURATION {
                issues.push(SnapshotIssue::DurationClamped { slide: slide.id.clone() });
                slide.duration = MIN_SLIDE_DURATION;
            }
        }

        let environment = read_field(&mut map, "environment", defaults.environment, &mut issues);
        let bg_color = read_field(&mut map, "bgColor", defaults.bg_color, &mut issues);
        let camera_position = read_field(&mut map, "cameraPosition", defaults.camera_position, &mut issues);
        let camera_target = read_field(&mut map, "cameraTarget", defaults.camera_target, &mut issues);

        let raw_recording: Vec<CameraKeyframe> = match map.remove("cameraRecording") {
            None | Some(Value::Null) => Vec::new(),
            Some(v) => serde_json::from_value(v).unwrap_or_else(|e| {
                issues.push(SnapshotIssue::InvalidField { field: "cameraRecording", reason: e.to_string() });
                Vec::new()
            }),
        };
        let mut camera_recording: Vec<CameraKeyframe> = Vec::with_capacity(raw_recording.len());
        for (index, kf) in raw_recording.into_iter().enumerate() {
            if camera_recording.last().is_some_and(|prev| kf.time < prev.time) {
                issues.push(SnapshotIssue::KeyframeOutOfOrder { index });
                continue;
            }
            camera_recording.push(kf);
        }

        let snapshot = Self { objects, environment, bg_color, slides, camera_position, camera_target, camera_recording };
        Ok((snapshot, issues))
    }

    /// The stored camera pose.
    #[must_use]
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose::new(self.camera_position, self.camera_target)
    }

    /// Look up an object by id.
    #[must_use]
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Look up a slide by id.
    #[must_use]
    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }
}

fn read_field<T>(map: &mut serde_json::Map<String, Value>, field: &'static str, default: T, issues: &mut Vec<SnapshotIssue>) -> T
where
    T: DeserializeOwned,
{
    match map.remove(field) {
        None | Some(Value::Null) => {
            issues.push(SnapshotIssue::MissingField(field));
            default
        }
        Some(v) => serde_json::from_value(v).unwrap_or_else(|e| {
            issues.push(SnapshotIssue::InvalidField { field, reason: e.to_string() });
            default
        }),
    }
}

/// Parse the numeric suffix of an id such as `obj-12`.
#[must_use]
pub fn id_suffix(id: &str, prefix: &str) -> Option<u64> {
    match id.strip_prefix(prefix)?.parse() {
        Ok(n) => Some(n),
        Err(_) => None,
    }
}
