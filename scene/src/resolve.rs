//! Geometry/material resolver.
//!
//! Pure mapping from a [`SceneObject`] to a render-ready description. Every
//! consumer (live runtime, embed, HTML export, source snippet) goes through
//! this module, so parameter fallbacks are defined exactly once here.

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;

use crate::doc::{Geometry, Material, SceneObject};

// ── Parameter defaults ──────────────────────────────────────────

pub const DEFAULT_COLOR: &str = "#8b5cf6";
pub const DEFAULT_METALNESS: f32 = 0.1;
pub const DEFAULT_ROUGHNESS: f32 = 0.4;
pub const DEFAULT_TRANSMISSION: f32 = 0.9;
pub const DEFAULT_THICKNESS: f32 = 0.5;
/// Distortion amount; also the wobble factor.
pub const DEFAULT_DISTORT: f32 = 0.4;
pub const DEFAULT_SPEED: f32 = 2.0;
pub const DEFAULT_TEXT: &str = "Hola";
pub const DEFAULT_ORBIT_RADIUS: f32 = 2.0;
/// Radians per second.
pub const DEFAULT_ORBIT_SPEED: f32 = 1.0;

/// Path of the bundled typeface used by 3D text.
pub const FONT_PATH: &str = "/fonts/inter_bold.json";

// ── Text primitive ──────────────────────────────────────────────

pub const TEXT_SIZE: f32 = 0.5;
pub const TEXT_DEPTH: f32 = 0.1;
pub const TEXT_CURVE_SEGMENTS: u32 = 12;

/// Mesh source for one object.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
    Torus { radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32 },
    RoundedBox { width: f32, height: f32, depth: f32, radius: f32, smoothness: u32 },
    Dodecahedron { radius: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32 },
    /// Extruded text, centered on its own bounds.
    Text { text: String, font: &'static str, size: f32, depth: f32, curve_segments: u32 },
    /// External asset. `url` is `None` until a model has been attached.
    Model { url: Option<String>, format: ModelFormat, animation: Option<String> },
}

/// Container format of an external model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Gltf,
    Obj,
}

impl ModelFormat {
    /// Infer from the asset URL. Anything not ending in `.obj` is glTF.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        if url.to_ascii_lowercase().ends_with(".obj") { Self::Obj } else { Self::Gltf }
    }

    /// MIME type used when the asset is inlined as a data URI.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Gltf => "model/gltf-binary",
            Self::Obj => "text/plain",
        }
    }
}

/// Shading model and its parameters, all defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    Standard,
    /// Glass; rendered double-sided.
    Transmission { transmission: f32, thickness: f32 },
    Distort { distort: f32, speed: f32 },
    Wobble { factor: f32, speed: f32 },
}

/// Surface appearance shared by every shading model.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub color: String,
    pub metalness: f32,
    pub roughness: f32,
    pub texture_url: Option<String>,
    pub shading: Shading,
}

/// Render-ready description of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSpec {
    pub primitive: Primitive,
    pub surface: Surface,
}

/// Resolve an object into its render description.
#[must_use]
pub fn resolve(obj: &SceneObject) -> RenderSpec {
    RenderSpec { primitive: primitive(obj), surface: surface(obj) }
}

#[must_use]
pub fn primitive(obj: &SceneObject) -> Primitive {
    match obj.geometry {
        Geometry::Box => Primitive::Box { width: 1.0, height: 1.0, depth: 1.0 },
        Geometry::Sphere => Primitive::Sphere { radius: 0.6, width_segments: 32, height_segments: 32 },
        Geometry::Torus => Primitive::Torus { radius: 0.5, tube: 0.2, radial_segments: 16, tubular_segments: 32 },
        Geometry::RoundedBox => Primitive::RoundedBox { width: 1.0, height: 1.0, depth: 1.0, radius: 0.1, smoothness: 4 },
        Geometry::Dodecahedron => Primitive::Dodecahedron { radius: 0.6 },
        Geometry::Cylinder => {
            Primitive::Cylinder { radius_top: 0.5, radius_bottom: 0.5, height: 0.1, radial_segments: 64 }
        }
        Geometry::Text3d => Primitive::Text {
            text: text(obj).to_owned(),
            font: FONT_PATH,
            size: TEXT_SIZE,
            depth: TEXT_DEPTH,
            curve_segments: TEXT_CURVE_SEGMENTS,
        },
        Geometry::ExternalModel => Primitive::Model {
            url: obj.model_url.clone(),
            format: obj.model_url.as_deref().map_or(ModelFormat::Gltf, ModelFormat::from_url),
            animation: obj.model_animation_name.clone(),
        },
    }
}

#[must_use]
pub fn surface(obj: &SceneObject) -> Surface {
    let shading = match obj.material {
        Material::Standard => Shading::Standard,
        Material::Transmissive => Shading::Transmission {
            transmission: obj.transmission.unwrap_or(DEFAULT_TRANSMISSION),
            thickness: obj.thickness.unwrap_or(DEFAULT_THICKNESS),
        },
        Material::Distort => Shading::Distort {
            distort: obj.distort.unwrap_or(DEFAULT_DISTORT),
            speed: obj.speed.unwrap_or(DEFAULT_SPEED),
        },
        Material::Wobble => Shading::Wobble {
            factor: obj.distort.unwrap_or(DEFAULT_DISTORT),
            speed: obj.speed.unwrap_or(DEFAULT_SPEED),
        },
    };
    Surface {
        color: obj.color.clone(),
        metalness: obj.metalness,
        roughness: obj.roughness,
        texture_url: obj.texture_url.clone(),
        shading,
    }
}

/// Displayed text for a text object; empty or missing text uses the default.
#[must_use]
pub fn text(obj: &SceneObject) -> &str {
    match obj.text.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TEXT,
    }
}

/// Orbit radius and angular speed with defaults applied.
#[must_use]
pub fn orbit(obj: &SceneObject) -> (f32, f32) {
    (obj.orbit_radius.unwrap_or(DEFAULT_ORBIT_RADIUS), obj.orbit_speed.unwrap_or(DEFAULT_ORBIT_SPEED))
}

/// A copy of `obj` with every defaulted parameter written out explicitly.
///
/// Exported documents carry these values so a consumer that does not share
/// this module still renders identically.
#[must_use]
pub fn with_resolved_defaults(obj: &SceneObject) -> SceneObject {
    let mut out = obj.clone();
    out.transmission = Some(obj.transmission.unwrap_or(DEFAULT_TRANSMISSION));
    out.thickness = Some(obj.thickness.unwrap_or(DEFAULT_THICKNESS));
    out.distort = Some(obj.distort.unwrap_or(DEFAULT_DISTORT));
    out.speed = Some(obj.speed.unwrap_or(DEFAULT_SPEED));
    if obj.geometry == Geometry::Text3d {
        out.text = Some(text(obj).to_owned());
    }
    if obj.animation == crate::doc::Animation::Orbit {
        let (radius, speed) = orbit(obj);
        out.orbit_radius = Some(radius);
        out.orbit_speed = Some(speed);
    }
    out
}
