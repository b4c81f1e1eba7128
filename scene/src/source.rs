//! Readable scene source generated from the resolver.
//!
//! Produces a self-contained JSX component that reproduces the scene with
//! stock three.js/drei components. Geometry and material parameters come
//! from [`crate::resolve`], so the snippet matches the live scene exactly.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use glam::Vec3;

use crate::consts::{DEFAULT_FOV_DEG, FLOAT_ROTATION_INTENSITY, FLOAT_SPEED};
use crate::doc::{Animation, SceneObject, SceneSnapshot};
use crate::resolve::{self, Primitive, Shading, Surface};

const INDENT: &str = "      ";

/// Render the scene as a JSX component.
#[must_use]
pub fn generate(snapshot: &SceneSnapshot) -> String {
    let mut out = String::new();
    out.push_str("import { Canvas } from \"@react-three/fiber\"\n");
    out.push_str(
        "import { OrbitControls, Environment, ContactShadows, Float, RoundedBox, Text3D, Center, \
         MeshTransmissionMaterial, MeshDistortMaterial, MeshWobbleMaterial, useGLTF, useTexture } from \"@react-three/drei\"\n\n",
    );
    out.push_str("export default function Scene() {\n  return (\n");
    push_line(
        &mut out,
        "    ",
        &format!(
            "<Canvas shadows camera={{{{ position: {}, fov: {DEFAULT_FOV_DEG} }}}}>",
            vec3(snapshot.camera_position)
        ),
    );
    push_line(&mut out, INDENT, &format!("<color attach=\"background\" args={{[\"{}\"]}} />", snapshot.bg_color));
    push_line(&mut out, INDENT, &format!("<Environment preset=\"{}\" />", snapshot.environment));
    push_line(&mut out, INDENT, "<ambientLight intensity={0.3} />");
    push_line(&mut out, INDENT, "<directionalLight position={[5, 5, 5]} intensity={0.8} castShadow />");
    out.push('\n');

    for obj in &snapshot.objects {
        write_object(&mut out, obj);
        out.push('\n');
    }

    push_line(&mut out, INDENT, "<ContactShadows position={[0, -0.01, 0]} opacity={0.4} scale={10} blur={2} />");
    push_line(&mut out, INDENT, &format!("<OrbitControls target={{{}}} />", vec3(snapshot.camera_target)));
    out.push_str("    </Canvas>\n  )\n}\n");
    out
}

fn write_object(out: &mut String, obj: &SceneObject) {
    let spec = resolve::resolve(obj);
    let transform = format!(
        "position={{{}}} rotation={{{}}} scale={{{}}}",
        vec3(obj.position),
        vec3(obj.rotation),
        vec3(obj.scale)
    );
    let float = obj.animation == Animation::Float;
    let indent = if float { format!("{INDENT}  ") } else { INDENT.to_owned() };
    if float {
        push_line(
            out,
            INDENT,
            &format!("<Float speed={{{FLOAT_SPEED}}} rotationIntensity={{{FLOAT_ROTATION_INTENSITY}}} floatIntensity={{1}}>"),
        );
    }
    let material = material_tag(&spec.surface);
    match &spec.primitive {
        Primitive::RoundedBox { width, height, depth, radius, smoothness } => {
            push_line(
                out,
                &indent,
                &format!(
                    "<RoundedBox {transform} args={{[{width}, {height}, {depth}]}} radius={{{radius}}} smoothness={{{smoothness}}}>"
                ),
            );
            push_line(out, &indent, &format!("  {material}"));
            push_line(out, &indent, "</RoundedBox>");
        }
        Primitive::Text { text, font, size, depth, curve_segments } => {
            push_line(out, &indent, &format!("<Center {transform}>"));
            push_line(
                out,
                &indent,
                &format!("  <Text3D font=\"{font}\" size={{{size}}} height={{{depth}}} curveSegments={{{curve_segments}}}>"),
            );
            push_line(out, &indent, &format!("    {}", escape_jsx_text(text)));
            push_line(out, &indent, &format!("    {material}"));
            push_line(out, &indent, "  </Text3D>");
            push_line(out, &indent, "</Center>");
        }
        Primitive::Model { url, .. } => {
            let src = url.as_deref().unwrap_or("");
            push_line(out, &indent, &format!("<primitive object={{useGLTF(\"{src}\").scene}} {transform} />"));
        }
        other => {
            push_line(out, &indent, &format!("<mesh {transform} castShadow>"));
            push_line(out, &indent, &format!("  {}", geometry_tag(other)));
            push_line(out, &indent, &format!("  {material}"));
            push_line(out, &indent, "</mesh>");
        }
    }
    if float {
        push_line(out, INDENT, "</Float>");
    }
}

fn geometry_tag(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Box { width, height, depth } => format!("<boxGeometry args={{[{width}, {height}, {depth}]}} />"),
        Primitive::Sphere { radius, width_segments, height_segments } => {
            format!("<sphereGeometry args={{[{radius}, {width_segments}, {height_segments}]}} />")
        }
        Primitive::Torus { radius, tube, radial_segments, tubular_segments } => {
            format!("<torusGeometry args={{[{radius}, {tube}, {radial_segments}, {tubular_segments}]}} />")
        }
        Primitive::Dodecahedron { radius } => format!("<dodecahedronGeometry args={{[{radius}]}} />"),
        Primitive::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
            format!("<cylinderGeometry args={{[{radius_top}, {radius_bottom}, {height}, {radial_segments}]}} />")
        }
        // Wrapped primitives are emitted by the caller.
        Primitive::RoundedBox { .. } | Primitive::Text { .. } | Primitive::Model { .. } => String::new(),
    }
}

fn material_tag(surface: &Surface) -> String {
    let Surface { color, metalness, roughness, texture_url, shading } = surface;
    let map = texture_url.as_deref().map_or_else(String::new, |url| format!(" map={{useTexture(\"{url}\")}}"));
    match shading {
        Shading::Standard => {
            format!("<meshStandardMaterial color=\"{color}\" metalness={{{metalness}}} roughness={{{roughness}}}{map} />")
        }
        Shading::Transmission { transmission, thickness } => format!(
            "<MeshTransmissionMaterial color=\"{color}\" transmission={{{transmission}}} thickness={{{thickness}}} \
             roughness={{{roughness}}} metalness={{{metalness}}}{map} backside />"
        ),
        Shading::Distort { distort, speed } => format!(
            "<MeshDistortMaterial color=\"{color}\" metalness={{{metalness}}} roughness={{{roughness}}} \
             distort={{{distort}}} speed={{{speed}}}{map} />"
        ),
        Shading::Wobble { factor, speed } => format!(
            "<MeshWobbleMaterial color=\"{color}\" metalness={{{metalness}}} roughness={{{roughness}}} \
             factor={{{factor}}} speed={{{speed}}}{map} />"
        ),
    }
}

fn vec3(v: Vec3) -> String {
    format!("[{:.2}, {:.2}, {:.2}]", v.x, v.y, v.z)
}

fn escape_jsx_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            // Wrapped in an expression container to keep the literal character.
            '{' | '}' | '<' | '>' => out.push_str(&format!("{{\"{c}\"}}")),
            _ => out.push(c),
        }
    }
    out
}

fn push_line(out: &mut String, indent: &str, line: &str) {
    out.push_str(indent);
    out.push_str(line);
    out.push('\n');
}
