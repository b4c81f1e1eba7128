//! Headless embed preview: drive the runtime for a fixed number of frames and
//! report the camera each frame.

use scene::doc::SceneSnapshot;
use scene::engine::EngineCore;
use serde::Serialize;

pub const DEFAULT_WIDTH: f32 = 1280.0;
pub const DEFAULT_HEIGHT: f32 = 720.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDriver {
    /// Leave scroll alone (playback or orbit scenes).
    None,
    /// Hold a fixed offset.
    Fixed(f32),
    /// Sweep linearly from 0 to 1 over the run.
    Sweep,
}

#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    pub frames: u32,
    pub fps: f32,
    pub scroll: ScrollDriver,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewFrame {
    pub frame: u32,
    pub mode: &'static str,
    pub position: [f32; 3],
    pub target: [f32; 3],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
}

/// Run the embed runtime over `snapshot`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn run(snapshot: SceneSnapshot, options: PreviewOptions) -> Vec<PreviewFrame> {
    let mut engine = EngineCore::embed(snapshot);
    engine.set_viewport(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let dt = if options.fps > 0.0 { 1.0 / options.fps } else { 1.0 / 60.0 };
    let last = options.frames.saturating_sub(1).max(1) as f32;

    (0..options.frames)
        .map(|frame| {
            match options.scroll {
                ScrollDriver::None => {}
                ScrollDriver::Fixed(offset) => engine.set_scroll(offset),
                ScrollDriver::Sweep => engine.set_scroll(frame as f32 / last),
            }
            let out = engine.frame(dt);
            PreviewFrame {
                frame,
                mode: engine.controller.mode().name(),
                position: out.camera.position.to_array(),
                target: out.camera.target.to_array(),
                actions: out.actions.iter().map(|a| format!("{a:?}")).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;
