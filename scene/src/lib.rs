//! Scene runtime for the tresde 3D scene editor.
//!
//! This crate owns everything between user input and the rendering engine:
//! the scene document and its observable store, the camera state machine
//! (orbit, fly-to, scroll-bound slides, recording, playback), the per-object
//! interaction layers (hover, drag, parallax, tilt, idle animation), and the
//! export paths that turn a scene snapshot into a standalone HTML document or
//! a share link. The host is responsible only for wiring pointer/wheel/key
//! events into the [`engine::EngineCore`], calling [`engine::EngineCore::frame`]
//! once per rendered frame, and pushing the returned poses into its renderer.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-frame orchestration and input dispatch ([`engine::EngineCore`]) |
//! | [`doc`] | Scene document types and snapshot parsing |
//! | [`store`] | Observable scene store with slice subscriptions and a save hook |
//! | [`resolve`] | Geometry/material resolver and shared parameter defaults |
//! | [`source`] | Readable scene source snippet generated from the resolver |
//! | [`presets`] | Hover presets resolved against an object's rest pose |
//! | [`templates`] | Bundled starter scene and templates |
//! | [`camera`] | Camera pose, look-at basis, pixel-to-world conversion |
//! | [`controller`] | Camera state machine and orbit controls |
//! | [`recorder`] | Camera path sampling, RDP simplification, playback |
//! | [`interaction`] | Per-object hover/drag/parallax/tilt/idle layers |
//! | [`input`] | Pointer, wheel and key event types |
//! | [`shared`] | Per-frame state shared by the camera and interaction phases |
//! | [`export`] | Standalone HTML export with inlined assets |
//! | [`share`] | Compressed `#scene=` share fragments |
//! | [`remote`] | Persistence service seam (publish, list, import) |
//! | [`consts`] | Shared numeric constants (smoothing factors, epsilons, defaults) |

pub mod camera;
pub mod consts;
pub mod controller;
pub mod doc;
pub mod engine;
pub mod export;
pub mod input;
pub mod interaction;
pub mod presets;
pub mod recorder;
pub mod remote;
pub mod resolve;
pub mod share;
pub mod shared;
pub mod source;
pub mod store;
pub mod templates;
