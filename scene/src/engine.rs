//! Per-frame orchestration and input dispatch.
//!
//! `EngineCore` owns the store, the camera controller, the interaction
//! engine and the shared transient refs. The host forwards input events and
//! calls [`EngineCore::frame`] once per rendered frame. A frame runs in fixed
//! phases:
//!
//! 1. consume a pending fly-to request from the store
//! 2. camera controller (writes the live camera)
//! 3. object interaction (reads the live camera for distance)
//! 4. throttled write of the live camera pose back into the store

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info};

use crate::camera::{Camera, Point};
use crate::consts::{CAMERA_PERSIST_EVERY_FRAMES, RECORDING_TOLERANCE, WHEEL_SCROLL_PER_PX};
use crate::controller::{CameraController, CameraEvent, CameraMode, Context};
use crate::doc::{ObjectId, SceneSnapshot, SlideId};
use crate::input::{Button, InputState, Key, Modifiers, Shortcut, WheelDelta};
use crate::interaction::{InteractionEngine, ObjectFrame};
use crate::shared::SharedRefs;
use crate::store::{SceneStore, SlideUpdate, StoreError};

/// Actions returned to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectionChanged(Option<ObjectId>),
    ObjectAdded(ObjectId),
    ObjectRemoved(ObjectId),
    /// A fly-to finished on this slide.
    SlideArrived(SlideId),
    /// Scroll-bound slide index changed; show that slide's caption.
    SlideChanged(usize),
    PlaybackFinished,
    /// A recording was simplified and stored with this many keyframes.
    RecordingSaved(usize),
    /// A recording was too short to keep.
    RecordingDiscarded,
    RenderNeeded,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub camera: Camera,
    pub objects: Vec<ObjectFrame>,
    pub actions: Vec<Action>,
}

/// Core engine state, testable without a browser.
pub struct EngineCore {
    pub store: SceneStore,
    pub controller: CameraController,
    pub interaction: InteractionEngine,
    pub shared: SharedRefs,
    pub input: InputState,
    context: Context,
    frames: u64,
}

impl EngineCore {
    /// An authoring engine over `store`.
    #[must_use]
    pub fn editor(store: SceneStore) -> Self {
        Self::with_context(store, Context::Editor)
    }

    /// A published-scene runtime.
    ///
    /// Scroll-bound when the scene has two or more slides; otherwise a stored
    /// recording (if any) plays on a loop.
    #[must_use]
    pub fn embed(snapshot: SceneSnapshot) -> Self {
        let mut store = SceneStore::empty();
        store.load_scene(snapshot);
        let mut engine = Self::with_context(store, Context::Embed);
        engine.autoplay_recording();
        engine
    }

    /// Loop the stored recording in an embed that has no slide tour.
    fn autoplay_recording(&mut self) {
        let scene = self.store.scene();
        if self.context == Context::Embed && scene.slides.len() < 2 && scene.camera_recording.len() >= 2 {
            let keyframes = scene.camera_recording.clone();
            self.controller.start_playback(keyframes, true);
        }
    }

    fn with_context(store: SceneStore, context: Context) -> Self {
        let pose = store.scene().camera_pose();
        let mut shared = SharedRefs::default();
        shared.camera.set_pose(pose);
        Self {
            controller: CameraController::new(context, pose),
            interaction: InteractionEngine::new(context == Context::Embed),
            store,
            shared,
            input: InputState::Idle,
            context,
            frames: 0,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn context(&self) -> Context {
        self.context
    }

    /// The live camera, possibly ahead of the stored pose.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.shared.camera
    }

    #[must_use]
    pub fn selection(&self) -> Option<&ObjectId> {
        self.store.selection()
    }

    // --- Data inputs ---

    /// Replace the scene and reset every transient layer.
    ///
    /// An embed re-applies the recording autoplay rule to the new scene.
    pub fn load_scene(&mut self, snapshot: SceneSnapshot) {
        self.store.load_scene(snapshot);
        self.controller.reset(self.store.scene().camera_pose(), &mut self.shared);
        self.interaction.reset();
        self.input = InputState::Idle;
        self.shared.dragging = None;
        self.autoplay_recording();
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.shared.camera.viewport_width = width;
        self.shared.camera.viewport_height = height;
    }

    /// Host-driven scroll position for scroll-bound embeds.
    pub fn set_scroll(&mut self, offset: f32) {
        self.shared.set_scroll(offset);
    }

    // --- Slides & recording ---

    /// Bookmark the live camera as a new slide.
    pub fn add_slide(&mut self) -> SlideId {
        self.store.add_slide(self.shared.live_pose())
    }

    /// Re-capture a slide's pose from the live camera.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownSlide`] if the slide does not exist.
    pub fn recapture_slide(&mut self, id: &str) -> Result<(), StoreError> {
        let update = SlideUpdate { pose: Some(self.shared.live_pose()), ..SlideUpdate::default() };
        self.store.update_slide(id, update)
    }

    /// Request a flight; picked up at the start of the next frame.
    pub fn fly_to_slide(&mut self, id: &str) {
        self.store.fly_to_slide(id);
    }

    pub fn start_recording(&mut self) {
        self.controller.start_recording(&self.shared);
    }

    /// Stop recording and store the simplified path.
    pub fn stop_recording(&mut self) -> Action {
        match self.controller.stop_recording(RECORDING_TOLERANCE) {
            Some(keyframes) => {
                let len = keyframes.len();
                self.store.set_camera_recording(keyframes);
                Action::RecordingSaved(len)
            }
            None => Action::RecordingDiscarded,
        }
    }

    /// Play the stored recording. Returns `false` if there is nothing to play.
    pub fn play_recording(&mut self, looped: bool) -> bool {
        let keyframes = self.store.scene().camera_recording.clone();
        self.controller.start_playback(keyframes, looped)
    }

    pub fn stop_playback(&mut self) {
        self.controller.stop_playback(&self.shared);
    }

    // --- Pointer input ---

    pub fn on_pointer_over(&mut self, id: &str) -> Vec<Action> {
        self.interaction.pointer_over(id);
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_out(&mut self, id: &str) -> Vec<Action> {
        self.interaction.pointer_out(id);
        vec![Action::RenderNeeded]
    }

    /// Pointer left the canvas entirely.
    pub fn on_pointer_leave(&mut self) {
        self.shared.pointer = None;
    }

    /// Pointer pressed at `screen`, over `target` if the host hit an object.
    pub fn on_pointer_down(&mut self, screen: Point, target: Option<&str>, button: Button) -> Vec<Action> {
        self.shared.pointer = Some(self.shared.camera.normalize_screen(screen));
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        let hit = target.and_then(|id| self.store.object(id));
        let missed = hit.is_none();
        if let Some(obj) = hit {
            if self.interaction.begin_drag(obj) {
                let id = obj.id.clone();
                debug!(object = %id, "drag start");
                self.shared.dragging = Some(id.clone());
                self.input = InputState::DraggingObject { id, last_screen: screen, moved: false };
                return actions;
            }
            if self.context == Context::Editor {
                let id = obj.id.clone();
                if self.store.selection() != Some(&id) && self.store.select_object(Some(&id)) {
                    actions.push(Action::SelectionChanged(Some(id)));
                }
            }
        }
        self.input = InputState::Orbiting { last_screen: screen, missed };
        actions
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        self.shared.pointer = Some(self.shared.camera.normalize_screen(screen));
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Orbiting { last_screen, missed } => {
                let delta = Point::new(screen.x - last_screen.x, screen.y - last_screen.y);
                *last_screen = screen;
                *missed = false;
                self.controller.on_orbit_drag(delta, &mut self.shared);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingObject { id, last_screen, moved } => {
                let delta = Point::new(screen.x - last_screen.x, screen.y - last_screen.y);
                *last_screen = screen;
                *moved = true;
                self.interaction.drag_by(id, delta);
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::DraggingObject { id, moved, .. } => {
                self.interaction.end_drag(&id);
                self.shared.dragging = None;
                debug!(object = %id, moved, "drag end");
                if !moved
                    && self.context == Context::Editor
                    && self.store.selection() != Some(&id)
                    && self.store.select_object(Some(&id))
                {
                    actions.push(Action::SelectionChanged(Some(id)));
                }
            }
            // Click on empty space.
            InputState::Orbiting { missed: true, .. }
                if self.context == Context::Editor && self.store.selection().is_some() =>
            {
                if self.store.select_object(None) {
                    actions.push(Action::SelectionChanged(None));
                }
            }
            InputState::Idle | InputState::Orbiting { .. } => {}
        }
        actions
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        if matches!(self.controller.mode(), CameraMode::ScrollBound) {
            self.shared.scroll_by(delta.dy * WHEEL_SCROLL_PER_PX);
        } else {
            self.controller.on_wheel(delta.dy, &mut self.shared);
        }
        vec![Action::RenderNeeded]
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.context != Context::Editor {
            return Vec::new();
        }
        let Some(shortcut) = Shortcut::from_key(key, modifiers) else {
            return Vec::new();
        };
        let selected = self.store.selection().cloned();
        match shortcut {
            Shortcut::RemoveSelected => {
                let Some(id) = selected else {
                    return Vec::new();
                };
                match self.store.remove_object(&id) {
                    Some(_) => vec![Action::ObjectRemoved(id), Action::SelectionChanged(None)],
                    None => Vec::new(),
                }
            }
            Shortcut::DuplicateSelected => {
                let Some(id) = selected else {
                    return Vec::new();
                };
                match self.store.duplicate_object(&id) {
                    Some(copy) => vec![Action::ObjectAdded(copy.clone()), Action::SelectionChanged(Some(copy))],
                    None => Vec::new(),
                }
            }
            Shortcut::Escape => {
                self.controller.cancel_flight(&self.shared);
                self.store.clear_fly_to();
                let mut actions = vec![Action::RenderNeeded];
                if selected.is_some() && self.store.select_object(None) {
                    actions.push(Action::SelectionChanged(None));
                }
                actions
            }
        }
    }

    // --- Frame ---

    /// Run one frame. `dt` is seconds since the previous frame.
    pub fn frame(&mut self, dt: f32) -> FrameOutput {
        let mut actions = Vec::new();

        // Phase 1: pending fly-to.
        if let Some(slide_id) = self.store.take_fly_to() {
            match self.store.scene().slide(&slide_id) {
                Some(slide) => self.controller.fly_to(slide),
                None => debug!(slide = %slide_id, "fly-to target vanished"),
            }
        }

        // Phase 2: camera.
        let events = self.controller.frame(dt, &self.store.scene().slides, &mut self.shared);
        for event in events {
            actions.push(match event {
                CameraEvent::Arrived(id) => Action::SlideArrived(id),
                CameraEvent::SlideChanged(index) => Action::SlideChanged(index),
                CameraEvent::PlaybackFinished => Action::PlaybackFinished,
            });
        }

        // Phase 3: objects, against this frame's camera.
        let objects = self.interaction.frame(dt, &self.store.scene().objects, &self.shared);

        // Phase 4: throttled persistence of the live pose.
        self.frames += 1;
        if self.context == Context::Editor && self.frames % CAMERA_PERSIST_EVERY_FRAMES == 0 {
            self.persist_camera();
        }

        FrameOutput { camera: self.shared.camera, objects, actions }
    }

    /// Write the live camera pose into the store now.
    pub fn persist_camera(&mut self) {
        let pose = self.shared.live_pose();
        if self.store.scene().camera_pose() != pose {
            info!(position = ?pose.position, target = ?pose.target, "camera pose persisted");
            self.store.set_camera_pose(pose);
        }
    }
}
