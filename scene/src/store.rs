//! Observable scene store: the single writer of persisted scene state.
//!
//! DESIGN
//! ======
//! The store owns the [`SceneSnapshot`] plus UI-only fields (selection,
//! transform mode, active slide, pending fly-to). Every mutation reports the
//! [`Slice`]s it touched; subscribers registered for a slice are called only
//! when that slice changed, so a per-object consumer does not re-run when an
//! unrelated object or the camera moves.
//!
//! PERSISTENCE
//! ===========
//! Persistence is an injected [`SnapshotSink`] invoked after each committed
//! mutation that touches persisted state. UI-only mutations never reach the
//! sink. A failing sink is logged and never rolls back the in-memory state.
//!
//! IDS
//! ===
//! Object and slide ids carry a monotonically increasing numeric suffix. The
//! counters only move forward: restoring or loading a snapshot advances them
//! past every suffix it contains, so ids minted later never collide with ids
//! that were persisted earlier.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;

use glam::Vec3;
use tracing::{debug, warn};

use crate::consts::{DEFAULT_OBJECT_Y, DEFAULT_SLIDE_DURATION, DUPLICATE_OFFSET, MIN_SLIDE_DURATION};
use crate::doc::{
    CameraKeyframe, CameraPose, Geometry, OBJECT_ID_PREFIX, ObjectId, PartialSceneObject, SLIDE_ID_PREFIX,
    SceneObject, SceneSnapshot, Slide, SlideId, TransformMode, id_suffix,
};
use crate::resolve;
use crate::templates;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors returned by store mutations that validate their input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// No slide with this id exists.
    #[error("unknown slide: {0}")]
    UnknownSlide(SlideId),
    /// A slide duration was zero, negative or not a number.
    #[error("slide duration must be at least {min}, got {got}")]
    InvalidDuration { got: f32, min: f32 },
    /// A reorder index was outside the slide list.
    #[error("slide index {index} out of range (len {len})")]
    SlideIndexOutOfRange { index: usize, len: usize },
}

/// Error reported by a [`SnapshotSink`].
#[derive(Debug, thiserror::Error)]
#[error("snapshot save failed: {0}")]
pub struct PersistError(pub String);

// =============================================================================
// SAVE HOOK
// =============================================================================

/// Durable storage for scene snapshots (browser local storage, a file, ...).
pub trait SnapshotSink {
    /// Persist the latest committed snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if the backend rejects the write.
    fn save(&mut self, snapshot: &SceneSnapshot) -> Result<(), PersistError>;
}

// =============================================================================
// SLICES & SUBSCRIPTIONS
// =============================================================================

/// A subscribable part of the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slice {
    /// Object list membership or order changed.
    Objects,
    /// One object's fields changed (or it was added/removed).
    Object(ObjectId),
    Selection,
    /// Environment preset or background color.
    Environment,
    Slides,
    /// Stored camera pose.
    Camera,
    Recording,
    /// Transform mode and active slide.
    Ui,
    /// A fly-to request was set or cleared.
    FlyTo,
}

impl Slice {
    /// Whether changes to this slice must reach the save hook.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        matches!(
            self,
            Self::Objects | Self::Object(_) | Self::Environment | Self::Slides | Self::Camera | Self::Recording
        )
    }
}

/// Handle returned by [`SceneStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreState)>;

struct Subscription {
    id: SubscriptionId,
    slice: Slice,
    listener: Listener,
}

// =============================================================================
// STATE
// =============================================================================

/// UI-only fields. Never persisted, exported or shared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub selected_id: Option<ObjectId>,
    pub transform_mode: TransformMode,
    pub active_slide_id: Option<SlideId>,
    /// Slide the camera has been asked to fly to, consumed by the controller.
    pub fly_to_slide_id: Option<SlideId>,
}

/// Everything the store holds, as seen by subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub scene: SceneSnapshot,
    pub ui: UiState,
}

/// Sparse update for a slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideUpdate {
    pub name: Option<String>,
    /// Re-captured camera pose.
    pub pose: Option<CameraPose>,
    /// `Some(None)` clears the caption.
    pub text: Option<Option<String>>,
    pub duration: Option<f32>,
}

// =============================================================================
// STORE
// =============================================================================

/// The scene store.
pub struct SceneStore {
    state: StoreState,
    // Wider than the parsed u64 suffix so minting past any observed id cannot overflow.
    last_object_id: u128,
    last_slide_id: u128,
    next_subscription: u64,
    subscriptions: Vec<Subscription>,
    sink: Option<Box<dyn SnapshotSink>>,
}

impl SceneStore {
    /// A store holding an empty scene.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            state: StoreState::default(),
            last_object_id: 0,
            last_slide_id: 0,
            next_subscription: 0,
            subscriptions: Vec::new(),
            sink: None,
        }
    }

    /// A store holding the bundled starter scene.
    #[must_use]
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.load_template(templates::starter());
        store
    }

    /// Rebuild a store from a persisted snapshot.
    ///
    /// A missing or unparseable snapshot is treated as absent and yields the
    /// starter scene. Recoverable per-field problems are logged and repaired.
    #[must_use]
    pub fn restore(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::new();
        };
        match SceneSnapshot::from_json_str(raw) {
            Ok((snapshot, issues)) => {
                for issue in &issues {
                    debug!(?issue, "persisted snapshot repaired");
                }
                let mut store = Self::empty();
                store.load_scene(snapshot);
                store
            }
            Err(e) => {
                warn!(error = %e, "persisted snapshot unreadable; starting from default scene");
                Self::new()
            }
        }
    }

    /// Attach the save hook invoked after each persisted mutation.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn SnapshotSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    #[must_use]
    pub fn scene(&self) -> &SceneSnapshot {
        &self.state.scene
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.state.ui
    }

    /// An immutable copy of the persisted part of the store.
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        self.state.scene.clone()
    }

    #[must_use]
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.state.scene.object(id)
    }

    #[must_use]
    pub fn selection(&self) -> Option<&ObjectId> {
        self.state.ui.selected_id.as_ref()
    }

    /// Highest object id suffix issued or observed so far.
    #[must_use]
    pub fn object_counter(&self) -> u128 {
        self.last_object_id
    }

    /// Highest slide id suffix issued or observed so far.
    #[must_use]
    pub fn slide_counter(&self) -> u128 {
        self.last_slide_id
    }

    // --- Subscriptions ---

    /// Call `listener` after every mutation that touches `slice`.
    pub fn subscribe(&mut self, slice: Slice, listener: impl FnMut(&StoreState) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscriptions.push(Subscription { id, slice, listener: Box::new(listener) });
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    // --- Objects ---

    /// Add an object with per-geometry defaults and select it.
    ///
    /// `options` is merged over the defaults; its id-bearing fields are not
    /// consulted, the id is always freshly minted.
    pub fn add_object(&mut self, geometry: Geometry, position: Option<Vec3>, options: Option<&PartialSceneObject>) -> ObjectId {
        let id = self.mint_object_id();
        let mut obj = default_object(geometry, id.clone(), self.last_object_id);
        if let Some(position) = position {
            obj.position = position;
        }
        if let Some(options) = options {
            obj.apply_partial(options);
        }
        self.state.scene.objects.push(obj);
        self.state.ui.selected_id = Some(id.clone());
        self.commit(vec![Slice::Objects, Slice::Object(id.clone()), Slice::Selection]);
        id
    }

    /// Clone an object with a position offset and a fresh id, and select it.
    ///
    /// Returns `None` if the source object does not exist.
    pub fn duplicate_object(&mut self, id: &str) -> Option<ObjectId> {
        let source = self.state.scene.object(id)?.clone();
        let new_id = self.mint_object_id();
        let mut copy = source;
        copy.id = new_id.clone();
        copy.name = format!("{} copy", copy.name);
        let offset = Vec3::from_array(DUPLICATE_OFFSET);
        copy.position += offset;
        if let Some(hover) = copy.hover_position.as_mut() {
            *hover += offset;
        }
        self.state.scene.objects.push(copy);
        self.state.ui.selected_id = Some(new_id.clone());
        self.commit(vec![Slice::Objects, Slice::Object(new_id.clone()), Slice::Selection]);
        Some(new_id)
    }

    /// Remove an object. Clears the selection only if it pointed at `id`.
    pub fn remove_object(&mut self, id: &str) -> Option<SceneObject> {
        let index = self.state.scene.objects.iter().position(|o| o.id == id)?;
        let removed = self.state.scene.objects.remove(index);
        let mut changes = vec![Slice::Objects, Slice::Object(removed.id.clone())];
        if self.state.ui.selected_id.as_deref() == Some(id) {
            self.state.ui.selected_id = None;
            changes.push(Slice::Selection);
        }
        self.commit(changes);
        Some(removed)
    }

    /// Select an object, or clear the selection with `None`.
    ///
    /// Selecting an unknown id is ignored and returns `false`.
    pub fn select_object(&mut self, id: Option<&str>) -> bool {
        if let Some(id) = id {
            if self.state.scene.object(id).is_none() {
                return false;
            }
        }
        let next = id.map(str::to_owned);
        if self.state.ui.selected_id == next {
            return true;
        }
        self.state.ui.selected_id = next;
        self.commit(vec![Slice::Selection]);
        true
    }

    /// Merge `partial` into an object. Returns `false` if it doesn't exist.
    pub fn update_object(&mut self, id: &str, partial: &PartialSceneObject) -> bool {
        let Some(obj) = self.state.scene.objects.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        obj.apply_partial(partial);
        self.commit(vec![Slice::Object(id.to_owned())]);
        true
    }

    /// Replace the object list with fresh copies of `template`.
    ///
    /// Template ids are ignored; every object gets a newly minted id.
    pub fn load_template(&mut self, template: Vec<SceneObject>) {
        let mut changes: Vec<Slice> = self.state.scene.objects.iter().map(|o| Slice::Object(o.id.clone())).collect();
        let mut objects = Vec::with_capacity(template.len());
        for mut obj in template {
            obj.id = self.mint_object_id();
            changes.push(Slice::Object(obj.id.clone()));
            objects.push(obj);
        }
        self.state.scene.objects = objects;
        self.state.ui.selected_id = None;
        changes.extend([Slice::Objects, Slice::Selection]);
        self.commit(changes);
    }

    // --- Environment / UI ---

    pub fn set_environment(&mut self, environment: &str) {
        self.state.scene.environment = environment.to_owned();
        self.commit(vec![Slice::Environment]);
    }

    pub fn set_bg_color(&mut self, color: &str) {
        self.state.scene.bg_color = color.to_owned();
        self.commit(vec![Slice::Environment]);
    }

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        self.state.ui.transform_mode = mode;
        self.commit(vec![Slice::Ui]);
    }

    // --- Camera ---

    /// Store the camera pose so it survives a reload.
    pub fn set_camera_pose(&mut self, pose: CameraPose) {
        if self.state.scene.camera_pose() == pose {
            return;
        }
        self.state.scene.camera_position = pose.position;
        self.state.scene.camera_target = pose.target;
        self.commit(vec![Slice::Camera]);
    }

    pub fn set_camera_recording(&mut self, keyframes: Vec<CameraKeyframe>) {
        self.state.scene.camera_recording = keyframes;
        self.commit(vec![Slice::Recording]);
    }

    pub fn clear_camera_recording(&mut self) {
        if self.state.scene.camera_recording.is_empty() {
            return;
        }
        self.state.scene.camera_recording.clear();
        self.commit(vec![Slice::Recording]);
    }

    // --- Slides ---

    /// Append a slide bookmarking `live_pose`, the camera pose right now.
    pub fn add_slide(&mut self, live_pose: CameraPose) -> SlideId {
        let id = self.mint_slide_id();
        let name = format!("Slide {}", self.state.scene.slides.len() + 1);
        self.state.scene.slides.push(Slide {
            id: id.clone(),
            name,
            camera_position: live_pose.position,
            camera_target: live_pose.target,
            text: None,
            duration: DEFAULT_SLIDE_DURATION,
        });
        self.commit(vec![Slice::Slides]);
        id
    }

    /// Apply a sparse slide update.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownSlide`] for a missing slide and
    /// [`StoreError::InvalidDuration`] for a duration below the minimum. On
    /// error nothing is changed.
    pub fn update_slide(&mut self, id: &str, update: SlideUpdate) -> Result<(), StoreError> {
        if let Some(duration) = update.duration {
            validate_duration(duration)?;
        }
        let slide = self
            .state
            .scene
            .slides
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::UnknownSlide(id.to_owned()))?;
        if let Some(name) = update.name {
            slide.name = name;
        }
        if let Some(pose) = update.pose {
            slide.camera_position = pose.position;
            slide.camera_target = pose.target;
        }
        if let Some(text) = update.text {
            slide.text = text;
        }
        if let Some(duration) = update.duration {
            slide.duration = duration;
        }
        self.commit(vec![Slice::Slides]);
        Ok(())
    }

    /// Remove a slide, clearing any UI reference to it.
    pub fn remove_slide(&mut self, id: &str) -> Option<Slide> {
        let index = self.state.scene.slides.iter().position(|s| s.id == id)?;
        let removed = self.state.scene.slides.remove(index);
        let mut changes = vec![Slice::Slides];
        if self.state.ui.active_slide_id.as_deref() == Some(id) {
            self.state.ui.active_slide_id = None;
            changes.push(Slice::Ui);
        }
        if self.state.ui.fly_to_slide_id.as_deref() == Some(id) {
            self.state.ui.fly_to_slide_id = None;
            changes.push(Slice::FlyTo);
        }
        self.commit(changes);
        Some(removed)
    }

    /// Move the slide at `from` to index `to`, keeping the others in order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SlideIndexOutOfRange`] if either index is invalid.
    pub fn reorder_slides(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let len = self.state.scene.slides.len();
        for index in [from, to] {
            if index >= len {
                return Err(StoreError::SlideIndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        let slide = self.state.scene.slides.remove(from);
        self.state.scene.slides.insert(to, slide);
        self.commit(vec![Slice::Slides]);
        Ok(())
    }

    pub fn set_active_slide(&mut self, id: Option<&str>) {
        self.state.ui.active_slide_id = id.map(str::to_owned);
        self.commit(vec![Slice::Ui]);
    }

    /// Ask the camera to fly to a slide and mark it active.
    ///
    /// An unknown id clears any pending request instead.
    pub fn fly_to_slide(&mut self, id: &str) {
        if self.state.scene.slide(id).is_none() {
            debug!(slide = id, "fly-to for unknown slide ignored");
            self.clear_fly_to();
            return;
        }
        self.state.ui.fly_to_slide_id = Some(id.to_owned());
        self.state.ui.active_slide_id = Some(id.to_owned());
        self.commit(vec![Slice::FlyTo, Slice::Ui]);
    }

    /// Consume the pending fly-to request, if any.
    pub fn take_fly_to(&mut self) -> Option<SlideId> {
        let taken = self.state.ui.fly_to_slide_id.take();
        if taken.is_some() {
            self.commit(vec![Slice::FlyTo]);
        }
        taken
    }

    pub fn clear_fly_to(&mut self) {
        if self.state.ui.fly_to_slide_id.take().is_some() {
            self.commit(vec![Slice::FlyTo]);
        }
    }

    // --- Whole scene ---

    /// Replace the whole scene atomically (import, share-link hydration).
    ///
    /// Clears selection, active slide and any pending fly-to. Id counters are
    /// advanced past every id in `snapshot`; ids duplicated inside the
    /// snapshot are re-minted so live ids stay unique.
    pub fn load_scene(&mut self, mut snapshot: SceneSnapshot) {
        self.advance_counters(&snapshot);

        let mut seen_objects = HashSet::new();
        for obj in &mut snapshot.objects {
            if !seen_objects.insert(obj.id.clone()) {
                obj.id = self.mint_object_id();
                seen_objects.insert(obj.id.clone());
            }
        }
        let mut seen_slides = HashSet::new();
        for slide in &mut snapshot.slides {
            if !seen_slides.insert(slide.id.clone()) {
                slide.id = self.mint_slide_id();
                seen_slides.insert(slide.id.clone());
            }
            slide.duration = slide.duration.max(MIN_SLIDE_DURATION);
        }

        let mut changes: Vec<Slice> = self.state.scene.objects.iter().map(|o| Slice::Object(o.id.clone())).collect();
        changes.extend(snapshot.objects.iter().map(|o| Slice::Object(o.id.clone())));
        changes.extend([
            Slice::Objects,
            Slice::Environment,
            Slice::Slides,
            Slice::Camera,
            Slice::Recording,
            Slice::Selection,
            Slice::Ui,
            Slice::FlyTo,
        ]);

        self.state.scene = snapshot;
        self.state.ui = UiState { transform_mode: self.state.ui.transform_mode, ..UiState::default() };
        self.commit(changes);
    }

    // --- Internals ---

    fn mint_object_id(&mut self) -> ObjectId {
        self.last_object_id += 1;
        format!("{OBJECT_ID_PREFIX}{}", self.last_object_id)
    }

    fn mint_slide_id(&mut self) -> SlideId {
        self.last_slide_id += 1;
        format!("{SLIDE_ID_PREFIX}{}", self.last_slide_id)
    }

    fn advance_counters(&mut self, snapshot: &SceneSnapshot) {
        let max_object = snapshot.objects.iter().filter_map(|o| id_suffix(&o.id, OBJECT_ID_PREFIX)).max();
        let max_slide = snapshot.slides.iter().filter_map(|s| id_suffix(&s.id, SLIDE_ID_PREFIX)).max();
        self.last_object_id = self.last_object_id.max(max_object.map_or(0, u128::from));
        self.last_slide_id = self.last_slide_id.max(max_slide.map_or(0, u128::from));
    }

    fn commit(&mut self, changes: Vec<Slice>) {
        for sub in &mut self.subscriptions {
            if changes.contains(&sub.slice) {
                (sub.listener)(&self.state);
            }
        }
        if changes.iter().any(Slice::is_persisted) {
            if let Some(sink) = self.sink.as_mut() {
                if let Err(e) = sink.save(&self.state.scene) {
                    warn!(error = %e, "scene snapshot not persisted");
                }
            }
        }
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_duration(duration: f32) -> Result<(), StoreError> {
    if duration.is_nan() || duration < MIN_SLIDE_DURATION {
        return Err(StoreError::InvalidDuration { got: duration, min: MIN_SLIDE_DURATION });
    }
    Ok(())
}

/// Deterministic defaults for a newly added object.
pub(crate) fn default_object(geometry: Geometry, id: ObjectId, ordinal: u128) -> SceneObject {
    let rotation = match geometry {
        // Stand the coin upright so it faces the default camera.
        Geometry::Cylinder => Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
        _ => Vec3::ZERO,
    };
    SceneObject {
        id,
        name: format!("{} {ordinal}", geometry.label()),
        geometry,
        material: crate::doc::Material::Standard,
        animation: crate::doc::Animation::None,
        position: Vec3::new(0.0, DEFAULT_OBJECT_Y, 0.0),
        rotation,
        scale: Vec3::ONE,
        color: resolve::DEFAULT_COLOR.to_owned(),
        metalness: resolve::DEFAULT_METALNESS,
        roughness: resolve::DEFAULT_ROUGHNESS,
        text: matches!(geometry, Geometry::Text3d).then(|| resolve::DEFAULT_TEXT.to_owned()),
        transmission: Some(resolve::DEFAULT_TRANSMISSION),
        thickness: Some(resolve::DEFAULT_THICKNESS),
        distort: Some(resolve::DEFAULT_DISTORT),
        speed: Some(resolve::DEFAULT_SPEED),
        texture_url: None,
        model_url: None,
        model_animation_name: None,
        orbit_radius: None,
        orbit_speed: None,
        hover_position: None,
        hover_rotation: None,
        hover_scale: None,
        hover_color: None,
        hover_group: None,
        hover_preset: None,
        draggable: false,
        parallax_intensity: 0.0,
    }
}
