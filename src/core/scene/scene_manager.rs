//=========================================================================
// Scene Manager
//=========================================================================
//
// Transition controller and event router for the scene stack.
//
// Scenes are owned by the registry and addressed through `SceneId`
// handles. The manager tracks which scene is current, which one is the
// pending target of a transition, and whether a transition is in flight.
//
// Transition phases:
//   initiate  → outgoing on_pause [+ on_stop], incoming on_create
//   in-flight → playable advanced by enter_frame (animated only)
//   complete  → destroy outgoing/closed scene, promote next,
//               on_start + on_resume (open) or on_resume (close)
//
// Routing:
//   route_input() → current scene, dropped while in flight
//   enter_frame() → current scene, always
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::animation::{AnimationTable, SceneAnimation};
use super::factory::SceneFactory;
use super::params::SceneParams;
use super::registry::{RenderEntry, RenderSink, SceneRegistry};
use super::transition::{Completion, PendingTransition, TransitionState};
use super::{FrameTick, Scene, SceneId, ScenePose};
use crate::core::error::SceneResult;
use crate::core::input::InputEvent;
use crate::core::message_bus::EventDispatcher;

//=== SceneEvent ==========================================================

/// Announcements published on the manager's dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// A scene was created and added to the stack.
    Opened { scene: SceneId, name: String },

    /// A scene was destroyed and removed from the stack.
    Closed { scene: SceneId, name: String },

    /// An animated handoff began.
    TransitionStarted {
        from: Option<SceneId>,
        to: Option<SceneId>,
    },

    /// An animated handoff finished; `current` is the promoted scene.
    TransitionCompleted { current: Option<SceneId> },
}

//=== SceneManager ========================================================

/// Owns the scene stack and drives every transition on it.
///
/// Rejected operations (a transition already in flight, an empty stack,
/// a name already in use) return `Ok(None)` without touching any state.
/// Errors only come from the factory, from an unknown animation name, or
/// from scene callbacks.
///
/// # Examples
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// struct Title;
///
/// impl Scene for Title {
///     fn name(&self) -> &str {
///         "title"
///     }
/// }
///
/// let mut manager = SceneManager::builder()
///     .with_factory(SceneCatalog::new().with_scene("title", |_, _| Title))
///     .build();
///
/// let title = manager.open_scene("title", SceneParams::new()).unwrap();
/// assert_eq!(manager.current_scene(), title);
/// assert_eq!(manager.find_scene_by_name("title"), title);
/// ```
pub struct SceneManager {
    registry: SceneRegistry,
    factory: Box<dyn SceneFactory>,
    animations: AnimationTable,
    events: EventDispatcher,
    current: Option<SceneId>,
    next: Option<SceneId>,
    transition: TransitionState,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with the built-in animations and no render sink.
    pub fn new<F: SceneFactory + 'static>(factory: F) -> Self {
        Self::from_parts(Box::new(factory), AnimationTable::with_defaults(), SceneRegistry::new())
    }

    pub fn builder() -> SceneManagerBuilder {
        SceneManagerBuilder::new()
    }

    fn from_parts(
        factory: Box<dyn SceneFactory>,
        animations: AnimationTable,
        registry: SceneRegistry,
    ) -> Self {
        Self {
            registry,
            factory,
            animations,
            events: EventDispatcher::new(),
            current: None,
            next: None,
            transition: TransitionState::Idle,
        }
    }

    //--- Configuration ----------------------------------------------------

    /// Replaces the factory used by subsequent opens.
    pub fn set_scene_factory<F: SceneFactory + 'static>(&mut self, factory: F) {
        debug!(target: "stage", "Scene factory replaced");
        self.factory = Box::new(factory);
    }

    /// Replaces the render sink and publishes the current table to it.
    pub fn set_render_sink<S: RenderSink + 'static>(&mut self, sink: S) {
        self.registry.set_render_sink(Box::new(sink));
    }

    pub fn animations(&self) -> &AnimationTable {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut AnimationTable {
        &mut self.animations
    }

    //--- Transitions ------------------------------------------------------

    /// Creates `name` and makes it current, optionally animated.
    ///
    /// Returns the new scene's id, or `None` when rejected. With an
    /// animation the scene becomes current only once the playable
    /// finishes inside [`Self::enter_frame`].
    pub fn open_scene(&mut self, name: &str, params: SceneParams) -> SceneResult<Option<SceneId>> {
        if self.is_transitioning() {
            debug!(target: "stage", "Open '{}' rejected: transition in flight", name);
            return Ok(None);
        }

        if let Some(existing) = self.registry.find_by_name(name) {
            debug!(target: "stage", "Open '{}' rejected: already live as {}", name, existing);
            return Ok(None);
        }

        let animation = self.resolve_animation(&params)?;
        let mut scene = self.factory.create_scene(name, &params)?;
        let outgoing = self.current;

        if let Some(current) = outgoing.and_then(|id| self.registry.get_mut(id)) {
            current.on_pause()?;
            if params.current_closing {
                current.on_stop()?;
            }
        }

        scene.on_create(&params)?;

        let id = self.registry.insert(name, scene);
        self.registry.add(id);
        self.next = Some(id);

        info!(target: "stage", "Opened '{}' as {}", name, id);
        self.events.publish(SceneEvent::Opened {
            scene: id,
            name: name.to_string(),
        });

        let completion = Completion::Open {
            outgoing,
            closing: params.current_closing,
            params,
        };
        self.begin(outgoing, Some(id), animation, completion)?;

        Ok(Some(id))
    }

    /// Opens `name` and destroys the current scene once it takes over.
    pub fn open_next_scene(
        &mut self,
        name: &str,
        params: SceneParams,
    ) -> SceneResult<Option<SceneId>> {
        self.open_scene(name, params.closing_current())
    }

    /// Destroys the current scene and resumes the one beneath it.
    ///
    /// Returns the scene that becomes current, which is `None` both when
    /// the call is rejected and when the last scene is closed.
    pub fn close_scene(&mut self, params: SceneParams) -> SceneResult<Option<SceneId>> {
        if self.is_transitioning() {
            debug!(target: "stage", "Close rejected: transition in flight");
            return Ok(None);
        }

        let Some(closing) = self.current.filter(|_| !self.registry.is_empty()) else {
            debug!(target: "stage", "Close rejected: no current scene");
            return Ok(None);
        };

        let animation = self.resolve_animation(&params)?;
        let next = self.registry.below_top();
        self.next = next;

        if let Some(scene) = self.registry.get_mut(closing) {
            scene.on_stop()?;
        }

        let completion = Completion::Close { closing, params };
        self.begin(Some(closing), next, animation, completion)?;

        Ok(next)
    }

    //--- Event Routing ----------------------------------------------------

    /// Forwards an input event to the current scene.
    ///
    /// Returns whether a scene received it. Input is dropped while a
    /// transition is in flight.
    pub fn route_input(&mut self, event: &InputEvent) -> SceneResult<bool> {
        if self.is_transitioning() {
            trace!(target: "stage", "Dropped {} during transition", event.kind().name());
            return Ok(false);
        }

        let Some(scene) = self.current.and_then(|id| self.registry.get_mut(id)) else {
            return Ok(false);
        };

        match event {
            InputEvent::TouchDown(touch) => scene.on_touch_down(touch)?,
            InputEvent::TouchUp(touch) => scene.on_touch_up(touch)?,
            InputEvent::TouchMove(touch) => scene.on_touch_move(touch)?,
            InputEvent::TouchCancel(touch) => scene.on_touch_cancel(touch)?,
            InputEvent::KeyDown(key) => scene.on_key_down(key)?,
            InputEvent::KeyUp(key) => scene.on_key_up(key)?,
        }

        Ok(true)
    }

    /// Delivers a frame tick to the current scene, then advances any
    /// in-flight transition by `tick.delta`.
    pub fn enter_frame(&mut self, tick: &FrameTick) -> SceneResult<()> {
        if let Some(scene) = self.current.and_then(|id| self.registry.get_mut(id)) {
            scene.on_enter_frame(tick)?;
        }

        self.advance_transition(tick.delta)
    }

    //--- Stack Queries & Ordering -----------------------------------------

    /// First live scene named `name`, back to front.
    pub fn find_scene_by_name(&self, name: &str) -> Option<SceneId> {
        self.registry.find_by_name(name)
    }

    /// Moves `scene` to the front and makes the front-most scene current.
    ///
    /// No-op with fewer than two scenes. Returns the new current scene
    /// when the order changed.
    pub fn order_to_front(&mut self, scene: SceneId) -> Option<SceneId> {
        let top = self.registry.order_to_front(scene)?;
        self.promote_after_reorder(top);
        Some(top)
    }

    /// Moves `scene` to the back and makes the front-most scene current.
    ///
    /// No-op with fewer than two scenes. Returns the new current scene
    /// when the order changed.
    pub fn order_to_back(&mut self, scene: SceneId) -> Option<SceneId> {
        let top = self.registry.order_to_back(scene)?;
        self.promote_after_reorder(top);
        Some(top)
    }

    //--- Accessors --------------------------------------------------------

    /// Scene receiving routed events.
    pub fn current_scene(&self) -> Option<SceneId> {
        self.current
    }

    /// Pending target of an in-flight transition.
    pub fn next_scene(&self) -> Option<SceneId> {
        self.next
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_pending()
    }

    pub fn scene(&self, id: SceneId) -> Option<&dyn Scene> {
        self.registry.get(id)
    }

    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut (dyn Scene + 'static)> {
        self.registry.get_mut(id)
    }

    pub fn scene_count(&self) -> usize {
        self.registry.len()
    }

    /// Live scenes, back-most first.
    pub fn scene_ids(&self) -> &[SceneId] {
        self.registry.ids()
    }

    pub fn render_table(&self) -> &[RenderEntry] {
        self.registry.render_table()
    }

    /// Rebuilds and republishes the render table.
    ///
    /// Call after a scene changes its own visibility or layers.
    pub fn refresh_render_table(&mut self) {
        self.registry.rebuild_render_table();
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    //--- Internal Helpers -------------------------------------------------

    fn resolve_animation(
        &self,
        params: &SceneParams,
    ) -> SceneResult<Option<Arc<dyn SceneAnimation>>> {
        params
            .animation
            .as_ref()
            .map(|reference| self.animations.resolve(reference))
            .transpose()
    }

    /// Starts the playable, or completes right away without one.
    fn begin(
        &mut self,
        from: Option<SceneId>,
        to: Option<SceneId>,
        animation: Option<Arc<dyn SceneAnimation>>,
        completion: Completion,
    ) -> SceneResult<()> {
        let Some(animation) = animation else {
            return self.complete(completion);
        };

        let playable = animation.animate(from, to, completion.params());
        debug!(target: "stage", "Transition started: {:?} → {:?}", from, to);

        self.transition = TransitionState::Pending(PendingTransition {
            from,
            to,
            completion,
            playable,
        });
        self.events.publish(SceneEvent::TransitionStarted { from, to });
        Ok(())
    }

    fn advance_transition(&mut self, delta: Duration) -> SceneResult<()> {
        let Some(pending) = self.transition.pending_mut() else {
            return Ok(());
        };

        let frame = pending.playable.advance(delta);
        let (from, to) = (pending.from, pending.to);

        self.apply_pose(from, frame.from);
        self.apply_pose(to, frame.to);

        if !frame.finished {
            return Ok(());
        }

        if let TransitionState::Pending(pending) = self.transition.take() {
            self.complete(pending.completion)?;
            debug!(target: "stage", "Transition completed, current: {:?}", self.current);
            self.events.publish(SceneEvent::TransitionCompleted {
                current: self.current,
            });
        }
        Ok(())
    }

    fn complete(&mut self, completion: Completion) -> SceneResult<()> {
        match completion {
            Completion::Open {
                outgoing,
                closing,
                params,
            } => self.open_complete(outgoing.filter(|_| closing), &params),
            Completion::Close { closing, params } => self.close_complete(closing, &params),
        }
    }

    fn open_complete(&mut self, closing: Option<SceneId>, params: &SceneParams) -> SceneResult<()> {
        let removed = closing.and_then(|id| self.take_scene(id));
        self.current = self.next.take();

        if let Some((id, name, scene)) = removed {
            self.destroy(id, name, scene)?;
        }

        if let Some(scene) = self.current.and_then(|id| self.registry.get_mut(id)) {
            scene.apply_pose(ScenePose::IDENTITY);
            scene.on_start(params)?;
            scene.on_resume(params)?;
        }
        Ok(())
    }

    fn close_complete(&mut self, closing: SceneId, params: &SceneParams) -> SceneResult<()> {
        let removed = self.take_scene(closing);
        self.current = self.next.take();

        if let Some((id, name, scene)) = removed {
            self.destroy(id, name, scene)?;
        }

        if let Some(scene) = self.current.and_then(|id| self.registry.get_mut(id)) {
            scene.apply_pose(ScenePose::IDENTITY);
            scene.on_resume(params)?;
        }
        Ok(())
    }

    /// Removes a scene from the registry along with its registered name.
    fn take_scene(&mut self, id: SceneId) -> Option<(SceneId, String, Box<dyn Scene>)> {
        let name = self.registry.name(id)?.to_string();
        self.registry.remove(id).map(|scene| (id, name, scene))
    }

    /// Final callback for a scene already removed from the registry.
    fn destroy(&mut self, id: SceneId, name: String, mut scene: Box<dyn Scene>) -> SceneResult<()> {
        let result = scene.on_destroy();
        drop(scene);

        info!(target: "stage", "Closed '{}' ({})", name, id);
        self.events.publish(SceneEvent::Closed { scene: id, name });
        result
    }

    fn apply_pose(&mut self, id: Option<SceneId>, pose: Option<ScenePose>) {
        if let (Some(scene), Some(pose)) = (id.and_then(|id| self.registry.get_mut(id)), pose) {
            scene.apply_pose(pose);
        }
    }

    fn promote_after_reorder(&mut self, top: SceneId) {
        if self.current != Some(top) {
            debug!(target: "stage", "Reorder promoted {} to current", top);
        }
        if self.is_transitioning() {
            warn!(target: "stage", "Scene order changed during a transition");
        }
        self.current = Some(top);
    }
}

//=== SceneManagerBuilder =================================================

/// Builder for configuring a `SceneManager`.
///
/// # Examples
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// let manager = SceneManager::builder()
///     .with_factory(SceneCatalog::new())
///     .with_animations(AnimationTable::new())
///     .with_render_sink(|table: &[RenderEntry]| println!("{} entries", table.len()))
///     .build();
///
/// assert!(manager.animations().is_empty());
/// ```
pub struct SceneManagerBuilder {
    factory: Option<Box<dyn SceneFactory>>,
    animations: Option<AnimationTable>,
    sink: Option<Box<dyn RenderSink>>,
}

impl SceneManagerBuilder {
    pub fn new() -> Self {
        Self {
            factory: None,
            animations: None,
            sink: None,
        }
    }

    /// Sets the scene factory. Required.
    pub fn with_factory<F: SceneFactory + 'static>(mut self, factory: F) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Sets the animation table. Defaults to [`AnimationTable::with_defaults`].
    pub fn with_animations(mut self, animations: AnimationTable) -> Self {
        self.animations = Some(animations);
        self
    }

    /// Sets the sink receiving every rebuilt render table.
    pub fn with_render_sink<S: RenderSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Builds the manager.
    ///
    /// # Panics
    ///
    /// Panics if no scene factory was set; the manager cannot open scenes
    /// without one.
    pub fn build(self) -> SceneManager {
        let Some(factory) = self.factory else {
            panic!("Scene factory must be set before building a SceneManager");
        };

        let mut registry = SceneRegistry::new();
        if let Some(sink) = self.sink {
            registry.set_render_sink(sink);
        }

        SceneManager::from_parts(
            factory,
            self.animations.unwrap_or_default(),
            registry,
        )
    }
}

impl Default for SceneManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
