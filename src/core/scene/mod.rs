//=========================================================================
// Scene System
//=========================================================================
//
// Stack-based scene lifecycle with optionally animated transitions.
//
// Architecture:
//   SceneManager
//     ├─ registry: SceneRegistry   (owned scenes, z-order, render table)
//     ├─ factory: dyn SceneFactory (name + params → scene)
//     ├─ animations: AnimationTable
//     ├─ transition: TransitionState (Idle | Pending)
//     └─ events: EventDispatcher   (SceneEvent announcements)
//
// Flow:
//   open_scene() / close_scene() → [Pending → enter_frame() ...] → complete
//   route_input() → current scene (dropped while transitioning)
//   enter_frame() → current scene (always) → advance transition
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::error::SceneResult;
use crate::core::input::{KeyEvent, TouchEvent};

//=== Module Declarations =================================================

mod animation;
mod factory;
mod params;
mod registry;
mod scene_manager;
mod transition;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use animation::{
    AnimationTable, Easing, Playable, SceneAnimation, SlideDirection, TransitionFrame, Tween,
    TweenAnimation, TweenStyle, DEFAULT_TRANSITION_DURATION,
};
pub use factory::{SceneCatalog, SceneFactory};
pub use params::{AnimationRef, ParamValue, SceneParams};
pub use registry::{ChannelSink, LayerId, RenderEntry, RenderSink, RenderTable, SceneRegistry};
pub use scene_manager::{SceneEvent, SceneManager, SceneManagerBuilder};

//=== SceneId =============================================================

/// Handle to a scene owned by the registry.
///
/// Ids are allocated from a monotonic counter and never reused, so the
/// handle of a destroyed scene can never address a different scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub(crate) u64);

impl SceneId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

//=== FrameTick ===========================================================

/// Per-frame update notification from the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Time elapsed since the previous tick.
    pub delta: Duration,

    /// Monotonic frame counter.
    pub frame: u64,
}

impl FrameTick {
    pub fn new(delta: Duration, frame: u64) -> Self {
        Self { delta, frame }
    }
}

//=== ScenePose ===========================================================

/// Presentation properties driven by transition animations.
///
/// Offsets are in viewport units: `1.0` is one full viewport width (x)
/// or height (y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePose {
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ScenePose {
    /// Fully opaque, no offset.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    pub fn with_opacity(opacity: f32) -> Self {
        Self {
            opacity,
            ..Self::IDENTITY
        }
    }

    pub fn with_offset(offset_x: f32, offset_y: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            ..Self::IDENTITY
        }
    }
}

impl Default for ScenePose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=== Scene Trait =========================================================

/// A unit of application state with a lifecycle and an event surface.
///
/// Only `name()` is required; every callback defaults to a no-op. Errors
/// returned from callbacks are not intercepted by the manager: they come
/// back out of whichever manager call triggered the callback.
///
/// # Lifecycle
///
/// ```text
/// on_create ──(animation)──> on_start → on_resume      (becomes current)
///                  on_pause [→ on_stop]                 (superseded)
///                  on_stop → on_destroy                 (closed)
/// ```
///
/// # Minimal Implementation
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// struct TitleScene;
///
/// impl Scene for TitleScene {
///     fn name(&self) -> &str {
///         "title"
///     }
/// }
/// ```
pub trait Scene: Send {
    /// Display name for diagnostics. Lookups use the name the scene was
    /// opened under.
    fn name(&self) -> &str;

    /// Invisible scenes contribute nothing to the render table.
    fn is_visible(&self) -> bool {
        true
    }

    /// This scene's drawable-order contribution, back-most layer first.
    fn render_layers(&self) -> Vec<LayerId> {
        Vec::new()
    }

    /// Receives interpolated presentation state while a transition plays.
    fn apply_pose(&mut self, _pose: ScenePose) {}

    //--- Lifecycle ---------------------------------------------------------

    fn on_create(&mut self, _params: &SceneParams) -> SceneResult<()> {
        Ok(())
    }

    fn on_start(&mut self, _params: &SceneParams) -> SceneResult<()> {
        Ok(())
    }

    fn on_resume(&mut self, _params: &SceneParams) -> SceneResult<()> {
        Ok(())
    }

    fn on_pause(&mut self) -> SceneResult<()> {
        Ok(())
    }

    fn on_stop(&mut self) -> SceneResult<()> {
        Ok(())
    }

    /// Last callback a scene receives; it is dropped right after.
    fn on_destroy(&mut self) -> SceneResult<()> {
        Ok(())
    }

    //--- Input & Frame Events ----------------------------------------------

    fn on_touch_down(&mut self, _touch: &TouchEvent) -> SceneResult<()> {
        Ok(())
    }

    fn on_touch_up(&mut self, _touch: &TouchEvent) -> SceneResult<()> {
        Ok(())
    }

    fn on_touch_move(&mut self, _touch: &TouchEvent) -> SceneResult<()> {
        Ok(())
    }

    fn on_touch_cancel(&mut self, _touch: &TouchEvent) -> SceneResult<()> {
        Ok(())
    }

    fn on_key_down(&mut self, _key: &KeyEvent) -> SceneResult<()> {
        Ok(())
    }

    fn on_key_up(&mut self, _key: &KeyEvent) -> SceneResult<()> {
        Ok(())
    }

    /// Called once per host frame, including during transitions.
    fn on_enter_frame(&mut self, _tick: &FrameTick) -> SceneResult<()> {
        Ok(())
    }
}

//=========================================================================
// Tests
//=========================================================================
