//=========================================================================
// Scene Animations
//=========================================================================
//
// Transition capabilities and the table that resolves them by name.
//
// Architecture:
//   AnimationRef::Named ──→ AnimationTable ──→ Arc<dyn SceneAnimation>
//   AnimationRef::Custom ─────────────────────┘
//                                   │ animate(from, to, params)
//                                   ↓
//                           Box<dyn Playable> ──advance(dt)──→ TransitionFrame
//
// The manager owns the playable while a transition is in flight and
// advances it once per frame. The transition completes on the first frame
// that reports `finished`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use super::params::{AnimationRef, SceneParams};
use super::{SceneId, ScenePose};
use crate::core::error::{SceneError, SceneResult};

//=== Constants ===========================================================

/// Duration used by the built-in animations when params give none.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

//=== Easing ==============================================================

/// Acceleration curve applied to transition progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed throughout.
    #[default]
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate.
    EaseOut,
    /// Start slow, speed up, then slow down.
    EaseInOut,
}

impl Easing {
    /// Maps linear progress (0.0 to 1.0) onto the curve.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

//=== Playable ============================================================

/// Output of one `Playable::advance` step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Pose for the outgoing scene, if the animation drives it.
    pub from: Option<ScenePose>,

    /// Pose for the incoming scene, if the animation drives it.
    pub to: Option<ScenePose>,

    /// The transition is over; the manager runs the completion next.
    pub finished: bool,
}

impl TransitionFrame {
    /// A frame that only reports completion.
    pub fn finished() -> Self {
        Self {
            from: None,
            to: None,
            finished: true,
        }
    }
}

/// A running transition, advanced once per host frame.
pub trait Playable: Send {
    fn advance(&mut self, delta: Duration) -> TransitionFrame;
}

//=== SceneAnimation ======================================================

/// Factory for playable transitions between two scenes.
///
/// Either side may be absent: opening the first scene has no `from`,
/// closing the last one has no `to`.
pub trait SceneAnimation: Send + Sync {
    fn animate(
        &self,
        from: Option<SceneId>,
        to: Option<SceneId>,
        params: &SceneParams,
    ) -> Box<dyn Playable>;
}

impl<F> SceneAnimation for F
where
    F: Fn(Option<SceneId>, Option<SceneId>, &SceneParams) -> Box<dyn Playable> + Send + Sync,
{
    fn animate(
        &self,
        from: Option<SceneId>,
        to: Option<SceneId>,
        params: &SceneParams,
    ) -> Box<dyn Playable> {
        self(from, to, params)
    }
}

//=== Tween ===============================================================

/// Direction the incoming scene travels in a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SlideDirection {
    /// Unit vector (viewport units, y down) of the travel direction.
    fn vector(self) -> (f32, f32) {
        match self {
            SlideDirection::Left => (-1.0, 0.0),
            SlideDirection::Right => (1.0, 0.0),
            SlideDirection::Up => (0.0, -1.0),
            SlideDirection::Down => (0.0, 1.0),
        }
    }
}

/// Visual style of a built-in tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenStyle {
    /// Outgoing fades out, then incoming fades in.
    Fade,
    /// Outgoing and incoming blend simultaneously.
    CrossFade,
    /// Incoming pushes the outgoing scene off the viewport.
    Slide(SlideDirection),
}

/// Time-based playable driving both scenes' poses.
#[derive(Debug, Clone)]
pub struct Tween {
    style: TweenStyle,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
}

impl Tween {
    pub fn new(style: TweenStyle, duration: Duration, easing: Easing) -> Self {
        Self {
            style,
            duration,
            easing,
            elapsed: Duration::ZERO,
        }
    }

    /// Linear progress in 0.0..=1.0.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Poses for (outgoing, incoming) at eased progress `e`.
    fn poses(&self, e: f32) -> (ScenePose, ScenePose) {
        match self.style {
            TweenStyle::Fade => {
                if e < 0.5 {
                    (ScenePose::with_opacity(1.0 - e * 2.0), ScenePose::with_opacity(0.0))
                } else {
                    (ScenePose::with_opacity(0.0), ScenePose::with_opacity(e * 2.0 - 1.0))
                }
            }
            TweenStyle::CrossFade => (ScenePose::with_opacity(1.0 - e), ScenePose::with_opacity(e)),
            TweenStyle::Slide(direction) => {
                let (dx, dy) = direction.vector();
                (
                    ScenePose::with_offset(dx * e, dy * e),
                    ScenePose::with_offset(-dx * (1.0 - e), -dy * (1.0 - e)),
                )
            }
        }
    }
}

impl Playable for Tween {
    fn advance(&mut self, delta: Duration) -> TransitionFrame {
        self.elapsed = (self.elapsed + delta).min(self.duration);

        let (from, to) = self.poses(self.easing.apply(self.progress()));
        TransitionFrame {
            from: Some(from),
            to: Some(to),
            finished: self.elapsed >= self.duration,
        }
    }
}

/// `SceneAnimation` producing a `Tween` of a fixed style.
///
/// Duration and easing come from `SceneParams` when set.
#[derive(Debug, Clone, Copy)]
pub struct TweenAnimation {
    style: TweenStyle,
    duration: Duration,
    easing: Easing,
}

impl TweenAnimation {
    pub fn new(style: TweenStyle) -> Self {
        Self {
            style,
            duration: DEFAULT_TRANSITION_DURATION,
            easing: Easing::EaseInOut,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl SceneAnimation for TweenAnimation {
    fn animate(
        &self,
        _from: Option<SceneId>,
        _to: Option<SceneId>,
        params: &SceneParams,
    ) -> Box<dyn Playable> {
        Box::new(Tween::new(
            self.style,
            params.duration.unwrap_or(self.duration),
            params.easing.unwrap_or(self.easing),
        ))
    }
}

//=== AnimationTable ======================================================

/// Named transition capabilities, injected into the manager.
pub struct AnimationTable {
    entries: HashMap<String, Arc<dyn SceneAnimation>>,
}

impl AnimationTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates a table holding the built-in tweens:
    /// `fade`, `cross_fade`, `slide_left`, `slide_right`, `slide_up`,
    /// `slide_down`.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register("fade", TweenAnimation::new(TweenStyle::Fade));
        table.register("cross_fade", TweenAnimation::new(TweenStyle::CrossFade));
        table.register("slide_left", TweenAnimation::new(TweenStyle::Slide(SlideDirection::Left)));
        table.register("slide_right", TweenAnimation::new(TweenStyle::Slide(SlideDirection::Right)));
        table.register("slide_up", TweenAnimation::new(TweenStyle::Slide(SlideDirection::Up)));
        table.register("slide_down", TweenAnimation::new(TweenStyle::Slide(SlideDirection::Down)));
        table
    }

    /// Registers (or replaces) an animation under `name`.
    pub fn register<A>(&mut self, name: impl Into<String>, animation: A)
    where
        A: SceneAnimation + 'static,
    {
        let name = name.into();
        if self.entries.insert(name.clone(), Arc::new(animation)).is_some() {
            debug!(target: "stage", "Animation '{}' replaced", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SceneAnimation>> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a parameter reference to a capability.
    pub fn resolve(&self, reference: &AnimationRef) -> SceneResult<Arc<dyn SceneAnimation>> {
        match reference {
            AnimationRef::Named(name) => self
                .get(name)
                .ok_or_else(|| SceneError::UnknownAnimation(name.clone())),
            AnimationRef::Custom(animation) => Ok(Arc::clone(animation)),
        }
    }
}

impl Default for AnimationTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

//=========================================================================
// Tests
//=========================================================================
