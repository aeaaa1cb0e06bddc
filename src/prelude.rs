//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_stage::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder};

// Errors
pub use crate::core::error::{SceneError, SceneResult};

// Input
pub use crate::core::input::{InputEvent, InputKind, KeyCode, KeyEvent, Modifiers, TouchEvent};

// Events
pub use crate::core::message_bus::{Event, EventDispatcher, SubscriptionId};

// Scene stage
pub use crate::core::scene::{
    AnimationRef, AnimationTable, ChannelSink, Easing, FrameTick, LayerId, ParamValue, Playable,
    RenderEntry, RenderSink, RenderTable, Scene, SceneAnimation, SceneCatalog, SceneEvent,
    SceneFactory, SceneId, SceneManager, SceneManagerBuilder, SceneParams, ScenePose,
    SlideDirection, TransitionFrame, TweenAnimation, TweenStyle,
};
