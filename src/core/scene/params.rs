//=========================================================================
// Scene Parameters
//=========================================================================
//
// Configuration passed to open/close operations, the factory, and the
// lifecycle callbacks of the scenes involved.
//
// Recognised keys are typed fields; anything scene-specific travels in
// `values` untouched.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::animation::{Easing, SceneAnimation};

//=== ParamValue ==========================================================

/// Opaque scene-specific parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(value) => Some(*value),
            ParamValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

//=== AnimationRef ========================================================

/// Transition animation requested for an operation.
#[derive(Clone)]
pub enum AnimationRef {
    /// Looked up in the manager's `AnimationTable`.
    Named(String),

    /// Used directly, bypassing the table.
    Custom(Arc<dyn SceneAnimation>),
}

impl fmt::Debug for AnimationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            AnimationRef::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for AnimationRef {
    fn from(name: &str) -> Self {
        AnimationRef::Named(name.to_string())
    }
}

impl From<String> for AnimationRef {
    fn from(name: String) -> Self {
        AnimationRef::Named(name)
    }
}

//=== SceneParams =========================================================

/// Parameters for `open_scene`, `open_next_scene` and `close_scene`.
///
/// # Examples
///
/// ```rust
/// # use aetheric_stage::prelude::*;
/// let params = SceneParams::new()
///     .with_animation("cross_fade")
///     .closing_current()
///     .with_value("level", 3);
///
/// assert!(params.current_closing);
/// assert_eq!(params.get("level").and_then(|v| v.as_int()), Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SceneParams {
    /// Concrete scene class to instantiate instead of the one named after
    /// the scene.
    pub scene_class: Option<String>,

    /// Animation for the handoff. `None` completes synchronously.
    pub animation: Option<AnimationRef>,

    /// Destroy the outgoing scene once the new one is current.
    pub current_closing: bool,

    /// Overrides the animation's default duration.
    pub duration: Option<Duration>,

    /// Overrides the animation's default easing.
    pub easing: Option<Easing>,

    /// Scene-specific values, passed through untouched.
    pub values: HashMap<String, ParamValue>,
}

impl SceneParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene_class(mut self, class: impl Into<String>) -> Self {
        self.scene_class = Some(class.into());
        self
    }

    pub fn with_animation(mut self, animation: impl Into<AnimationRef>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    pub fn with_custom_animation<A>(mut self, animation: A) -> Self
    where
        A: SceneAnimation + 'static,
    {
        self.animation = Some(AnimationRef::Custom(Arc::new(animation)));
        self
    }

    /// Marks the current scene for destruction once this open completes.
    pub fn closing_current(mut self) -> Self {
        self.current_closing = true;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }
}

//=========================================================================
// Tests
//=========================================================================
