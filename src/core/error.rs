//=========================================================================
// Stage Errors
//=========================================================================
//
// Error types surfaced by the scene stage.
//
// Rejected transitions (already transitioning, empty stack, duplicate
// name) are NOT errors: they come back as `Ok(None)`. Errors are reserved
// for configuration mistakes and for failures raised by scene callbacks,
// which propagate to the caller of the triggering operation untouched.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SceneError ==========================================================

/// Failures raised while creating, transitioning, or driving scenes.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The factory has no constructor for the requested scene class.
    #[error("no scene class registered for '{0}'")]
    UnknownSceneClass(String),

    /// `SceneParams::animation` named an animation missing from the table.
    #[error("no scene animation registered under '{0}'")]
    UnknownAnimation(String),

    /// A scene callback reported a failure.
    #[error("scene '{scene}' failed in {stage}: {message}")]
    Callback {
        scene: String,
        stage: &'static str,
        message: String,
    },

    /// The factory failed for a reason of its own.
    #[error("scene factory failed to create '{name}': {message}")]
    Factory { name: String, message: String },
}

impl SceneError {
    /// Convenience constructor for scene implementations.
    pub fn callback(
        scene: impl Into<String>,
        stage: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Callback {
            scene: scene.into(),
            stage,
            message: message.into(),
        }
    }
}

/// Result alias used by every fallible stage operation.
pub type SceneResult<T> = Result<T, SceneError>;

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_error_mentions_scene_and_stage() {
        let err = SceneError::callback("title", "on_create", "missing atlas");
        let text = err.to_string();
        assert!(text.contains("title"));
        assert!(text.contains("on_create"));
        assert!(text.contains("missing atlas"));
    }

    #[test]
    fn unknown_animation_display() {
        let err = SceneError::UnknownAnimation("spin".to_string());
        assert_eq!(err.to_string(), "no scene animation registered under 'spin'");
    }

    #[test]
    fn scene_error_is_error_trait() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<SceneError>();
    }
}
