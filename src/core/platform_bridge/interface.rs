//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-stage interface types (events and errors).
//
// Defines the contract between the platform thread, which owns the window,
// and the logic thread, which owns the scene stack.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;
use winit::error::EventLoopError;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform thread to the logic thread.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Input gathered during one platform frame, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::TouchEvent;

    #[test]
    fn inputs_keep_order() {
        let first = InputEvent::TouchDown(TouchEvent::new(1, 0.0, 0.0));
        let second = InputEvent::TouchUp(TouchEvent::new(1, 0.0, 0.0));
        let event = PlatformEvent::Inputs(vec![first, second]);

        assert_eq!(event, PlatformEvent::Inputs(vec![first, second]));
        assert_ne!(event, PlatformEvent::WindowClosed);
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::EventLoopExecution(EventLoopError::ExitFailure(3));
        assert!(err.to_string().starts_with("event loop error"));
    }
}
