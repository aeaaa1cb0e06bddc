//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the scene stage.
//
// Components:
// - `interface`: event and error types crossing the thread boundary
// - `event_collector`: logic-side draining of platform events
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
