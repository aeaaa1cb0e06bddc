//=========================================================================
// Message Bus
//=========================================================================
//
// Publish/subscribe primitive used by the stage to announce scene
// lifecycle events to external code.
//
// Components:
// - `dispatcher`: the typed EventDispatcher (public surface)
// - `event_channel`: per-type queue + listener storage (internal)
//
//=========================================================================

//=== Module Declarations =================================================

mod dispatcher;
mod event_channel;

//=== Public API ==========================================================

pub use dispatcher::{Event, EventDispatcher, SubscriptionId};
