//=========================================================================
// Input Buffer
//
// Collects translated input events between two platform frames and hands
// them to the logic thread as one ordered batch.
//
// Responsibilities:
// - Preserve arrival order across touch and key events
// - Coalesce consecutive moves of the same pointer (latest wins)
// - Drop consecutive duplicate key-downs (OS auto-repeat)
//
// Notes:
// Coalescing only merges adjacent events, so a move is never reordered
// past a down/up of the same gesture.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Transient event store for one platform frame.
//
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for typical per-frame input volume.
    //
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Push -------------------------------------------------------------
    pub fn push(&mut self, event: InputEvent) {
        match (self.events.last_mut(), &event) {
            (Some(InputEvent::TouchMove(last)), InputEvent::TouchMove(next)) if last.id == next.id => {
                *last = *next;
            }
            (Some(last), InputEvent::KeyDown(_)) if *last == event => {}
            _ => self.events.push(event),
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events, or None when nothing was buffered so
    // empty batches never cross the channel.
    //
    pub fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        Some(self.events.drain(..).collect())
    }

    //--- Utilities --------------------------------------------------------
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
