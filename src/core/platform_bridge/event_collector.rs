//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → inputs → TickControl
//
// Bounded polling prevents starvation. The collector never blocks; frame
// pacing belongs to the orchestrator.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform events into one flat, ordered input list per frame.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    inputs: Vec<InputEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            inputs: Vec::with_capacity(64),
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    ///
    /// Messages beyond the per-frame bound stay queued for the next frame.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.inputs.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs(batch)) => {
                    self.inputs.extend(batch);
                    drained += 1;
                }
                Ok(PlatformEvent::WindowClosed) => {
                    debug!(target: "platform", "Window closed, stopping collection");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {} batches this frame", drained);
        }

        TickControl::Continue
    }

    /// Inputs collected by the last `collect_frame`, in arrival order.
    pub(crate) fn inputs(&self) -> &[InputEvent] {
        &self.inputs
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, KeyEvent, Modifiers, TouchEvent};
    use crossbeam_channel::unbounded;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown(KeyEvent::new(key, Modifiers::NONE))
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.inputs().is_empty());
    }

    #[test]
    fn collect_flattens_batches_in_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let touch = InputEvent::TouchMove(TouchEvent::new(2, 10.0, 20.0));

        tx.send(PlatformEvent::Inputs(vec![key_down(KeyCode::KeyA)])).unwrap();
        tx.send(PlatformEvent::Inputs(vec![touch, key_down(KeyCode::KeyB)])).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(
            collector.inputs(),
            &[key_down(KeyCode::KeyA), touch, key_down(KeyCode::KeyB)]
        );
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_inputs() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![key_down(KeyCode::Space)])).unwrap();
        collector.collect_frame();
        assert_eq!(collector.inputs().len(), 1);

        collector.collect_frame();
        assert!(collector.inputs().is_empty());
    }

    #[test]
    fn collect_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..MAX_EVENTS_PER_FRAME + 5 {
            tx.send(PlatformEvent::Inputs(vec![key_down(KeyCode::KeyC)])).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.inputs().len(), MAX_EVENTS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.inputs().len(), 5, "Backlog carries into the next frame");
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
