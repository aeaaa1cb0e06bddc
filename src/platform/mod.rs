//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the stage's logic thread via a
// bounded crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  StageOrchestrator   │
//  │   ↓                      │    │   ↓                  │
//  │  InputProcessor          │    │  EventCollector      │
//  │   ├─ touches             │    │   ↓                  │
//  │   ├─ mouse as touch      │    │  SceneManager        │
//  │   └─ keys + modifiers    │    │   ├─ route_input     │
//  │   ↓                      │    │   └─ enter_frame     │
//  │  InputBuffer             │    └──────────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Frame boundary is RedrawRequested: all buffered input is sent as one
// ordered batch. Empty batches are not sent. If the logic thread is gone
// the platform logs and keeps running so the window can still be closed.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and input aggregator.
///
/// Runs on the main thread (winit requirement on macOS/iOS) and sends
/// batched input to the logic thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` is called).
    window: Option<Window>,

    window_title: String,

    /// Buffers input until the frame boundary.
    buffer: InputBuffer,

    /// Channel to the logic thread.
    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform; the window is created lazily in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, window_title: impl Into<String>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_title: window_title.into(),
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits abnormally.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn buffer_input(&mut self, event: Option<InputEvent>) {
        match event {
            Some(event) => self.buffer.push(event),
            None => trace!(target: "platform::input", "Input ignored"),
        }
    }

    /// Sends buffered input to the logic thread as a single batch.
    fn flush_input_buffer(&mut self) {
        let count = self.buffer.len();
        let Some(events) = self.buffer.drain() else {
            return;
        };

        trace!(target: "platform::input", "Flushing {} events", count);

        if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                count
            );
        }
    }

    fn notify_closed(&self) {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Logic thread already stopped");
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_title.clone())
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.notify_closed();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.flush_input_buffer();
                self.notify_closed();
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let event = self.input_processor.process_key_event(&key_event);
                self.buffer_input(event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_cursor_move(position.x as f32, position.y as f32);
                if let Some(event) = event {
                    self.buffer.push(event);
                }
            }

            WindowEvent::CursorLeft { .. } => {
                let event = self.input_processor.process_cursor_left();
                self.buffer_input(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer_input(event);
            }

            WindowEvent::Touch(touch) => {
                let event = self.input_processor.process_touch(
                    touch.id,
                    touch.phase,
                    touch.location.x as f32,
                    touch.location.y as f32,
                );
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
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

    fn key_down() -> InputEvent {
        InputEvent::KeyDown(KeyEvent::new(KeyCode::Space, Modifiers::NONE))
    }

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(tx, "Stage");
        assert!(platform.window.is_none(), "Window should be created lazily");
        assert_eq!(platform.window_title, "Stage");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, "Stage");

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events_in_order() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, "Stage");
        let touch = InputEvent::TouchDown(TouchEvent::new(4, 1.0, 2.0));

        platform.buffer.push(touch);
        platform.buffer.push(key_down());
        platform.flush_input_buffer();

        assert_eq!(rx.try_recv().ok(), Some(PlatformEvent::Inputs(vec![touch, key_down()])));
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, "Stage");
        platform.buffer.push(key_down());

        drop(rx);

        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn multiple_flushes_send_once() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx, "Stage");
        platform.buffer.push(key_down());

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn ignored_input_is_not_buffered() {
        let (tx, _rx) = unbounded();
        let mut platform = Platform::new(tx, "Stage");

        platform.buffer_input(None);
        platform.buffer_input(Some(key_down()));

        assert_eq!(platform.buffer.len(), 1);
    }

    #[test]
    fn notify_closed_sends_window_closed() {
        let (tx, rx) = unbounded();
        let platform = Platform::new(tx, "Stage");

        platform.notify_closed();

        assert_eq!(rx.try_recv().ok(), Some(PlatformEvent::WindowClosed));
    }
}
