//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific winit events into stage InputEvents.
//
// Architecture:
//   winit events → InputProcessor → InputEvent (stage type) → InputBuffer
//
// Stateful tracking:
// - Modifiers are cached from ModifiersChanged and applied to key events
// - The cursor position is cached so a left click becomes a touch at the
//   last known location; cursor motion only becomes a touch move while
//   the left button is held
//
// Unmapped keys (F13-F24, exotic keyboards) are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent as WinitKeyEvent, MouseButton, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{
    InputEvent, KeyCode, KeyEvent, Modifiers, TouchEvent, MOUSE_POINTER_ID,
};

//=== InputProcessor ======================================================

/// Converts winit events to stage InputEvents with modifier and cursor
/// tracking.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
    cursor: (f32, f32),
    mouse_down: bool,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
            cursor: (0.0, 0.0),
            mouse_down: false,
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent key events).
    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Keyboard ---------------------------------------------------------

    /// Converts a winit key event (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &WinitKeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };

        self.process_key(code, key_event.state)
    }

    fn process_key(&self, code: WinitKeyCode, state: ElementState) -> Option<InputEvent> {
        let key = KeyCode::from(code);
        if matches!(key, KeyCode::Unidentified) {
            return None;
        }

        let event = KeyEvent::new(key, self.current_modifiers);
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(event),
            ElementState::Released => InputEvent::KeyUp(event),
        })
    }

    //--- Mouse as Touch ---------------------------------------------------

    /// Records the cursor; emits a touch move while the left button is held.
    pub(crate) fn process_cursor_move(&mut self, x: f32, y: f32) -> Option<InputEvent> {
        self.cursor = (x, y);
        self.mouse_down
            .then(|| InputEvent::TouchMove(self.mouse_touch()))
    }

    /// Left button presses become touch down/up at the cursor.
    pub(crate) fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed if !self.mouse_down => {
                self.mouse_down = true;
                Some(InputEvent::TouchDown(self.mouse_touch()))
            }
            ElementState::Released if self.mouse_down => {
                self.mouse_down = false;
                Some(InputEvent::TouchUp(self.mouse_touch()))
            }
            _ => None,
        }
    }

    /// Ends a held mouse gesture when the cursor leaves the window.
    pub(crate) fn process_cursor_left(&mut self) -> Option<InputEvent> {
        if !self.mouse_down {
            return None;
        }
        self.mouse_down = false;
        Some(InputEvent::TouchCancel(self.mouse_touch()))
    }

    //--- Touch ------------------------------------------------------------

    /// Converts a touch phase for finger `id` at window position (x, y).
    pub(crate) fn process_touch(&self, id: u64, phase: TouchPhase, x: f32, y: f32) -> InputEvent {
        let touch = TouchEvent::new(id, x, y);
        match phase {
            TouchPhase::Started => InputEvent::TouchDown(touch),
            TouchPhase::Moved => InputEvent::TouchMove(touch),
            TouchPhase::Ended => InputEvent::TouchUp(touch),
            TouchPhase::Cancelled => InputEvent::TouchCancel(touch),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn mouse_touch(&self) -> TouchEvent {
        TouchEvent::new(MOUSE_POINTER_ID, self.cursor.0, self.cursor.1)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts winit ModifiersState to stage Modifiers.
///
/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Converts winit physical key codes to stage key codes.
///
/// Maps A-Z, 0-9, arrows, and common special keys. Unmapped keys return
/// `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Navigation ---------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,
            BrowserBack => KeyCode::BrowserBack,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        state
    }

    //--- Modifiers ----------------------------------------------------------

    #[test]
    fn starts_with_no_modifiers() {
        let processor = InputProcessor::new();
        assert_eq!(processor.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn update_modifiers_works() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, true));

        let mods = processor.current_modifiers();
        assert!(mods.shift && !mods.ctrl && mods.alt);
    }

    //--- Keyboard -----------------------------------------------------------

    #[test]
    fn key_press_carries_modifiers() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, true, false));

        let event = processor.process_key(WinitKeyCode::KeyS, ElementState::Pressed);
        assert_eq!(
            event,
            Some(InputEvent::KeyDown(KeyEvent::new(KeyCode::KeyS, Modifiers::CTRL)))
        );
    }

    #[test]
    fn key_release_is_key_up() {
        let processor = InputProcessor::new();
        let event = processor.process_key(WinitKeyCode::Escape, ElementState::Released);
        assert_eq!(
            event,
            Some(InputEvent::KeyUp(KeyEvent::new(KeyCode::Escape, Modifiers::NONE)))
        );
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(processor.process_key(WinitKeyCode::F13, ElementState::Pressed), None);
    }

    #[test]
    fn keycode_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
        assert_eq!(KeyCode::from(WinitKeyCode::BrowserBack), KeyCode::BrowserBack);
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
    }

    //--- Mouse as Touch -----------------------------------------------------

    #[test]
    fn cursor_motion_without_button_is_silent() {
        let mut processor = InputProcessor::new();
        assert_eq!(processor.process_cursor_move(5.0, 6.0), None);
    }

    #[test]
    fn left_click_becomes_mouse_touch_gesture() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_move(10.0, 20.0);

        let down = processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        let moved = processor.process_cursor_move(15.0, 25.0);
        let up = processor.process_mouse_button(MouseButton::Left, ElementState::Released);

        let touch = |x, y| TouchEvent::new(MOUSE_POINTER_ID, x, y);
        assert_eq!(down, Some(InputEvent::TouchDown(touch(10.0, 20.0))));
        assert_eq!(moved, Some(InputEvent::TouchMove(touch(15.0, 25.0))));
        assert_eq!(up, Some(InputEvent::TouchUp(touch(15.0, 25.0))));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_button(MouseButton::Right, ElementState::Pressed),
            None
        );
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_button(MouseButton::Left, ElementState::Released),
            None
        );
    }

    #[test]
    fn cursor_leaving_cancels_held_gesture() {
        let mut processor = InputProcessor::new();
        assert_eq!(processor.process_cursor_left(), None);

        processor.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(matches!(
            processor.process_cursor_left(),
            Some(InputEvent::TouchCancel(touch)) if touch.is_mouse()
        ));
        assert_eq!(processor.process_cursor_move(1.0, 1.0), None);
    }

    //--- Touch --------------------------------------------------------------

    #[test]
    fn touch_phases_map_to_kinds() {
        let processor = InputProcessor::new();
        let kinds: Vec<_> = [
            TouchPhase::Started,
            TouchPhase::Moved,
            TouchPhase::Ended,
            TouchPhase::Cancelled,
        ]
        .into_iter()
        .map(|phase| processor.process_touch(3, phase, 1.0, 2.0).kind().name())
        .collect();

        assert_eq!(kinds, ["touchDown", "touchMove", "touchUp", "touchCancel"]);
    }
}
