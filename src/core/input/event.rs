//=========================================================================
// Input Event Types
//=========================================================================
//
// Portable representation of the input the stage routes to scenes.
//
// The platform layer (winit) is normalised into six event kinds: four
// touch phases and two key phases. Mouse pointers are reported as a
// touch with the reserved id `MOUSE_POINTER_ID`, so scenes only need to
// handle touches.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    SceneManager::route_input()
//         ↓
//    Scene::on_touch_* / Scene::on_key_*
// ```
//
//=========================================================================

//=== Constants ===========================================================

/// Touch id reserved for the mouse pointer.
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// `KeyA` is the same key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Navigation -------------------------------------------------------
    ArrowDown, ArrowLeft, ArrowRight, ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Hardware "back" (Android) or browser back key.
    BrowserBack,

    /// Keys the platform layer does not map.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state captured with each key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=== Payloads ============================================================

/// Pointer payload shared by the four touch phases.
///
/// Coordinates are in window space (pixels, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Stable id of the finger (or `MOUSE_POINTER_ID`) for the whole gesture.
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl TouchEvent {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    /// Returns true if this touch was synthesised from the mouse.
    pub fn is_mouse(&self) -> bool {
        self.id == MOUSE_POINTER_ID
    }
}

/// Keyboard payload shared by key down/up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

//=== InputKind ===========================================================

/// The six input kinds the stage subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    TouchDown,
    TouchUp,
    TouchMove,
    TouchCancel,
    KeyDown,
    KeyUp,
}

impl InputKind {
    /// Every routed kind, in a stable order.
    pub const ALL: [InputKind; 6] = [
        InputKind::TouchDown,
        InputKind::TouchUp,
        InputKind::TouchMove,
        InputKind::TouchCancel,
        InputKind::KeyDown,
        InputKind::KeyUp,
    ];

    /// Event name as exposed to listeners and logs.
    pub fn name(self) -> &'static str {
        match self {
            InputKind::TouchDown => "touchDown",
            InputKind::TouchUp => "touchUp",
            InputKind::TouchMove => "touchMove",
            InputKind::TouchCancel => "touchCancel",
            InputKind::KeyDown => "keyDown",
            InputKind::KeyUp => "keyUp",
        }
    }
}

//=== InputEvent ==========================================================

/// A single routed input event.
///
/// The payload is forwarded to the receiving scene verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    TouchDown(TouchEvent),
    TouchUp(TouchEvent),
    TouchMove(TouchEvent),
    TouchCancel(TouchEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::TouchDown(_) => InputKind::TouchDown,
            InputEvent::TouchUp(_) => InputKind::TouchUp,
            InputEvent::TouchMove(_) => InputKind::TouchMove,
            InputEvent::TouchCancel(_) => InputKind::TouchCancel,
            InputEvent::KeyDown(_) => InputKind::KeyDown,
            InputEvent::KeyUp(_) => InputKind::KeyUp,
        }
    }

    /// Touch payload, if this is one of the touch phases.
    pub fn touch(&self) -> Option<&TouchEvent> {
        match self {
            InputEvent::TouchDown(touch)
            | InputEvent::TouchUp(touch)
            | InputEvent::TouchMove(touch)
            | InputEvent::TouchCancel(touch) => Some(touch),
            _ => None,
        }
    }

    /// Key payload, if this is a key event.
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            InputEvent::KeyDown(key) | InputEvent::KeyUp(key) => Some(key),
            _ => None,
        }
    }

    /// Returns true for events that may be coalesced by the platform buffer.
    pub fn is_continuous(&self) -> bool {
        matches!(self, InputEvent::TouchMove(_))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
