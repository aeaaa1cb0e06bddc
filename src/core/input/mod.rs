//=========================================================================
// Input
//=========================================================================
//
// Input event vocabulary shared by the platform layer and the stage.
//
// The stage does not track input state itself; it only forwards the
// events it receives to the current scene (see `SceneManager::route_input`).
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;

//=== Public API ==========================================================

pub use event::{
    InputEvent, InputKind, KeyCode, KeyEvent, Modifiers, TouchEvent, MOUSE_POINTER_ID,
};
