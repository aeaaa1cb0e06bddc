//=========================================================================
// Aetheric Stage — Library Root
//
// Scene-lifecycle management for 2D games: a registry of live scenes, an
// animated transition controller, and an input router delivering events
// to the current scene.
//
// Responsibilities:
// - Expose the runtime facade (`Engine`, `EngineBuilder`)
// - Expose the scene stage (`core::scene::SceneManager`) for embedding
//   without a window
// - Keep OS integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use aetheric_stage::prelude::*;
//
// fn main() {
//     EngineBuilder::new()
//         .with_scene_factory(SceneCatalog::new())
//         .build()
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene stage, input model, and event dispatcher. It is
// usable on its own; the windowed runtime is only one driver.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event loop. `engine` wires it to
// the logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
