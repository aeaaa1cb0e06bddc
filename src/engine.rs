//=========================================================================
// Aetheric Stage Engine
//
// Main entry point: wires the scene manager, the logic thread, and the
// platform window together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                                 │                     │
//         ├─ with_tps()                     └─ open first scene   ├─ spawns logic thread
//         ├─ with_channel_capacity()                              ├─ runs platform
//         ├─ with_window_title()                                  └─ blocks until exit
//         ├─ with_scene_factory()
//         ├─ with_animations()
//         └─ with_render_sink()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::error::SceneResult;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::scene::{
    AnimationTable, RenderSink, SceneFactory, SceneManager, SceneManagerBuilder,
};
use crate::core::StageOrchestrator;
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 platform batches
/// - **Window title**: "Aetheric Stage"
/// - **Animations**: [`AnimationTable::with_defaults`]
///
/// A scene factory has no default and must be supplied.
///
/// # Examples
///
/// ```no_run
/// use aetheric_stage::prelude::*;
///
/// struct Title;
///
/// impl Scene for Title {
///     fn name(&self) -> &str {
///         "title"
///     }
/// }
///
/// fn main() -> Result<(), SceneError> {
///     EngineBuilder::new()
///         .with_tps(120.0)
///         .with_window_title("My Game")
///         .with_scene_factory(SceneCatalog::new().with_scene("title", |_, _| Title))
///         .build()
///         .init(|stage| {
///             stage.open_scene("title", SceneParams::new().with_animation("fade"))?;
///             Ok(())
///         })?
///         .run();
///     Ok(())
/// }
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    window_title: String,
    scenes: SceneManagerBuilder,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window_title: "Aetheric Stage".to_string(),
            scenes: SceneManagerBuilder::new(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Transitions advance by real elapsed time, so TPS changes smoothness
    /// but not animation length.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → logic communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Sets the factory the stage creates scenes with. Required.
    pub fn with_scene_factory<F: SceneFactory + 'static>(mut self, factory: F) -> Self {
        self.scenes = self.scenes.with_factory(factory);
        self
    }

    pub fn with_animations(mut self, animations: AnimationTable) -> Self {
        self.scenes = self.scenes.with_animations(animations);
        self
    }

    /// Sets the sink receiving every rebuilt render table.
    pub fn with_render_sink<S: RenderSink + 'static>(mut self, sink: S) -> Self {
        self.scenes = self.scenes.with_render_sink(sink);
        self
    }

    /// Builds the engine instance.
    ///
    /// # Panics
    ///
    /// Panics if no scene factory was set.
    pub fn build(self) -> Engine {
        info!("Building stage engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        Engine {
            orchestrator: StageOrchestrator::new(self.scenes.build()),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window_title: self.window_title,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Aetheric Stage runtime.
///
/// Create via [`EngineBuilder`], open the first scene in [`Engine::init`],
/// then hand control to [`Engine::run`].
pub struct Engine {
    orchestrator: StageOrchestrator,
    tps: f64,
    channel_capacity: usize,
    window_title: String,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures the scene manager before the runtime starts.
    ///
    /// Typically opens the first scene. Errors from scene callbacks are
    /// returned unchanged.
    pub fn init<F>(mut self, init_fn: F) -> SceneResult<Self>
    where
        F: FnOnce(&mut SceneManager) -> SceneResult<()>,
    {
        info!("Initializing stage");

        init_fn(self.orchestrator.manager_mut())?;

        info!(
            "Stage initialization complete ({} scene(s))",
            self.orchestrator.manager().scene_count()
        );
        Ok(self)
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → logic channel
    /// 2. Spawns the logic thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: logic thread drains, exits, and is joined
    pub fn run(self) {
        info!("Starting stage runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the logic thread -----------------------------------
        let logic_handle = self.orchestrator.spawn_logic_thread(rx, self.tps);

        //--- 3. Launch the platform subsystem ----------------------------
        let platform = Platform::new(tx, self.window_title);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the logic thread ------------------------
        match logic_handle.join() {
            Ok(()) => info!("Logic thread terminated cleanly"),
            Err(e) => error!("Logic thread panicked: {:?}", e),
        }

        info!("Stage shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SceneError;
    use crate::core::scene::testing::{journal, recording_catalog};
    use crate::core::scene::{RenderEntry, SceneParams};
    use std::sync::{Arc, Mutex};

    fn builder() -> EngineBuilder {
        EngineBuilder::new().with_scene_factory(recording_catalog(&journal()))
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.window_title, "Aetheric Stage");
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Scene factory must be set")]
    fn build_without_factory_panics() {
        EngineBuilder::new().build();
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = builder()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_window_title("Test")
            .with_animations(AnimationTable::new())
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window_title, "Test");
        assert!(engine.orchestrator.manager().animations().is_empty());
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_opens_first_scene() {
        let engine = builder()
            .build()
            .init(|stage| {
                stage.open_scene("title", SceneParams::new())?;
                Ok(())
            })
            .unwrap();

        let manager = engine.orchestrator.manager();
        assert_eq!(manager.scene_count(), 1);
        assert!(manager.find_scene_by_name("title").is_some());
    }

    #[test]
    fn init_returns_scene_errors() {
        let result = builder().build().init(|stage| {
            stage.open_scene("title", SceneParams::new().with_animation("warp"))?;
            Ok(())
        });

        assert!(matches!(result, Err(SceneError::UnknownAnimation(_))));
    }

    #[test]
    fn render_sink_is_wired_through() {
        let tables = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&tables);

        builder()
            .with_render_sink(move |_table: &[RenderEntry]| *counter.lock().unwrap() += 1)
            .build()
            .init(|stage| stage.open_scene("title", SceneParams::new()).map(|_| ()))
            .unwrap();

        assert!(*tables.lock().unwrap() >= 1);
    }
}
