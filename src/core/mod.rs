//=========================================================================
// Stage Orchestrator
//=========================================================================
//
// Central coordinator for the scene stage on the logic (non-platform)
// thread.
//
// Responsibilities:
// - Own the SceneManager for the lifetime of the logic thread
// - Receive platform input through the EventCollector
// - Route input, then tick the current scene and any transition
// - Maintain deterministic pacing using a fixed tick rate (TPS)
//
// Each tick:
//   collect → route_input (per event) → enter_frame → clear events → sleep
//
// A scene error abandons the rest of that tick and is logged; the loop
// keeps running until the window closes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{error, info, trace};

//=== Module Declarations =================================================

pub mod error;
pub mod input;
pub mod message_bus;
pub mod scene;

pub(crate) mod platform_bridge;

//=== Internal Dependencies ===============================================

use error::SceneResult;
use input::InputEvent;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::{FrameTick, SceneManager};

//=== StageOrchestrator ===================================================

/// Drives a `SceneManager` at a fixed tick rate on its own thread.
pub(crate) struct StageOrchestrator {
    manager: SceneManager,
    frame: u64,
}

impl StageOrchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new(manager: SceneManager) -> Self {
        Self { manager, frame: 0 }
    }

    pub fn manager(&self) -> &SceneManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SceneManager {
        &mut self.manager
    }

    //--- spawn_logic_thread() ---------------------------------------------

    /// Spawns the logic thread ticking the stage at `tps`.
    pub fn spawn_logic_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            info!(target: "stage", "Logic thread started ({} TPS)", tps);
            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events --------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "stage", "Logic thread exiting");
                    break;
                }

                //--- Step 2: Route input and tick the stage ------------------
                let delta = frame_start.duration_since(last_tick);
                last_tick = frame_start;

                if let Err(e) = self.tick(collector.inputs(), delta) {
                    error!(target: "stage", "Scene error in frame {}: {}", self.frame, e);
                    self.manager.events_mut().clear_all();
                }

                //--- Step 3: Maintain deterministic pacing -------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }

    //--- tick() -----------------------------------------------------------

    /// Runs one logic frame: input first, then the frame tick.
    ///
    /// Dispatcher queues are cleared at the end of every frame, so polled
    /// `SceneEvent`s live for exactly one tick.
    pub fn tick(&mut self, inputs: &[InputEvent], delta: Duration) -> SceneResult<()> {
        for event in inputs {
            if !self.manager.route_input(event)? {
                trace!(target: "stage", "Input {} not delivered", event.kind().name());
            }
        }

        self.frame += 1;
        self.manager.enter_frame(&FrameTick::new(delta, self.frame))?;
        self.manager.events_mut().clear_all();
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
