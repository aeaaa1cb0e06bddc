//=========================================================================
// Scene Test Doubles
//=========================================================================
//
// Recording scenes shared by the scene module's unit tests.
//
// Every callback is logged as "name:callback" into a shared journal so
// tests can assert exact cross-scene ordering.
//
//=========================================================================

use std::sync::{Arc, Mutex};

use super::{
    FrameTick, LayerId, Scene, SceneCatalog, SceneParams, ScenePose,
};
use crate::core::error::{SceneError, SceneResult};
use crate::core::input::{KeyEvent, TouchEvent};

//=== Journal =============================================================

#[derive(Clone, Default)]
pub(crate) struct Journal {
    calls: Arc<Mutex<Vec<String>>>,
    poses: Arc<Mutex<Vec<(String, ScenePose)>>>,
}

pub(crate) fn journal() -> Journal {
    Journal::default()
}

impl Journal {
    fn record(&self, scene: &str, call: &str) {
        self.calls.lock().unwrap().push(format!("{scene}:{call}"));
    }

    /// Every call in order, as "name:callback".
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Callbacks received by one scene, in order.
    pub fn calls_for(&self, scene: &str) -> Vec<String> {
        let prefix = format!("{scene}:");
        self.calls()
            .into_iter()
            .filter_map(|call| call.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    pub fn poses_for(&self, scene: &str) -> Vec<ScenePose> {
        self.poses
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == scene)
            .map(|(_, pose)| *pose)
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
        self.poses.lock().unwrap().clear();
    }
}

//=== RecordingScene ======================================================

pub(crate) struct RecordingScene {
    name: String,
    journal: Journal,
    layers: Vec<LayerId>,
    visible: bool,
    fail_on: Option<&'static str>,
}

impl RecordingScene {
    pub fn new(name: &str, journal: Journal) -> Self {
        Self {
            name: name.to_string(),
            journal,
            layers: Vec::new(),
            visible: true,
            fail_on: None,
        }
    }

    pub fn with_layers(mut self, layers: Vec<LayerId>) -> Self {
        self.layers = layers;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn failing_on(mut self, stage: &'static str) -> Self {
        self.fail_on = Some(stage);
        self
    }

    fn log(&self, stage: &'static str) -> SceneResult<()> {
        self.journal.record(&self.name, stage);
        if self.fail_on == Some(stage) {
            return Err(SceneError::callback(&self.name, stage, "injected failure"));
        }
        Ok(())
    }
}

impl Scene for RecordingScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn render_layers(&self) -> Vec<LayerId> {
        self.layers.clone()
    }

    fn apply_pose(&mut self, pose: ScenePose) {
        self.journal.poses.lock().unwrap().push((self.name.clone(), pose));
    }

    fn on_create(&mut self, _params: &SceneParams) -> SceneResult<()> {
        self.log("on_create")
    }

    fn on_start(&mut self, _params: &SceneParams) -> SceneResult<()> {
        self.log("on_start")
    }

    fn on_resume(&mut self, _params: &SceneParams) -> SceneResult<()> {
        self.log("on_resume")
    }

    fn on_pause(&mut self) -> SceneResult<()> {
        self.log("on_pause")
    }

    fn on_stop(&mut self) -> SceneResult<()> {
        self.log("on_stop")
    }

    fn on_destroy(&mut self) -> SceneResult<()> {
        self.log("on_destroy")
    }

    fn on_touch_down(&mut self, _touch: &TouchEvent) -> SceneResult<()> {
        self.log("on_touch_down")
    }

    fn on_touch_up(&mut self, _touch: &TouchEvent) -> SceneResult<()> {
        self.log("on_touch_up")
    }

    fn on_touch_move(&mut self, _touch: &TouchEvent) -> SceneResult<()> {
        self.log("on_touch_move")
    }

    fn on_touch_cancel(&mut self, _touch: &TouchEvent) -> SceneResult<()> {
        self.log("on_touch_cancel")
    }

    fn on_key_down(&mut self, _key: &KeyEvent) -> SceneResult<()> {
        self.log("on_key_down")
    }

    fn on_key_up(&mut self, _key: &KeyEvent) -> SceneResult<()> {
        self.log("on_key_up")
    }

    fn on_enter_frame(&mut self, _tick: &FrameTick) -> SceneResult<()> {
        self.log("on_enter_frame")
    }
}

//=== Catalog =============================================================

const STAGES: [&str; 13] = [
    "on_create",
    "on_start",
    "on_resume",
    "on_pause",
    "on_stop",
    "on_destroy",
    "on_touch_down",
    "on_touch_up",
    "on_touch_move",
    "on_touch_cancel",
    "on_key_down",
    "on_key_up",
    "on_enter_frame",
];

/// Catalog building a `RecordingScene` for any name.
///
/// Honoured values: `layer` (int), `hidden` (bool), `fail` (callback name).
pub(crate) fn recording_catalog(journal: &Journal) -> SceneCatalog {
    let journal = journal.clone();
    SceneCatalog::new().with_fallback(move |name, params| {
        let mut scene = RecordingScene::new(name, journal.clone());
        if let Some(layer) = params.get("layer").and_then(|v| v.as_int()) {
            scene = scene.with_layers(vec![LayerId(layer as u64)]);
        }
        if params.get("hidden").and_then(|v| v.as_bool()) == Some(true) {
            scene = scene.hidden();
        }
        let fail = params.get("fail").and_then(|v| v.as_text());
        if let Some(stage) = STAGES.iter().copied().find(|s| Some(*s) == fail) {
            scene = scene.failing_on(stage);
        }
        Ok(Box::new(scene) as Box<dyn Scene>)
    })
}
