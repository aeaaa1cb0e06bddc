//=========================================================================
// Scene Registry
//=========================================================================
//
// Owns the live scenes and their z-order, and derives the render table
// handed to the rendering backend.
//
// Scenes are stored in a HashMap by id, together with the name they were
// opened under, and referenced through an ordered Vec of ids
// (index 0 = back-most, last = front-most). Lookups by name use that
// stored name, never `Scene::name()`.
//
// Render table policy:
//   add()            → append one entry incrementally, publish
//   remove()/order() → full O(n) rebuild, publish
// The sink always receives a complete list, never a delta.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use crossbeam_channel::Sender;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneId};

//=== Render Table ========================================================

/// Opaque drawable layer handle understood by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// One visible scene's contribution to the render table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderEntry {
    pub scene: SceneId,
    pub layers: Vec<LayerId>,
}

/// Ordered contributions of every visible scene, back-most first.
pub type RenderTable = Vec<RenderEntry>;

//=== RenderSink ==========================================================

/// Rendering backend boundary. Accepts full-table replacement only.
pub trait RenderSink: Send {
    fn publish(&mut self, table: &[RenderEntry]);
}

impl<F> RenderSink for F
where
    F: FnMut(&[RenderEntry]) + Send,
{
    fn publish(&mut self, table: &[RenderEntry]) {
        self(table)
    }
}

/// Forwards every published table to a render thread.
pub struct ChannelSink {
    sender: Sender<RenderTable>,
}

impl ChannelSink {
    pub fn new(sender: Sender<RenderTable>) -> Self {
        Self { sender }
    }
}

impl RenderSink for ChannelSink {
    fn publish(&mut self, table: &[RenderEntry]) {
        if self.sender.send(table.to_vec()).is_err() {
            warn!(target: "stage", "Render channel disconnected, dropping render table");
        }
    }
}

//=== SceneRegistry =======================================================

struct Slot {
    name: String,
    scene: Box<dyn Scene>,
}

/// Ordered set of live scenes plus the derived render table.
pub struct SceneRegistry {
    scenes: HashMap<SceneId, Slot>,
    order: Vec<SceneId>,
    render_table: RenderTable,
    sink: Option<Box<dyn RenderSink>>,
    next_id: u64,
}

impl SceneRegistry {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry without a render sink.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            order: Vec::new(),
            render_table: Vec::new(),
            sink: None,
            next_id: 0,
        }
    }

    /// Creates an empty registry publishing to `sink`.
    pub fn with_sink<S: RenderSink + 'static>(sink: S) -> Self {
        let mut registry = Self::new();
        registry.sink = Some(Box::new(sink));
        registry
    }

    /// Replaces the render sink and publishes the current table to it.
    pub fn set_render_sink(&mut self, sink: Box<dyn RenderSink>) {
        self.sink = Some(sink);
        self.publish();
    }

    //--- Membership -------------------------------------------------------

    /// Takes ownership of a scene registered under `name` and allocates
    /// its id.
    ///
    /// The scene is held but not yet ordered; call [`Self::add`] to stage it.
    pub fn insert(&mut self, name: impl Into<String>, scene: Box<dyn Scene>) -> SceneId {
        self.next_id += 1;
        let id = SceneId(self.next_id);
        let name = name.into();
        debug!(target: "stage", "Registered '{}' as {}", name, id);
        self.scenes.insert(id, Slot { name, scene });
        id
    }

    /// Appends a held scene to the front of the order.
    ///
    /// No-op (returns false) if the scene is already ordered or unknown.
    pub fn add(&mut self, id: SceneId) -> bool {
        if self.order.contains(&id) {
            debug!(target: "stage", "{} is already ordered, skipping add", id);
            return false;
        }

        let Some(entry) = self.scenes.get(&id).map(|slot| Self::entry_for(id, slot.scene.as_ref()))
        else {
            warn!(target: "stage", "Attempted to add unknown scene {}", id);
            return false;
        };

        self.order.push(id);
        if let Some(entry) = entry {
            self.render_table.push(entry);
            self.publish();
        }
        true
    }

    /// Removes a scene and hands ownership back to the caller.
    ///
    /// Rebuilds the render table when the scene was ordered.
    pub fn remove(&mut self, id: SceneId) -> Option<Box<dyn Scene>> {
        let slot = self.scenes.remove(&id)?;

        if let Some(pos) = self.order.iter().position(|&ordered| ordered == id) {
            debug!(target: "stage", "Removing {} from order at position {}", id, pos);
            self.order.remove(pos);
            self.rebuild_render_table();
        }

        Some(slot.scene)
    }

    //--- Lookup -----------------------------------------------------------

    /// First ordered scene registered as `name`, back to front.
    pub fn find_by_name(&self, name: &str) -> Option<SceneId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.scenes.get(id).is_some_and(|slot| slot.name == name))
    }

    /// Name the scene was registered under.
    pub fn name(&self, id: SceneId) -> Option<&str> {
        self.scenes.get(&id).map(|slot| slot.name.as_str())
    }

    pub fn get(&self, id: SceneId) -> Option<&dyn Scene> {
        self.scenes.get(&id).map(|slot| slot.scene.as_ref())
    }

    pub fn get_mut(&mut self, id: SceneId) -> Option<&mut (dyn Scene + 'static)> {
        self.scenes.get_mut(&id).map(|slot| slot.scene.as_mut())
    }

    /// Returns true if the scene is ordered.
    pub fn contains(&self, id: SceneId) -> bool {
        self.order.contains(&id)
    }

    /// Ordered ids, back-most first.
    pub fn ids(&self) -> &[SceneId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Front-most scene.
    pub fn top(&self) -> Option<SceneId> {
        self.order.last().copied()
    }

    /// Scene directly beneath the front-most one.
    pub fn below_top(&self) -> Option<SceneId> {
        self.order.len().checked_sub(2).map(|index| self.order[index])
    }

    //--- Ordering ---------------------------------------------------------

    /// Moves `id` to the front. Returns the resulting front-most scene,
    /// or `None` if nothing moved.
    pub fn order_to_front(&mut self, id: SceneId) -> Option<SceneId> {
        let pos = self.reorder_position(id)?;
        self.order.remove(pos);
        self.order.push(id);
        self.rebuild_render_table();
        self.top()
    }

    /// Moves `id` to the back. Returns the resulting front-most scene,
    /// or `None` if nothing moved.
    pub fn order_to_back(&mut self, id: SceneId) -> Option<SceneId> {
        let pos = self.reorder_position(id)?;
        self.order.remove(pos);
        self.order.insert(0, id);
        self.rebuild_render_table();
        self.top()
    }

    //--- Render Table -----------------------------------------------------

    pub fn render_table(&self) -> &[RenderEntry] {
        &self.render_table
    }

    /// Recomputes the whole table from the current order and publishes it.
    ///
    /// Call after a scene changes its visibility or layers on its own.
    pub fn rebuild_render_table(&mut self) {
        let table: RenderTable = self
            .order
            .iter()
            .filter_map(|id| {
                self.scenes
                    .get(id)
                    .and_then(|slot| Self::entry_for(*id, slot.scene.as_ref()))
            })
            .collect();

        self.render_table = table;
        self.publish();
    }

    //--- Internal Helpers -------------------------------------------------

    fn entry_for(id: SceneId, scene: &dyn Scene) -> Option<RenderEntry> {
        scene.is_visible().then(|| RenderEntry {
            scene: id,
            layers: scene.render_layers(),
        })
    }

    fn reorder_position(&self, id: SceneId) -> Option<usize> {
        if self.order.len() < 2 {
            return None;
        }

        let pos = self.order.iter().position(|&ordered| ordered == id);
        if pos.is_none() {
            warn!(target: "stage", "Cannot reorder {}: not in the stack", id);
        }
        pos
    }

    fn publish(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(&self.render_table);
        }
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
