use crate::components::entity::Entity;
use crate::components::tilemap::TileMap;
use crate::input::keyboard::Controls;
use crate::rng::Rng;
use crate::services::audio::AudioSink;
use crate::services::settings::Settings;

/// Everything an entity may touch while it updates, borrowed from the world
/// and the engine for the duration of one pass.
pub struct FrameContext<'a> {
    /// Level geometry for collision and wall probes.
    pub map: &'a TileMap,
    /// This frame's raw controls.
    pub controls: Controls,
    pub audio: &'a mut dyn AudioSink,
    pub rng: &'a mut Rng,
    pub settings: &'a Settings,
    /// Entities spawned during the pass; admitted after it finishes.
    pub spawns: &'a mut Vec<Entity>,
}

impl FrameContext<'_> {
    /// Defer an entity until the world reaches its next safe point.
    pub fn queue_spawn(&mut self, entity: Entity) {
        self.spawns.push(entity);
    }
}
