use glam::Vec2;
use crate::actors::trigger::TriggerEffect;
use crate::api::types::EntityId;
use crate::assets::registry::AssetStore;
use crate::components::entity::{Entity, EntityKind};
use crate::components::tilemap::TileMap;
use crate::core::frame::FrameContext;
use crate::input::keyboard::Controls;
use crate::rng::Rng;
use crate::services::audio::AudioSink;
use crate::services::settings::Settings;

/// Something that happened during a world update that the game should react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    PlayerDied { id: EntityId, pos: Vec2 },
    GoalReached { id: EntityId },
}

/// Services borrowed for the length of one world update.
pub struct Services<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub assets: &'a mut dyn AssetStore,
    pub rng: &'a mut Rng,
    pub settings: &'a Settings,
}

/// Entity storage using a flat Vec, updated in spawn order.
/// Designed for small entity counts (hundreds, not millions).
pub struct World {
    map: TileMap,
    entities: Vec<Entity>,
    pending: Vec<Entity>,
    events: Vec<WorldEvent>,
    next_id: u32,
}

impl World {
    pub fn new(map: TileMap) -> Self {
        Self::with_capacity(map, 256)
    }

    /// Create a world with a specific entity capacity.
    pub fn with_capacity(map: TileMap, capacity: usize) -> Self {
        Self {
            map,
            entities: Vec::with_capacity(capacity),
            pending: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn set_map(&mut self, map: TileMap) {
        self.map = map;
    }

    /// Add an entity immediately. Only call outside `update`.
    pub fn spawn(&mut self, mut entity: Entity, assets: &mut dyn AssetStore) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        entity.on_spawn(assets);
        log::debug!("spawned {:?} {:?}", id, entity.tag);
        self.entities.push(entity);
        id
    }

    /// Add an entity at the end of the next update.
    pub fn queue_spawn(&mut self, entity: Entity) {
        self.pending.push(entity);
    }

    /// Run one frame: update every live entity in spawn order, apply
    /// triggers, remove retired entities, then admit queued ones.
    pub fn update(&mut self, services: Services<'_>, controls: Controls, delta: f32) {
        let Services { audio, assets, rng, settings } = services;

        let mut frame = FrameContext {
            map: &self.map,
            controls,
            audio,
            rng,
            settings,
            spawns: &mut self.pending,
        };
        for entity in self.entities.iter_mut().filter(|e| !e.is_retired()) {
            entity.update(&mut frame, delta);
        }

        self.resolve_triggers();
        self.sweep(assets);

        for entity in std::mem::take(&mut self.pending) {
            self.spawn(entity, assets);
        }
    }

    fn resolve_triggers(&mut self) {
        let live_where = |keep: fn(&Entity) -> bool| -> Vec<usize> {
            self.entities
                .iter()
                .enumerate()
                .filter(|(_, e)| !e.is_retired() && keep(e))
                .map(|(i, _)| i)
                .collect()
        };
        let players = live_where(|e| e.as_player().is_some());
        let triggers = live_where(|e| e.trigger_effect().is_some());

        for &t in &triggers {
            for &p in &players {
                let overlapping = self.entities[p].intersects(&self.entities[t]);
                let player_id = self.entities[p].id;
                let fire = match &mut self.entities[t].kind {
                    EntityKind::Trigger(trigger) => trigger.observe(player_id, overlapping),
                    _ => false,
                };
                if let (true, Some(effect)) = (fire, self.entities[t].trigger_effect()) {
                    self.apply_trigger(p, effect);
                }
            }
        }
    }

    fn apply_trigger(&mut self, index: usize, effect: TriggerEffect) {
        let Entity { id, pos, velocity, body, kind, .. } = &mut self.entities[index];
        let (EntityKind::Player(player), Some(body)) = (kind, body.as_mut()) else {
            return;
        };
        let playable = &mut player.playable;

        match effect {
            TriggerEffect::Kill => {
                if !playable.is_dead() {
                    playable.kill();
                    log::debug!("player {:?} died at {:?}", id, pos);
                    self.events.push(WorldEvent::PlayerDied { id: *id, pos: *pos });
                }
            }
            TriggerEffect::Launch { speed } => {
                let speed = speed * body.gravity_sign();
                playable.force_jump(body, velocity, speed);
            }
            TriggerEffect::FlipGravity => playable.force_flip_gravity(body),
            TriggerEffect::Goal => self.events.push(WorldEvent::GoalReached { id: *id }),
        }
    }

    fn sweep(&mut self, assets: &mut dyn AssetStore) {
        self.entities.retain_mut(|entity| {
            if entity.is_retired() {
                entity.on_removed(assets);
                log::debug!("removed {:?} {:?}", entity.id, entity.tag);
                false
            } else {
                true
            }
        });
    }

    /// Remove every entity, live and queued, releasing their assets.
    pub fn clear(&mut self, assets: &mut dyn AssetStore) {
        for mut entity in self.entities.drain(..) {
            entity.on_removed(assets);
        }
        self.pending.clear();
        self.events.clear();
    }

    /// Retire an entity by ID; it leaves at the next sweep.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.retire();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// Live entities holding a player.
    pub fn players(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.as_player().is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities waiting to be admitted.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }
}
