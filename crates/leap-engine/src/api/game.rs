use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::AssetRegistry;
use crate::components::entity::Entity;
use crate::components::tilemap::TileMap;
use crate::core::world::{Services, World};
use crate::input::keyboard::KeyboardState;
use crate::input::queue::InputQueue;
use crate::rng::Rng;
use crate::services::audio::SoundQueue;
use crate::services::settings::Settings;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60). Movement is tuned per step.
    pub fixed_dt: f32,
    /// Visible world width in world units.
    pub world_width: f32,
    /// Visible world height in world units.
    pub world_height: f32,
    /// Seed for the random source.
    pub seed: u64,
    /// Maximum number of render instances (default: 2048).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Initial entity capacity of the world.
    pub max_entities: usize,
    /// Most fixed steps run for one host frame.
    pub max_steps_per_frame: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 480.0,
            world_height: 360.0,
            seed: 0x5EED,
            max_instances: 2048,
            max_sounds: 32,
            max_events: 32,
            max_entities: 256,
            max_steps_per_frame: 10,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: build the level, spawn entities.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. Usually calls [`EngineContext::step_world`] and reacts
    /// to what happened. The frame's input events arrive on the first step
    /// only; later steps in the same frame see an empty queue.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub world: World,
    /// Sounds requested this frame.
    pub sounds: SoundQueue,
    pub events: Vec<GameEvent>,
    pub rng: Rng,
    pub assets: AssetRegistry,
    pub settings: Settings,
    pub keyboard: KeyboardState,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            world: World::with_capacity(TileMap::new(0, 0, 1.0), config.max_entities),
            sounds: SoundQueue::new(),
            events: Vec::with_capacity(config.max_events),
            rng: Rng::new(config.seed),
            assets: AssetRegistry::new(),
            settings: Settings::default(),
            keyboard: KeyboardState::new(),
        }
    }

    /// Spawn an entity immediately, loading its assets.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.world.spawn(entity, &mut self.assets)
    }

    /// Drop every entity and swap in a new level.
    pub fn load_level(&mut self, map: TileMap) {
        self.world.clear(&mut self.assets);
        self.world.set_map(map);
    }

    /// Advance the world one step with the current keyboard controls.
    pub fn step_world(&mut self, delta: f32) {
        let controls = self.keyboard.controls();
        let services = Services {
            audio: &mut self.sounds,
            assets: &mut self.assets,
            rng: &mut self.rng,
            settings: &self.settings,
        };
        self.world.update(services, controls, delta);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::AssetStore;
    use crate::components::tilemap::Tile;
    use crate::input::keyboard::keys;
    use crate::input::queue::InputEvent;
    use crate::movement::modifiers::ModifierSet;
    use crate::services::audio::{AudioSink, SoundCategory};
    use glam::Vec2;

    fn floor() -> TileMap {
        let mut map = TileMap::new(20, 20, 12.0);
        map.fill_rect(0, 0, 20, 1, Some(Tile::solid(0.0, 0.0)));
        map
    }

    #[test]
    fn jump_key_reaches_the_player() {
        let mut ctx = EngineContext::default();
        ctx.load_level(floor());
        let id = ctx.spawn(Entity::player(Vec2::new(100.0, 40.0), ModifierSet::none()));
        for _ in 0..30 {
            ctx.step_world(1.0 / 60.0);
        }
        assert!(ctx.world.get(id).is_some_and(|e| e.on_ground()));

        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code: keys::SPACE });
        ctx.keyboard.apply(&input);
        ctx.step_world(1.0 / 60.0);
        ctx.keyboard.end_step();

        let player = ctx.world.get(id).unwrap();
        assert_eq!(player.velocity.y, 4.5);
        assert_eq!(ctx.sounds.len(), 1);
    }

    #[test]
    fn load_level_releases_old_entities() {
        let mut ctx = EngineContext::default();
        ctx.spawn(Entity::player(Vec2::ZERO, ModifierSet::none()));
        assert_eq!(ctx.assets.ref_count("player"), 1);
        ctx.load_level(floor());
        assert!(ctx.world.is_empty());
        assert_eq!(ctx.assets.ref_count("player"), 0);
        assert_eq!(ctx.world.map().width, 20);
    }

    #[test]
    fn clear_frame_data_empties_queues() {
        let mut ctx = EngineContext::default();
        ctx.emit_event(GameEvent::new(GameEvent::PLAYER_DIED, 1.0, 2.0, 0.0));
        ctx.sounds.play_sound("jump.wav", SoundCategory::Gameplay, 1.0, 1.0);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
        assert!(ctx.sounds.is_empty());
    }
}
