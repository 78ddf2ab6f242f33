use glam::Vec2;
use serde::{Deserialize, Serialize};
use leap_engine::*;
use leap_engine::actors::player::PLAYER_SIZE;
use crate::layout::{parse_layout, LayoutError, MarkerKind, StageLayout};

const TILE_SIZE: f32 = 12.0;
/// Frames between the player's death and the restart.
const RESTART_DELAY: u32 = 45;
/// Frames between reaching the door and loading the next stage.
const CLEAR_DELAY: u32 = 60;

/// Custom input event kind the host sends for its restart button.
pub const RESTART_EVENT: u32 = 1;

const SPIKE_SPRITE: &str = "spike.png";
const SPRING_SPRITE: &str = "spring.png";
const FLIPPER_SPRITE: &str = "flipper.png";
const DOOR_SPRITE: &str = "door.png";

const DEFAULT_ROWS: [&str; 17] = [
    "########################################",
    "#......................................#",
    "#......................................#",
    "#..........vvvv..........vvv...........#",
    "#.....................................D#",
    "#...........................############",
    "#......................................#",
    "#..............g.......................#",
    "#........#######.......................#",
    "#.......................^^^...#####....#",
    "#..................############........#",
    "#......................................#",
    "#####..................................#",
    "#.........######.......................#",
    "#.....s................................#",
    "#P...###..........^^^^.............#####",
    "########################################",
];

fn default_tile_size() -> f32 {
    TILE_SIZE
}

fn default_launch_speed() -> f32 {
    6.5
}

fn default_restart_delay() -> u32 {
    RESTART_DELAY
}

fn default_clear_delay() -> u32 {
    CLEAR_DELAY
}

/// Everything that defines one stage, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub number: u32,
    /// Modifier names; unknown names are ignored.
    #[serde(default)]
    pub modifiers: ModifierSet,
    pub rows: Vec<String>,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    /// Upward speed springs give.
    #[serde(default = "default_launch_speed")]
    pub launch_speed: f32,
    #[serde(default = "default_restart_delay")]
    pub restart_delay: u32,
    #[serde(default = "default_clear_delay")]
    pub clear_delay: u32,
    /// Stage to load once this one is cleared.
    #[serde(default)]
    pub next: Option<Box<StageConfig>>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            number: 1,
            modifiers: ModifierSet::none(),
            rows: DEFAULT_ROWS.iter().map(|r| r.to_string()).collect(),
            tile_size: TILE_SIZE,
            launch_speed: default_launch_speed(),
            restart_delay: RESTART_DELAY,
            clear_delay: CLEAR_DELAY,
            next: None,
        }
    }
}

impl StageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn layout(&self) -> Result<StageLayout, LayoutError> {
        parse_layout(&self.rows, self.tile_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Playing,
    Dying { frames_left: u32 },
    /// Counts down to the next stage; stays at zero on the last one.
    Cleared { frames_left: u32 },
}

/// A chain of stages: reach the door to move on, restart on death.
pub struct DoorStage {
    config: StageConfig,
    layout: Option<StageLayout>,
    state: StageState,
    attempts: u32,
    player: Option<EntityId>,
}

impl DoorStage {
    pub fn new() -> Self {
        Self::with_config(StageConfig::default())
    }

    pub fn with_config(config: StageConfig) -> Self {
        Self {
            config,
            layout: None,
            state: StageState::Playing,
            attempts: 0,
            player: None,
        }
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn stage_number(&self) -> u32 {
        self.config.number
    }

    /// Parse the current config's layout and build it.
    fn load(&mut self, ctx: &mut EngineContext) -> Result<(), LayoutError> {
        let layout = self.config.layout()?;
        log::info!(
            "stage {}: {}x{} tiles, {} markers",
            self.config.number,
            layout.map.width,
            layout.map.height,
            layout.markers.len()
        );
        self.layout = Some(layout);
        self.build(ctx);
        Ok(())
    }

    fn build(&mut self, ctx: &mut EngineContext) {
        let Some(layout) = &self.layout else {
            return;
        };
        ctx.load_level(layout.map.clone());

        let half = self.config.tile_size / 2.0;
        for marker in &layout.markers {
            let c = marker.center;
            let t = self.config.tile_size;
            let entity = match marker.kind {
                MarkerKind::FloorSpike => spike(Vec2::new(c.x, c.y - half / 2.0), Vec2::new(t, half)),
                MarkerKind::CeilingSpike => spike(Vec2::new(c.x, c.y + half / 2.0), Vec2::new(t, half)),
                MarkerKind::Spring => Entity::trigger(
                    Vec2::new(c.x, c.y - half / 2.0),
                    Vec2::new(t, half),
                    Trigger::new(TriggerEffect::Launch { speed: self.config.launch_speed })
                        .with_sprite(SPRING_SPRITE),
                )
                .with_tag("spring"),
                MarkerKind::Flipper => Entity::trigger(
                    c,
                    Vec2::splat(t),
                    Trigger::new(TriggerEffect::FlipGravity).with_sprite(FLIPPER_SPRITE),
                )
                .with_tag("flipper"),
                MarkerKind::Door => Entity::trigger(
                    Vec2::new(c.x, c.y + half),
                    Vec2::new(t, t * 2.0),
                    Trigger::new(TriggerEffect::Goal).with_sprite(DOOR_SPRITE),
                )
                .with_tag("door"),
            };
            ctx.spawn(entity);
        }

        // Stand the player on the floor of its start tile.
        let start = layout.player_start;
        let feet = start.y - half;
        let pos = Vec2::new(start.x, feet + PLAYER_SIZE.y / 2.0);
        self.player = Some(ctx.spawn(Entity::player(pos, self.config.modifiers.clone())));
        self.state = StageState::Playing;
    }

    fn restart(&mut self, ctx: &mut EngineContext) {
        self.attempts += 1;
        log::info!("stage {}: attempt {}", self.config.number, self.attempts + 1);
        ctx.emit_event(GameEvent::new(GameEvent::STAGE_RESTARTED, self.attempts as f32, 0.0, 0.0));
        self.build(ctx);
    }

    /// Swap in the next stage's config, if any, and build it.
    fn advance(&mut self, ctx: &mut EngineContext) {
        let Some(next) = self.config.next.take() else {
            log::info!("stage {}: last stage cleared", self.config.number);
            return;
        };
        let cleared = std::mem::replace(&mut self.config, *next);
        match self.load(ctx) {
            Ok(()) => {
                self.attempts = 0;
                ctx.emit_event(GameEvent::new(GameEvent::STAGE_STARTED, self.config.number as f32, 0.0, 0.0));
            }
            Err(e) => {
                log::error!("stage {}: bad layout: {}", self.config.number, e);
                self.config = cleared;
            }
        }
    }

    fn handle_world_events(&mut self, ctx: &mut EngineContext) {
        for event in ctx.world.drain_events() {
            match (self.state, event) {
                (StageState::Playing, WorldEvent::PlayerDied { id, pos }) => {
                    log::info!("stage {}: player died at ({:.0}, {:.0})", self.config.number, pos.x, pos.y);
                    ctx.emit_event(GameEvent::new(GameEvent::PLAYER_DIED, pos.x, pos.y, 0.0));
                    ctx.world.despawn(id);
                    self.player = None;
                    self.state = StageState::Dying { frames_left: self.config.restart_delay };
                }
                (StageState::Playing, WorldEvent::GoalReached { .. }) => {
                    log::info!("stage {}: cleared after {} deaths", self.config.number, self.attempts);
                    ctx.emit_event(GameEvent::new(GameEvent::STAGE_CLEARED, self.config.number as f32, 0.0, 0.0));
                    self.state = StageState::Cleared { frames_left: self.config.clear_delay.max(1) };
                }
                _ => {}
            }
        }
    }
}

fn spike(pos: Vec2, size: Vec2) -> Entity {
    Entity::trigger(pos, size, Trigger::new(TriggerEffect::Kill).with_sprite(SPIKE_SPRITE)).with_tag("spike")
}

impl Default for DoorStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for DoorStage {
    fn config(&self) -> GameConfig {
        let (width, height) = match &self.layout {
            Some(layout) => (layout.map.width, layout.map.height),
            None => (self.config.rows.first().map_or(0, |r| r.chars().count()) as u32, self.config.rows.len() as u32),
        };
        // The host canvas is sized once, from the first stage.
        GameConfig {
            world_width: width as f32 * self.config.tile_size,
            world_height: height as f32 * self.config.tile_size,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(e) = self.load(ctx) {
            log::error!("stage {}: bad layout: {}", self.config.number, e);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = 1.0 / 60.0;
        let restart_requested = input.customs(RESTART_EVENT).next().is_some();
        if restart_requested && self.layout.is_some() && !matches!(self.state, StageState::Cleared { .. }) {
            self.restart(ctx);
            return;
        }

        match self.state {
            StageState::Playing => {
                ctx.step_world(dt);
                self.handle_world_events(ctx);
            }
            StageState::Dying { frames_left } => {
                ctx.step_world(dt);
                ctx.world.drain_events();
                if frames_left <= 1 {
                    self.restart(ctx);
                } else {
                    self.state = StageState::Dying { frames_left: frames_left - 1 };
                }
            }
            StageState::Cleared { frames_left } => {
                ctx.step_world(dt);
                ctx.world.drain_events();
                if frames_left > 1 {
                    self.state = StageState::Cleared { frames_left: frames_left - 1 };
                } else if frames_left == 1 {
                    self.state = StageState::Cleared { frames_left: 0 };
                    self.advance(ctx);
                }
            }
        }
    }
}
