use leap_engine::{
    AssetManifest, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
    RenderBuffer, Settings,
};
use leap_engine::systems::render::build_render_buffer;

/// Floats per packed sound: event id, volume, pitch.
pub const SOUND_FLOATS: usize = 3;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Handed to every step after the first, so custom events fire once.
    no_input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    /// `SOUND_FLOATS` per sound requested this frame, for host reads.
    sound_buffer: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt).with_max_steps(config.max_steps_per_frame);

        Self {
            ctx: EngineContext::new(&config),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            sound_buffer: Vec::with_capacity(config.max_sounds * SOUND_FLOATS),
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            timestep,
            config,
            game,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Replace sprite, animation and sound data. Live reference counts survive.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let manifest = AssetManifest::from_json(json)?;
        self.ctx.assets.apply_manifest(&manifest);
        log::info!(
            "manifest loaded: {} sprites, {} animation sets, {} sounds",
            manifest.sprites.len(),
            manifest.animations.len(),
            manifest.sounds.len()
        );
        Ok(())
    }

    /// Replace the player settings.
    pub fn load_settings(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.ctx.settings = Settings::from_json(json)?;
        Ok(())
    }

    /// Run one host frame: fixed steps, then the render buffer and sounds.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.ctx.keyboard.apply(&self.input);

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
            self.ctx.keyboard.end_step();
        }

        self.input.drain();

        build_render_buffer(&self.ctx.world, &self.ctx.assets, &mut self.render_buffer);
        if self.render_buffer.instances.len() > self.config.max_instances {
            log::warn!(
                "render buffer overflow: {} instances, {} max",
                self.render_buffer.instances.len(),
                self.config.max_instances
            );
            self.render_buffer.instances.truncate(self.config.max_instances);
        }

        if self.ctx.events.len() > self.config.max_events {
            log::warn!("dropping {} game events", self.ctx.events.len() - self.config.max_events);
            self.ctx.events.truncate(self.config.max_events);
        }

        self.pack_sounds();
    }

    fn pack_sounds(&mut self) {
        self.sound_buffer.clear();
        for request in self.ctx.sounds.iter().take(self.config.max_sounds) {
            match self.ctx.assets.sound_event(&request.path) {
                Some(event) => {
                    self.sound_buffer.extend_from_slice(&[event.0 as f32, request.volume, request.pitch]);
                }
                None => log::debug!("no sound event for {}", request.path),
            }
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn tile_split(&self) -> u32 {
        self.render_buffer.tile_split
    }

    pub fn sound_events_ptr(&self) -> *const f32 {
        self.sound_buffer.as_ptr()
    }

    /// Number of packed sounds, not floats.
    pub fn sound_events_len(&self) -> u32 {
        (self.sound_buffer.len() / SOUND_FLOATS) as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
