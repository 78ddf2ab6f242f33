pub mod actors;
pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod math;
pub mod movement;
pub mod renderer;
pub mod rng;
pub mod services;
pub mod systems;

// Re-export key types at crate root for convenience
pub use actors::particle::Particle;
pub use actors::player::Player;
pub use actors::trigger::{Trigger, TriggerEffect};
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent, SoundEvent};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{AssetRegistry, AssetStore};
pub use components::animation::{AnimationClip, AnimationSet};
pub use components::entity::{Entity, EntityKind};
pub use components::tilemap::{Tile, TileMap};
pub use core::frame::FrameContext;
pub use core::physics::PhysicsBody;
pub use core::time::FixedTimestep;
pub use core::world::{Services, World, WorldEvent};
pub use input::keyboard::{Controls, KeyboardState};
pub use input::queue::{InputEvent, InputQueue};
pub use math::Angle;
pub use movement::modifiers::{Modifier, ModifierSet};
pub use movement::playable::{Action, Playable};
pub use movement::tuning::MovementTuning;
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use rng::Rng;
pub use services::audio::{AudioSink, SoundCategory, SoundQueue};
pub use services::settings::Settings;
