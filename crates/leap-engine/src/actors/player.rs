//! The player: a playable with animation selection and dust particles.

use glam::Vec2;
use crate::assets::registry::AssetRegistry;
use crate::components::entity::Entity;
use crate::core::frame::FrameContext;
use crate::core::physics::PhysicsBody;
use crate::math::Angle;
use crate::movement::modifiers::{Modifier, ModifierSet};
use crate::movement::playable::{Action, Motion, Playable};
use crate::renderer::instance::RenderInstance;
use crate::services::settings::PARTICLES;

pub const PLAYER_SIZE: Vec2 = Vec2::new(10.0, 19.0);
/// Path of the player's animation set.
pub const PLAYER_ANIMATION: &str = "player";

const JUMP_ANIMATION: &str = "jump_nr";
const IDLE_ANIMATION: &str = "idle";

/// Walking kicks up one dust particle every this many frames.
const STEP_DUST_INTERVAL: u32 = 10;
const LANDING_DUST_PER_SIDE: usize = 5;
/// Dust spawns this far below the centre, along gravity.
const DUST_DROP: f32 = 8.0;
const FADE_PERIOD: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub playable: Playable,
    current_animation: &'static str,
    animation_time: f32,
    was_on_ground: bool,
}

fn animation_for(action: Action) -> &'static str {
    match action {
        Action::Jump => JUMP_ANIMATION,
        other => other.name(),
    }
}

impl Player {
    pub fn new(modifiers: ModifierSet) -> Self {
        Self {
            playable: Playable::new(modifiers),
            current_animation: IDLE_ANIMATION,
            animation_time: 0.0,
            was_on_ground: true,
        }
    }

    pub fn current_animation(&self) -> &'static str {
        self.current_animation
    }

    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    pub fn was_on_ground(&self) -> bool {
        self.was_on_ground
    }

    pub fn update_early(&mut self) {
        self.playable.update_early();
    }

    pub fn update_late(&mut self, motion: Motion<'_>, frame: &mut FrameContext<'_>, delta: f32) {
        let Motion { pos, extents, velocity, body } = motion;

        if body.on_ground && self.current_animation == JUMP_ANIMATION {
            self.current_animation = IDLE_ANIMATION;
            self.animation_time = 0.0;
        }

        self.playable.update_late(
            Motion { pos, extents, velocity: &mut *velocity, body: &mut *body },
            frame,
            delta,
        );

        let last = self.current_animation;
        self.current_animation = animation_for(self.playable.action());
        if self.current_animation != last {
            self.animation_time = 0.0;
        } else {
            self.animation_time += delta;
        }

        if frame.settings.get_bool(PARTICLES) {
            self.emit_dust(pos, *velocity, body, frame);
        }

        self.was_on_ground = body.on_ground;
    }

    fn emit_dust(&self, pos: Vec2, velocity: Vec2, body: &PhysicsBody, frame: &mut FrameContext<'_>) {
        let g = body.gravity_sign();
        let origin = Vec2::new(pos.x, pos.y - DUST_DROP * g);

        if velocity.x != 0.0
            && body.on_ground
            && self.playable.frames_alive() % STEP_DUST_INTERVAL == 0
        {
            let speed = frame.rng.range_f32(0.8, 1.2);
            let spread = Angle(frame.rng.range_f32(0.0, 0.2) * g);
            // Kicked up behind the direction of travel.
            let angle = if velocity.x > 0.0 { Angle::HALF - spread } else { spread };
            frame.queue_spawn(Entity::particle(origin, speed, angle));
        }

        if (body.on_ground || self.playable.just_jumped) && !self.was_on_ground {
            for _ in 0..LANDING_DUST_PER_SIDE {
                let speed = frame.rng.range_f32(0.2, 0.6);
                let angle = Angle::HALF - Angle(frame.rng.range_f32(0.0, 0.4) * g);
                frame.queue_spawn(Entity::particle(origin, speed, angle));

                let speed = frame.rng.range_f32(0.2, 0.6);
                let angle = Angle(frame.rng.range_f32(0.0, 0.4) * g);
                frame.queue_spawn(Entity::particle(origin, speed, angle));
            }
        }
    }

    /// Opacity for this frame; pulses under the `fade` modifier.
    pub fn alpha(&self) -> f32 {
        if self.playable.modifier(Modifier::Fade) {
            ((self.playable.frames_alive() as f32 / FADE_PERIOD).cos() + 0.75).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Sprite for the current animation frame, mirrored to face the right way
    /// and flipped with gravity. `None` when the animation set is not registered.
    pub fn render_instance(
        &self,
        pos: Vec2,
        size: Vec2,
        body: &PhysicsBody,
        assets: &AssetRegistry,
    ) -> Option<RenderInstance> {
        let (col, row) = assets
            .fetch_animation(PLAYER_ANIMATION)?
            .key_frame(self.current_animation, self.animation_time)?;
        let atlas = assets.sprite(PLAYER_ANIMATION).map_or(1, |s| s.atlas);
        let facing = if self.playable.facing_right() { 1.0 } else { -1.0 };
        Some(RenderInstance {
            x: pos.x,
            y: pos.y,
            scale_x: size.x * facing,
            scale_y: size.y * body.gravity_sign(),
            sprite_col: col,
            atlas_row: row,
            alpha: self.alpha(),
            atlas: atlas as f32,
        })
    }
}
