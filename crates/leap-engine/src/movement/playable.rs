//! The player-controlled movement state machine.
//!
//! Runs once per frame after collisions for the current velocity have been
//! resolved, and computes the velocity that will be applied next frame.
//! Every timer counts frames, not seconds.

use glam::Vec2;
use crate::components::tilemap::TileMap;
use crate::core::frame::FrameContext;
use crate::core::physics::PhysicsBody;
use crate::input::keyboard::Controls;
use crate::math::sign;
use crate::movement::modifiers::{Modifier, ModifierSet};
use crate::movement::tuning::{
    MovementTuning, COYOTE_FRAMES, JUMP_BUFFER_FRAMES, WALL_COYOTE_FRAMES,
    WALL_JUMP_MIN_BUFFER, WALL_PROBE_DISTANCE,
};
use crate::services::audio::SoundCategory;

pub const JUMP_SOUND: &str = "jump.wav";
const JUMP_VOLUME: f32 = 0.4;
const JUMP_PITCH: (f32, f32) = (0.7, 1.3);

/// Discrete movement state, used to pick animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Idle,
    Walk,
    Jump,
    Slide,
}

impl Action {
    /// Slide beats airborne, airborne beats walking, walking beats idle.
    pub fn classify(on_ground: bool, velocity: Vec2, wall_sliding: bool) -> Self {
        if wall_sliding {
            Action::Slide
        } else if !on_ground {
            Action::Jump
        } else if velocity.x != 0.0 {
            Action::Walk
        } else {
            Action::Idle
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Walk => "walk",
            Action::Jump => "jump",
            Action::Slide => "slide",
        }
    }
}

/// The kinematic parts of the owning entity a playable steers.
pub struct Motion<'a> {
    pub pos: Vec2,
    pub extents: Vec2,
    pub velocity: &'a mut Vec2,
    pub body: &'a mut PhysicsBody,
}

#[derive(Debug, Clone)]
pub struct Playable {
    tuning: MovementTuning,
    modifiers: ModifierSet,

    pub touching_wall_left: bool,
    pub touching_wall_right: bool,
    /// Direction a wall-jump pushes: +1 away from a left wall, -1 from a right one.
    pub last_wall_touch_direction: f32,
    pub wall_jumping: bool,
    pub wall_sliding: bool,
    pub jump_input_buffer: u32,
    pub coyote_time: u32,
    pub wall_coyote_time: u32,
    /// Set only on the frame a ground jump fired.
    pub just_jumped: bool,

    action: Action,
    facing_right: bool,
    time_alive: f32,
    frames_alive: u32,
    is_dead: bool,
}

impl Playable {
    pub fn new(modifiers: ModifierSet) -> Self {
        Self {
            tuning: MovementTuning::for_modifiers(&modifiers),
            modifiers,
            touching_wall_left: false,
            touching_wall_right: false,
            last_wall_touch_direction: 1.0,
            wall_jumping: false,
            wall_sliding: false,
            jump_input_buffer: 0,
            coyote_time: 0,
            wall_coyote_time: 0,
            just_jumped: false,
            action: Action::Idle,
            facing_right: true,
            time_alive: 0.0,
            frames_alive: 0,
            is_dead: false,
        }
    }

    /// A fresh body carrying this playable's starting gravity.
    pub fn initial_body(&self) -> PhysicsBody {
        PhysicsBody::new(self.tuning.gravity)
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn time_alive(&self) -> f32 {
        self.time_alive
    }

    pub fn frames_alive(&self) -> u32 {
        self.frames_alive
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn kill(&mut self) {
        self.is_dead = true;
    }

    pub fn update_early(&mut self) {
        self.just_jumped = false;
    }

    /// Apply control-altering modifiers to the raw input.
    pub fn sample_controls(&self, raw: Controls, on_ground: bool) -> Controls {
        let (left, right) = if self.modifier(Modifier::InvControls) {
            (raw.right, raw.left)
        } else {
            (raw.left, raw.right)
        };
        let may_steer = !self.modifier(Modifier::OnlyJumpMove) || !on_ground;
        Controls {
            left: may_steer && left,
            right: may_steer && right,
            jump: raw.jump,
        }
    }

    pub fn check_touching_wall(&mut self, map: &TileMap, pos: Vec2, extents: Vec2) {
        let probe = Vec2::new(extents.x + WALL_PROBE_DISTANCE, 0.0);
        self.touching_wall_left = map.is_solid(map.to_map_pos(pos - probe));
        self.touching_wall_right = map.is_solid(map.to_map_pos(pos + probe));
    }

    pub fn update_late(&mut self, motion: Motion<'_>, frame: &mut FrameContext<'_>, delta: f32) {
        let Motion { pos, extents, velocity, body } = motion;

        self.time_alive += delta;
        self.frames_alive += 1;

        let input = self.sample_controls(frame.controls, body.on_ground);

        self.check_touching_wall(frame.map, pos, extents);
        let touching_wall = self.touching_wall_left || self.touching_wall_right;

        self.wall_sliding = !body.on_ground
            && touching_wall
            && velocity.y * sign(body.gravity) <= 0.0
            && ((input.right && self.touching_wall_right) || (input.left && self.touching_wall_left));

        self.update_timers(touching_wall, body.on_ground, input.jump);
        self.accelerate_horizontal(input, body.on_ground, velocity);

        if self.ground_jump_ready(body.on_ground) {
            self.coyote_time = 0;
            self.jump_input_buffer = 0;
            body.on_ground = false;
            self.just_jumped = true;
            play_jump_sound(frame);

            if self.modifier(Modifier::JumpInvGravity) {
                body.flip_gravity();
            } else {
                velocity.y = self.tuning.jump_speed * sign(body.gravity);
            }
        } else if self.wall_coyote_time > 0
            && !body.on_ground
            && self.jump_input_buffer > WALL_JUMP_MIN_BUFFER
        {
            self.coyote_time = 0;
            self.wall_coyote_time = 0;
            self.jump_input_buffer = 0;
            self.wall_jumping = true;
            body.on_ground = false;
            play_jump_sound(frame);

            self.wall_sliding = false;
            velocity.x = self.tuning.wall_jump_h_speed * self.last_wall_touch_direction;
            if self.modifier(Modifier::JumpInvGravity) {
                body.flip_gravity();
            } else {
                velocity.y = self.tuning.wall_jump_v_speed * sign(body.gravity);
            }
        } else {
            self.apply_gravity(body, velocity);
        }

        if !body.on_ground && velocity.x != 0.0 {
            self.facing_right = velocity.x > 0.0;
        }

        self.action = Action::classify(body.on_ground, *velocity, self.wall_sliding);
    }

    fn update_timers(&mut self, touching_wall: bool, on_ground: bool, jump_pressed: bool) {
        if touching_wall {
            self.wall_coyote_time = WALL_COYOTE_FRAMES;
            self.last_wall_touch_direction = if self.touching_wall_left { 1.0 } else { -1.0 };
        } else {
            self.wall_coyote_time = self.wall_coyote_time.saturating_sub(1);
        }

        if on_ground {
            self.coyote_time = COYOTE_FRAMES;
            self.wall_jumping = false;
            self.wall_coyote_time = 0;
        } else {
            self.coyote_time = self.coyote_time.saturating_sub(1);
        }

        if jump_pressed {
            self.jump_input_buffer = JUMP_BUFFER_FRAMES;
        } else {
            self.jump_input_buffer = self.jump_input_buffer.saturating_sub(1);
        }
    }

    fn accelerate_horizontal(&mut self, input: Controls, on_ground: bool, velocity: &mut Vec2) {
        let t = &self.tuning;
        if input.left != input.right {
            if on_ground {
                self.facing_right = input.right;
            }
            let target = if input.left { -1.0 } else { 1.0 };
            let rate = if velocity.x == 0.0 || sign(velocity.x) == target {
                t.walk_acceleration
            } else if on_ground {
                t.brake_deceleration
            } else if self.wall_jumping {
                t.wall_jump_brake_deceleration
            } else {
                t.midair_brake_deceleration
            };
            let max_speed = if self.wall_jumping { t.wall_jump_h_speed } else { t.walk_speed };
            velocity.x = (velocity.x + rate * target).clamp(-max_speed, max_speed);
        } else if velocity.x != 0.0 {
            let deceleration = if self.wall_jumping {
                t.wall_jump_deceleration
            } else {
                t.walk_deceleration
            };
            velocity.x = if velocity.x > 0.0 {
                (velocity.x - deceleration).max(0.0)
            } else {
                (velocity.x + deceleration).min(0.0)
            };
        }
    }

    fn ground_jump_ready(&self, on_ground: bool) -> bool {
        (self.modifier(Modifier::Pogo) && on_ground)
            || (self.coyote_time > 0 && self.jump_input_buffer > 0)
    }

    fn apply_gravity(&self, body: &PhysicsBody, velocity: &mut Vec2) {
        let (acceleration, terminal) = if self.wall_sliding {
            (self.tuning.wall_slide_gravity, self.tuning.wall_slide_terminal_velocity)
        } else {
            (body.gravity, self.tuning.terminal_velocity)
        };
        velocity.y = if body.gravity < 0.0 {
            (velocity.y + acceleration.abs()).min(terminal)
        } else {
            (velocity.y - acceleration).max(-terminal)
        };
    }

    /// Launch vertically from an external source such as a spring.
    pub fn force_jump(&mut self, body: &mut PhysicsBody, velocity: &mut Vec2, y_speed: f32) {
        self.clear_jump_timers();
        self.wall_jumping = false;
        body.on_ground = false;
        velocity.y = y_speed;
    }

    /// Invert gravity from an external source such as a flipper.
    pub fn force_flip_gravity(&mut self, body: &mut PhysicsBody) {
        self.clear_jump_timers();
        self.wall_jumping = true;
        body.on_ground = false;
        body.flip_gravity();
    }

    fn clear_jump_timers(&mut self) {
        self.coyote_time = 0;
        self.wall_coyote_time = 0;
        self.jump_input_buffer = 0;
    }
}

fn play_jump_sound(frame: &mut FrameContext<'_>) {
    let pitch = frame.rng.range_f32(JUMP_PITCH.0, JUMP_PITCH.1);
    frame.audio.play_sound(JUMP_SOUND, SoundCategory::Gameplay, JUMP_VOLUME, pitch);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::tilemap::Tile;
    use crate::rng::Rng;
    use crate::services::audio::SoundQueue;
    use crate::services::settings::Settings;

    const EXTENTS: Vec2 = Vec2::new(5.0, 9.5);
    const FLOOR_Y: f32 = 12.0 + 9.5;
    const LEFT_WALL_X: f32 = 12.0 + 5.0;

    /// Floor along row 0 and a wall along column 0.
    fn room() -> TileMap {
        let mut map = TileMap::new(30, 30, 12.0);
        map.fill_rect(0, 0, 30, 1, Some(Tile::solid(0.0, 0.0)));
        map.fill_rect(0, 0, 1, 30, Some(Tile::solid(0.0, 0.0)));
        map
    }

    struct Rig {
        map: TileMap,
        audio: SoundQueue,
        rng: Rng,
        settings: Settings,
        spawns: Vec<Entity>,
        playable: Playable,
        body: PhysicsBody,
        pos: Vec2,
        velocity: Vec2,
    }

    impl Rig {
        fn new(modifiers: &[&str]) -> Self {
            let playable = Playable::new(ModifierSet::from_names(modifiers.iter().copied()));
            let body = playable.initial_body();
            Self {
                map: room(),
                audio: SoundQueue::new(),
                rng: Rng::new(9),
                settings: Settings::default(),
                spawns: Vec::new(),
                playable,
                body,
                pos: Vec2::new(180.0, 180.0),
                velocity: Vec2::ZERO,
            }
        }

        fn grounded(mut self) -> Self {
            self.pos.y = FLOOR_Y;
            self.body.on_ground = true;
            self
        }

        fn step(&mut self, controls: Controls) {
            let mut frame = FrameContext {
                map: &self.map,
                controls,
                audio: &mut self.audio,
                rng: &mut self.rng,
                settings: &self.settings,
                spawns: &mut self.spawns,
            };
            self.playable.update_early();
            self.playable.update_late(
                Motion {
                    pos: self.pos,
                    extents: EXTENTS,
                    velocity: &mut self.velocity,
                    body: &mut self.body,
                },
                &mut frame,
                1.0 / 60.0,
            );
        }
    }

    const NONE: Controls = Controls { left: false, right: false, jump: false };
    const JUMP: Controls = Controls { left: false, right: false, jump: true };
    const LEFT: Controls = Controls { left: true, right: false, jump: false };
    const RIGHT: Controls = Controls { left: false, right: true, jump: false };

    #[test]
    fn grounded_jump_launches() {
        let mut rig = Rig::new(&[]).grounded();
        rig.step(JUMP);
        assert!(!rig.body.on_ground);
        assert_eq!(rig.velocity.y, 4.5);
        assert_eq!(rig.playable.coyote_time, 0);
        assert_eq!(rig.playable.jump_input_buffer, 0);
        assert!(rig.playable.just_jumped);
        assert_eq!(rig.playable.action(), Action::Jump);

        let sounds: Vec<_> = rig.audio.iter().collect();
        assert_eq!(sounds.len(), 1);
        assert_eq!(sounds[0].path, JUMP_SOUND);
        assert_eq!(sounds[0].volume, 0.4);
        assert!((0.7..=1.3).contains(&sounds[0].pitch));
    }

    #[test]
    fn just_jumped_lasts_one_frame() {
        let mut rig = Rig::new(&[]).grounded();
        rig.step(JUMP);
        rig.step(NONE);
        assert!(!rig.playable.just_jumped);
    }

    #[test]
    fn landing_resets_coyote_and_wall_state() {
        let mut rig = Rig::new(&[]).grounded();
        rig.playable.coyote_time = 2;
        rig.playable.wall_jumping = true;
        rig.playable.wall_coyote_time = 5;
        rig.step(NONE);
        assert_eq!(rig.playable.coyote_time, 6);
        assert!(!rig.playable.wall_jumping);
        assert_eq!(rig.playable.wall_coyote_time, 0);
    }

    #[test]
    fn coyote_time_allows_late_jump() {
        let mut rig = Rig::new(&[]).grounded();
        rig.step(NONE);
        // Walked off the ledge.
        rig.body.on_ground = false;
        rig.pos.y = 100.0;
        for _ in 0..3 {
            rig.step(NONE);
        }
        assert_eq!(rig.playable.coyote_time, 3);
        rig.step(JUMP);
        assert_eq!(rig.velocity.y, 4.5);
    }

    #[test]
    fn coyote_time_expires() {
        let mut rig = Rig::new(&[]).grounded();
        rig.step(NONE);
        rig.body.on_ground = false;
        for _ in 0..6 {
            rig.step(NONE);
        }
        assert_eq!(rig.playable.coyote_time, 0);
        rig.velocity = Vec2::ZERO;
        rig.step(JUMP);
        assert!(rig.velocity.y < 0.0, "fell instead of jumping: {}", rig.velocity.y);
        assert_eq!(rig.playable.jump_input_buffer, 20);
    }

    #[test]
    fn buffered_press_fires_on_landing() {
        let mut rig = Rig::new(&[]);
        rig.step(JUMP);
        assert_eq!(rig.playable.jump_input_buffer, 20);
        for expected in (15..20).rev() {
            rig.step(NONE);
            assert_eq!(rig.playable.jump_input_buffer, expected);
        }
        rig.pos.y = FLOOR_Y;
        rig.body.on_ground = true;
        rig.step(NONE);
        assert_eq!(rig.velocity.y, 4.5);
        assert_eq!(rig.playable.jump_input_buffer, 0);
    }

    #[test]
    fn jump_buffer_only_rises_on_press() {
        let mut rig = Rig::new(&[]);
        rig.step(JUMP);
        let mut last = rig.playable.jump_input_buffer;
        for i in 0..30 {
            let press = i == 12;
            rig.step(if press { JUMP } else { NONE });
            let now = rig.playable.jump_input_buffer;
            if press {
                assert_eq!(now, 20);
            } else {
                assert!(now <= last);
            }
            last = now;
        }
    }

    fn against_left_wall(rig: &mut Rig) {
        rig.pos = Vec2::new(LEFT_WALL_X, 150.0);
        rig.body.on_ground = false;
        rig.velocity = Vec2::new(0.0, -1.0);
    }

    #[test]
    fn wall_contact_is_detected_per_side() {
        let mut rig = Rig::new(&[]);
        against_left_wall(&mut rig);
        rig.step(NONE);
        assert!(rig.playable.touching_wall_left);
        assert!(!rig.playable.touching_wall_right);
        assert_eq!(rig.playable.wall_coyote_time, 8);
        assert_eq!(rig.playable.last_wall_touch_direction, 1.0);
    }

    #[test]
    fn wall_jump_pushes_away_from_wall() {
        let mut rig = Rig::new(&[]);
        against_left_wall(&mut rig);
        rig.step(LEFT);
        assert_eq!(rig.playable.action(), Action::Slide);

        rig.playable.jump_input_buffer = 20;
        rig.step(LEFT);
        // Buffer decremented to 19 before the check.
        assert_eq!(rig.velocity, Vec2::new(2.5, 5.0));
        assert!(rig.playable.wall_jumping);
        assert!(!rig.playable.wall_sliding);
        assert_eq!(rig.playable.jump_input_buffer, 0);
        assert_eq!(rig.playable.wall_coyote_time, 0);
        assert!(rig.playable.facing_right());
        assert_eq!(rig.audio.len(), 1);
    }

    #[test]
    fn stale_press_does_not_wall_jump() {
        let mut rig = Rig::new(&[]);
        against_left_wall(&mut rig);
        rig.playable.jump_input_buffer = 11;
        rig.step(LEFT);
        assert_eq!(rig.playable.jump_input_buffer, 10);
        assert!(!rig.playable.wall_jumping);
        // Fell through to wall-slide gravity.
        assert!((rig.velocity.y - (-1.02)).abs() < 1e-6);
        assert!(rig.audio.is_empty());
    }

    #[test]
    fn ground_jump_preempts_wall_jump() {
        let mut rig = Rig::new(&[]);
        against_left_wall(&mut rig);
        rig.playable.coyote_time = 3;
        rig.step(JUMP);
        assert_eq!(rig.velocity.y, 4.5);
        assert!(!rig.playable.wall_jumping);
        assert!(rig.playable.just_jumped);
        assert_eq!(rig.audio.len(), 1);
    }

    #[test]
    fn wall_slide_caps_fall_speed() {
        let mut rig = Rig::new(&[]);
        against_left_wall(&mut rig);
        rig.velocity.y = -4.0;
        rig.step(LEFT);
        assert_eq!(rig.velocity.y, -1.5);
        assert_eq!(rig.playable.action(), Action::Slide);
    }

    #[test]
    fn no_slide_while_rising_or_not_pressing() {
        let mut rig = Rig::new(&[]);
        against_left_wall(&mut rig);
        rig.step(NONE);
        assert!(!rig.playable.wall_sliding);

        against_left_wall(&mut rig);
        rig.velocity.y = 2.0;
        rig.step(LEFT);
        assert!(!rig.playable.wall_sliding);
        assert_eq!(rig.playable.action(), Action::Jump);
    }

    #[test]
    fn walking_accelerates_and_caps() {
        let mut rig = Rig::new(&[]).grounded();
        rig.step(RIGHT);
        assert!((rig.velocity.x - 0.2).abs() < 1e-6);
        assert_eq!(rig.playable.action(), Action::Walk);
        for _ in 0..30 {
            rig.step(RIGHT);
        }
        assert_eq!(rig.velocity.x, 3.0);
    }

    #[test]
    fn ground_braking_uses_brake_rate() {
        let mut rig = Rig::new(&[]).grounded();
        rig.velocity.x = 2.0;
        rig.step(LEFT);
        assert!((rig.velocity.x - 1.4).abs() < 1e-6);
        assert!(!rig.playable.facing_right());
    }

    #[test]
    fn midair_braking_uses_midair_rate() {
        let mut rig = Rig::new(&[]);
        rig.velocity.x = 2.0;
        rig.step(LEFT);
        assert!((rig.velocity.x - 1.0).abs() < 1e-6);
        // Airborne facing follows velocity, not input.
        assert!(rig.playable.facing_right());
    }

    #[test]
    fn wall_jump_braking_and_speed_cap() {
        let mut rig = Rig::new(&[]);
        rig.playable.wall_jumping = true;
        rig.velocity.x = 2.5;
        rig.step(LEFT);
        assert!((rig.velocity.x - 2.45).abs() < 1e-6);

        rig.velocity.x = 2.4;
        rig.step(RIGHT);
        assert_eq!(rig.velocity.x, 2.5);
    }

    #[test]
    fn deceleration_stops_at_zero() {
        let mut rig = Rig::new(&[]).grounded();
        rig.velocity.x = 0.3;
        rig.step(NONE);
        assert_eq!(rig.velocity.x, 0.0);
        assert_eq!(rig.playable.action(), Action::Idle);

        rig.velocity.x = -0.1;
        rig.step(NONE);
        assert_eq!(rig.velocity.x, 0.0);

        // Both held behaves like neither.
        rig.velocity.x = 1.0;
        rig.step(Controls { left: true, right: true, jump: false });
        assert!((rig.velocity.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn gravity_reaches_terminal_velocity() {
        let mut rig = Rig::new(&[]);
        rig.velocity.y = -4.9;
        rig.step(NONE);
        assert_eq!(rig.velocity.y, -5.0);
        rig.step(NONE);
        assert_eq!(rig.velocity.y, -5.0);
    }

    #[test]
    fn inverted_gravity_jumps_down() {
        let mut rig = Rig::new(&["inv_gravity"]).grounded();
        assert_eq!(rig.body.gravity, -0.2);
        rig.step(JUMP);
        assert_eq!(rig.velocity.y, -4.5);

        rig.step(NONE);
        assert!((rig.velocity.y - (-4.3)).abs() < 1e-6);
    }

    #[test]
    fn jump_inv_gravity_flips_instead_of_launching() {
        let mut rig = Rig::new(&["jump_inv_gravity"]).grounded();
        rig.step(JUMP);
        assert_eq!(rig.body.gravity, -0.2);
        assert_eq!(rig.velocity.y, 0.0);
        assert!(!rig.body.on_ground);
    }

    #[test]
    fn jump_inv_gravity_wall_jump_keeps_vertical_speed() {
        let mut rig = Rig::new(&["jump_inv_gravity"]);
        against_left_wall(&mut rig);
        rig.step(Controls { left: true, right: false, jump: true });
        assert_eq!(rig.body.gravity, -0.2);
        assert_eq!(rig.velocity, Vec2::new(2.5, -1.0));
    }

    #[test]
    fn pogo_jumps_without_input() {
        let mut rig = Rig::new(&["pogo"]).grounded();
        rig.step(NONE);
        assert_eq!(rig.velocity.y, 4.5);
        assert!(rig.playable.just_jumped);
    }

    #[test]
    fn inverted_controls_swap_directions() {
        let mut rig = Rig::new(&["inv_controls"]).grounded();
        rig.step(LEFT);
        assert!(rig.velocity.x > 0.0);
        assert!(rig.playable.facing_right());
    }

    #[test]
    fn only_jump_move_blocks_ground_steering() {
        let mut rig = Rig::new(&["only_jump_move"]).grounded();
        rig.step(RIGHT);
        assert_eq!(rig.velocity.x, 0.0);

        let mut rig = Rig::new(&["only_jump_move"]);
        rig.step(RIGHT);
        assert!(rig.velocity.x > 0.0);
    }

    #[test]
    fn force_jump_resets_timers() {
        let mut rig = Rig::new(&[]).grounded();
        rig.step(NONE);
        rig.playable.jump_input_buffer = 7;
        rig.playable.wall_jumping = true;
        let Rig { playable, body, velocity, .. } = &mut rig;
        playable.force_jump(body, velocity, 7.0);
        assert_eq!(rig.velocity.y, 7.0);
        assert!(!rig.body.on_ground);
        assert!(!rig.playable.wall_jumping);
        assert_eq!(rig.playable.coyote_time, 0);
        assert_eq!(rig.playable.jump_input_buffer, 0);
        assert_eq!(rig.playable.wall_coyote_time, 0);
    }

    #[test]
    fn force_flip_gravity_inverts() {
        let mut rig = Rig::new(&[]).grounded();
        rig.step(NONE);
        let Rig { playable, body, .. } = &mut rig;
        playable.force_flip_gravity(body);
        assert_eq!(rig.body.gravity, -0.2);
        assert!(rig.playable.wall_jumping);
        assert_eq!(rig.playable.coyote_time, 0);
        assert!(!rig.body.on_ground);
    }

    #[test]
    fn kill_is_sticky() {
        let mut rig = Rig::new(&[]);
        rig.playable.kill();
        rig.step(NONE);
        assert!(rig.playable.is_dead());
    }

    #[test]
    fn classification_is_total() {
        for on_ground in [false, true] {
            for vx in [-1.0, 0.0, 1.0] {
                for sliding in [false, true] {
                    let a = Action::classify(on_ground, Vec2::new(vx, 0.0), sliding);
                    let expected = if sliding {
                        Action::Slide
                    } else if !on_ground {
                        Action::Jump
                    } else if vx != 0.0 {
                        Action::Walk
                    } else {
                        Action::Idle
                    };
                    assert_eq!(a, expected);
                }
            }
        }
    }

    #[test]
    fn frames_and_time_accumulate() {
        let mut rig = Rig::new(&[]);
        rig.step(NONE);
        rig.step(NONE);
        assert_eq!(rig.playable.frames_alive(), 2);
        assert!((rig.playable.time_alive() - 2.0 / 60.0).abs() < 1e-6);
    }
}
