//! Movement constants, derived once from a playable's modifiers.

use serde::{Deserialize, Serialize};
use crate::core::physics::DEFAULT_GRAVITY;
use crate::movement::modifiers::{Modifier, ModifierSet};

/// Frames a jump stays available after walking off a ledge.
pub const COYOTE_FRAMES: u32 = 6;
/// Frames a wall-jump stays available after letting go of a wall.
pub const WALL_COYOTE_FRAMES: u32 = 8;
/// Frames a jump press is remembered.
pub const JUMP_BUFFER_FRAMES: u32 = 20;
/// A wall-jump needs a press fresher than this many remaining buffer frames.
pub const WALL_JUMP_MIN_BUFFER: u32 = 10;
/// How far beyond the body's sides walls are probed.
pub const WALL_PROBE_DISTANCE: f32 = 0.0625;

/// Per-frame movement constants. All speeds are world units per frame,
/// accelerations world units per frame squared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementTuning {
    /// Initial signed gravity.
    pub gravity: f32,
    pub walk_acceleration: f32,
    pub walk_deceleration: f32,
    pub wall_jump_deceleration: f32,
    pub brake_deceleration: f32,
    pub midair_brake_deceleration: f32,
    pub wall_jump_brake_deceleration: f32,
    pub walk_speed: f32,
    pub jump_speed: f32,
    pub wall_jump_h_speed: f32,
    pub wall_jump_v_speed: f32,
    pub wall_slide_gravity: f32,
    pub terminal_velocity: f32,
    pub wall_slide_terminal_velocity: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            walk_acceleration: 0.2,
            walk_deceleration: 0.4,
            wall_jump_deceleration: 0.01,
            brake_deceleration: 0.6,
            midair_brake_deceleration: 1.0,
            wall_jump_brake_deceleration: 0.05,
            walk_speed: 3.0,
            jump_speed: 4.5,
            wall_jump_h_speed: 2.5,
            wall_jump_v_speed: 5.0,
            wall_slide_gravity: 0.02,
            terminal_velocity: 5.0,
            wall_slide_terminal_velocity: 1.5,
        }
    }
}

impl MovementTuning {
    /// Defaults with every constant-changing modifier applied, in a fixed
    /// order (ice overrides hyperspeed's acceleration).
    pub fn for_modifiers(modifiers: &ModifierSet) -> Self {
        let mut t = Self::default();

        if modifiers.contains(Modifier::InvGravity) {
            t.gravity = -DEFAULT_GRAVITY;
        }

        if modifiers.contains(Modifier::Hyperspeed) {
            t.walk_speed = 5.0;
            t.wall_jump_v_speed = 4.5;
            t.walk_acceleration = 0.4;
        }

        if modifiers.contains(Modifier::IcePhysics) {
            t.walk_acceleration = 0.075;
            t.walk_deceleration = 0.05;
            t.brake_deceleration = 0.075;
            t.midair_brake_deceleration = 0.1;
        }

        t
    }
}
