//! Held-key tracking and the platformer control mapping.

use std::collections::HashSet;
use crate::input::queue::{InputEvent, InputQueue};

/// DOM key codes for the default bindings.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const W: u32 = 87;
}

/// One frame of platformer input, before any modifier remapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    /// True only on the frame the jump key went down.
    pub jump: bool,
}

/// Keys currently held, plus keys that went down since the last fixed step.
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<u32>,
    just_pressed: HashSet<u32>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold this frame's key events into the state. Auto-repeat key-downs
    /// for a key that is already held do not count as fresh presses.
    pub fn apply(&mut self, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::KeyDown { key_code } => {
                    if self.held.insert(key_code) {
                        self.just_pressed.insert(key_code);
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    self.held.remove(&key_code);
                }
                InputEvent::Custom { .. } => {}
            }
        }
    }

    /// Forget fresh presses once a fixed step has consumed them.
    pub fn end_step(&mut self) {
        self.just_pressed.clear();
    }

    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    pub fn is_just_pressed(&self, key_code: u32) -> bool {
        self.just_pressed.contains(&key_code)
    }

    /// Default bindings: A/Left, D/Right, Space/W/Up.
    pub fn controls(&self) -> Controls {
        Controls {
            left: self.is_held(keys::A) || self.is_held(keys::LEFT),
            right: self.is_held(keys::D) || self.is_held(keys::RIGHT),
            jump: self.is_just_pressed(keys::SPACE)
                || self.is_just_pressed(keys::W)
                || self.is_just_pressed(keys::UP),
        }
    }
}
