//! Static overlap volumes that act on playables.

use serde::{Deserialize, Serialize};
use crate::api::types::EntityId;

/// What happens to a playable overlapping a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TriggerEffect {
    /// Kills the playable. Applies on every overlapping frame.
    Kill,
    /// Launches away from gravity at `speed`.
    Launch { speed: f32 },
    /// Inverts the playable's gravity.
    FlipGravity,
    /// Marks the stage as cleared.
    Goal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub effect: TriggerEffect,
    /// Sprite drawn for the trigger, if any.
    pub sprite: Option<String>,
    occupants: Vec<EntityId>,
}

impl Trigger {
    pub fn new(effect: TriggerEffect) -> Self {
        Self { effect, sprite: None, occupants: Vec::new() }
    }

    pub fn with_sprite(mut self, path: impl Into<String>) -> Self {
        self.sprite = Some(path.into());
        self
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Record whether `id` overlaps this frame. Returns true when the effect
    /// should fire: on entry, or on every overlap for `Kill`.
    pub fn observe(&mut self, id: EntityId, overlapping: bool) -> bool {
        let was_inside = self.occupants.contains(&id);
        if overlapping && !was_inside {
            self.occupants.push(id);
        } else if !overlapping && was_inside {
            self.occupants.retain(|&o| o != id);
        }
        overlapping && (!was_inside || self.effect == TriggerEffect::Kill)
    }
}
