//! Animation clips for sprite frame sequences.
//!
//! Entities keep only the name of the playing clip and the time spent in it;
//! the clips themselves are shared, read-only data fetched from the asset
//! registry by path.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single animation sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Frame cells as (col, row) pairs in the sprite atlas.
    pub frames: Vec<(f32, f32)>,
    /// Seconds per frame.
    pub frame_duration: f32,
    /// Whether to loop when reaching the end.
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_looping() -> bool {
    true
}

impl AnimationClip {
    /// Horizontal strip animation (consecutive columns, same row).
    pub fn horizontal_strip(row: f32, start_col: f32, frame_count: u32, fps: f32) -> Self {
        let frames = (0..frame_count)
            .map(|i| (start_col + i as f32, row))
            .collect();
        Self {
            frames,
            frame_duration: 1.0 / fps,
            looping: true,
        }
    }

    pub fn no_repeat(mut self) -> Self {
        self.looping = false;
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn total_duration(&self) -> f32 {
        self.frame_duration * self.frames.len() as f32
    }

    /// Frame cell shown `time` seconds into the clip. Non-looping clips hold
    /// their last frame.
    pub fn key_frame(&self, time: f32) -> Option<(f32, f32)> {
        if self.frames.is_empty() {
            return None;
        }
        let step = if self.frame_duration > 0.0 {
            (time.max(0.0) / self.frame_duration) as usize
        } else {
            0
        };
        let index = if self.looping {
            step % self.frames.len()
        } else {
            step.min(self.frames.len() - 1)
        };
        self.frames.get(index).copied()
    }
}

/// Named clips for one entity type, e.g. "idle", "walk", "jump_nr", "slide".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationSet {
    clips: HashMap<String, AnimationClip>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip(mut self, name: impl Into<String>, clip: AnimationClip) -> Self {
        self.clips.insert(name.into(), clip);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    /// Frame of clip `name` at `time`.
    pub fn key_frame(&self, name: &str, time: f32) -> Option<(f32, f32)> {
        self.get(name).and_then(|clip| clip.key_frame(time))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
