//! Fire-and-forget sound requests.

use serde::{Deserialize, Serialize};

/// Mixer channel a sound plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCategory {
    Gameplay,
    Music,
    Interface,
}

/// A request to play a sound, recorded by [`SoundQueue`].
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    pub path: String,
    pub category: SoundCategory,
    pub volume: f32,
    pub pitch: f32,
}

/// Where gameplay code sends sounds. Nothing is returned to the caller.
pub trait AudioSink {
    fn play_sound(&mut self, path: &str, category: SoundCategory, volume: f32, pitch: f32);
}

/// Collects sound requests for one frame; the host drains them.
#[derive(Debug, Default)]
pub struct SoundQueue {
    requests: Vec<SoundRequest>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundRequest> {
        self.requests.iter()
    }

    pub fn drain(&mut self) -> Vec<SoundRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl AudioSink for SoundQueue {
    fn play_sound(&mut self, path: &str, category: SoundCategory, volume: f32, pitch: f32) {
        self.requests.push(SoundRequest {
            path: path.to_string(),
            category,
            volume,
            pitch,
        });
    }
}
