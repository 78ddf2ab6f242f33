use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::components::animation::AnimationSet;

/// Asset manifest describing the sprites, animations and sounds a game uses.
/// Loaded from a JSON file at runtime; keys are the asset paths entities
/// load and unload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Static sprites: texture path → atlas cell.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    /// Animation sets: animation path → named clips.
    #[serde(default)]
    pub animations: HashMap<String, AnimationSet>,
    /// Sounds: sound path → host event id.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a static sprite within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index of the atlas.
    #[serde(default = "default_sprite_atlas")]
    pub atlas: u32,
    /// Column in the atlas grid.
    pub col: u32,
    /// Row in the atlas grid.
    pub row: u32,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Numeric event ID the host plays for this sound.
    pub event_id: u32,
}

fn default_sprite_atlas() -> u32 {
    1
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
