use std::collections::HashMap;
use crate::api::types::SoundEvent;
use crate::assets::manifest::{AssetManifest, SpriteDescriptor};
use crate::components::animation::AnimationSet;

/// Reference-counted asset access by path.
///
/// Entities call `load` once when they enter the world and `unload` once
/// when they leave it.
pub trait AssetStore {
    fn load(&mut self, path: &str);
    fn unload(&mut self, path: &str);
    fn ref_count(&self, path: &str) -> u32;
}

/// Registry of the assets described by an [`AssetManifest`], plus live
/// reference counts for every path currently in use.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    refs: HashMap<String, u32>,
    sprites: HashMap<String, SpriteDescriptor>,
    animations: HashMap<String, AnimationSet>,
    sounds: HashMap<String, SoundEvent>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed manifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let sounds = manifest
            .sounds
            .iter()
            .map(|(path, desc)| (path.clone(), SoundEvent(desc.event_id)))
            .collect();
        Self {
            refs: HashMap::new(),
            sprites: manifest.sprites.clone(),
            animations: manifest.animations.clone(),
            sounds,
        }
    }

    /// Replace the manifest data, keeping live reference counts.
    pub fn apply_manifest(&mut self, manifest: &AssetManifest) {
        let refs = std::mem::take(&mut self.refs);
        *self = Self::from_manifest(manifest);
        self.refs = refs;
    }

    /// Animation set registered under `path`.
    pub fn fetch_animation(&self, path: &str) -> Option<&AnimationSet> {
        self.animations.get(path)
    }

    /// Static sprite registered under `path`.
    pub fn sprite(&self, path: &str) -> Option<&SpriteDescriptor> {
        self.sprites.get(path)
    }

    /// Host event id for a sound path.
    pub fn sound_event(&self, path: &str) -> Option<SoundEvent> {
        self.sounds.get(path).copied()
    }

    /// Number of distinct paths currently loaded.
    pub fn loaded_count(&self) -> usize {
        self.refs.len()
    }
}

impl AssetStore for AssetRegistry {
    fn load(&mut self, path: &str) {
        *self.refs.entry(path.to_string()).or_insert(0) += 1;
    }

    fn unload(&mut self, path: &str) {
        match self.refs.get_mut(path) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.refs.remove(path);
                log::debug!("asset {} evicted", path);
            }
            None => log::warn!("unload of asset {} that was never loaded", path),
        }
    }

    fn ref_count(&self, path: &str) -> u32 {
        self.refs.get(path).copied().unwrap_or(0)
    }
}
