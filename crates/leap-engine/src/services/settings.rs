//! User-facing boolean feature flags.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cosmetic particle effects.
pub const PARTICLES: &str = "particles";

/// Boolean settings read by gameplay code. Missing flags read as `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    flags: HashMap<String, bool>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut flags = HashMap::new();
        flags.insert(PARTICLES.to_string(), true);
        Self { flags }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the flags in `json` (an object of booleans).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: HashMap<String, bool> = serde_json::from_str(json)?;
        let mut settings = Self::default();
        settings.flags.extend(overrides);
        Ok(settings)
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set_bool(name, value);
        self
    }
}
