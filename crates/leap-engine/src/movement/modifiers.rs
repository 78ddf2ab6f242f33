//! Gameplay modifiers selected per playable.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named flag that changes movement constants or behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Start with gravity pulling up.
    InvGravity,
    /// Faster walking and acceleration.
    Hyperspeed,
    /// Low-friction acceleration and braking.
    IcePhysics,
    /// No horizontal control while grounded.
    OnlyJumpMove,
    /// Left and right are swapped.
    InvControls,
    /// Jump automatically whenever grounded.
    Pogo,
    /// Jumping flips gravity instead of launching.
    JumpInvGravity,
    /// The sprite pulses in and out of view.
    Fade,
}

impl Modifier {
    pub const ALL: [Modifier; 8] = [
        Self::InvGravity, Self::Hyperspeed, Self::IcePhysics, Self::OnlyJumpMove,
        Self::InvControls, Self::Pogo, Self::JumpInvGravity, Self::Fade,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::InvGravity => "inv_gravity",
            Self::Hyperspeed => "hyperspeed",
            Self::IcePhysics => "ice_physics",
            Self::OnlyJumpMove => "only_jump_move",
            Self::InvControls => "inv_controls",
            Self::Pogo => "pogo",
            Self::JumpInvGravity => "jump_inv_gravity",
            Self::Fade => "fade",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// The modifiers a playable was created with. Fixed for its lifetime.
///
/// Built from names; unrecognised names are dropped and have no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ModifierSet {
    active: HashSet<Modifier>,
}

impl ModifierSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut active = HashSet::new();
        for name in names {
            let name = name.as_ref();
            match Modifier::from_name(name) {
                Some(m) => {
                    active.insert(m);
                }
                None => log::debug!("ignoring unknown modifier {:?}", name),
            }
        }
        Self { active }
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.active.contains(&modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.active.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
        Self { active: iter.into_iter().collect() }
    }
}

impl From<Vec<String>> for ModifierSet {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<ModifierSet> for Vec<String> {
    fn from(set: ModifierSet) -> Self {
        let mut names: Vec<String> = set.iter().map(|m| m.name().to_string()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_serde() {
        for m in Modifier::ALL {
            let json = serde_json::to_string(&m).unwrap();
            assert_eq!(json, format!("\"{}\"", m.name()));
        }
    }

    #[test]
    fn unknown_names_are_inert() {
        let set = ModifierSet::from_names(["pogo", "moon_boots", ""]);
        assert_eq!(set.len(), 1);
        assert!(set.contains(Modifier::Pogo));
    }

    #[test]
    fn deserializes_from_name_list() {
        let set: ModifierSet = serde_json::from_str(r#"["ice_physics", "fade", "nope"]"#).unwrap();
        assert!(set.contains(Modifier::IcePhysics));
        assert!(set.contains(Modifier::Fade));
        assert_eq!(set.len(), 2);
        let back = serde_json::to_string(&set).unwrap();
        assert_eq!(back, r#"["fade","ice_physics"]"#);
    }
}
