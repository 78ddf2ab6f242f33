pub mod modifiers;
pub mod playable;
pub mod tuning;
