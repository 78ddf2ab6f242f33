pub mod particle;
pub mod player;
pub mod trigger;
