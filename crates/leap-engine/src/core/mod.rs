pub mod frame;
pub mod physics;
pub mod time;
pub mod world;
