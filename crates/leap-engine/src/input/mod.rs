pub mod keyboard;
pub mod queue;
