pub mod audio;
pub mod settings;
