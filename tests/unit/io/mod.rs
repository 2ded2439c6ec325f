pub mod configuration;
pub mod debug;
pub mod error;
pub mod image;
pub mod progress;
