// Emulated board: panel extent, pitch and model.

pub mod display;

pub use display::{DEFAULT_PITCH, DisplayConfig, HEIGHT, Model, WIDTH};
