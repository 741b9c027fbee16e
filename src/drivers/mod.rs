// Emulated display hardware: frame buffer surface and its write window.

pub mod framebuffer;
pub mod window;

pub use framebuffer::{DisplaySurface, Presenter};
pub use window::PixelWindow;
