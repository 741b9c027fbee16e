// Emulated device display: RGB565 frame buffer plus the TOIF image/icon
// pipeline that draws into it.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod board;
pub mod drivers;
pub mod render;
pub mod ui;

pub use board::{DisplayConfig, HEIGHT, Model, WIDTH};
pub use drivers::{DisplaySurface, PixelWindow, Presenter};
pub use render::{ColorTable, RenderReport, draw_toif, render_icon, render_image};
pub use ui::{ClipRect, clip};
