//! TOIF rendering into a [`DisplaySurface`].
//!
//! - [`render_image`]: full-colour RGB565 payloads
//! - [`render_icon`]: 4-bit payloads blended between two colours
//! - [`draw_toif`]: validate a complete blob and dispatch on its format
//!
//! Decode failures never surface from these calls: drawing stops where the
//! stream breaks and whatever was already committed stays on the surface.

pub mod color;
mod icon;
mod image;

pub use color::{BLACK, BLUE, ColorTable, GREEN, RED, WHITE, interpolate, rgb565};
pub use icon::render_icon;
pub use image::render_image;

use toif::{FormatError, ToifFormat, validate_header};

use crate::drivers::DisplaySurface;

/// Per-call counters.
///
/// `units_decoded` follows the decoder through the full raster;
/// `pixels_committed` counts only what was handed to the pixel window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub units_decoded: u32,
    pub pixels_committed: u32,
}

/// Validate `data` as a TOIF blob and draw it at `(x, y)`.
///
/// Colour images ignore `fg`/`bg`. Only header problems are reported.
pub fn draw_toif(
    surface: &mut DisplaySurface,
    x: i32,
    y: i32,
    data: &[u8],
    fg: u16,
    bg: u16,
) -> Result<RenderReport, FormatError> {
    let header = validate_header(data)?;
    let payload = header.payload(data);

    Ok(match header.format {
        ToifFormat::Color => render_image(surface, x, y, header.width, header.height, payload),
        ToifFormat::Grayscale => {
            render_icon(surface, x, y, header.width, header.height, payload, fg, bg)
        }
    })
}
