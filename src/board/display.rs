//! Emulated panel description.
//!
//! The frame buffer always covers the full panel extent; the panel model
//! only changes how committed colours are stored.

/// Panel width in pixels.
pub const WIDTH: u16 = 320;
/// Panel height in pixels.
pub const HEIGHT: u16 = 240;

/// Default row stride of the frame buffer, in pixels.
pub const DEFAULT_PITCH: usize = WIDTH as usize;

// R/G/B top bits; any of them set maps to white on monochrome panels
const MONO_THRESHOLD_MASK: u16 = 0x8410;

/// Which device panel is being emulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Model {
    /// RGB565 colour panel; colours are stored as-is.
    #[default]
    T,
    /// Monochrome panel; colours collapse to black or white.
    One,
}

impl Model {
    /// Map a committed RGB565 colour to what the panel can show.
    #[inline]
    pub const fn quantize(self, color: u16) -> u16 {
        match self {
            Model::T => color,
            Model::One => {
                if color & MONO_THRESHOLD_MASK != 0 {
                    0xFFFF
                } else {
                    0x0000
                }
            }
        }
    }
}

/// Frame buffer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    pub model: Model,
    /// Row stride in pixels; values below [`WIDTH`] are raised to it.
    pub pitch: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            model: Model::T,
            pitch: DEFAULT_PITCH,
        }
    }
}

impl DisplayConfig {
    pub const fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub const fn with_pitch(mut self, pitch: usize) -> Self {
        self.pitch = pitch;
        self
    }
}
