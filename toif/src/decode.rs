// Whole-image TOIF decode.
// Inflates the complete payload into a pixel vector; used by tooling and
// tests. The display path streams through InflateSession instead.

use alloc::vec::Vec;
use core::fmt;

use crate::header::{FormatError, ToifFormat, ToifHeader, validate_header};
use crate::inflate::{InflateSession, Step};

/// Largest image we are willing to allocate for (memory guard).
pub const MAX_PIXELS: u32 = 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    Format(FormatError),
    TooLarge(u32),
    /// The DEFLATE stream is malformed.
    Corrupt { decoded: u32 },
    /// The stream ended before every pixel was produced.
    Truncated { decoded: u32, expected: u32 },
}

impl From<FormatError> for DecodeError {
    fn from(e: FormatError) -> Self {
        DecodeError::Format(e)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Format(e) => fmt::Display::fmt(e, f),
            DecodeError::TooLarge(n) => write!(f, "toif: {} pixels exceeds decode limit", n),
            DecodeError::Corrupt { decoded } => {
                write!(f, "toif: corrupt stream after {} units", decoded)
            }
            DecodeError::Truncated { decoded, expected } => {
                write!(f, "toif: stream ended after {} of {} units", decoded, expected)
            }
        }
    }
}

impl core::error::Error for DecodeError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pixels {
    /// One RGB565 value per pixel, row-major.
    Rgb565(Vec<u16>),
    /// One 4-bit level (0..=15) per pixel, row-major.
    Gray4(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub header: ToifHeader,
    pub pixels: Pixels,
}

impl DecodedImage {
    #[inline]
    pub fn width(&self) -> u16 {
        self.header.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.header.height
    }
}

/// Validate and fully decode a TOIF blob.
pub fn decode(data: &[u8]) -> Result<DecodedImage, DecodeError> {
    let header = validate_header(data)?;
    let count = header.pixel_count();
    if count > MAX_PIXELS {
        return Err(DecodeError::TooLarge(count));
    }

    let payload = header.payload(data);
    log::debug!(
        "toif: decode {}x{} {:?}, {} byte payload",
        header.width,
        header.height,
        header.format,
        payload.len()
    );

    let pixels = match header.format {
        ToifFormat::Color => Pixels::Rgb565(decode_rgb565(payload, count)?),
        ToifFormat::Grayscale => Pixels::Gray4(decode_gray4(payload, count)?),
    };

    Ok(DecodedImage { header, pixels })
}

fn decode_rgb565(payload: &[u8], count: u32) -> Result<Vec<u16>, DecodeError> {
    let mut session = InflateSession::<2>::new(payload);
    let mut out = Vec::with_capacity(count as usize);
    while (out.len() as u32) < count {
        match session.next_unit() {
            Step::Unit(be) => out.push(u16::from_be_bytes(be)),
            step => return Err(stopped(step, session.units_decoded(), count)),
        }
    }
    Ok(out)
}

fn decode_gray4(payload: &[u8], count: u32) -> Result<Vec<u8>, DecodeError> {
    let units = count / 2;
    let mut session = InflateSession::<1>::new(payload);
    // odd pixel counts leave the final pixel at level 0
    let mut out = alloc::vec![0u8; count as usize];
    for pair in out.chunks_exact_mut(2) {
        match session.next_unit() {
            Step::Unit([b]) => {
                pair[0] = b >> 4;
                pair[1] = b & 0x0F;
            }
            step => return Err(stopped(step, session.units_decoded(), units)),
        }
    }
    Ok(out)
}

fn stopped<const N: usize>(step: Step<N>, decoded: u32, expected: u32) -> DecodeError {
    match step {
        Step::Error => DecodeError::Corrupt { decoded },
        _ => DecodeError::Truncated { decoded, expected },
    }
}
