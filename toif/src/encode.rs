// TOIF encoder.
//
// Pixels are packed into the TOIF raw layout (big-endian RGB565, or two
// 4-bit levels per byte) and compressed as raw DEFLATE. The compressor has
// no window-size knob, so input is fed in WINDOW_SIZE chunks with a full
// flush between them: a full flush resets the match dictionary, which
// keeps every back-reference inside the 1 KB window the decoder uses.

use alloc::vec::Vec;
use core::fmt;

use miniz_oxide::deflate::core::{
    CompressorOxide, TDEFLFlush, TDEFLStatus, compress, create_comp_flags_from_zip_params,
};

use crate::header::{HEADER_LEN, ToifFormat, ToifHeader};
use crate::inflate::{WINDOW_BITS, WINDOW_SIZE};

const LEVEL: i32 = 9;
// headroom for block headers and flush markers per chunk
const SLACK: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// Pixel slice length does not match `width * height`.
    DimensionMismatch { expected: usize, actual: usize },
    /// Greyscale rows pack two pixels per byte, so width must be even.
    OddWidth(u16),
    TooLarge(usize),
    Deflate,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::DimensionMismatch { expected, actual } => {
                write!(f, "toif: expected {} pixels, got {}", expected, actual)
            }
            EncodeError::OddWidth(w) => write!(f, "toif: greyscale width {} is odd", w),
            EncodeError::TooLarge(n) => write!(f, "toif: {} byte payload does not fit", n),
            EncodeError::Deflate => f.write_str("toif: deflate failed"),
        }
    }
}

impl core::error::Error for EncodeError {}

/// Encode RGB565 pixels (row-major) as a full-colour TOIF blob.
pub fn encode_rgb565(width: u16, height: u16, pixels: &[u16]) -> Result<Vec<u8>, EncodeError> {
    check_len(width, height, pixels.len())?;
    let raw: Vec<u8> = pixels.iter().flat_map(|p| p.to_be_bytes()).collect();
    assemble(ToifFormat::Color, width, height, &raw)
}

/// Encode 8-bit grey levels (row-major) as a greyscale TOIF blob.
///
/// Levels are quantised to their high nibble; the left pixel of each pair
/// lands in the high nibble of the packed byte.
pub fn encode_grayscale(width: u16, height: u16, levels: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if width % 2 != 0 {
        return Err(EncodeError::OddWidth(width));
    }
    check_len(width, height, levels.len())?;
    let raw: Vec<u8> = levels
        .chunks_exact(2)
        .map(|pair| (pair[0] & 0xF0) | (pair[1] >> 4))
        .collect();
    assemble(ToifFormat::Grayscale, width, height, &raw)
}

fn check_len(width: u16, height: u16, actual: usize) -> Result<(), EncodeError> {
    let expected = usize::from(width) * usize::from(height);
    if expected != actual {
        return Err(EncodeError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

fn assemble(format: ToifFormat, width: u16, height: u16, raw: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let payload = deflate_windowed(raw)?;
    let payload_len = u32::try_from(payload.len()).map_err(|_| EncodeError::TooLarge(payload.len()))?;

    let header = ToifHeader {
        format,
        width,
        height,
        payload_len,
    };

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&payload);

    log::debug!(
        "toif: encoded {}x{} {:?}: {} -> {} bytes",
        width,
        height,
        format,
        raw.len(),
        payload.len()
    );
    Ok(out)
}

fn deflate_windowed(raw: &[u8]) -> Result<Vec<u8>, EncodeError> {
    // negative window bits = raw stream, no zlib header
    let flags = create_comp_flags_from_zip_params(LEVEL, -(WINDOW_BITS as i32), 0);
    let mut comp = CompressorOxide::new(flags);
    let mut out = Vec::new();

    // at least one (possibly empty) chunk so the stream gets a final block
    let chunk_count = raw.len().div_ceil(WINDOW_SIZE).max(1);
    for i in 0..chunk_count {
        let start = (i * WINDOW_SIZE).min(raw.len());
        let end = (start + WINDOW_SIZE).min(raw.len());
        let flush = if i + 1 == chunk_count {
            TDEFLFlush::Finish
        } else {
            TDEFLFlush::Full
        };

        let mut input = &raw[start..end];
        loop {
            let base = out.len();
            let space = input.len() + SLACK;
            out.resize(base + space, 0);
            let (status, used, written) = compress(&mut comp, input, &mut out[base..], flush);
            out.truncate(base + written);
            input = &input[used..];

            match status {
                TDEFLStatus::Done => break,
                // output not filled to the brim: the flush completed
                TDEFLStatus::Okay if input.is_empty() && written < space => break,
                TDEFLStatus::Okay => {}
                _ => return Err(EncodeError::Deflate),
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{Pixels, decode};
    use crate::header::validate_header;

    #[test]
    fn rgb565_survives_decode() {
        let pixels = [0xF800, 0x07E0, 0x001F, 0xFFFF, 0x0000, 0x8410];
        let blob = encode_rgb565(3, 2, &pixels).unwrap();
        let hdr = validate_header(&blob).unwrap();
        assert_eq!(hdr.format, ToifFormat::Color);
        assert_eq!((hdr.width, hdr.height), (3, 2));
        assert_eq!(decode(&blob).unwrap().pixels, Pixels::Rgb565(pixels.to_vec()));
    }

    #[test]
    fn grayscale_quantises_to_high_nibble() {
        let levels = [0xFF, 0x00, 0x37, 0xC8];
        let blob = encode_grayscale(2, 2, &levels).unwrap();
        assert_eq!(decode(&blob).unwrap().pixels, Pixels::Gray4(vec![0xF, 0x0, 0x3, 0xC]));
    }

    #[test]
    fn images_larger_than_the_window_stay_decodable() {
        // repetitive content invites long-distance matches
        let pixels: Vec<u16> = (0..4096u32).map(|i| ((i % 300) as u16).wrapping_mul(97)).collect();
        let blob = encode_rgb565(64, 64, &pixels).unwrap();
        assert_eq!(decode(&blob).unwrap().pixels, Pixels::Rgb565(pixels));
    }

    #[test]
    fn empty_image_is_valid() {
        let blob = encode_rgb565(0, 0, &[]).unwrap();
        let img = decode(&blob).unwrap();
        assert_eq!(img.pixels, Pixels::Rgb565(Vec::new()));
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            encode_rgb565(2, 2, &[0; 3]),
            Err(EncodeError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(encode_grayscale(3, 2, &[0; 6]), Err(EncodeError::OddWidth(3)));
    }
}
