//! TOIF header parsing.
//!
//! Layout (all multi-byte fields little-endian):
//!
//! ```plain
//! 0  3  magic "TOI"
//! 3  1  format: 'f' = full colour RGB565, 'g' = 4-bit greyscale
//! 4  2  width
//! 6  2  height
//! 8  4  payload length, must equal total length - 12
//! 12 .. raw DEFLATE payload
//! ```

use core::fmt;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 12;

/// First three bytes of every TOIF blob.
pub const MAGIC: [u8; 3] = *b"TOI";

const TAG_COLOR: u8 = b'f';
const TAG_GRAYSCALE: u8 = b'g';

#[inline]
fn le_u16(d: &[u8], o: usize) -> u16 {
    u16::from_le_bytes([d[o], d[o + 1]])
}

#[inline]
fn le_u32(d: &[u8], o: usize) -> u32 {
    u32::from_le_bytes([d[o], d[o + 1], d[o + 2], d[o + 3]])
}

/// Pixel encoding of the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToifFormat {
    /// Big-endian RGB565, two bytes per pixel.
    Color,
    /// 4-bit levels, two pixels per byte, left pixel in the high nibble.
    Grayscale,
}

impl ToifFormat {
    pub const fn tag(self) -> u8 {
        match self {
            ToifFormat::Color => TAG_COLOR,
            ToifFormat::Grayscale => TAG_GRAYSCALE,
        }
    }

    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TAG_COLOR => Some(ToifFormat::Color),
            TAG_GRAYSCALE => Some(ToifFormat::Grayscale),
            _ => None,
        }
    }

    pub const fn is_grayscale(self) -> bool {
        matches!(self, ToifFormat::Grayscale)
    }
}

/// Reasons a byte blob is not a well-formed TOIF container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer than [`HEADER_LEN`] bytes.
    TooShort(usize),
    BadMagic,
    UnknownFormat(u8),
    /// Declared payload length disagrees with the bytes actually present.
    LengthMismatch { declared: u32, actual: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::TooShort(len) => write!(f, "toif: {} bytes is shorter than the header", len),
            FormatError::BadMagic => f.write_str("toif: bad magic"),
            FormatError::UnknownFormat(tag) => write!(f, "toif: unknown format tag 0x{:02x}", tag),
            FormatError::LengthMismatch { declared, actual } => write!(
                f,
                "toif: payload length {} does not match {} bytes present",
                declared, actual
            ),
        }
    }
}

impl core::error::Error for FormatError {}

/// Parsed TOIF header. Cheap to re-derive; callers validate per use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToifHeader {
    pub format: ToifFormat,
    pub width: u16,
    pub height: u16,
    pub payload_len: u32,
}

impl ToifHeader {
    /// Total pixel count declared by the header.
    #[inline]
    pub fn pixel_count(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    /// Number of decompressed bytes the payload should expand to.
    pub fn raw_len(&self) -> usize {
        let pixels = self.pixel_count() as usize;
        match self.format {
            ToifFormat::Color => pixels * 2,
            ToifFormat::Grayscale => pixels / 2,
        }
    }

    /// Slice the compressed payload out of the blob this header came from.
    pub fn payload<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        let end = HEADER_LEN.saturating_add(self.payload_len as usize).min(data.len());
        data.get(HEADER_LEN..end).unwrap_or(&[])
    }

    /// Serialise the header back into its 12-byte wire form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..3].copy_from_slice(&MAGIC);
        out[3] = self.format.tag();
        out[4..6].copy_from_slice(&self.width.to_le_bytes());
        out[6..8].copy_from_slice(&self.height.to_le_bytes());
        out[8..12].copy_from_slice(&self.payload_len.to_le_bytes());
        out
    }
}

/// Validate the header of a complete TOIF blob (header + payload).
pub fn validate_header(data: &[u8]) -> Result<ToifHeader, FormatError> {
    if data.len() < HEADER_LEN {
        return Err(FormatError::TooShort(data.len()));
    }
    if data[..3] != MAGIC {
        return Err(FormatError::BadMagic);
    }
    let format = ToifFormat::from_tag(data[3]).ok_or(FormatError::UnknownFormat(data[3]))?;

    let payload_len = le_u32(data, 8);
    let actual = data.len() - HEADER_LEN;
    if payload_len as usize != actual {
        return Err(FormatError::LengthMismatch {
            declared: payload_len,
            actual,
        });
    }

    Ok(ToifHeader {
        format,
        width: le_u16(data, 4),
        height: le_u16(data, 6),
        payload_len,
    })
}

/// Header query in the "valid or not" shape the display layer uses.
pub fn toif_info(data: &[u8]) -> Option<ToifHeader> {
    match validate_header(data) {
        Ok(hdr) => Some(hdr),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}
