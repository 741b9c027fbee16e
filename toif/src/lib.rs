// toif: minimal no_std TOIF image container.
// header:  12-byte header parse/validation ("TOI" + format + w/h + len)
// inflate: raw DEFLATE session over a 1 KB sliding window, fixed-size units
// decode:  whole-image decode into RGB565 or 4-bit grey levels
// encode:  RGB565 / greyscale pixels -> TOIF blob (feature "encode")

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod decode;
pub mod header;
pub mod inflate;

#[cfg(feature = "encode")]
pub mod encode;

pub use decode::{DecodeError, DecodedImage, MAX_PIXELS, Pixels, decode};
pub use header::{FormatError, HEADER_LEN, MAGIC, ToifFormat, ToifHeader, toif_info, validate_header};
pub use inflate::{InflateSession, Status, Step, WINDOW_BITS, WINDOW_SIZE};

#[cfg(feature = "encode")]
pub use encode::{EncodeError, encode_grayscale, encode_rgb565};
