// Streaming raw-DEFLATE session for TOIF payloads.
//
// The payload is decoded a fixed-size unit at a time (1 byte for 4-bit
// icons, 2 bytes for RGB565). miniz_oxide runs in wrapping mode over a
// 1 KB window that doubles as the LZ dictionary; TOIF encoders limit
// back-references to 10 bits so the window never needs to be larger.
// The window is only refilled once every produced byte has been handed
// out, so a refill can never clobber bytes still waiting to be read.

use alloc::boxed::Box;

use miniz_oxide::inflate::TINFLStatus;
use miniz_oxide::inflate::core::{DecompressorOxide, decompress};

/// log2 of the sliding window used by TOIF streams.
pub const WINDOW_BITS: u32 = 10;
/// Sliding window size in bytes; power of two as wrapping mode requires.
pub const WINDOW_SIZE: usize = 1 << WINDOW_BITS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Stream ended cleanly; no more units.
    Done,
    /// Stream is malformed or truncated; decoding must stop.
    Error,
}

/// Outcome of a single [`InflateSession::next_unit`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step<const N: usize> {
    Unit([u8; N]),
    Done,
    Error,
}

pub struct InflateSession<'a, const N: usize> {
    source: &'a [u8],
    decomp: Box<DecompressorOxide>,
    window: [u8; WINDOW_SIZE],
    // running totals; window index is total & (WINDOW_SIZE - 1)
    produced: usize,
    consumed: usize,
    // decoder-side status, may run ahead of what the reader has seen
    stream: Status,
    // reader-side status, becomes terminal once a terminal Step is returned
    state: Status,
    units: u32,
}

impl<'a, const N: usize> InflateSession<'a, N> {
    /// Start a fresh session over `compressed`. Window and state start zeroed.
    pub fn new(compressed: &'a [u8]) -> Self {
        const { assert!(N == 1 || N == 2, "TOIF units are 1 or 2 bytes") };

        Self {
            source: compressed,
            decomp: Box::new(DecompressorOxide::new()),
            window: [0u8; WINDOW_SIZE],
            produced: 0,
            consumed: 0,
            stream: Status::Running,
            state: Status::Running,
            units: 0,
        }
    }

    /// Decode the next `N` bytes.
    ///
    /// A stream that ends with fewer than `N` bytes pending reports
    /// [`Step::Done`] (or [`Step::Error`] if it ended badly); the partial
    /// unit is dropped. Terminal steps repeat on every later call.
    pub fn next_unit(&mut self) -> Step<N> {
        match self.state {
            Status::Done => return Step::Done,
            Status::Error => return Step::Error,
            Status::Running => {}
        }

        let mut unit = [0u8; N];
        let mut filled = 0;
        while filled < N {
            if self.available() == 0 {
                if self.stream != Status::Running {
                    return self.finish();
                }
                self.pump();
                continue;
            }
            unit[filled] = self.window[self.consumed & (WINDOW_SIZE - 1)];
            self.consumed += 1;
            filled += 1;
        }

        self.units += 1;
        Step::Unit(unit)
    }

    /// Units handed out so far.
    #[inline]
    pub fn units_decoded(&self) -> u32 {
        self.units
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.state
    }

    /// Compressed bytes not yet fed to the decompressor.
    #[inline]
    pub fn remaining_input(&self) -> usize {
        self.source.len()
    }

    #[inline]
    fn available(&self) -> usize {
        self.produced - self.consumed
    }

    fn finish(&mut self) -> Step<N> {
        self.state = self.stream;
        if self.stream == Status::Error {
            log::warn!("toif: inflate failed after {} units", self.units);
            Step::Error
        } else {
            Step::Done
        }
    }

    // Run the decompressor once into the free tail of the window.
    fn pump(&mut self) {
        let write_pos = self.produced & (WINDOW_SIZE - 1);
        // whole payload is in memory, so no TINFL_FLAG_HAS_MORE_INPUT
        let (status, consumed, produced) =
            decompress(&mut self.decomp, self.source, &mut self.window, write_pos, 0);

        self.source = &self.source[consumed..];
        self.produced += produced;

        self.stream = match status {
            TINFLStatus::Done => Status::Done,
            TINFLStatus::HasMoreOutput | TINFLStatus::NeedsMoreInput => {
                if consumed == 0 && produced == 0 {
                    // no progress possible; treat as a broken stream
                    Status::Error
                } else {
                    Status::Running
                }
            }
            _ => Status::Error,
        };
    }
}
