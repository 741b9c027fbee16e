// Placement geometry: clip a requested image rectangle to the panel.

mod region;

pub use region::{ClipRect, clip};
