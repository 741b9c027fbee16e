// 4-bit greyscale TOIF payloads drawn as fg/bg blended icons.
//
// Each payload byte carries two horizontally adjacent pixels, high nibble
// first. Icons always start on an even column; an odd x is floored to the
// even column below, shifting the icon left by one pixel.

use log::{debug, warn};
use toif::{InflateSession, Step};

use super::RenderReport;
use super::color::ColorTable;
use crate::drivers::DisplaySurface;
use crate::ui::clip;

/// Draw a `w`×`h` 4-bit payload at `(x & !1, y)`, mapping level 0 to `bg`
/// and level 15 to `fg`.
///
/// `(w * h) / 2` bytes are decoded. The visibility test for a byte uses
/// `pos % w` / `pos / w` of the byte index against the local clip bounds;
/// both of its pixels are committed when it passes.
#[allow(clippy::too_many_arguments)]
pub fn render_icon(
    surface: &mut DisplaySurface,
    x: i32,
    y: i32,
    w: u16,
    h: u16,
    payload: &[u8],
    fg: u16,
    bg: u16,
) -> RenderReport {
    let x = x & !1;
    let area = clip(x, y, i32::from(w), i32::from(h));
    surface.set_window(area);
    let local = area.translate(x.wrapping_neg(), y.wrapping_neg());

    let table = ColorTable::new(fg, bg);
    let mut session = InflateSession::<1>::new(payload);
    let mut report = RenderReport::default();
    let width = u32::from(w);

    for pos in 0..(width * u32::from(h)) / 2 {
        let [byte] = match session.next_unit() {
            Step::Unit(unit) => unit,
            Step::Done => break,
            Step::Error => {
                warn!("[DISPLAY] icon stream corrupt at byte {}", pos);
                break;
            }
        };
        report.units_decoded += 1;

        let px = (pos % width) as i32;
        let py = (pos / width) as i32;
        if local.contains(px, py) {
            surface.commit(table.get(byte >> 4));
            surface.commit(table.get(byte & 0x0F));
            report.pixels_committed += 2;
        }
    }

    debug!(
        "[DISPLAY] icon {}x{} at ({}, {}): {} units, {} committed",
        w, h, x, y, report.units_decoded, report.pixels_committed
    );
    report
}
