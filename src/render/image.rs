// Full-colour TOIF payloads: one big-endian RGB565 value per 2-byte unit.

use log::{debug, warn};
use toif::{InflateSession, Step};

use super::RenderReport;
use crate::drivers::DisplaySurface;
use crate::ui::clip;

/// Draw a `w`×`h` RGB565 payload with its top-left corner at `(x, y)`.
///
/// The decoder is advanced once per declared pixel in raster order; only
/// pixels inside the visible part of the placement are committed to the
/// surface window. A corrupt or short stream stops drawing where it fails.
pub fn render_image(
    surface: &mut DisplaySurface,
    x: i32,
    y: i32,
    w: u16,
    h: u16,
    payload: &[u8],
) -> RenderReport {
    let area = clip(x, y, i32::from(w), i32::from(h));
    surface.set_window(area);
    let local = area.translate(x.wrapping_neg(), y.wrapping_neg());

    let mut session = InflateSession::<2>::new(payload);
    let mut report = RenderReport::default();
    let width = u32::from(w);

    for pos in 0..width * u32::from(h) {
        let unit = match session.next_unit() {
            Step::Unit(unit) => unit,
            Step::Done => break,
            Step::Error => {
                warn!("[DISPLAY] image stream corrupt at pixel {}", pos);
                break;
            }
        };
        report.units_decoded += 1;

        let px = (pos % width) as i32;
        let py = (pos / width) as i32;
        if local.contains(px, py) {
            surface.commit(u16::from_be_bytes(unit));
            report.pixels_committed += 1;
        }
    }

    debug!(
        "[DISPLAY] image {}x{} at ({}, {}): {} units, {} committed",
        w, h, x, y, report.units_decoded, report.pixels_committed
    );
    report
}
