// End-to-end: TOIF blob -> header -> inflate -> pixel window -> frame buffer.

use toif::{HEADER_LEN, ToifFormat, encode_grayscale, encode_rgb565, toif_info};
use toif_display::render::{BLACK, WHITE};
use toif_display::{
    ClipRect, DisplaySurface, HEIGHT, RenderReport, WIDTH, draw_toif, render_icon, render_image,
};

// Single final stored DEFLATE block around `data`.
fn stored(data: &[u8]) -> Vec<u8> {
    let len = data.len() as u16;
    let mut v = vec![0x01];
    v.extend_from_slice(&len.to_le_bytes());
    v.extend_from_slice(&(!len).to_le_bytes());
    v.extend_from_slice(data);
    v
}

fn toif_blob(tag: u8, w: u16, h: u16, payload: &[u8]) -> Vec<u8> {
    let mut v = b"TOI".to_vec();
    v.push(tag);
    v.extend_from_slice(&w.to_le_bytes());
    v.extend_from_slice(&h.to_le_bytes());
    v.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    v.extend_from_slice(payload);
    v
}

#[test]
fn two_pixel_color_image() {
    let blob = toif_blob(b'f', 2, 1, &stored(&[0xF8, 0x00, 0x07, 0xE0]));
    let hdr = toif_info(&blob).expect("valid header");
    assert_eq!((hdr.width, hdr.height, hdr.format), (2, 1, ToifFormat::Color));

    let mut s = DisplaySurface::new();
    render_image(&mut s, 0, 0, hdr.width, hdr.height, &blob[HEADER_LEN..]);
    assert_eq!(s.pixel(0, 0), Some(0xF800));
    assert_eq!(s.pixel(1, 0), Some(0x07E0));
}

#[test]
fn two_pixel_icon() {
    let blob = toif_blob(b'g', 2, 1, &stored(&[0xF0]));
    let hdr = toif_info(&blob).expect("valid header");
    assert_eq!(hdr.format, ToifFormat::Grayscale);

    let mut s = DisplaySurface::new();
    s.clear(0x1234);
    render_icon(&mut s, 0, 0, 2, 1, &blob[HEADER_LEN..], 0xFFFF, 0x0000);
    assert_eq!(s.pixel(0, 0), Some(0xFFFF));
    assert_eq!(s.pixel(1, 0), Some(0x0000));
    assert_eq!(s.pixel(2, 0), Some(0x1234));
}

#[test]
fn half_offscreen_image_still_consumes_every_unit() {
    let (w, h) = (8u16, 4u16);
    let pixels: Vec<u16> = (0..w * h).map(|i| 0x0100 + i).collect();
    let blob = encode_rgb565(w, h, &pixels).unwrap();

    let mut s = DisplaySurface::new();
    let report = render_image(&mut s, -4, 0, w, h, &blob[HEADER_LEN..]);
    assert_eq!(
        report,
        RenderReport {
            units_decoded: 32,
            pixels_committed: 16
        }
    );
    // right half of each row lands at columns 0..4
    for row in 0..4 {
        for col in 0..4 {
            let src = (row * 8 + col + 4) as u16;
            assert_eq!(s.pixel(col, row), Some(0x0100 + src));
        }
        assert_eq!(s.pixel(4, row), Some(0));
    }

    let report = render_image(&mut s, 0, HEIGHT as i32 - 2, w, h, &blob[HEADER_LEN..]);
    assert_eq!(report.units_decoded, 32);
    assert_eq!(report.pixels_committed, 16);
}

#[test]
fn half_offscreen_icon_still_consumes_every_unit() {
    let (w, h) = (8u16, 4u16);
    let levels: Vec<u8> = (0..w * h).map(|i| (i as u8 % 16) << 4).collect();
    let blob = encode_grayscale(w, h, &levels).unwrap();

    let mut s = DisplaySurface::new();
    let report = render_icon(&mut s, WIDTH as i32 - 4, 0, w, h, &blob[HEADER_LEN..], WHITE, BLACK);
    assert_eq!(report.units_decoded, u32::from(w * h / 2));
    assert!(report.pixels_committed < u32::from(w * h));
    assert_eq!(
        *s.window(),
        {
            let mut win = toif_display::PixelWindow::new(ClipRect::new(316, 0, 319, 3));
            for _ in 0..report.pixels_committed {
                win.step();
            }
            win
        }
    );
}

#[test]
fn fully_offscreen_placement_commits_nothing() {
    let blob = encode_rgb565(2, 2, &[0xFFFF; 4]).unwrap();
    let mut s = DisplaySurface::new();
    for (x, y) in [(-10, 0), (WIDTH as i32, 0), (0, HEIGHT as i32 + 1), (0, -5)] {
        let report = draw_toif(&mut s, x, y, &blob, WHITE, BLACK).unwrap();
        assert_eq!(report.units_decoded, 4);
        assert_eq!(report.pixels_committed, 0);
    }
    assert!(s.buffer().iter().all(|&p| p == 0));
    assert!(!s.is_dirty());
}

#[test]
fn full_screen_image_fills_the_panel() {
    let (w, h) = (WIDTH, HEIGHT);
    let pixels: Vec<u16> = (0..u32::from(w) * u32::from(h))
        .map(|i| (i % 4099) as u16)
        .collect();
    let blob = encode_rgb565(w, h, &pixels).unwrap();

    let mut s = DisplaySurface::new();
    let report = draw_toif(&mut s, 0, 0, &blob, WHITE, BLACK).unwrap();
    assert_eq!(report.pixels_committed, u32::from(w) * u32::from(h));
    assert_eq!(s.buffer(), &pixels[..]);
}

#[test]
fn malformed_headers_are_rejected_not_drawn() {
    let good = toif_blob(b'f', 1, 1, &stored(&[0xAB, 0xCD]));
    let mut s = DisplaySurface::new();

    assert!(draw_toif(&mut s, 0, 0, &good[..11], WHITE, BLACK).is_err());

    let mut bad_magic = good.clone();
    bad_magic[2] = b'J';
    assert!(toif_info(&bad_magic).is_none());

    let mut bad_len = good.clone();
    bad_len[8] = bad_len[8].wrapping_add(1);
    assert!(draw_toif(&mut s, 0, 0, &bad_len, WHITE, BLACK).is_err());

    assert_eq!(s.pixel(0, 0), Some(0));
    draw_toif(&mut s, 0, 0, &good, WHITE, BLACK).unwrap();
    assert_eq!(s.pixel(0, 0), Some(0xABCD));
}
