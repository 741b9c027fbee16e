//! Emulated display surface.
//!
//! Owns the RGB565 frame buffer and the [`PixelWindow`] used by the TOIF
//! renderers. Rendering borrows the surface mutably, so only one render
//! can be in flight, and presentation (see [`Presenter`]) can only happen
//! between renders.
//!
//! The surface also implements `embedded_graphics::DrawTarget` so generic
//! drawing code can target it directly.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{IntoStorage, Rgb565},
    prelude::Pixel,
    primitives::Rectangle,
};
use log::{debug, warn};

use super::window::PixelWindow;
use crate::board::{DisplayConfig, HEIGHT, Model, WIDTH};
use crate::ui::ClipRect;

/// Consumer of finished frames (window, screenshot writer, test harness).
pub trait Presenter {
    /// `frame` is `pitch * size.height` pixels, row-major.
    fn present(&mut self, frame: &[u16], pitch: usize, size: Size);
}

pub struct DisplaySurface {
    buf: Vec<u16>,
    pitch: usize,
    model: Model,
    window: PixelWindow,
    dirty: bool,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface {
    /// Colour panel, black, default pitch.
    pub fn new() -> Self {
        Self::with_config(DisplayConfig::default())
    }

    pub fn with_config(config: DisplayConfig) -> Self {
        let mut pitch = config.pitch;
        if pitch < WIDTH as usize {
            warn!(
                "[DISPLAY] pitch {} narrower than panel, using {}",
                pitch, WIDTH
            );
            pitch = WIDTH as usize;
        }

        Self {
            buf: vec![0u16; pitch * HEIGHT as usize],
            pitch,
            model: config.model,
            window: PixelWindow::default(),
            dirty: false,
        }
    }

    /// Row stride in pixels.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    #[inline]
    pub fn model(&self) -> Model {
        self.model
    }

    /// Read-only access to the frame buffer (`pitch * HEIGHT` pixels).
    pub fn buffer(&self) -> &[u16] {
        &self.buf
    }

    /// Colour at `(x, y)`, or `None` outside the panel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u16> {
        self.index(x, y).map(|i| self.buf[i])
    }

    /// Returns `true` if the frame buffer changed since the last refresh.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear(&mut self, color: u16) {
        let color = self.model.quantize(color);
        self.buf.fill(color);
        self.dirty = true;
    }

    // ── pixel window ────────────────────────────────────────────────

    /// Point the write cursor at the top-left of `rect`.
    pub fn set_window(&mut self, rect: ClipRect) {
        self.window.set(rect);
    }

    #[inline]
    pub fn window(&self) -> &PixelWindow {
        &self.window
    }

    /// Write `color` at the cursor if it is inside the window, then advance.
    #[inline]
    pub fn commit(&mut self, color: u16) {
        if let Some(Point { x, y }) = self.window.step() {
            self.put(x, y, color);
        }
    }

    // ── presentation ────────────────────────────────────────────────

    /// Hand the frame to `presenter` if anything was drawn since last time.
    pub fn refresh<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        if !self.dirty {
            return;
        }
        debug!("[DISPLAY] present {}x{} pitch {}", WIDTH, HEIGHT, self.pitch);
        presenter.present(&self.buf, self.pitch, self.size());
        self.dirty = false;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        Some(y as usize * self.pitch + x as usize)
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: u16) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = self.model.quantize(color);
            self.dirty = true;
        }
    }
}

impl DrawTarget for DisplaySurface {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.put(x, y, color.into_storage());
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let r = ClipRect::from_rect(area);
        if r.is_empty() {
            return Ok(());
        }
        let color = self.model.quantize(color.into_storage());
        for y in r.y0..=r.y1 {
            let row = y as usize * self.pitch;
            self.buf[row + r.x0 as usize..=row + r.x1 as usize].fill(color);
        }
        self.dirty = true;

        Ok(())
    }
}

impl OriginDimensions for DisplaySurface {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    #[derive(Default)]
    struct Capture {
        frames: usize,
        last: Vec<u16>,
        pitch: usize,
    }

    impl Presenter for Capture {
        fn present(&mut self, frame: &[u16], pitch: usize, size: Size) {
            assert_eq!(frame.len(), pitch * size.height as usize);
            self.frames += 1;
            self.last = frame.to_vec();
            self.pitch = pitch;
        }
    }

    #[test]
    fn commit_uses_pitch_not_window_width() {
        let mut s = DisplaySurface::with_config(DisplayConfig::default().with_pitch(400));
        s.set_window(ClipRect::new(318, 10, 319, 11));
        for c in [1, 2, 3, 4] {
            s.commit(c);
        }
        assert_eq!(s.buffer()[10 * 400 + 318], 1);
        assert_eq!(s.buffer()[10 * 400 + 319], 2);
        assert_eq!(s.buffer()[11 * 400 + 318], 3);
        assert_eq!(s.pixel(319, 11), Some(4));
        // padding columns past the panel are never touched
        assert_eq!(s.buffer()[10 * 400 + 320], 0);
    }

    #[test]
    fn commits_past_window_are_dropped() {
        let mut s = DisplaySurface::new();
        s.set_window(ClipRect::new(0, 0, 0, 0));
        s.commit(0xFFFF);
        s.commit(0x1234);
        assert_eq!(s.pixel(0, 0), Some(0xFFFF));
        assert_eq!(s.pixel(0, 1), Some(0));
        assert_eq!(s.buffer().iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn narrow_pitch_is_raised_to_width() {
        let s = DisplaySurface::with_config(DisplayConfig::default().with_pitch(10));
        assert_eq!(s.pitch(), WIDTH as usize);
        assert_eq!(s.buffer().len(), WIDTH as usize * HEIGHT as usize);
    }

    #[test]
    fn mono_model_quantizes_commits() {
        let mut s = DisplaySurface::with_config(DisplayConfig::default().with_model(Model::One));
        s.set_window(ClipRect::new(0, 0, 1, 0));
        s.commit(0x8410);
        s.commit(0x7BEF);
        assert_eq!(s.pixel(0, 0), Some(0xFFFF));
        assert_eq!(s.pixel(1, 0), Some(0x0000));
    }

    #[test]
    fn refresh_presents_only_when_dirty() {
        let mut s = DisplaySurface::new();
        let mut cap = Capture::default();
        s.refresh(&mut cap);
        assert_eq!(cap.frames, 0);

        s.clear(0x001F);
        s.refresh(&mut cap);
        s.refresh(&mut cap);
        assert_eq!(cap.frames, 1);
        assert_eq!(cap.pitch, WIDTH as usize);
        assert!(cap.last.iter().all(|&p| p == 0x001F));
        assert!(!s.is_dirty());
    }

    #[test]
    fn draw_target_clips_primitives() {
        let mut s = DisplaySurface::new();
        Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut s)
            .unwrap();
        let red = Rgb565::RED.into_storage();
        assert_eq!(s.pixel(0, 0), Some(red));
        assert_eq!(s.pixel(1, 1), Some(red));
        assert_eq!(s.pixel(2, 2), Some(0));

        Pixel(Point::new(319, 239), Rgb565::GREEN).draw(&mut s).unwrap();
        Pixel(Point::new(320, 0), Rgb565::GREEN).draw(&mut s).unwrap();
        assert_eq!(s.pixel(319, 239), Some(Rgb565::GREEN.into_storage()));
        assert_eq!(s.pixel(320, 0), None);
    }
}
