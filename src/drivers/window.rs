// Pixel window: destination sub-rectangle plus a row-major write cursor.
//
// The cursor starts at `start`, moves right one pixel per step, and on
// passing `end.x` returns to `start.x` on the next row. It never stops on
// its own; once it is below `end.y` further steps land outside the window
// and are dropped by the caller.

use embedded_graphics_core::geometry::Point;

use crate::ui::ClipRect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelWindow {
    start: Point,
    end: Point,
    cursor: Point,
}

impl PixelWindow {
    pub const fn new(rect: ClipRect) -> Self {
        let start = Point::new(rect.x0, rect.y0);
        Self {
            start,
            end: Point::new(rect.x1, rect.y1),
            cursor: start,
        }
    }

    /// Re-target the window and rewind the cursor to its top-left corner.
    pub fn set(&mut self, rect: ClipRect) {
        *self = Self::new(rect);
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    #[inline]
    pub fn cursor_in_window(&self) -> bool {
        let Point { x, y } = self.cursor;
        x >= self.start.x && x <= self.end.x && y >= self.start.y && y <= self.end.y
    }

    /// Take the current cursor position (if it is inside the window) and
    /// advance the cursor. The advance happens either way.
    pub fn step(&mut self) -> Option<Point> {
        let target = self.cursor_in_window().then_some(self.cursor);

        self.cursor.x = self.cursor.x.saturating_add(1);
        if self.cursor.x > self.end.x {
            self.cursor.x = self.start.x;
            self.cursor.y = self.cursor.y.saturating_add(1);
        }

        target
    }
}
