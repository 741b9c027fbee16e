// Clip geometry. All bounds are inclusive; an inverted rect (x0 > x1 or
// y0 > y1) is empty and contains no points.

use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::board::{HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClipRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

/// Intersect the placement `(x, y, w, h)` with the panel extent.
///
/// Placements entirely off the panel give an inverted (empty) rect.
pub fn clip(x: i32, y: i32, w: i32, h: i32) -> ClipRect {
    ClipRect {
        x0: x.max(0),
        y0: y.max(0),
        x1: x.saturating_add(w).saturating_sub(1).min(WIDTH as i32 - 1),
        y1: y.saturating_add(h).saturating_sub(1).min(HEIGHT as i32 - 1),
    }
}

impl ClipRect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }

    #[inline]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Number of points inside; 0 for an inverted rect.
    pub fn area(self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        let w = (i64::from(self.x1) - i64::from(self.x0) + 1) as u64;
        let h = (i64::from(self.y1) - i64::from(self.y0) + 1) as u64;
        (w * h).min(u64::from(u32::MAX)) as u32
    }

    /// Shift by `(dx, dy)`; used to move display bounds into image-local space.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x0: self.x0.saturating_add(dx),
            y0: self.y0.saturating_add(dy),
            x1: self.x1.saturating_add(dx),
            y1: self.y1.saturating_add(dy),
        }
    }

    pub fn top_left(self) -> Point {
        Point::new(self.x0, self.y0)
    }

    pub fn bottom_right(self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn to_rect(self) -> Rectangle {
        if self.is_empty() {
            return Rectangle::zero();
        }
        Rectangle::with_corners(self.top_left(), self.bottom_right())
    }

    /// Clip an arbitrary rectangle to the panel.
    pub fn from_rect(rect: &Rectangle) -> Self {
        let Size { width, height } = rect.size;
        clip(
            rect.top_left.x,
            rect.top_left.y,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }
}
