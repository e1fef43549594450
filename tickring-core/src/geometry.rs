//! Integer screen geometry
//!
//! Small `Copy` types in display pixels. Coordinates are `i16` so that
//! shapes may extend past the panel edges (the progress wedge does).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Offset this point by the given deltas
    pub const fn offset(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub w: i16,
    pub h: i16,
}

impl Size {
    pub const fn new(w: i16, h: i16) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned rectangle with integer origin and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i16 {
        self.origin.x.saturating_add(self.size.w)
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i16 {
        self.origin.y.saturating_add(self.size.h)
    }

    /// Center point (rounded toward the origin)
    pub const fn center(&self) -> Point {
        Point::new(
            self.origin.x.saturating_add(self.size.w / 2),
            self.origin.y.saturating_add(self.size.h / 2),
        )
    }

    /// Check for an empty rectangle (zero or negative extent)
    pub const fn is_empty(&self) -> bool {
        self.size.w <= 0 || self.size.h <= 0
    }

    /// Shrink the rectangle by `amount` on every side
    ///
    /// A negative amount grows it. The size never goes below zero.
    pub fn inset(&self, amount: i16) -> Self {
        let twice = amount.saturating_mul(2);
        Self {
            origin: self.origin.offset(amount, amount),
            size: Size::new(
                self.size.w.saturating_sub(twice).max(0),
                self.size.h.saturating_sub(twice).max(0),
            ),
        }
    }

    /// Move the rectangle without changing its size
    pub const fn offset(&self, dx: i16, dy: i16) -> Self {
        Self {
            origin: self.origin.offset(dx, dy),
            size: self.size,
        }
    }

    /// Intersection of two rectangles, empty if they do not overlap
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Rect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    /// Check whether a point lies inside the rectangle
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x < self.right() && p.y >= self.origin.y && p.y < self.bottom()
    }
}
