#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! The engine derives layout in normalized `[0,1]×[0,1]` space
//! ([`NormRect`]) and maps to pixel coordinates ([`PixelRect`]) only at the
//! snapshot boundary. Both representations are plain value types; no pixel
//! data is ever stored in the tree.

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle in pixel coordinates of the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub origin: Point,
    pub size: Size,
}

impl PixelRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.origin.x
    }

    /// Top edge.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.origin.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Area in square pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.size.width * self.size.height
    }

    /// Check whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Check whether a point falls inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

/// A rectangle in normalized `[0,1]×[0,1]` layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormRect {
    /// The whole layout region.
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new normalized rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area in normalized units.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Split along the width: the first part gets `width × fraction`.
    #[inline]
    pub fn split_horizontal(&self, fraction: f64) -> (NormRect, NormRect) {
        let first_width = self.width * fraction;
        (
            NormRect::new(self.x, self.y, first_width, self.height),
            NormRect::new(
                self.x + first_width,
                self.y,
                self.width - first_width,
                self.height,
            ),
        )
    }

    /// Split along the height: the first part gets `height × fraction`.
    #[inline]
    pub fn split_vertical(&self, fraction: f64) -> (NormRect, NormRect) {
        let first_height = self.height * fraction;
        (
            NormRect::new(self.x, self.y, self.width, first_height),
            NormRect::new(
                self.x,
                self.y + first_height,
                self.width,
                self.height - first_height,
            ),
        )
    }

    /// Map into a pixel container: `norm × container.size + container.origin`.
    ///
    /// Pure transform, applied only at the snapshot boundary.
    #[inline]
    pub fn to_pixels(&self, container: PixelRect) -> PixelRect {
        PixelRect::new(
            container.origin.x + self.x * container.size.width,
            container.origin.y + self.y * container.size.height,
            self.width * container.size.width,
            self.height * container.size.height,
        )
    }

    /// Length of the overlap between `[a0, a1)` and `[b0, b1)`.
    #[inline]
    pub fn overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
        (a1.min(b1) - a0.max(b0)).max(0.0)
    }
}
