#![forbid(unsafe_code)]

//! Geometric primitives in viewport pixel space.
//!
//! Coordinates are signed: an anchor scrolled partly off-screen has a negative
//! `top`, and a placement computed above the viewport edge is negative before
//! the flip rule corrects it.

use serde::{Deserialize, Serialize};

/// A signed pixel coordinate or length.
pub type Px = i32;

/// Bounding box of the element a tooltip is attached to.
///
/// Edges are in viewport pixels with the origin at the top-left corner.
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnchorRect {
    /// Left edge (inclusive).
    pub left: Px,
    /// Top edge (inclusive).
    pub top: Px,
    /// Right edge (exclusive).
    pub right: Px,
    /// Bottom edge (exclusive).
    pub bottom: Px,
}

impl AnchorRect {
    /// Create a rectangle from its four edges.
    #[inline]
    pub const fn new(left: Px, top: Px, right: Px, bottom: Px) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(left: Px, top: Px, width: Px, height: Px) -> Self {
        Self::new(
            left,
            top,
            left.saturating_add(width),
            top.saturating_add(height),
        )
    }

    /// Width in pixels (zero for inverted rectangles).
    #[inline]
    pub const fn width(&self) -> Px {
        let w = self.right.saturating_sub(self.left);
        if w < 0 { 0 } else { w }
    }

    /// Height in pixels (zero for inverted rectangles).
    #[inline]
    pub const fn height(&self) -> Px {
        let h = self.bottom.saturating_sub(self.top);
        if h < 0 { 0 } else { h }
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: Px, y: Px) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Move the rectangle by a translation.
    #[inline]
    #[must_use]
    pub const fn translated(&self, by: Translation) -> Self {
        Self::new(
            self.left.saturating_add(by.x),
            self.top.saturating_add(by.y),
            self.right.saturating_add(by.x),
            self.bottom.saturating_add(by.y),
        )
    }
}

/// A 2D pixel offset applied to an absolutely positioned container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Translation {
    pub x: Px,
    pub y: Px,
}

impl Translation {
    /// The zero offset.
    pub const ORIGIN: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }
}

/// Viewport or box dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: Px,
    pub height: Px,
}

impl Size {
    #[inline]
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The rectangle covering this size at the origin.
    #[inline]
    pub const fn bounds(&self) -> AnchorRect {
        AnchorRect::new(0, 0, self.width, self.height)
    }
}
