#![forbid(unsafe_code)]

//! Anchor-relative placement.
//!
//! The tooltip's left edge aligns with the anchor's left edge. Vertically it
//! sits directly above the anchor unless that would put its top edge above
//! the viewport, in which case it sits directly below.
//!
//! ```
//! use hovertip_core::geometry::{AnchorRect, Translation};
//! use hovertip_widgets::placement::place;
//!
//! let anchor = AnchorRect::new(200, 300, 260, 330);
//! assert_eq!(place(anchor, 20), Translation::new(200, 280));
//!
//! // Too tall to fit above: flipped below.
//! let anchor = AnchorRect::new(10, 5, 50, 25);
//! assert_eq!(place(anchor, 40), Translation::new(10, 25));
//! ```

use hovertip_core::geometry::{AnchorRect, Px, Translation};

/// Which side of the anchor the tooltip lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Above,
    Below,
}

/// Side chosen for a tooltip of `height` pixels.
#[must_use]
pub const fn side(anchor: AnchorRect, height: Px) -> Side {
    if anchor.top.saturating_sub(height) < 0 {
        Side::Below
    } else {
        Side::Above
    }
}

/// Translation of a tooltip of `height` pixels attached to `anchor`.
///
/// A height of 0 (not yet measured) places the tooltip's top edge at the
/// anchor's top edge.
#[must_use]
pub const fn place(anchor: AnchorRect, height: Px) -> Translation {
    let y = match side(anchor, height) {
        Side::Above => anchor.top.saturating_sub(height),
        Side::Below => anchor.bottom,
    };
    Translation::new(anchor.left, y)
}
