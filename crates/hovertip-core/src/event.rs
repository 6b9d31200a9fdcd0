#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Raw input arrives as [`Event`] values. The runtime hit-tests pointer
//! motion against interactive regions and delivers [`HoverEvent`]s to the
//! component that owns the region under the pointer.
//!
//! # Design Notes
//!
//! - Pointer coordinates are viewport pixels, origin at top-left.
//! - `PointerEventKind::Left` means the pointer left the viewport entirely;
//!   every hovered region receives a leave.

use crate::geometry::{Px, Size};

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A pointer event.
    Pointer(PointerEvent),

    /// The viewport was resized.
    Resize(Size),
}

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// X coordinate in pixels.
    pub x: Px,

    /// Y coordinate in pixels.
    pub y: Px,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: Px, y: Px) -> Self {
        Self { kind, x, y }
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: Px, y: Px) -> Self {
        Self::new(PointerEventKind::Moved, x, y)
    }

    /// Pointer left the viewport.
    #[must_use]
    pub const fn left() -> Self {
        Self::new(PointerEventKind::Left, 0, 0)
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (Px, Px) {
        (self.x, self.y)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Pointer moved within the viewport.
    Moved,
    /// Pointer left the viewport.
    Left,
}

/// Hover notification delivered to the owner of an interactive region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    /// Pointer entered the region.
    Enter,
    /// Pointer left the region.
    Leave,
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moved_constructor() {
        let ev = PointerEvent::moved(12, 34);
        assert_eq!(ev.kind, PointerEventKind::Moved);
        assert_eq!(ev.position(), (12, 34));
    }

    #[test]
    fn pointer_converts_into_event() {
        let ev: Event = PointerEvent::left().into();
        assert!(matches!(
            ev,
            Event::Pointer(PointerEvent {
                kind: PointerEventKind::Left,
                ..
            })
        ));
    }
}
