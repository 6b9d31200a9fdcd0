#![forbid(unsafe_code)]

//! Container styles for portal nodes.

use bitflags::bitflags;
use hovertip_core::geometry::Translation;

bitflags! {
    /// Layout and interaction flags for a portal container.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Positioned at the portal origin and moved only by its translation.
        const ABSOLUTE = 0b0000_0001;
        /// Ignored by hit testing (`pointer-events: none`).
        const INERT    = 0b0000_0010;
    }
}

/// Style of a container mounted in the portal root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerStyle {
    pub flags: NodeFlags,
    pub transform: Translation,
}

impl ContainerStyle {
    /// Absolutely positioned, non-interactive container at `transform`.
    #[must_use]
    pub const fn overlay(transform: Translation) -> Self {
        Self {
            flags: NodeFlags::ABSOLUTE.union(NodeFlags::INERT),
            transform,
        }
    }

    /// Absolutely positioned container that participates in hit testing.
    #[must_use]
    pub const fn interactive(transform: Translation) -> Self {
        Self {
            flags: NodeFlags::ABSOLUTE,
            transform,
        }
    }

    /// Replace the translation.
    #[must_use]
    pub const fn with_transform(mut self, transform: Translation) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    pub const fn is_inert(&self) -> bool {
        self.flags.contains(NodeFlags::INERT)
    }

    /// CSS-equivalent declaration block, for diagnostics and demo output.
    #[must_use]
    pub fn css(&self) -> String {
        let position = if self.flags.contains(NodeFlags::ABSOLUTE) {
            "absolute"
        } else {
            "static"
        };
        let pointer = if self.is_inert() { "none" } else { "auto" };
        format!(
            "position: {position}; pointer-events: {pointer}; left: 0; top: 0; \
             transform: translate3d({}px, {}px, 0)",
            self.transform.x, self.transform.y
        )
    }
}
