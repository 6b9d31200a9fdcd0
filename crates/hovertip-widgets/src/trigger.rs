#![forbid(unsafe_code)]

//! Hover target that publishes its bounds as a tooltip anchor.

use hovertip_core::event::HoverEvent;
use hovertip_core::geometry::AnchorRect;
use hovertip_render::portal::PortalRoot;
use hovertip_runtime::{Component, Observable, RenderCx};
use tracing::trace;

/// An element that owns the anchor lifecycle for a tooltip.
///
/// While the pointer is over `bounds` the anchor holds `Some(bounds)`;
/// otherwise it holds `None`.
#[derive(Debug)]
pub struct Trigger {
    label: String,
    bounds: AnchorRect,
    anchor: Observable<Option<AnchorRect>>,
    hovered: bool,
}

impl Trigger {
    #[must_use]
    pub fn new(label: impl Into<String>, bounds: AnchorRect) -> Self {
        Self {
            label: label.into(),
            bounds,
            anchor: Observable::new(None),
            hovered: false,
        }
    }

    /// The anchor this trigger publishes.
    #[must_use]
    pub fn anchor(&self) -> Observable<Option<AnchorRect>> {
        self.anchor.clone()
    }

    #[must_use]
    pub fn bounds(&self) -> AnchorRect {
        self.bounds
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Move the trigger. A hovered trigger republishes its anchor.
    pub fn set_bounds(&mut self, bounds: AnchorRect) {
        self.bounds = bounds;
        if self.hovered {
            self.anchor.set(Some(bounds));
        }
    }
}

impl Component for Trigger {
    fn name(&self) -> &str {
        &self.label
    }

    fn render(&mut self, _cx: &mut RenderCx<'_>) {}

    fn hit_region(&self) -> Option<AnchorRect> {
        Some(self.bounds)
    }

    fn on_hover(&mut self, event: HoverEvent) {
        self.hovered = matches!(event, HoverEvent::Enter);
        let anchor = self.hovered.then_some(self.bounds);
        trace!(target: "hovertip.widgets", trigger = %self.label, ?event, "anchor published");
        self.anchor.set(anchor);
    }

    /// A removed trigger can no longer be hovered, so its anchor goes absent.
    fn unmount(&mut self, _root: &PortalRoot) {
        self.hovered = false;
        self.anchor.set(None);
    }
}
