#![forbid(unsafe_code)]

//! Scripted hover scenarios.
//!
//! A [`Scenario`] owns a [`UiRuntime`] and registers trigger/tooltip pairs
//! against its portal root. Tests move the pointer and step frames; the
//! painted timeline is then read back from [`Scenario::frames`].
//!
//! ```ignore
//! let mut sc = Scenario::new(RuntimeConfig::default());
//! let save = sc.add_tooltip("save", AnchorRect::new(100, 50, 140, 80), "Save");
//! sc.hover(&save);
//! sc.settle();
//! assert_eq!(sc.translations(&save).last(), Some(&Translation::new(100, 22)));
//! ```

use hovertip_core::event::{Event, PointerEvent};
use hovertip_core::geometry::{AnchorRect, Px, Translation};
use hovertip_render::content::Content;
use hovertip_render::frame::FrameLog;
use hovertip_runtime::{
    ComponentId, FrameReport, MeasurementTiming, Observable, RuntimeConfig, UiRuntime,
};
use hovertip_widgets::{Tooltip, TooltipState, Trigger};
use tracing::debug;

/// Frames [`Scenario::settle`] runs before giving up.
pub const SETTLE_FRAME_LIMIT: usize = 32;

/// Handles to one trigger/tooltip pair inside a [`Scenario`].
#[derive(Debug, Clone)]
pub struct TooltipHandle {
    pub label: String,
    pub bounds: AnchorRect,
    pub trigger: ComponentId,
    pub tooltip: ComponentId,
    pub anchor: Observable<Option<AnchorRect>>,
    pub state: Observable<TooltipState>,
}

impl TooltipHandle {
    /// A point inside the trigger.
    #[must_use]
    pub fn center(&self) -> (Px, Px) {
        (
            self.bounds.left + self.bounds.width() / 2,
            self.bounds.top + self.bounds.height() / 2,
        )
    }
}

/// A runtime plus the trigger/tooltip pairs registered in it.
#[derive(Debug)]
pub struct Scenario {
    runtime: UiRuntime,
    handles: Vec<TooltipHandle>,
}

impl Scenario {
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            runtime: UiRuntime::new(config),
            handles: Vec::new(),
        }
    }

    /// Register a trigger at `bounds` with a tooltip showing `content`,
    /// measured with the runtime's default timing.
    pub fn add_tooltip(
        &mut self,
        label: &str,
        bounds: AnchorRect,
        content: impl Into<Content>,
    ) -> TooltipHandle {
        self.add_tooltip_with(label, bounds, content, None)
    }

    /// Like [`add_tooltip`](Self::add_tooltip) with an explicit timing.
    pub fn add_tooltip_with(
        &mut self,
        label: &str,
        bounds: AnchorRect,
        content: impl Into<Content>,
        timing: Option<MeasurementTiming>,
    ) -> TooltipHandle {
        let trigger = Trigger::new(label, bounds);
        let anchor = trigger.anchor();
        let mut tooltip =
            Tooltip::new(self.runtime.root().clone(), anchor.clone(), content).label(label);
        if let Some(timing) = timing {
            tooltip = tooltip.timing(timing);
        }
        let state = tooltip.state();
        let trigger = self.runtime.add(trigger);
        let tooltip = self.runtime.add(tooltip);
        let handle = TooltipHandle {
            label: label.to_owned(),
            bounds,
            trigger,
            tooltip,
            anchor,
            state,
        };
        debug!(target: "hovertip.harness", label, ?bounds, "scenario tooltip added");
        self.handles.push(handle.clone());
        handle
    }

    #[must_use]
    pub fn handles(&self) -> &[TooltipHandle] {
        &self.handles
    }

    #[must_use]
    pub fn runtime(&self) -> &UiRuntime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut UiRuntime {
        &mut self.runtime
    }

    #[must_use]
    pub fn frames(&self) -> &FrameLog {
        self.runtime.frames()
    }

    /// Move the pointer to `(x, y)`.
    pub fn move_pointer(&mut self, x: Px, y: Px) -> bool {
        self.runtime.dispatch(Event::Pointer(PointerEvent::moved(x, y)))
    }

    /// Move the pointer onto the handle's trigger.
    pub fn hover(&mut self, handle: &TooltipHandle) -> bool {
        let (x, y) = handle.center();
        self.move_pointer(x, y)
    }

    /// Move the pointer out of the viewport.
    pub fn leave(&mut self) -> bool {
        self.runtime.dispatch(Event::Pointer(PointerEvent::left()))
    }

    /// Run exactly one frame.
    pub fn step(&mut self) -> FrameReport {
        self.runtime.run_frame()
    }

    /// Run frames until idle. Returns the number of frames painted.
    pub fn settle(&mut self) -> usize {
        self.runtime.run_until_idle(SETTLE_FRAME_LIMIT)
    }

    /// Every painted translation of the handle's container, oldest first.
    #[must_use]
    pub fn translations(&self, handle: &TooltipHandle) -> Vec<Translation> {
        self.frames().translations_by_label(&handle.label)
    }

    /// Per painted frame, the handle's translation or `None` if not mounted.
    #[must_use]
    pub fn timeline(&self, handle: &TooltipHandle) -> Vec<Option<Translation>> {
        self.frames()
            .frames()
            .iter()
            .map(|f| f.layer_by_label(&handle.label).map(|l| l.translation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_then_leave_shows_and_hides() {
        let mut sc = Scenario::new(RuntimeConfig::default());
        let h = sc.add_tooltip("a", AnchorRect::new(200, 300, 260, 330), "hello");
        sc.settle();
        assert!(sc.runtime().root().is_empty());

        assert!(sc.hover(&h));
        sc.settle();
        assert_eq!(h.anchor.get(), Some(h.bounds));
        assert!(h.state.get().is_visible());
        assert_eq!(sc.runtime().root().len(), 1);

        assert!(sc.leave());
        sc.settle();
        assert!(sc.runtime().root().is_empty());
        assert_eq!(h.state.get(), TooltipState::Hidden);
    }

    #[test]
    fn center_is_inside_bounds() {
        let mut sc = Scenario::new(RuntimeConfig::default());
        let h = sc.add_tooltip("a", AnchorRect::new(10, 10, 13, 11), "x");
        let (x, y) = h.center();
        assert!(h.bounds.contains(x, y));
        assert_eq!(sc.handles().len(), 1);
        assert_eq!(sc.step().painted, Some(0));
    }
}
