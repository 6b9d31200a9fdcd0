#![forbid(unsafe_code)]

//! Anchored tooltip with injectable measurement timing.
//!
//! # Lifecycle
//!
//! ```text
//!            anchor present             measure runs
//!   Hidden ─────────────────> ShowingUnmeasured ─────────> ShowingMeasured
//!     ^                              │                            │
//!     └──────────── anchor absent ───┴────────────────────────────┘
//! ```
//!
//! Each absent-to-present transition opens a new show cycle: the container
//! is mounted at the height-0 placement, and a measurement is scheduled in
//! the phase chosen by [`MeasurementTiming`]. The cycle's cancellation token
//! travels with the measurement, so a measurement from a cycle that has
//! already ended never moves anything.
//!
//! With [`MeasurementTiming::PostPaint`] the first painted frame of a cycle
//! shows the unmeasured placement and the next frame shows the corrected
//! one. With [`MeasurementTiming::PrePaint`] the correction lands before the
//! first paint.
//!
//! # Example
//!
//! ```ignore
//! let trigger = Trigger::new("save", AnchorRect::new(100, 50, 140, 80));
//! let tooltip = Tooltip::new(rt.root().clone(), trigger.anchor(), "Save changes")
//!     .timing(MeasurementTiming::PostPaint);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use hovertip_core::geometry::{AnchorRect, Px};
use hovertip_render::content::Content;
use hovertip_render::portal::{NodeId, PortalRoot};
use hovertip_render::style::ContainerStyle;
use hovertip_runtime::{
    CancellationSource, Component, EffectCx, EffectKey, EffectOutcome, MeasurementTiming,
    MountCx, Observable, RenderCx, RenderLatency, Subscription,
};
use tracing::{debug, debug_span, warn};

use crate::placement::place;

const MEASURE: EffectKey = EffectKey(0);

/// Where a tooltip is in its show cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipState {
    /// Nothing mounted.
    #[default]
    Hidden,
    /// Mounted at the height-0 placement; measurement pending.
    ShowingUnmeasured,
    /// Measured; placed from `height`.
    ShowingMeasured { height: Px },
}

impl TooltipState {
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::ShowingUnmeasured => "showing-unmeasured",
            Self::ShowingMeasured { .. } => "showing-measured",
        }
    }
}

type SharedCycle = Rc<RefCell<Option<CancellationSource>>>;

/// A tooltip that follows an anchor published by a trigger.
pub struct Tooltip {
    label: String,
    content: Content,
    root: PortalRoot,
    anchor: Observable<Option<AnchorRect>>,
    timing: Option<MeasurementTiming>,
    latency: Option<RenderLatency>,
    node: Option<NodeId>,
    measured_height: Px,
    cycle: SharedCycle,
    state: Observable<TooltipState>,
    subscription: Option<Subscription>,
}

impl std::fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tooltip")
            .field("label", &self.label)
            .field("timing", &self.timing)
            .field("node", &self.node)
            .field("measured_height", &self.measured_height)
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

impl Tooltip {
    /// Create a tooltip that mounts `content` into `root` while `anchor` is
    /// present.
    #[must_use]
    pub fn new(
        root: PortalRoot,
        anchor: Observable<Option<AnchorRect>>,
        content: impl Into<Content>,
    ) -> Self {
        Self {
            label: "tooltip".to_owned(),
            content: content.into(),
            root,
            anchor,
            timing: None,
            latency: None,
            node: None,
            measured_height: 0,
            cycle: Rc::new(RefCell::new(None)),
            state: Observable::new(TooltipState::Hidden),
            subscription: None,
        }
    }

    /// Label for the portal container and logs.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Measurement timing for this instance. Defaults to the runtime config.
    #[must_use]
    pub fn timing(mut self, timing: MeasurementTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Busy-wait per render pass. Defaults to the runtime config.
    #[must_use]
    pub fn render_latency(mut self, latency: RenderLatency) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Handle observing this tooltip's state. Stays valid after the tooltip
    /// is handed to a runtime.
    #[must_use]
    pub fn state(&self) -> Observable<TooltipState> {
        self.state.clone()
    }

    /// The anchor this tooltip follows.
    #[must_use]
    pub fn anchor(&self) -> Observable<Option<AnchorRect>> {
        self.anchor.clone()
    }

    fn effective_timing(&self) -> MeasurementTiming {
        self.timing.unwrap_or_default()
    }

    fn cycle_is_live(&self) -> bool {
        self.cycle
            .borrow()
            .as_ref()
            .is_some_and(|source| !source.is_cancelled())
    }

    fn end_cycle(&self) {
        if let Some(source) = self.cycle.borrow_mut().take() {
            source.cancel();
        }
    }

    fn transition(&mut self, next: TooltipState) {
        let prev = self.state.get();
        if prev != next {
            debug!(
                target: "hovertip.tooltip",
                tooltip = %self.label,
                from = prev.name(),
                to = next.name(),
                "tooltip state"
            );
        }
        self.state.set(next);
    }

    fn detach_node(&mut self) {
        let Some(node) = self.node.take() else {
            return;
        };
        if let Err(err) = self.root.unmount(node) {
            debug!(target: "hovertip.tooltip", tooltip = %self.label, %err, "container already gone");
        }
    }

    fn hide(&mut self) {
        self.end_cycle();
        self.detach_node();
        self.measured_height = 0;
        self.transition(TooltipState::Hidden);
    }

    /// Open a new show cycle at the height-0 placement.
    fn show(&mut self, anchor: AnchorRect, cx: &mut RenderCx<'_>) {
        self.end_cycle();
        self.detach_node();
        self.measured_height = 0;

        let style = ContainerStyle::overlay(place(anchor, 0));
        let node = self.root.mount(self.label.clone(), self.content.clone(), style);
        self.node = Some(node);

        let source = CancellationSource::new();
        let timing = self.effective_timing();
        cx.schedule(timing.phase(), MEASURE, source.token());
        *self.cycle.borrow_mut() = Some(source);

        debug!(
            target: "hovertip.tooltip",
            tooltip = %self.label,
            %node,
            %timing,
            "show cycle opened"
        );
        self.transition(TooltipState::ShowingUnmeasured);
    }
}

impl Component for Tooltip {
    fn name(&self) -> &str {
        &self.label
    }

    fn mount(&mut self, cx: &mut MountCx<'_>) {
        if self.timing.is_none() {
            self.timing = Some(cx.config().measurement_timing);
        }
        if self.latency.is_none() {
            self.latency = Some(cx.config().render_latency());
        }

        let invalidator = cx.invalidator();
        let cycle = Rc::clone(&self.cycle);
        self.subscription = Some(self.anchor.subscribe(move |anchor| {
            if anchor.is_none() {
                if let Some(source) = cycle.borrow().as_ref() {
                    source.cancel();
                }
            }
            invalidator.invalidate();
        }));
    }

    fn render(&mut self, cx: &mut RenderCx<'_>) {
        let _span = debug_span!(target: "hovertip.tooltip", "tooltip.render", tooltip = %self.label)
            .entered();

        let Some(anchor) = self.anchor.get() else {
            if self.state.get().is_visible() || self.node.is_some() {
                self.hide();
            }
            return;
        };

        self.latency.unwrap_or_default().spin();

        let node = self.node.filter(|_| self.cycle_is_live());
        let Some(node) = node else {
            self.show(anchor, cx);
            return;
        };

        let target = place(anchor, self.measured_height);
        if let Err(err) = self.root.set_transform(node, target) {
            warn!(
                target: "hovertip.tooltip",
                tooltip = %self.label,
                %err,
                "container lost; remounting"
            );
            self.node = None;
            self.show(anchor, cx);
        }
    }

    fn run_effect(&mut self, key: EffectKey, cx: &mut EffectCx<'_>) -> EffectOutcome {
        if key != MEASURE {
            return EffectOutcome::Unchanged;
        }
        let Some(node) = self.node else {
            return EffectOutcome::Unchanged;
        };
        let height = self.root.measure(node).map_or(0, |size| size.height);
        debug!(
            target: "hovertip.tooltip",
            tooltip = %self.label,
            %node,
            height,
            phase = ?cx.phase(),
            "measured"
        );
        let changed = height != self.measured_height;
        self.measured_height = height;
        self.transition(TooltipState::ShowingMeasured { height });
        if changed {
            EffectOutcome::StateChanged
        } else {
            EffectOutcome::Unchanged
        }
    }

    fn unmount(&mut self, _root: &PortalRoot) {
        self.subscription = None;
        self.hide();
    }
}
