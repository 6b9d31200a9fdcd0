#![forbid(unsafe_code)]

//! Cooperative frame loop.
//!
//! [`UiRuntime`] owns a set of components, the portal root they commit into,
//! and the two effect queues that sit on either side of paint. Everything
//! runs on the calling thread; there is no background work.
//!
//! # Frame contract
//!
//! 1. Post-paint effects queued during the previous frame run first. Their
//!    tokens are checked here, so any show cycle that ended between frames
//!    has its effects discarded.
//! 2. Dirty components render. Pre-paint effects scheduled by those renders
//!    run immediately after, and any state they change re-renders the owner
//!    in another pass, all before paint. Passes are capped by
//!    `max_sync_passes`.
//! 3. If anything rendered, the portal root is painted into the frame log.
//!    Observers only ever see painted frames.
//!
//! # Example
//!
//! ```ignore
//! let mut rt = UiRuntime::new(RuntimeConfig::default());
//! let trigger = Trigger::new("save", AnchorRect::new(100, 50, 140, 80));
//! let tooltip = Tooltip::new(rt.root().clone(), trigger.anchor(), "Save changes");
//! rt.add(trigger);
//! rt.add(tooltip);
//! rt.dispatch(PointerEvent::moved(110, 60).into());
//! rt.run_until_idle(8);
//! ```

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use hovertip_core::event::{Event, HoverEvent, PointerEventKind};
use hovertip_render::frame::FrameLog;
use hovertip_render::portal::PortalRoot;
use tracing::{debug, debug_span, warn};
use web_time::Instant;

use crate::component::{
    Component, ComponentId, DirtySet, EffectCx, EffectOutcome, Invalidator, MountCx, RenderCx,
};
use crate::config::RuntimeConfig;
use crate::schedule::{EffectPhase, EffectQueue, EffectRequest};

/// What one call to [`UiRuntime::run_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Index of the painted frame, if one was painted.
    pub painted: Option<u64>,
    /// Render passes before paint.
    pub passes: u32,
    pub pre_paint_effects: usize,
    pub post_paint_effects: usize,
    /// Effects dropped because their cycle was cancelled or owner removed.
    pub discarded: usize,
    /// Whether the pass cap cut the frame short.
    pub pass_cap_hit: bool,
}

/// Monotonic counters for the lifetime of a runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeStats {
    pub frames_painted: u64,
    pub render_passes: u64,
    pub pre_paint_effects_run: u64,
    pub post_paint_effects_run: u64,
    pub effects_discarded: u64,
}

struct Slot {
    id: ComponentId,
    component: Box<dyn Component>,
}

/// Single-threaded frame loop with pre-paint and post-paint effect phases.
pub struct UiRuntime {
    config: RuntimeConfig,
    root: PortalRoot,
    components: Vec<Slot>,
    dirty: DirtySet,
    pre_paint: EffectQueue,
    post_paint: EffectQueue,
    frames: FrameLog,
    hovered: Option<ComponentId>,
    next_id: u32,
    next_frame: u64,
    started: Instant,
    stats: RuntimeStats,
}

impl std::fmt::Debug for UiRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiRuntime")
            .field("components", &self.components.len())
            .field("dirty", &self.dirty.borrow().len())
            .field("pre_paint", &self.pre_paint.len())
            .field("post_paint", &self.post_paint.len())
            .field("frames", &self.frames.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl UiRuntime {
    /// Create a runtime with its own portal root sized from `config`.
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        let root = PortalRoot::new(config.viewport, config.content);
        Self::with_root(config, root)
    }

    /// Create a runtime committing into an existing portal root.
    #[must_use]
    pub fn with_root(config: RuntimeConfig, root: PortalRoot) -> Self {
        Self {
            config,
            root,
            components: Vec::new(),
            dirty: Rc::new(RefCell::new(BTreeSet::new())),
            pre_paint: EffectQueue::new(),
            post_paint: EffectQueue::new(),
            frames: FrameLog::new(),
            hovered: None,
            next_id: 0,
            next_frame: 0,
            started: Instant::now(),
            stats: RuntimeStats::default(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &PortalRoot {
        &self.root
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Every frame painted so far.
    #[must_use]
    pub fn frames(&self) -> &FrameLog {
        &self.frames
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    #[must_use]
    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }

    /// Component currently under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<ComponentId> {
        self.hovered
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Whether another frame has work to do.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.dirty.borrow().is_empty() || !self.post_paint.is_empty()
    }

    /// Effects waiting for the next frame's post-paint flush.
    #[must_use]
    pub fn pending_post_paint(&self) -> usize {
        self.post_paint.len()
    }

    /// Register a component. It renders in the next frame.
    pub fn add(&mut self, component: impl Component + 'static) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        let mut component: Box<dyn Component> = Box::new(component);
        let mut cx = MountCx {
            invalidator: Invalidator::new(id, Rc::clone(&self.dirty)),
            config: &self.config,
        };
        component.mount(&mut cx);
        debug!(target: "hovertip.runtime", component = %id, name = component.name(), "component added");
        self.components.push(Slot { id, component });
        self.dirty.borrow_mut().insert(id);
        id
    }

    /// Remove a component, tearing down its portal nodes and dropping its
    /// queued effects.
    pub fn remove(&mut self, id: ComponentId) -> bool {
        let Some(index) = self.components.iter().position(|s| s.id == id) else {
            return false;
        };
        let mut slot = self.components.remove(index);
        slot.component.unmount(&self.root);
        let dropped = self.pre_paint.remove_owner(id) + self.post_paint.remove_owner(id);
        self.stats.effects_discarded += dropped as u64;
        self.dirty.borrow_mut().remove(&id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        debug!(
            target: "hovertip.runtime",
            component = %id,
            dropped_effects = dropped,
            "component removed"
        );
        true
    }

    /// Feed an input event.
    ///
    /// Pointer motion is hit-tested against interactive portal nodes first,
    /// then against component hit regions (topmost, i.e. last added, wins).
    /// Inert portal nodes are transparent to the pointer. Returns whether the
    /// hovered component changed.
    pub fn dispatch(&mut self, event: Event) -> bool {
        match event {
            Event::Pointer(pointer) => {
                let target = match pointer.kind {
                    PointerEventKind::Left => None,
                    PointerEventKind::Moved => {
                        if self.root.hit_test(pointer.x, pointer.y).is_some() {
                            None
                        } else {
                            self.components
                                .iter()
                                .rev()
                                .find(|s| {
                                    s.component
                                        .hit_region()
                                        .is_some_and(|r| r.contains(pointer.x, pointer.y))
                                })
                                .map(|s| s.id)
                        }
                    }
                };
                self.set_hovered(target)
            }
            Event::Resize(size) => {
                self.root.set_viewport(size);
                let mut dirty = self.dirty.borrow_mut();
                dirty.extend(self.components.iter().map(|s| s.id));
                false
            }
        }
    }

    fn set_hovered(&mut self, target: Option<ComponentId>) -> bool {
        if target == self.hovered {
            return false;
        }
        if let Some(prev) = self.hovered.take() {
            self.send_hover(prev, HoverEvent::Leave);
        }
        if let Some(next) = target {
            self.send_hover(next, HoverEvent::Enter);
        }
        self.hovered = target;
        true
    }

    fn send_hover(&mut self, id: ComponentId, event: HoverEvent) {
        if let Some(slot) = self.components.iter_mut().find(|s| s.id == id) {
            debug!(target: "hovertip.runtime", component = %id, ?event, "hover");
            slot.component.on_hover(event);
        }
    }

    /// Run one frame. See the module docs for the phase order.
    pub fn run_frame(&mut self) -> FrameReport {
        let frame = self.next_frame;
        let span = debug_span!(
            target: "hovertip.runtime",
            "runtime.frame",
            frame,
            passes = tracing::field::Empty,
            pre_paint_effects = tracing::field::Empty,
            post_paint_effects = tracing::field::Empty,
            discarded = tracing::field::Empty,
        );
        let _guard = span.enter();
        let mut report = FrameReport::default();

        let post = self.post_paint.drain();
        let ran = self.run_effects(post, EffectPhase::PostPaint, &mut report);
        report.post_paint_effects = ran;

        while !self.dirty.borrow().is_empty() {
            if report.passes >= self.config.max_sync_passes {
                warn!(
                    target: "hovertip.runtime",
                    frame,
                    max_sync_passes = self.config.max_sync_passes,
                    "pre-paint re-render loop hit its pass cap; painting anyway"
                );
                report.pass_cap_hit = true;
                break;
            }
            report.passes += 1;
            self.render_dirty();
            let pre = self.pre_paint.drain();
            let ran = self.run_effects(pre, EffectPhase::PrePaint, &mut report);
            report.pre_paint_effects += ran;
        }
        self.stats.render_passes += u64::from(report.passes);

        span.record("passes", report.passes);
        span.record("pre_paint_effects", report.pre_paint_effects);
        span.record("post_paint_effects", report.post_paint_effects);
        span.record("discarded", report.discarded);

        if report.passes == 0 {
            return report;
        }

        let painted = self.root.paint(frame, self.started.elapsed());
        debug!(
            target: "hovertip.runtime",
            frame,
            layers = painted.layers.len(),
            "frame painted"
        );
        self.frames.push(painted);
        self.next_frame += 1;
        self.stats.frames_painted += 1;
        report.painted = Some(frame);
        report
    }

    /// Run frames until nothing is pending or `max_frames` frames have run.
    ///
    /// Returns the number of frames painted.
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut painted = 0;
        for _ in 0..max_frames {
            if !self.has_pending_work() {
                break;
            }
            if self.run_frame().painted.is_some() {
                painted += 1;
            }
        }
        painted
    }

    fn render_dirty(&mut self) {
        let dirty = std::mem::take(&mut *self.dirty.borrow_mut());
        let Self {
            components,
            root,
            config,
            pre_paint,
            post_paint,
            ..
        } = self;
        for slot in components.iter_mut().filter(|s| dirty.contains(&s.id)) {
            let mut cx = RenderCx {
                id: slot.id,
                root: &*root,
                config: &*config,
                pre_paint: &mut *pre_paint,
                post_paint: &mut *post_paint,
            };
            slot.component.render(&mut cx);
        }
    }

    fn run_effects(
        &mut self,
        requests: Vec<EffectRequest>,
        phase: EffectPhase,
        report: &mut FrameReport,
    ) -> usize {
        let mut ran = 0;
        for request in requests {
            let slot = self.components.iter_mut().find(|s| s.id == request.owner);
            let Some(slot) = slot.filter(|_| !request.token.is_cancelled()) else {
                debug!(
                    target: "hovertip.runtime",
                    component = %request.owner,
                    phase = ?phase,
                    "discarding effect from an ended cycle"
                );
                report.discarded += 1;
                self.stats.effects_discarded += 1;
                continue;
            };
            let mut cx = EffectCx {
                id: slot.id,
                root: &self.root,
                phase,
            };
            if slot.component.run_effect(request.key, &mut cx) == EffectOutcome::StateChanged {
                self.dirty.borrow_mut().insert(slot.id);
            }
            ran += 1;
        }
        match phase {
            EffectPhase::PrePaint => self.stats.pre_paint_effects_run += ran as u64,
            EffectPhase::PostPaint => self.stats.post_paint_effects_run += ran as u64,
        }
        ran
    }
}
