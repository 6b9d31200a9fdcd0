#![forbid(unsafe_code)]

//! The component contract between widgets and the runtime.
//!
//! A [`Component`] renders into the portal root, schedules effects while
//! rendering, and later runs those effects when the runtime reaches their
//! phase. State changes made outside a render (a subscription firing, an
//! effect result) are reported back through an [`Invalidator`] or an
//! [`EffectOutcome`] so the runtime knows what to re-render.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use hovertip_core::event::HoverEvent;
use hovertip_core::geometry::AnchorRect;
use hovertip_render::portal::PortalRoot;

use crate::cancellation::CancellationToken;
use crate::config::RuntimeConfig;
use crate::schedule::{EffectKey, EffectPhase, EffectQueue, EffectRequest};

/// Identifier of a component registered with a runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

pub(crate) type DirtySet = Rc<RefCell<BTreeSet<ComponentId>>>;

/// Handle a component keeps to request a re-render of itself.
#[derive(Clone)]
pub struct Invalidator {
    id: ComponentId,
    dirty: DirtySet,
}

impl Invalidator {
    pub(crate) fn new(id: ComponentId, dirty: DirtySet) -> Self {
        Self { id, dirty }
    }

    /// Mark the owning component for re-render in the next pass.
    pub fn invalidate(&self) {
        self.dirty.borrow_mut().insert(self.id);
    }

    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }
}

impl fmt::Debug for Invalidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invalidator").field("id", &self.id).finish()
    }
}

/// Result of running an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    /// State changed; the owner must re-render.
    StateChanged,
    /// Nothing observable changed.
    Unchanged,
}

/// Context passed once when a component is added.
pub struct MountCx<'a> {
    pub(crate) invalidator: Invalidator,
    pub(crate) config: &'a RuntimeConfig,
}

impl MountCx<'_> {
    /// Handle for requesting re-renders from outside a render pass.
    #[must_use]
    pub fn invalidator(&self) -> Invalidator {
        self.invalidator.clone()
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        self.config
    }
}

/// Context for a render pass.
pub struct RenderCx<'a> {
    pub(crate) id: ComponentId,
    pub(crate) root: &'a PortalRoot,
    pub(crate) config: &'a RuntimeConfig,
    pub(crate) pre_paint: &'a mut EffectQueue,
    pub(crate) post_paint: &'a mut EffectQueue,
}

impl RenderCx<'_> {
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The portal root this runtime commits into.
    #[must_use]
    pub fn root(&self) -> &PortalRoot {
        self.root
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        self.config
    }

    /// Schedule an effect for this component.
    ///
    /// The effect is dropped unrun if `token` is cancelled by the time its
    /// phase arrives.
    pub fn schedule(&mut self, phase: EffectPhase, key: EffectKey, token: CancellationToken) {
        let request = EffectRequest {
            owner: self.id,
            key,
            token,
        };
        match phase {
            EffectPhase::PrePaint => self.pre_paint.push(request),
            EffectPhase::PostPaint => self.post_paint.push(request),
        }
    }
}

/// Context for running a scheduled effect.
pub struct EffectCx<'a> {
    pub(crate) id: ComponentId,
    pub(crate) root: &'a PortalRoot,
    pub(crate) phase: EffectPhase,
}

impl EffectCx<'_> {
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[must_use]
    pub fn root(&self) -> &PortalRoot {
        self.root
    }

    /// The phase this effect is running in.
    #[must_use]
    pub fn phase(&self) -> EffectPhase {
        self.phase
    }
}

/// Something the runtime renders and routes input to.
pub trait Component {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Called once when the component is added to a runtime.
    fn mount(&mut self, _cx: &mut MountCx<'_>) {}

    /// Reconcile the component's portal nodes with its current state.
    fn render(&mut self, cx: &mut RenderCx<'_>);

    /// Run an effect scheduled by an earlier render.
    fn run_effect(&mut self, _key: EffectKey, _cx: &mut EffectCx<'_>) -> EffectOutcome {
        EffectOutcome::Unchanged
    }

    /// Region that receives hover events, in viewport pixels.
    fn hit_region(&self) -> Option<AnchorRect> {
        None
    }

    /// Pointer entered or left [`hit_region`](Self::hit_region).
    fn on_hover(&mut self, _event: HoverEvent) {}

    /// Tear down portal nodes. Called when the component is removed.
    fn unmount(&mut self, _root: &PortalRoot) {}
}
