#![forbid(unsafe_code)]

//! Shared portal root for overlays.
//!
//! # Design
//!
//! [`PortalRoot`] is a handle to reference-counted, single-threaded storage
//! (`Rc<RefCell<..>>`). Cloning the handle shares the same tree, so every
//! overlay instance given the same handle mounts into the same root, while
//! two independently created roots never see each other's nodes.
//!
//! Each instance owns the [`NodeId`] it mounted and is the only party that
//! mutates or unmounts it. Nodes are kept in mount order; later nodes stack
//! above earlier ones for painting and hit testing.
//!
//! # Invariants
//!
//! 1. Node ids are never reused within a root.
//! 2. `mutation_count` increments by exactly 1 for every mount, unmount,
//!    transform change, or content change that alters the tree.
//! 3. Inert nodes never win a hit test.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use hovertip_core::geometry::{AnchorRect, Px, Size, Translation};
use tracing::trace;
use web_time::Duration;

use crate::content::{Content, ContentMetrics};
use crate::frame::{PaintedFrame, PaintedLayer};
use crate::style::ContainerStyle;

/// Identifier of a container mounted in a portal root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Get the raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Errors from portal mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PortalError {
    /// The node was never mounted here or has been unmounted.
    #[error("{0} is not mounted in this portal root")]
    NotMounted(NodeId),
}

#[derive(Debug)]
struct PortalNode {
    id: NodeId,
    label: String,
    content: Content,
    style: ContainerStyle,
}

#[derive(Debug)]
struct PortalTree {
    nodes: Vec<PortalNode>,
    next_id: u64,
    viewport: Size,
    metrics: ContentMetrics,
    mutations: u64,
}

impl PortalTree {
    fn node(&self, id: NodeId) -> Result<&PortalNode, PortalError> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or(PortalError::NotMounted(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut PortalNode, PortalError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(PortalError::NotMounted(id))
    }
}

/// Handle to a shared overlay mount point.
#[derive(Clone)]
pub struct PortalRoot {
    inner: Rc<RefCell<PortalTree>>,
}

impl fmt::Debug for PortalRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.inner.borrow();
        f.debug_struct("PortalRoot")
            .field("nodes", &tree.nodes.len())
            .field("viewport", &tree.viewport)
            .field("mutations", &tree.mutations)
            .finish()
    }
}

impl Default for PortalRoot {
    fn default() -> Self {
        Self::new(Size::new(1280, 720), ContentMetrics::default())
    }
}

impl PortalRoot {
    /// Create an empty root.
    #[must_use]
    pub fn new(viewport: Size, metrics: ContentMetrics) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PortalTree {
                nodes: Vec::new(),
                next_id: 1,
                viewport,
                metrics,
                mutations: 0,
            })),
        }
    }

    /// Whether two handles refer to the same root.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Mount a container on top of the stack.
    pub fn mount(
        &self,
        label: impl Into<String>,
        content: Content,
        style: ContainerStyle,
    ) -> NodeId {
        let mut tree = self.inner.borrow_mut();
        let id = NodeId(tree.next_id);
        tree.next_id += 1;
        tree.mutations += 1;
        let label = label.into();
        trace!(
            target: "hovertip.render",
            node = %id,
            label = %label,
            x = style.transform.x,
            y = style.transform.y,
            "portal mount"
        );
        tree.nodes.push(PortalNode {
            id,
            label,
            content,
            style,
        });
        id
    }

    /// Remove a container.
    pub fn unmount(&self, id: NodeId) -> Result<(), PortalError> {
        let mut tree = self.inner.borrow_mut();
        let index = tree
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(PortalError::NotMounted(id))?;
        tree.nodes.remove(index);
        tree.mutations += 1;
        trace!(target: "hovertip.render", node = %id, "portal unmount");
        Ok(())
    }

    /// Move a container. Setting the current translation is not a mutation.
    pub fn set_transform(&self, id: NodeId, transform: Translation) -> Result<(), PortalError> {
        let mut tree = self.inner.borrow_mut();
        let node = tree.node_mut(id)?;
        if node.style.transform == transform {
            return Ok(());
        }
        node.style.transform = transform;
        tree.mutations += 1;
        trace!(
            target: "hovertip.render",
            node = %id,
            x = transform.x,
            y = transform.y,
            "portal transform"
        );
        Ok(())
    }

    /// Replace a container's content. Identical content is not a mutation.
    pub fn set_content(&self, id: NodeId, content: Content) -> Result<(), PortalError> {
        let mut tree = self.inner.borrow_mut();
        let node = tree.node_mut(id)?;
        if node.content == content {
            return Ok(());
        }
        node.content = content;
        tree.mutations += 1;
        Ok(())
    }

    /// Current style of a container.
    pub fn style(&self, id: NodeId) -> Result<ContainerStyle, PortalError> {
        self.inner.borrow().node(id).map(|n| n.style)
    }

    /// Read the laid-out box of a mounted container's content.
    ///
    /// Returns `None` when the node is not attached to this root.
    #[must_use]
    pub fn measure(&self, id: NodeId) -> Option<Size> {
        let tree = self.inner.borrow();
        let node = tree.node(id).ok()?;
        Some(node.content.layout(&tree.metrics))
    }

    /// Whether `id` is currently mounted.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.borrow().node(id).is_ok()
    }

    /// Number of mounted containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().nodes.is_empty()
    }

    /// Mounted node ids in stacking order (bottom first).
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.inner.borrow().nodes.iter().map(|n| n.id).collect()
    }

    /// Total tree mutations so far.
    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.inner.borrow().mutations
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.inner.borrow().viewport
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.inner.borrow_mut().viewport = viewport;
    }

    #[must_use]
    pub fn metrics(&self) -> ContentMetrics {
        self.inner.borrow().metrics
    }

    /// Topmost interactive container under `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: Px, y: Px) -> Option<NodeId> {
        let tree = self.inner.borrow();
        tree.nodes
            .iter()
            .rev()
            .filter(|n| !n.style.is_inert())
            .find(|n| {
                let size = n.content.layout(&tree.metrics);
                AnchorRect::from_origin_size(0, 0, size.width, size.height)
                    .translated(n.style.transform)
                    .contains(x, y)
            })
            .map(|n| n.id)
    }

    /// Snapshot the tree as the frame an observer sees.
    #[must_use]
    pub fn paint(&self, index: u64, painted_at: Duration) -> PaintedFrame {
        let tree = self.inner.borrow();
        let layers = tree
            .nodes
            .iter()
            .map(|n| {
                let size = n.content.layout(&tree.metrics);
                PaintedLayer {
                    node: n.id,
                    label: n.label.clone(),
                    translation: n.style.transform,
                    size,
                    inert: n.style.is_inert(),
                    lines: n.content.lines().to_vec(),
                }
            })
            .collect();
        PaintedFrame {
            index,
            painted_at,
            viewport: tree.viewport,
            layers,
        }
    }
}
