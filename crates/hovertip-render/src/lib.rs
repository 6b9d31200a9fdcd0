#![forbid(unsafe_code)]

//! Render kernel: the portal root, container styles, content layout, and
//! painted frames.
//!
//! # Role in hovertip
//! `hovertip-render` is the display tree for overlays. Components commit
//! containers into a [`PortalRoot`]; the runtime paints the root into a
//! [`PaintedFrame`] after each render/commit cycle. Only painted frames are
//! visible to observers, which is what makes pre-paint and post-paint
//! measurement distinguishable.
//!
//! # Primary responsibilities
//! - **PortalRoot**: shared mount point, one container per overlay instance.
//! - **ContainerStyle**: absolute positioning, translation, inert pointer
//!   behavior.
//! - **Content**: opaque text payload with deterministic layout metrics.
//! - **PaintedFrame / FrameLog**: the post-paint record of what was shown.

pub mod content;
pub mod frame;
pub mod portal;
pub mod style;

pub use content::{Content, ContentMetrics};
pub use frame::{FrameLog, PaintedFrame, PaintedLayer};
pub use portal::{NodeId, PortalError, PortalRoot};
pub use style::{ContainerStyle, NodeFlags};
