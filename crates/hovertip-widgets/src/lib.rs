#![forbid(unsafe_code)]

//! Overlay widgets for hovertip.
//!
//! A [`Trigger`] publishes its bounding box as an anchor while hovered. A
//! [`Tooltip`] reads that anchor, mounts its content into a shared
//! [`PortalRoot`](hovertip_render::PortalRoot), and places itself above the
//! anchor, flipping below when it would cross the top of the viewport.
//!
//! The tooltip measures its own height to place itself. Whether that
//! measurement runs before or after paint is a [`MeasurementTiming`]
//! strategy injected per instance or taken from the runtime config.
//!
//! [`MeasurementTiming`]: hovertip_runtime::MeasurementTiming

pub mod placement;
pub mod tooltip;
pub mod trigger;

pub use placement::{Side, place, side};
pub use tooltip::{Tooltip, TooltipState};
pub use trigger::Trigger;
