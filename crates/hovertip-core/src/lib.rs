#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and logging bootstrap.
//!
//! # Role in hovertip
//! `hovertip-core` holds the vocabulary every other crate speaks: pixel
//! rectangles for anchors, translations for placed overlays, and the
//! pointer events the runtime routes to triggers.
//!
//! # How it fits in the system
//! The render crate (`hovertip-render`) positions portal containers using
//! [`geometry::Translation`]; the runtime (`hovertip-runtime`) consumes
//! [`event::Event`] values and turns raw pointer motion into hover
//! enter/leave notifications.

pub mod event;
pub mod geometry;
#[cfg(feature = "logging")]
pub mod logging;

pub use event::{Event, HoverEvent, PointerEvent, PointerEventKind};
pub use geometry::{AnchorRect, Px, Size, Translation};
