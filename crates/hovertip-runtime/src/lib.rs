#![forbid(unsafe_code)]

//! hovertip runtime
//!
//! This crate drives components through a cooperative, single-threaded
//! frame loop with two effect phases on either side of paint.
//!
//! # Key Components
//!
//! - [`UiRuntime`] - Frame loop, pointer routing, and paint recording
//! - [`Component`] - Trait for anything that renders into the portal root
//! - [`MeasurementTiming`] - Whether a component's measurement runs before or after paint
//! - [`CancellationSource`] - Discards effects that outlive their show cycle
//! - [`Observable`] - Shared, versioned state with change notification
//! - [`RuntimeConfig`] - Tunables loaded from TOML or JSON
//!
//! # Frame anatomy
//!
//! ```text
//!   flush post-paint effects queued by the previous frame
//!   ┌─> render dirty components (commit to portal root)
//!   └── run pre-paint effects; any state change re-renders before paint
//!   paint (snapshot portal root into the frame log)
//!   queue post-paint effects for the next frame
//! ```

pub mod cancellation;
pub mod component;
pub mod config;
pub mod latency;
pub mod reactive;
pub mod runtime;
pub mod schedule;

pub use cancellation::{CancellationSource, CancellationToken};
pub use component::{
    Component, ComponentId, EffectCx, EffectOutcome, Invalidator, MountCx, RenderCx,
};
pub use config::{ConfigError, RuntimeConfig};
pub use latency::RenderLatency;
pub use reactive::{Observable, Subscription};
pub use runtime::{FrameReport, RuntimeStats, UiRuntime};
pub use schedule::{EffectKey, EffectPhase, EffectQueue, EffectRequest, MeasurementTiming};
