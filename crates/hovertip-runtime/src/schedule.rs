#![forbid(unsafe_code)]

//! Effect scheduling relative to paint.
//!
//! Components schedule effects while rendering. Each effect carries the
//! phase it runs in, the component that owns it, an effect key the owner
//! uses to dispatch it, and a cancellation token for its show cycle.
//!
//! | Phase | Runs | Observable first frame |
//! |-------|------|------------------------|
//! | [`EffectPhase::PrePaint`] | after commit, before the paint of the same frame | corrected |
//! | [`EffectPhase::PostPaint`] | at the start of the next frame, after paint | uncorrected, then corrected |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cancellation::CancellationToken;
use crate::component::ComponentId;

/// When a component's layout measurement runs relative to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasurementTiming {
    /// Measure after the frame is painted (deferred). The first frame of a
    /// show cycle is painted from an unmeasured height.
    PostPaint,
    /// Measure after commit but before paint. The corrected position is the
    /// first one painted.
    #[default]
    PrePaint,
}

impl MeasurementTiming {
    /// The effect phase measurements are scheduled in.
    #[must_use]
    pub const fn phase(self) -> EffectPhase {
        match self {
            Self::PostPaint => EffectPhase::PostPaint,
            Self::PrePaint => EffectPhase::PrePaint,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostPaint => "post-paint",
            Self::PrePaint => "pre-paint",
        }
    }
}

impl fmt::Display for MeasurementTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MeasurementTiming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post-paint" => Ok(Self::PostPaint),
            "pre-paint" => Ok(Self::PrePaint),
            other => Err(format!(
                "unknown measurement timing `{other}` (expected `post-paint` or `pre-paint`)"
            )),
        }
    }
}

/// The slot in the frame an effect runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectPhase {
    PrePaint,
    PostPaint,
}

/// Owner-defined discriminator for an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectKey(pub u32);

/// An effect waiting for its phase.
#[derive(Debug, Clone)]
pub struct EffectRequest {
    pub owner: ComponentId,
    pub key: EffectKey,
    pub token: CancellationToken,
}

/// FIFO of effects for one phase.
#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: Vec<EffectRequest>,
}

impl EffectQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: EffectRequest) {
        self.pending.push(request);
    }

    /// Take every queued effect, oldest first.
    pub fn drain(&mut self) -> Vec<EffectRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Drop every effect owned by `owner`, returning how many were dropped.
    pub fn remove_owner(&mut self, owner: ComponentId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|r| r.owner != owner);
        before - self.pending.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
