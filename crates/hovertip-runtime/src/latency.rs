#![forbid(unsafe_code)]

//! Simulated render latency.
//!
//! A busy-wait inside a render pass stretches the gap between commit and
//! paint so the difference between pre-paint and post-paint measurement is
//! visible to a human. It blocks the UI thread on purpose. Zero by default;
//! tests leave it at zero.

use web_time::{Duration, Instant};

/// Busy-wait applied at the start of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderLatency(Duration);

impl RenderLatency {
    pub const NONE: Self = Self(Duration::ZERO);

    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    #[must_use]
    pub const fn duration(self) -> Duration {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Spin until the configured duration has elapsed.
    pub fn spin(self) {
        if self.is_zero() {
            return;
        }
        let start = Instant::now();
        while start.elapsed() < self.0 {
            std::hint::spin_loop();
        }
    }
}
