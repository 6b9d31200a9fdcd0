#![forbid(unsafe_code)]

//! Show-cycle cancellation.
//!
//! Every time a tooltip goes from hidden to shown it opens a show cycle and
//! a [`CancellationSource`] for it. Effects scheduled during the cycle carry
//! a [`CancellationToken`]; the runtime drops any effect whose token reports
//! cancelled instead of running it. Ending a cycle is therefore enough to
//! neutralize a measurement that is still queued.
//!
//! ```
//! use hovertip_runtime::cancellation::CancellationSource;
//!
//! let cycle = CancellationSource::new();
//! let pending_measure = cycle.token();
//! assert!(cycle.cancel());
//! assert!(pending_measure.is_cancelled());
//! assert!(!cycle.cancel());
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Owning end of a cycle's cancellation flag.
///
/// Not `Clone`: one cycle, one owner. Dropping the source leaves its tokens
/// live.
pub struct CancellationSource {
    flag: Rc<Cell<bool>>,
}

/// Observing end handed to scheduled effects.
#[derive(Clone)]
pub struct CancellationToken {
    flag: Rc<Cell<bool>>,
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Rc::new(Cell::new(false)),
        }
    }

    /// A token tied to this source.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            flag: Rc::clone(&self.flag),
        }
    }

    /// End the cycle. Returns `false` if it had already ended.
    pub fn cancel(&self) -> bool {
        !self.flag.replace(true)
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }

    /// Tokens still alive besides the source itself.
    #[must_use]
    pub fn outstanding_tokens(&self) -> usize {
        Rc::strong_count(&self.flag) - 1
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationSource")
            .field("cancelled", &self.is_cancelled())
            .field("tokens", &self.outstanding_tokens())
            .finish()
    }
}

impl CancellationToken {
    /// Token for effects that belong to no cycle.
    #[must_use]
    pub fn never() -> Self {
        Self {
            flag: Rc::new(Cell::new(false)),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CancellationToken({})", if self.is_cancelled() { "cancelled" } else { "live" })
    }
}
