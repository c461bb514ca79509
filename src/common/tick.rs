//! Logical time for recency- and window-based policies.
//!
//! There is no global counter: every replay owns a [`Clock`] and hands the
//! current [`Tick`] to the policy on each reference. Runs on different
//! threads therefore never observe each other's time.

use std::fmt;

/// A point on a replay's logical clock.
///
/// `Tick(0)` is "before the first reference"; the first reference of a run
/// is stamped `Tick(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tick(pub u64);

impl Tick {
    /// The tick before any reference.
    pub const ZERO: Tick = Tick(0);

    /// Start of a trailing window of `width` ticks ending at `self`.
    ///
    /// Timestamps strictly older than the returned tick are outside the
    /// window. Saturates at zero early in a run.
    #[inline]
    pub fn window_start(self, width: u64) -> Tick {
        Tick(self.0.saturating_sub(width))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Monotonic per-run clock.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    now: Tick,
}

impl Clock {
    /// Create a clock at [`Tick::ZERO`].
    pub fn new() -> Self {
        Self { now: Tick::ZERO }
    }

    /// Advance by one and return the new time.
    #[inline]
    pub fn advance(&mut self) -> Tick {
        self.now = Tick(self.now.0 + 1);
        self.now
    }

    /// Current time without advancing.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }
}
