//! Replay statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::simulation::ProcessOutcome;

/// Counters accumulated across replays.
///
/// All fields are atomic so parallel replays can share one instance
/// without locks.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
/// - Totals are only read after the replays have joined
///
/// # Example
/// ```
/// use pagereplay::ReplayStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = ReplayStats::new();
/// stats.faults.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.faults.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug, Default)]
pub struct ReplayStats {
    /// References replayed.
    pub references: AtomicU64,

    /// References that found their page resident.
    pub hits: AtomicU64,

    /// References that missed.
    pub faults: AtomicU64,

    /// Pages removed to make room.
    pub evictions: AtomicU64,

    /// Faults that loaded a page while already at capacity.
    pub overflow_loads: AtomicU64,
}

impl ReplayStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the counters of one finished replay.
    pub fn record(&self, outcome: &ProcessOutcome) {
        self.references
            .fetch_add(outcome.hits + outcome.faults, Ordering::Relaxed);
        self.hits.fetch_add(outcome.hits, Ordering::Relaxed);
        self.faults.fetch_add(outcome.faults, Ordering::Relaxed);
        self.evictions.fetch_add(outcome.evictions, Ordering::Relaxed);
        self.overflow_loads
            .fetch_add(outcome.overflow_loads, Ordering::Relaxed);
    }

    /// Fraction of references that faulted (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        self.snapshot().fault_rate()
    }

    /// Get a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            references: self.references.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            overflow_loads: self.overflow_loads.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.references.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.faults.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.overflow_loads.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time copy of [`ReplayStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub references: u64,
    pub hits: u64,
    pub faults: u64,
    pub evictions: u64,
    pub overflow_loads: u64,
}

impl StatsSnapshot {
    /// Fraction of references that faulted (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.faults as f64 / self.references as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ references: {}, hits: {}, faults: {}, evictions: {}, \
             overflow: {}, fault_rate: {:.2}% }}",
            self.references,
            self.hits,
            self.faults,
            self.evictions,
            self.overflow_loads,
            self.fault_rate() * 100.0
        )
    }
}
