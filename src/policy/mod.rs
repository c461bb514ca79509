//! Page-replacement policies.
//!
//! Six algorithms share one calling convention: the driver hands each
//! reference to [`ReplacementPolicy::on_reference`] together with the
//! process's [`MemoryState`]; the policy decides hit or fault, evicts if it
//! has to, loads the page and counts the fault.
//!
//! | Name              | Type                 | Param | Evicts on a full fault                  |
//! |-------------------|----------------------|-------|-----------------------------------------|
//! | `LIFO`            | [`LifoPolicy`]       | -     | most recently loaded page               |
//! | `MRU`             | [`MruPolicy`]        | -     | least recently used page (see docs)     |
//! | `OPT-Lookahead-X` | [`LookaheadPolicy`]  | L     | no use in the window, else farthest     |
//! | `LFU`             | [`LfuPolicy`]        | -     | front of the frequency list             |
//! | `LRU-X`           | [`LruXPolicy`]       | X     | earliest X-th most recent use, if any   |
//! | `WS`              | [`WorkingSetPolicy`] | τ     | oldest page that fell out of the window |
//!
//! The set is closed: [`Policy`] is an enum over exactly these types and
//! [`PolicyKind`] is the name table the factory matches against.

mod lfu;
mod lifo;
mod lookahead;
mod lru_x;
mod mru;
mod working_set;

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, PageId, Result, Tick};
use crate::memory::MemoryState;

pub use lfu::LfuPolicy;
pub use lifo::LifoPolicy;
pub use lookahead::{LookaheadAnchor, LookaheadPolicy};
pub use lru_x::LruXPolicy;
pub use mru::MruPolicy;
pub use working_set::{WorkingSetBounds, WorkingSetPolicy};

/// One reference as seen by a policy.
#[derive(Debug, Clone, Copy)]
pub struct Reference<'a> {
    /// Page being referenced.
    pub page: PageId,

    /// Logical time of this reference.
    pub tick: Tick,

    /// Index of this reference in `sequence`.
    pub position: usize,

    /// The whole reference sequence of the process being replayed.
    pub sequence: &'a [PageId],
}

/// What a reference did to memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Page was resident.
    Hit,
    /// Page was loaded. `evicted` is the page removed to make room, if any.
    Fault { evicted: Option<PageId> },
}

impl Access {
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, Access::Fault { .. })
    }

    #[inline]
    pub fn evicted(&self) -> Option<PageId> {
        match self {
            Access::Fault { evicted } => *evicted,
            Access::Hit => None,
        }
    }
}

/// Common interface of every replacement policy.
pub trait ReplacementPolicy {
    /// Apply one reference to `memory`.
    ///
    /// Must count exactly one fault on a miss and none on a hit.
    fn on_reference(&mut self, memory: &mut MemoryState, reference: &Reference<'_>) -> Access;

    /// Whether this policy may return with more pages resident than frames.
    fn allows_overflow(&self) -> bool {
        false
    }

    /// Min/max working-set size observed so far, for policies that track it.
    fn working_set_bounds(&self) -> Option<WorkingSetBounds> {
        None
    }
}

/// Names accepted by the policy factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Lifo,
    Mru,
    OptLookahead,
    Lfu,
    LruX,
    WorkingSet,
}

impl PolicyKind {
    /// Every policy, in the order a comparison run reports them.
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Lifo,
        PolicyKind::Mru,
        PolicyKind::OptLookahead,
        PolicyKind::Lfu,
        PolicyKind::LruX,
        PolicyKind::WorkingSet,
    ];

    /// Name as written in reports and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Lifo => "LIFO",
            PolicyKind::Mru => "MRU",
            PolicyKind::OptLookahead => "OPT-Lookahead-X",
            PolicyKind::Lfu => "LFU",
            PolicyKind::LruX => "LRU-X",
            PolicyKind::WorkingSet => "WS",
        }
    }

    /// Whether the numeric parameter means anything to this policy.
    pub fn takes_parameter(self) -> bool {
        matches!(
            self,
            PolicyKind::OptLookahead | PolicyKind::LruX | PolicyKind::WorkingSet
        )
    }

    /// Reject parameters this policy cannot be built with.
    ///
    /// Only LRU-X has a lower bound (X >= 1); a lookahead of 0 or a window
    /// of 0 are valid, if degenerate.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if `self` is LRU-X and `param` is 0
    pub fn check_parameter(self, param: usize) -> Result<()> {
        if self == PolicyKind::LruX && param == 0 {
            return Err(Error::InvalidConfig(format!(
                "{} needs X of at least 1",
                self
            )));
        }
        Ok(())
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnsupportedPolicy(wanted.to_string()))
    }
}

/// A constructed policy instance.
///
/// Holds all per-run bookkeeping; build a fresh one for every process run.
#[derive(Debug)]
pub enum Policy {
    Lifo(LifoPolicy),
    Mru(MruPolicy),
    OptLookahead(LookaheadPolicy),
    Lfu(LfuPolicy),
    LruX(LruXPolicy),
    WorkingSet(WorkingSetPolicy),
}

impl Policy {
    /// Build a policy of `kind`.
    ///
    /// `param` is the lookahead length, X, or window size depending on the
    /// kind, and is ignored by policies that take none.
    ///
    /// # Panics
    /// Panics if `kind` is [`PolicyKind::LruX`] and `param` is 0.
    pub fn new(kind: PolicyKind, param: usize) -> Self {
        match kind {
            PolicyKind::Lifo => Policy::Lifo(LifoPolicy::new()),
            PolicyKind::Mru => Policy::Mru(MruPolicy::new()),
            PolicyKind::OptLookahead => Policy::OptLookahead(LookaheadPolicy::new(param)),
            PolicyKind::Lfu => Policy::Lfu(LfuPolicy::new()),
            PolicyKind::LruX => Policy::LruX(LruXPolicy::new(param)),
            PolicyKind::WorkingSet => Policy::WorkingSet(WorkingSetPolicy::new(param as u64)),
        }
    }

    /// Policy factory: look up `name` and build it with `param`.
    ///
    /// # Errors
    /// - `Error::UnsupportedPolicy` if `name` is not one of [`PolicyKind::ALL`]
    /// - `Error::InvalidConfig` for LRU-X with `param` 0
    ///
    /// # Example
    /// ```
    /// use pagereplay::policy::{Policy, PolicyKind};
    ///
    /// let policy = Policy::create("LRU-X", 2).unwrap();
    /// assert_eq!(policy.kind(), PolicyKind::LruX);
    /// assert!(Policy::create("CLOCK", 0).is_err());
    /// assert!(Policy::create("LRU-X", 0).is_err());
    /// ```
    pub fn create(name: &str, param: usize) -> Result<Self> {
        let kind: PolicyKind = name.parse()?;
        kind.check_parameter(param)?;
        Ok(Self::new(kind, param))
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Lifo(_) => PolicyKind::Lifo,
            Policy::Mru(_) => PolicyKind::Mru,
            Policy::OptLookahead(_) => PolicyKind::OptLookahead,
            Policy::Lfu(_) => PolicyKind::Lfu,
            Policy::LruX(_) => PolicyKind::LruX,
            Policy::WorkingSet(_) => PolicyKind::WorkingSet,
        }
    }

    fn as_dyn(&self) -> &dyn ReplacementPolicy {
        match self {
            Policy::Lifo(p) => p,
            Policy::Mru(p) => p,
            Policy::OptLookahead(p) => p,
            Policy::Lfu(p) => p,
            Policy::LruX(p) => p,
            Policy::WorkingSet(p) => p,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn ReplacementPolicy {
        match self {
            Policy::Lifo(p) => p,
            Policy::Mru(p) => p,
            Policy::OptLookahead(p) => p,
            Policy::Lfu(p) => p,
            Policy::LruX(p) => p,
            Policy::WorkingSet(p) => p,
        }
    }
}

impl ReplacementPolicy for Policy {
    fn on_reference(&mut self, memory: &mut MemoryState, reference: &Reference<'_>) -> Access {
        self.as_dyn_mut().on_reference(memory, reference)
    }

    fn allows_overflow(&self) -> bool {
        self.as_dyn().allows_overflow()
    }

    fn working_set_bounds(&self) -> Option<WorkingSetBounds> {
        self.as_dyn().working_set_bounds()
    }
}
