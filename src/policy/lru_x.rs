//! LRU-X replacement policy (generalised LRU over the last X references).
//!
//! Every page keeps a bounded history of the ticks of its last X references.
//! On a full fault, only resident pages with a *full* history (exactly X
//! recorded references) are eligible; among them the page whose oldest
//! recorded reference is earliest is evicted. With X = 1 this is plain LRU.
//!
//! ```text
//!   X = 3, now = t12
//!
//!   page │ history (oldest → newest) │ eligible
//!   ─────┼───────────────────────────┼─────────
//!    p1  │ t2  t6  t9                │ yes  ◄── evicted (t2 earliest)
//!    p2  │ t4  t8  t11               │ yes
//!    p3  │ t10                       │ no
//! ```
//!
//! # No eligible victim
//! If no resident page has X recorded references, nothing is evicted and the
//! new page is loaded anyway. The resident set then exceeds capacity until
//! later faults find eligible victims; this is expected behaviour.
//!
//! Histories survive eviction, so a page re-loaded soon after being evicted
//! may be eligible again immediately.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::common::{PageId, Tick};
use crate::memory::MemoryState;
use crate::policy::{Access, Reference, ReplacementPolicy};

/// Generalised LRU over the X most recent references of each page.
#[derive(Debug)]
pub struct LruXPolicy {
    /// History length.
    x: usize,

    /// Last `x` reference ticks per page, oldest first.
    history: HashMap<PageId, VecDeque<Tick>>,
}

impl LruXPolicy {
    /// Create an LRU-X policy.
    ///
    /// # Panics
    /// Panics if `x` is 0.
    pub fn new(x: usize) -> Self {
        assert!(x > 0, "LRU-X needs x > 0");
        Self {
            x,
            history: HashMap::new(),
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    /// Recorded reference ticks of `page`, oldest first.
    pub fn history(&self, page: PageId) -> Option<&VecDeque<Tick>> {
        self.history.get(&page)
    }

    fn record(&mut self, page: PageId, tick: Tick) {
        let history = self.history.entry(page).or_default();
        if history.len() >= self.x {
            history.pop_front();
        }
        history.push_back(tick);
    }

    /// Eligible resident page with the earliest X-th most recent reference.
    fn find_victim(&self, memory: &MemoryState) -> Option<PageId> {
        memory
            .load_order()
            .filter_map(|page| {
                let history = self.history.get(&page)?;
                if history.len() == self.x {
                    history.front().map(|&oldest| (oldest, page))
                } else {
                    None
                }
            })
            .min_by_key(|&(oldest, _)| oldest)
            .map(|(_, page)| page)
    }
}

impl ReplacementPolicy for LruXPolicy {
    fn on_reference(&mut self, memory: &mut MemoryState, reference: &Reference<'_>) -> Access {
        let page = reference.page;
        if memory.is_resident(page) {
            self.record(page, reference.tick);
            return Access::Hit;
        }

        memory.record_fault();
        let evicted = if memory.is_full() {
            let victim = self.find_victim(memory);
            if victim.is_none() {
                debug!(
                    "LRU-X: no page with {} references among {} resident, loading {} past capacity",
                    self.x,
                    memory.resident_count(),
                    page
                );
            }
            victim
        } else {
            None
        };
        if let Some(victim) = evicted {
            memory.evict(victim);
        }

        memory.load(page);
        self.record(page, reference.tick);

        Access::Fault { evicted }
    }

    fn allows_overflow(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::test_support::{resident, run};
    use crate::policy::MruPolicy;

    #[test]
    #[should_panic(expected = "x > 0")]
    fn test_zero_x_rejected() {
        let _ = LruXPolicy::new(0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut policy = LruXPolicy::new(2);
        let _ = run(&mut policy, 4, &[1, 1, 1, 1]);

        let history: Vec<Tick> = policy.history(PageId(1)).unwrap().iter().copied().collect();
        assert_eq!(history, vec![Tick(3), Tick(4)]);
    }

    #[test]
    fn test_pages_without_full_history_are_never_evicted() {
        let mut policy = LruXPolicy::new(2);
        let (memory, accesses) = run(&mut policy, 3, &[1, 2, 3, 4]);

        assert_eq!(accesses[3], Access::Fault { evicted: None });
        assert_eq!(memory.resident_count(), 4);
        assert!(!memory.within_capacity());
    }

    #[test]
    fn test_evicts_earliest_xth_reference() {
        let mut policy = LruXPolicy::new(2);
        // 2 has the earlier second-to-last reference (t2 vs t4).
        let (_, accesses) = run(&mut policy, 2, &[1, 2, 2, 1, 1, 3]);

        assert_eq!(accesses[5].evicted(), Some(PageId(2)));
    }

    #[test]
    fn test_reference_trace_with_overflow() {
        let mut policy = LruXPolicy::new(2);
        let (memory, accesses) = run(&mut policy, 3, &[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]);

        assert_eq!(memory.fault_count(), 7);
        assert_eq!(accesses[6].evicted(), Some(PageId(1)));
        assert_eq!(accesses[7].evicted(), Some(PageId(2)));
        assert_eq!(accesses[8].evicted(), Some(PageId(1)));
        assert_eq!(resident(&memory), vec![3, 4, 5, 2]);
    }

    #[test]
    fn test_x_one_matches_recency_policy() {
        let ids = [7, 1, 2, 7, 3, 1, 4, 7, 2, 5, 1, 7, 3, 3, 6, 2];
        for capacity in 1..5 {
            let (lru_x, _) = run(&mut LruXPolicy::new(1), capacity, &ids);
            let (recency, _) = run(&mut MruPolicy::new(), capacity, &ids);
            assert_eq!(lru_x.fault_count(), recency.fault_count(), "capacity {}", capacity);
        }
    }
}
