//! Working-Set replacement policy (window size τ).
//!
//! Each page carries a sliding window of its reference ticks. After every
//! reference at tick `t`, timestamps older than `t - τ` are dropped from
//! every window; a page is in the working set while its window is non-empty.
//!
//! On a full fault the victim is the resident page that has fallen furthest
//! out of the window: its key is the front of its window (or its last
//! reference once the window has emptied), it is eligible only if that key
//! is older than `t - τ`, and the smallest key wins. When no resident page
//! is eligible the new page is loaded past capacity, as with LRU-X.
//!
//! A page that is no longer resident is forgotten once its window drains;
//! re-loading it starts a fresh window.
//!
//! The policy also reports the smallest and largest working-set size seen
//! after any reference of the run.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::common::{PageId, Tick};
use crate::memory::MemoryState;
use crate::policy::{Access, Reference, ReplacementPolicy};

/// Smallest and largest working-set size observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingSetBounds {
    pub min: usize,
    pub max: usize,
}

impl WorkingSetBounds {
    /// Bounds after a single observation.
    pub fn new(size: usize) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    /// Widen to include `size`.
    pub fn observe(&mut self, size: usize) {
        self.min = self.min.min(size);
        self.max = self.max.max(size);
    }

    /// Union of two bound ranges.
    pub fn merge(self, other: WorkingSetBounds) -> WorkingSetBounds {
        WorkingSetBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[derive(Debug, Default)]
struct PageWindow {
    /// Reference ticks still inside the window, oldest first.
    stamps: VecDeque<Tick>,
    /// Most recent reference, kept after `stamps` drains.
    last: Tick,
}

impl PageWindow {
    fn eviction_key(&self) -> Tick {
        self.stamps.front().copied().unwrap_or(self.last)
    }
}

/// Working-set policy with window size τ.
#[derive(Debug)]
pub struct WorkingSetPolicy {
    window: u64,
    pages: HashMap<PageId, PageWindow>,
    bounds: Option<WorkingSetBounds>,
}

impl WorkingSetPolicy {
    pub fn new(window: u64) -> Self {
        Self {
            window,
            pages: HashMap::new(),
            bounds: None,
        }
    }

    pub fn window(&self) -> u64 {
        self.window
    }

    /// Pages referenced within the current window.
    pub fn working_set_size(&self) -> usize {
        self.pages.values().filter(|w| !w.stamps.is_empty()).count()
    }

    fn find_victim(&self, memory: &MemoryState, now: Tick) -> Option<PageId> {
        let window_start = now.window_start(self.window);
        memory
            .load_order()
            .filter_map(|page| {
                let key = self.pages.get(&page)?.eviction_key();
                (key < window_start).then_some((key, page))
            })
            .min_by_key(|&(key, _)| key)
            .map(|(_, page)| page)
    }

    /// Expire old stamps, forget evicted pages whose window has drained,
    /// then record `page` at `now` and fold the new size into the bounds.
    fn observe(&mut self, memory: &MemoryState, page: PageId, now: Tick) {
        let window_start = now.window_start(self.window);
        self.pages.retain(|&tracked, window| {
            while window.stamps.front().is_some_and(|&t| t < window_start) {
                window.stamps.pop_front();
            }
            !window.stamps.is_empty() || memory.is_resident(tracked)
        });

        let window = self.pages.entry(page).or_default();
        window.stamps.push_back(now);
        window.last = now;

        let size = self.working_set_size();
        match self.bounds.as_mut() {
            Some(bounds) => bounds.observe(size),
            None => self.bounds = Some(WorkingSetBounds::new(size)),
        }
    }
}

impl ReplacementPolicy for WorkingSetPolicy {
    fn on_reference(&mut self, memory: &mut MemoryState, reference: &Reference<'_>) -> Access {
        let page = reference.page;
        let now = reference.tick;

        let access = if memory.is_resident(page) {
            Access::Hit
        } else {
            memory.record_fault();
            let evicted = if memory.is_full() {
                let victim = self.find_victim(memory, now);
                if victim.is_none() {
                    debug!(
                        "WS: every resident page is inside the window at {}, \
                         loading {} past capacity",
                        now, page
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
            Access::Fault { evicted }
        };

        self.observe(memory, page, now);
        access
    }

    fn allows_overflow(&self) -> bool {
        true
    }

    fn working_set_bounds(&self) -> Option<WorkingSetBounds> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::pages;
    use crate::policy::test_support::{resident, run};

    /// Drive the policy with explicit ticks so tests can leave gaps.
    fn run_at(
        policy: &mut WorkingSetPolicy,
        capacity: usize,
        refs: &[(u64, u32)],
    ) -> (MemoryState, Vec<Access>) {
        let sequence = pages(&refs.iter().map(|&(_, p)| p).collect::<Vec<_>>());
        let mut memory = MemoryState::new(capacity);
        let accesses = refs
            .iter()
            .enumerate()
            .map(|(position, &(tick, page))| {
                let reference = Reference {
                    page: PageId(page),
                    tick: Tick(tick),
                    position,
                    sequence: &sequence,
                };
                policy.on_reference(&mut memory, &reference)
            })
            .collect();
        (memory, accesses)
    }

    #[test]
    fn test_bounds_merge_and_observe() {
        let mut bounds = WorkingSetBounds::new(3);
        bounds.observe(1);
        bounds.observe(5);
        assert_eq!(bounds, WorkingSetBounds { min: 1, max: 5 });

        let merged = bounds.merge(WorkingSetBounds { min: 2, max: 9 });
        assert_eq!(merged, WorkingSetBounds { min: 1, max: 9 });
    }

    #[test]
    fn test_no_bounds_before_first_reference() {
        let policy = WorkingSetPolicy::new(3);
        assert_eq!(policy.working_set_bounds(), None);
    }

    #[test]
    fn test_window_expiry_shrinks_working_set() {
        let mut policy = WorkingSetPolicy::new(2);
        let _ = run_at(&mut policy, 8, &[(1, 1), (2, 2), (3, 3)]);
        assert_eq!(policy.working_set_size(), 3);

        // At t6 everything older than t4 is gone.
        let _ = run_at(&mut policy, 8, &[(6, 4)]);
        assert_eq!(policy.working_set_size(), 1);
    }

    #[test]
    fn test_gap_evicts_stale_pages_oldest_first() {
        let mut policy = WorkingSetPolicy::new(3);
        let (memory, accesses) = run_at(
            &mut policy,
            3,
            &[(1, 1), (2, 2), (3, 3), (10, 4), (11, 5), (12, 6)],
        );

        assert_eq!(accesses[3].evicted(), Some(PageId(1)));
        assert_eq!(accesses[4].evicted(), Some(PageId(2)));
        assert_eq!(accesses[5].evicted(), Some(PageId(3)));
        assert_eq!(resident(&memory), vec![4, 5, 6]);
        assert_eq!(
            policy.working_set_bounds(),
            Some(WorkingSetBounds { min: 1, max: 3 })
        );
    }

    #[test]
    fn test_overflow_when_everything_is_in_window() {
        let mut policy = WorkingSetPolicy::new(5);
        let (memory, accesses) = run(&mut policy, 2, &[1, 2, 3]);

        assert_eq!(accesses[2], Access::Fault { evicted: None });
        assert_eq!(memory.resident_count(), 3);
        assert_eq!(memory.overflow(), 1);
    }

    #[test]
    fn test_hits_are_not_faults() {
        let mut policy = WorkingSetPolicy::new(2);
        let (memory, accesses) = run(&mut policy, 2, &[1, 1, 2, 1, 2]);

        assert_eq!(memory.fault_count(), 2);
        assert_eq!(accesses.iter().filter(|a| a.is_fault()).count(), 2);
    }

    #[test]
    fn test_dense_sequence_bounds() {
        let mut policy = WorkingSetPolicy::new(1);
        let _ = run(&mut policy, 4, &[1, 2, 1, 2, 3]);

        // Window of one tick back: {1}, {1,2}, {1,2}, {1,2}, {2,3}
        assert_eq!(
            policy.working_set_bounds(),
            Some(WorkingSetBounds { min: 1, max: 2 })
        );
    }

    #[test]
    fn test_drained_page_remains_eligible() {
        let mut policy = WorkingSetPolicy::new(1);
        // By t5, 1 has long left the window while 2 and 3 are recent.
        let (_, accesses) = run(&mut policy, 2, &[1, 2, 2, 2, 3]);
        assert_eq!(accesses[4].evicted(), Some(PageId(1)));
    }

    #[test]
    fn test_evicted_drained_pages_are_forgotten() {
        let mut policy = WorkingSetPolicy::new(1);
        let (memory, _) = run(&mut policy, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);

        // Only the two resident pages still carry state.
        assert_eq!(resident(&memory), vec![7, 8]);
        assert_eq!(policy.pages.len(), 2);
        assert!(!policy.pages.contains_key(&PageId(1)));
    }

    #[test]
    fn test_evicted_page_with_live_window_is_kept() {
        let mut policy = WorkingSetPolicy::new(2);
        let (memory, accesses) = run_at(&mut policy, 1, &[(1, 1), (2, 1), (4, 2)]);

        // Page 1's oldest stamp is out of the window, its t2 stamp is not.
        assert_eq!(accesses[2].evicted(), Some(PageId(1)));
        assert_eq!(resident(&memory), vec![2]);
        assert!(policy.pages.contains_key(&PageId(1)));
        assert_eq!(policy.working_set_size(), 2);
    }
}
