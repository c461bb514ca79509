//! Recency-list replacement policy, registered under the name `MRU`.
//!
//! Keeps resident pages in a recency list with the most recently used page
//! at the head. On a full fault the page at the *tail* is evicted, i.e. the
//! least recently used one. The name is historical; comparison results
//! published under `MRU` were produced with this eviction rule, so it is
//! kept as is.
//!
//! ```text
//!   head (most recent)                      tail (least recent)
//!   [p7] ◄──► [p3] ◄──► [p9] ◄──► [p1]  ──► evicted on a full fault
//! ```

use crate::ds::PageList;
use crate::memory::MemoryState;
use crate::policy::{Access, Reference, ReplacementPolicy};

/// Recency-ordered policy; evicts from the least recently used end.
#[derive(Debug, Default)]
pub struct MruPolicy {
    /// Resident pages, most recently used first.
    recency: PageList,
}

impl MruPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplacementPolicy for MruPolicy {
    fn on_reference(&mut self, memory: &mut MemoryState, reference: &Reference<'_>) -> Access {
        let page = reference.page;
        if self.recency.move_to_front(page) {
            debug_assert!(memory.is_resident(page));
            return Access::Hit;
        }

        memory.record_fault();
        let evicted = if memory.is_full() {
            self.recency.pop_back()
        } else {
            None
        };
        if let Some(victim) = evicted {
            memory.evict(victim);
        }
        self.recency.push_front(page);
        memory.load(page);

        Access::Fault { evicted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PageId;
    use crate::policy::test_support::run;

    #[test]
    fn test_evicts_least_recently_used() {
        let mut policy = MruPolicy::new();
        let (_, accesses) = run(&mut policy, 3, &[1, 2, 3, 1, 4]);

        // 2 is the least recently used once 1 has been touched again.
        assert_eq!(accesses[4].evicted(), Some(PageId(2)));
    }

    #[test]
    fn test_hit_moves_page_to_head() {
        let mut policy = MruPolicy::new();
        let (_, _) = run(&mut policy, 3, &[1, 2, 3, 1]);

        let order: Vec<u32> = policy.recency.iter().map(|p| p.0).collect();
        assert_eq!(order, vec![1, 3, 2]);
    }

    #[test]
    fn test_reference_trace() {
        let mut policy = MruPolicy::new();
        let (memory, _) = run(&mut policy, 3, &[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]);

        assert_eq!(memory.fault_count(), 10);
        let mut resident = memory.resident_pages();
        resident.sort();
        assert_eq!(resident, vec![PageId(3), PageId(4), PageId(5)]);
    }

    #[test]
    fn test_list_mirrors_resident_set() {
        let mut policy = MruPolicy::new();
        let (memory, _) = run(&mut policy, 2, &[4, 5, 4, 6, 7, 4]);

        assert_eq!(policy.recency.len(), memory.resident_count());
        for page in memory.load_order() {
            assert!(policy.recency.contains(page));
        }
    }
}
