//! LFU (Least Frequently Used) replacement policy.
//!
//! Resident pages sit in one list ordered by access count, lowest first.
//! Among equal counts, the page promoted most recently sits later. The
//! victim is always the front of the list.
//!
//! ```text
//!   front (evict)                                     back
//!   [a:1] ◄──► [b:1] ◄──► [c:2] ◄──► [d:3] ◄──► [new:1]
//!                                                  ▲
//!                          freshly loaded pages are appended here
//! ```
//!
//! A hit bumps the count and re-inserts the page after the last entry
//! (scanning from the back) whose count does not exceed the new one. A
//! freshly loaded page starts at count 1 and is appended at the back
//! regardless of the counts in front of it, so it is never the immediate
//! next victim even when older pages have higher counts.

use std::collections::HashMap;

use crate::common::PageId;
use crate::ds::PageList;
use crate::memory::MemoryState;
use crate::policy::{Access, Reference, ReplacementPolicy};

/// Frequency-ordered policy; evicts the front of the frequency list.
#[derive(Debug, Default)]
pub struct LfuPolicy {
    /// Access count per resident page. Cleared on eviction.
    frequency: HashMap<PageId, u64>,

    /// Resident pages in eviction order.
    order: PageList,
}

impl LfuPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Access count of a resident page.
    pub fn frequency(&self, page: PageId) -> Option<u64> {
        self.frequency.get(&page).copied()
    }

    /// Resident pages in eviction order, next victim first.
    pub fn eviction_order(&self) -> Vec<PageId> {
        self.order.iter().collect()
    }

    fn promote(&mut self, page: PageId) {
        let count = {
            let count = self.frequency.entry(page).or_insert(0);
            *count += 1;
            *count
        };

        self.order.remove(page);
        let anchor = self
            .order
            .iter()
            .rev()
            .find(|other| self.frequency.get(other).copied().unwrap_or(0) <= count);
        match anchor {
            Some(anchor) => {
                self.order.insert_after(anchor, page);
            }
            None => {
                self.order.push_front(page);
            }
        }
    }
}

impl ReplacementPolicy for LfuPolicy {
    fn on_reference(&mut self, memory: &mut MemoryState, reference: &Reference<'_>) -> Access {
        let page = reference.page;
        if memory.is_resident(page) {
            self.promote(page);
            return Access::Hit;
        }

        memory.record_fault();
        let evicted = if memory.is_full() {
            self.order.pop_front()
        } else {
            None
        };
        if let Some(victim) = evicted {
            self.frequency.remove(&victim);
            memory.evict(victim);
        }

        self.frequency.insert(page, 1);
        self.order.push_back(page);
        memory.load(page);

        Access::Fault { evicted }
    }
}
