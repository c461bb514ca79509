//! Per-process memory state.
//!
//! A [`MemoryState`] tracks which pages a process currently has resident,
//! the order they were loaded in, and how many references have faulted.

use crate::common::PageId;
use crate::ds::{PageList, PageListIter};

/// Resident set, load order and fault counter of one process run.
///
/// # Capacity
/// `capacity` is a soft limit. The container accepts any number of pages;
/// policies are responsible for evicting before they load, and
/// [`within_capacity`](Self::within_capacity) is the explicit check the
/// driver runs after every reference. LRU-X and Working-Set may legitimately
/// load past capacity when they find no eligible victim.
///
/// # Example
/// ```
/// use pagereplay::{MemoryState, PageId};
///
/// let mut memory = MemoryState::new(2);
/// memory.load(PageId::new(1));
/// memory.load(PageId::new(2));
/// assert!(memory.is_full());
/// assert_eq!(memory.oldest_loaded(), Some(PageId::new(1)));
/// ```
#[derive(Debug)]
pub struct MemoryState {
    /// Maximum number of resident pages (frames owned by the process).
    capacity: usize,

    /// Resident pages, oldest load at the front. Doubles as the resident set.
    load_order: PageList,

    /// References that missed.
    fault_count: u64,
}

impl MemoryState {
    /// Create an empty memory with `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            load_order: PageList::new(),
            fault_count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_resident(&self, page: PageId) -> bool {
        self.load_order.contains(page)
    }

    #[inline]
    pub fn resident_count(&self) -> usize {
        self.load_order.len()
    }

    /// True when a load would need an eviction first.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.load_order.len() >= self.capacity
    }

    /// Whether the capacity invariant currently holds.
    #[inline]
    pub fn within_capacity(&self) -> bool {
        self.load_order.len() <= self.capacity
    }

    /// Number of pages resident beyond capacity.
    #[inline]
    pub fn overflow(&self) -> usize {
        self.load_order.len().saturating_sub(self.capacity)
    }

    /// Mark `page` resident as the most recent load.
    ///
    /// Returns `false` if it was already resident.
    pub fn load(&mut self, page: PageId) -> bool {
        self.load_order.push_back(page)
    }

    /// Drop `page` from the resident set, wherever it sits in load order.
    ///
    /// Returns `false` if it was not resident.
    pub fn evict(&mut self, page: PageId) -> bool {
        self.load_order.remove(page)
    }

    /// Page loaded longest ago that is still resident.
    pub fn oldest_loaded(&self) -> Option<PageId> {
        self.load_order.front()
    }

    /// Page loaded most recently that is still resident.
    pub fn newest_loaded(&self) -> Option<PageId> {
        self.load_order.back()
    }

    /// Resident pages, oldest load first.
    pub fn load_order(&self) -> PageListIter<'_> {
        self.load_order.iter()
    }

    /// Snapshot of the resident pages, oldest load first.
    pub fn resident_pages(&self) -> Vec<PageId> {
        self.load_order.iter().collect()
    }

    /// Count one missed reference.
    #[inline]
    pub fn record_fault(&mut self) {
        self.fault_count += 1;
    }

    #[inline]
    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }
}
