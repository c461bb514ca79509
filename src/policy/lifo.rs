//! LIFO (Last-In-First-Out) replacement policy.
//!
//! Evicts the page that was *loaded* most recently. Re-referencing a
//! resident page changes nothing, so the victim is always the top of the
//! load stack kept by [`MemoryState`].

use crate::memory::MemoryState;
use crate::policy::{Access, Reference, ReplacementPolicy};

/// Evicts the most recently loaded page.
///
/// Keeps no state of its own beyond the load order in [`MemoryState`].
#[derive(Debug, Default)]
pub struct LifoPolicy;

impl LifoPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LifoPolicy {
    fn on_reference(&mut self, memory: &mut MemoryState, reference: &Reference<'_>) -> Access {
        let page = reference.page;
        if memory.is_resident(page) {
            return Access::Hit;
        }

        memory.record_fault();
        let evicted = if memory.is_full() {
            memory.newest_loaded()
        } else {
            None
        };
        if let Some(victim) = evicted {
            memory.evict(victim);
        }
        memory.load(page);

        Access::Fault { evicted }
    }
}
