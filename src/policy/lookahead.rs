//! Bounded-lookahead approximation of Belady's optimal policy.
//!
//! On a full fault the policy looks at a window of at most L references of
//! the process's sequence and, for every resident page, records the index of
//! its first reference inside that window. Walking resident pages in load
//! order (oldest first), the first page with no reference in the window is
//! evicted; if every page has one, the page whose next reference is farthest
//! away is evicted.
//!
//! ```text
//!   sequence:  … 4  1  2  5  1  2  3  4  5
//!                ▲  └──────── window ──────┘
//!              anchor        (pos+1 .. pos+L)
//! ```
//!
//! Pages referenced only beyond the window look exactly like pages never
//! referenced again, so the choice is approximate for small L.
//!
//! # Anchor
//! [`LookaheadAnchor::OldestResident`] (the default, and what the factory
//! builds) anchors the window at the first occurrence in the sequence of the
//! oldest-loaded resident page. Comparison results are defined against this
//! anchor. [`LookaheadAnchor::CurrentReference`] anchors at the faulting
//! reference itself; with L at least the sequence length this is exact
//! Belady MIN.

use std::collections::HashMap;

use crate::common::PageId;
use crate::memory::MemoryState;
use crate::policy::{Access, Reference, ReplacementPolicy};

/// Where the lookahead window starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookaheadAnchor {
    /// First occurrence of the oldest-loaded resident page.
    #[default]
    OldestResident,
    /// Position of the reference that faulted.
    CurrentReference,
}

/// Approximate optimal replacement with a forward window of `lookahead`.
#[derive(Debug)]
pub struct LookaheadPolicy {
    lookahead: usize,
    anchor: LookaheadAnchor,
}

impl LookaheadPolicy {
    /// Window of `lookahead` references anchored at the oldest resident page.
    pub fn new(lookahead: usize) -> Self {
        Self::with_anchor(lookahead, LookaheadAnchor::OldestResident)
    }

    pub fn with_anchor(lookahead: usize, anchor: LookaheadAnchor) -> Self {
        Self { lookahead, anchor }
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    pub fn anchor(&self) -> LookaheadAnchor {
        self.anchor
    }

    fn anchor_position(&self, memory: &MemoryState, reference: &Reference<'_>) -> Option<usize> {
        match self.anchor {
            LookaheadAnchor::CurrentReference => Some(reference.position),
            LookaheadAnchor::OldestResident => {
                let oldest = memory.oldest_loaded()?;
                reference.sequence.iter().position(|&page| page == oldest)
            }
        }
    }

    fn choose_victim(&self, memory: &MemoryState, reference: &Reference<'_>) -> Option<PageId> {
        let sequence = reference.sequence;
        let pos = self
            .anchor_position(memory, reference)
            .unwrap_or(sequence.len());
        let end = pos.saturating_add(self.lookahead).min(sequence.len());

        // First in-window reference of each resident page.
        let mut next_use: HashMap<PageId, usize> = HashMap::new();
        for (index, &page) in sequence.iter().enumerate().take(end).skip(pos + 1) {
            if memory.is_resident(page) {
                next_use.entry(page).or_insert(index);
            }
        }

        let mut farthest: Option<(usize, PageId)> = None;
        for page in memory.load_order() {
            match next_use.get(&page) {
                None => return Some(page),
                Some(&index) => {
                    if farthest.map_or(true, |(best, _)| index > best) {
                        farthest = Some((index, page));
                    }
                }
            }
        }
        farthest.map(|(_, page)| page)
    }
}

impl ReplacementPolicy for LookaheadPolicy {
    fn on_reference(&mut self, memory: &mut MemoryState, reference: &Reference<'_>) -> Access {
        let page = reference.page;
        if memory.is_resident(page) {
            return Access::Hit;
        }

        memory.record_fault();
        let evicted = if memory.is_full() {
            self.choose_victim(memory, reference)
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
