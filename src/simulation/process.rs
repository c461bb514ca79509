//! Process records.

use std::collections::HashSet;

use crate::common::{PageId, ProcessId};

/// One process to replay: its id, how many frames it owns, and the pages it
/// references in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub id: ProcessId,
    pub frame_capacity: usize,
    pub references: Vec<PageId>,
}

impl Process {
    pub fn new(id: ProcessId, frame_capacity: usize, references: Vec<PageId>) -> Self {
        Self {
            id,
            frame_capacity,
            references,
        }
    }

    /// Number of distinct pages in the reference sequence.
    pub fn distinct_pages(&self) -> usize {
        self.references.iter().collect::<HashSet<_>>().len()
    }
}
