//! Process identifier type.

use std::fmt;

/// Identifies a simulated process.
///
/// Taken verbatim from the input file; no uniqueness is enforced, so two
/// records may share an id and are still replayed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Create a new ProcessId.
    #[inline]
    pub fn new(id: u32) -> Self {
        ProcessId(id)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Process({})", self.0)
    }
}
