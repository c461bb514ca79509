//! Page identifier type.

use std::fmt;

/// Identifies a virtual page referenced by a process.
///
/// Page ids are opaque: policies only compare and hash them. `u32` covers
/// every id the textual input format can carry.
///
/// # Example
/// ```
/// use pagereplay::PageId;
///
/// let page = PageId::new(42);
/// assert_eq!(page.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }
}

impl From<u32> for PageId {
    fn from(id: u32) -> Self {
        PageId(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

/// Convert raw integers into a reference sequence.
///
/// Mostly a convenience for tests and benches.
pub fn pages(ids: &[u32]) -> Vec<PageId> {
    ids.iter().copied().map(PageId).collect()
}
