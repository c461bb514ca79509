//! Data structures backing the replacement policies.
//!
//! - [`PageList`] - ordered list of pages with O(1) removal, move and
//!   positional insert, addressed by page id

mod page_list;
mod slot_arena;

pub use page_list::{PageList, PageListIter};
