//! Ordered page list with O(1) interior removal.
//!
//! Nodes live in a slot arena and are linked by `SlotId`; a side map from
//! [`PageId`] to `SlotId` makes every operation addressable by page.
//!
//! ```text
//!   handles: HashMap<PageId, SlotId>
//!        │
//!        ▼
//!   head ─► [p1] ◄──► [p2] ◄──► [p3] ◄── tail
//! ```
//!
//! Each page appears at most once. Operations that would insert a duplicate
//! return `false` and leave the list untouched.

use std::collections::HashMap;

use crate::common::PageId;
use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node {
    page: PageId,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list of distinct pages.
#[derive(Debug, Default)]
pub struct PageList {
    arena: SlotArena<Node>,
    handles: HashMap<PageId, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl PageList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, page: PageId) -> bool {
        self.handles.contains_key(&page)
    }

    /// Page at the head, if any.
    pub fn front(&self) -> Option<PageId> {
        self.head.and_then(|id| self.arena.get(id)).map(|n| n.page)
    }

    /// Page at the tail, if any.
    pub fn back(&self) -> Option<PageId> {
        self.tail.and_then(|id| self.arena.get(id)).map(|n| n.page)
    }

    /// Iterates head to tail.
    pub fn iter(&self) -> PageListIter<'_> {
        PageListIter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    pub fn push_front(&mut self, page: PageId) -> bool {
        let Some(id) = self.alloc(page) else {
            return false;
        };
        self.attach_front(id);
        true
    }

    pub fn push_back(&mut self, page: PageId) -> bool {
        let Some(id) = self.alloc(page) else {
            return false;
        };
        self.attach_back(id);
        true
    }

    /// Inserts `page` directly after `anchor`.
    ///
    /// Returns `false` if `anchor` is absent or `page` is already listed.
    pub fn insert_after(&mut self, anchor: PageId, page: PageId) -> bool {
        let Some(&anchor_id) = self.handles.get(&anchor) else {
            return false;
        };
        let Some(id) = self.alloc(page) else {
            return false;
        };

        let next = self.arena.get(anchor_id).and_then(|n| n.next);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = Some(anchor_id);
            node.next = next;
        }
        if let Some(anchor_node) = self.arena.get_mut(anchor_id) {
            anchor_node.next = Some(id);
        }
        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        true
    }

    pub fn pop_front(&mut self) -> Option<PageId> {
        let page = self.front()?;
        self.remove(page);
        Some(page)
    }

    pub fn pop_back(&mut self) -> Option<PageId> {
        let page = self.back()?;
        self.remove(page);
        Some(page)
    }

    /// Unlinks `page`; returns `false` if it was not listed.
    pub fn remove(&mut self, page: PageId) -> bool {
        let Some(id) = self.handles.remove(&page) else {
            return false;
        };
        self.detach(id);
        self.arena.remove(id);
        true
    }

    /// Moves `page` to the head; returns `false` if it was not listed.
    pub fn move_to_front(&mut self, page: PageId) -> bool {
        let Some(&id) = self.handles.get(&page) else {
            return false;
        };
        if Some(id) != self.head {
            self.detach(id);
            self.attach_front(id);
        }
        true
    }

    fn alloc(&mut self, page: PageId) -> Option<SlotId> {
        if self.handles.contains_key(&page) {
            return None;
        }
        let id = self.arena.insert(Node {
            page,
            prev: None,
            next: None,
        });
        self.handles.insert(page, id);
        Some(id)
    }

    fn detach(&mut self, id: SlotId) {
        let Some((prev, next)) = self.arena.get(id).map(|n| (n.prev, n.next)) else {
            return;
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.arena.get_mut(old_head) {
                    head_node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn attach_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(old_tail) => {
                if let Some(tail_node) = self.arena.get_mut(old_tail) {
                    tail_node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            let node = self.arena.get(id).expect("node missing");
            assert_eq!(node.prev, prev);
            assert_eq!(self.handles.get(&node.page), Some(&id));
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
        assert_eq!(self.arena.len(), self.len());
    }
}

/// Double-ended iterator over a [`PageList`].
#[derive(Debug)]
pub struct PageListIter<'a> {
    list: &'a PageList,
    front: Option<SlotId>,
    back: Option<SlotId>,
    remaining: usize,
}

impl Iterator for PageListIter<'_> {
    type Item = PageId;

    fn next(&mut self) -> Option<PageId> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(node.page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for PageListIter<'_> {
    fn next_back(&mut self) -> Option<PageId> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(node.page)
    }
}

impl ExactSizeIterator for PageListIter<'_> {}
