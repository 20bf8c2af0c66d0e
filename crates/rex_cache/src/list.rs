//! Arena-backed recency list: the eviction order of the cache.
//!
//! Nodes live in a `Vec` and link to their neighbors by index, with a `NIL`
//! sentinel value standing in for "no neighbor". Evicted slots are recycled
//! through a free list, so indices stay stable for the lifetime of their
//! entry. This reproduces an intrusive doubly linked list without raw
//! pointer surgery.

use std::sync::Arc;

use rex_once::LazyRegex;

/// Link value meaning "no neighbor".
const NIL: usize = usize::MAX;

/// One resident cache entry.
#[derive(Debug)]
struct Node {
    /// Pattern key, shared with the cache's lookup table.
    key: Arc<str>,

    /// The deferred regex handed out to callers. `None` once the slot is
    /// vacant, so eviction releases the cache's ownership immediately.
    cell: Option<Arc<LazyRegex>>,

    prev: usize,
    next: usize,
}

/// Doubly linked list of entries ordered by recency.
///
/// Front = most recently used, back = least recently used. All operations
/// are O(1). Indices passed to [`move_to_front`](RecencyList::move_to_front)
/// and [`remove`](RecencyList::remove) must refer to live entries; the cache
/// is the only caller and only ever passes indices it got from
/// [`push_front`](RecencyList::push_front) and has not yet removed.
#[derive(Debug)]
pub(crate) struct RecencyList {
    nodes: Vec<Node>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl RecencyList {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    /// Number of live entries.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Inserts a new entry at the front and returns its index.
    pub(crate) fn push_front(&mut self, key: Arc<str>, cell: Arc<LazyRegex>) -> usize {
        let node = Node {
            key,
            cell: Some(cell),
            prev: NIL,
            next: self.head,
        };
        let index = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        if self.head != NIL {
            self.nodes[self.head].prev = index;
        } else {
            self.tail = index;
        }
        self.head = index;
        self.len += 1;
        index
    }

    /// Moves a live entry to the front; no-op if it already is the front.
    pub(crate) fn move_to_front(&mut self, index: usize) {
        if self.head == index {
            return;
        }
        self.unlink(index);
        // `index` was not the front, so the list still has one after unlinking.
        self.nodes[index].prev = NIL;
        self.nodes[index].next = self.head;
        self.nodes[self.head].prev = index;
        self.head = index;
    }

    /// Removes a live entry, clears its links, drops its cell, and returns
    /// the key so the caller can delete the matching table entry.
    pub(crate) fn remove(&mut self, index: usize) -> Arc<str> {
        self.unlink(index);
        let node = &mut self.nodes[index];
        node.prev = NIL;
        node.next = NIL;
        node.cell = None;
        self.len -= 1;
        self.free.push(index);
        Arc::clone(&node.key)
    }

    /// Index of the least recently used entry, or `None` when empty.
    pub(crate) fn back(&self) -> Option<usize> {
        (self.len != 0).then_some(self.tail)
    }

    /// The cell of a live entry.
    pub(crate) fn cell(&self, index: usize) -> &Arc<LazyRegex> {
        self.nodes[index]
            .cell
            .as_ref()
            .expect("index refers to a vacant slot")
    }

    fn unlink(&mut self, index: usize) {
        let Node { prev, next, .. } = self.nodes[index];
        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }
    }

    /// The key of a live entry.
    #[cfg(test)]
    pub(crate) fn key(&self, index: usize) -> &str {
        &self.nodes[index].key
    }

    /// Keys in recency order, front (most recent) first.
    #[cfg(test)]
    pub(crate) fn keys_front_to_back(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while cursor != NIL {
            keys.push(self.nodes[cursor].key.to_string());
            cursor = self.nodes[cursor].next;
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pattern: &str) -> (Arc<str>, Arc<LazyRegex>) {
        (Arc::from(pattern), Arc::new(LazyRegex::new(pattern)))
    }

    fn push(list: &mut RecencyList, pattern: &str) -> usize {
        let (key, cell) = entry(pattern);
        list.push_front(key, cell)
    }

    #[test]
    fn empty_list() {
        let list = RecencyList::new();
        assert_eq!(list.len(), 0);
        assert!(list.back().is_none());
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = RecencyList::new();
        push(&mut list, "a");
        push(&mut list, "b");
        push(&mut list, "c");
        assert_eq!(list.len(), 3);
        assert_eq!(list.keys_front_to_back(), ["c", "b", "a"]);
    }

    #[test]
    fn back_is_oldest() {
        let mut list = RecencyList::new();
        let a = push(&mut list, "a");
        push(&mut list, "b");
        assert_eq!(list.back(), Some(a));
        assert_eq!(list.key(a), "a");
    }

    #[test]
    fn move_to_front_reorders() {
        let mut list = RecencyList::new();
        let a = push(&mut list, "a");
        push(&mut list, "b");
        push(&mut list, "c");

        list.move_to_front(a);
        assert_eq!(list.keys_front_to_back(), ["a", "c", "b"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn move_to_front_of_front_is_noop() {
        let mut list = RecencyList::new();
        push(&mut list, "a");
        let b = push(&mut list, "b");
        list.move_to_front(b);
        assert_eq!(list.keys_front_to_back(), ["b", "a"]);
    }

    #[test]
    fn move_back_to_front_updates_tail() {
        let mut list = RecencyList::new();
        let a = push(&mut list, "a");
        let b = push(&mut list, "b");
        list.move_to_front(a);
        assert_eq!(list.back(), Some(b));
    }

    #[test]
    fn remove_middle_entry() {
        let mut list = RecencyList::new();
        push(&mut list, "a");
        let b = push(&mut list, "b");
        push(&mut list, "c");

        let key = list.remove(b);
        assert_eq!(&*key, "b");
        assert_eq!(list.len(), 2);
        assert_eq!(list.keys_front_to_back(), ["c", "a"]);
    }

    #[test]
    fn remove_only_entry_empties_list() {
        let mut list = RecencyList::new();
        let a = push(&mut list, "a");
        list.remove(a);
        assert_eq!(list.len(), 0);
        assert!(list.back().is_none());
        assert!(list.keys_front_to_back().is_empty());
    }

    #[test]
    fn removed_slot_is_recycled() {
        let mut list = RecencyList::new();
        let a = push(&mut list, "a");
        push(&mut list, "b");
        list.remove(a);

        let c = push(&mut list, "c");
        assert_eq!(c, a, "freed slot should be reused");
        assert_eq!(list.keys_front_to_back(), ["c", "b"]);
    }

    #[test]
    fn cell_survives_reordering() {
        let mut list = RecencyList::new();
        let a = push(&mut list, "a+");
        push(&mut list, "b");
        let held = Arc::clone(list.cell(a));
        list.move_to_front(a);
        assert!(Arc::ptr_eq(&held, list.cell(a)));
    }
}
