use crate::{Cost, NodeID};

use slab::Slab;

/// A stable reference to an entry in a [`Frontier`], valid until that entry is popped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrontierHandle(usize);

/// Returned by [`Frontier::pop_min`] when no Open nodes remain.
///
/// During a search this simply means that the goal is unreachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, thiserror::Error)]
#[error("the frontier is empty")]
pub struct EmptyFrontier;

/// Ordering of entries: lowest `f`, then lowest `h`, then the oldest insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Key {
    f: Cost,
    h: Cost,
    seq: u64,
}

#[derive(Clone, Debug)]
struct Entry {
    node: NodeID,
    key: Key,
    heap_index: usize,
}

/// The open set: a binary min-heap of nodes with in-place decrease-key.
///
/// Entries live in a [`Slab`] so that their [`FrontierHandle`] stays valid while the heap
/// reorders itself. The heap only stores slab keys, and each entry remembers its own position
/// in the heap.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    entries: Slab<Entry>,
    heap: Vec<usize>,
    next_seq: u64,
}

impl Frontier {
    /// Creates an empty Frontier
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Creates an empty Frontier with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Frontier {
        Frontier {
            entries: Slab::with_capacity(capacity),
            heap: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// The number of entries
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// `true` if there are no entries
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes all entries. Every handle handed out so far becomes invalid.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.heap.clear();
        self.next_seq = 0;
    }

    /// Inserts `node` with priority `f` and tie-breaker `h`.
    pub fn push(&mut self, node: NodeID, f: Cost, h: Cost) -> FrontierHandle {
        let key = self.next_key(f, h);
        let heap_index = self.heap.len();
        let slot = self.entries.insert(Entry {
            node,
            key,
            heap_index,
        });
        self.heap.push(slot);
        self.sift_up(heap_index);
        FrontierHandle(slot)
    }

    /// The node that [`pop_min`](Frontier::pop_min) would return next
    pub fn peek_min(&self) -> Option<NodeID> {
        self.heap.first().map(|&slot| self.entries[slot].node)
    }

    /// Removes and returns the node with the lowest `f`, preferring the lowest `h` and then
    /// the oldest entry among equal `f`.
    pub fn pop_min(&mut self) -> Result<NodeID, EmptyFrontier> {
        if self.heap.is_empty() {
            return Err(EmptyFrontier);
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let slot = self.heap.pop().ok_or(EmptyFrontier)?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(self.entries.remove(slot).node)
    }

    /// Lowers the priority of an entry to `f` (with tie-breaker `h`).
    ///
    /// The entry is ordered as if it was just inserted, so it goes behind older entries with
    /// the same `f` and `h`.
    ///
    /// ## Panics
    /// if `handle` does not refer to an entry. In debug builds also if `f` is not strictly
    /// lower than the current priority.
    #[track_caller]
    pub fn decrease_key(&mut self, handle: FrontierHandle, f: Cost, h: Cost) {
        let old = self.entries[handle.0].key;
        debug_assert!(
            f < old.f,
            "decrease_key must lower the priority ({} -> {})",
            old.f,
            f
        );
        let key = self.next_key(f, h);
        let entry = &mut self.entries[handle.0];
        entry.key = key;
        let heap_index = entry.heap_index;
        self.sift_up(heap_index);
    }

    /// The node behind `handle`, if that entry is still in the Frontier
    pub fn node(&self, handle: FrontierHandle) -> Option<NodeID> {
        self.entries.get(handle.0).map(|entry| entry.node)
    }

    /// Iterates over all entries as `(node, f, h)` in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeID, Cost, Cost)> + '_ {
        self.entries
            .iter()
            .map(|(_, entry)| (entry.node, entry.key.f, entry.key.h))
    }

    fn next_key(&mut self, f: Cost, h: Cost) -> Key {
        let seq = self.next_seq;
        self.next_seq += 1;
        Key { f, h, seq }
    }

    fn key_at(&self, heap_index: usize) -> Key {
        self.entries[self.heap[heap_index]].key
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let (slot_a, slot_b) = (self.heap[a], self.heap[b]);
        self.entries[slot_a].heap_index = a;
        self.entries[slot_b].heap_index = b;
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.key_at(index) >= self.key_at(parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.key_at(right) < self.key_at(left) {
                right
            } else {
                left
            };
            if self.key_at(child) >= self.key_at(index) {
                break;
            }
            self.swap(index, child);
            index = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(frontier: &mut Frontier) -> Vec<NodeID> {
        let mut out = vec![];
        while let Ok(node) = frontier.pop_min() {
            out.push(node);
        }
        out
    }

    #[test]
    fn empty() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop_min(), Err(EmptyFrontier));
        assert_eq!(frontier.peek_min(), None);
        assert_eq!(EmptyFrontier.to_string(), "the frontier is empty");
    }

    #[test]
    fn ordered_by_f() {
        let mut frontier = Frontier::new();
        for (node, f) in [(0, 50), (1, 10), (2, 40), (3, 20), (4, 30)] {
            frontier.push(node, f, 0);
        }
        assert_eq!(frontier.len(), 5);
        assert_eq!(drain(&mut frontier), vec![1, 3, 4, 2, 0]);
    }

    #[test]
    fn ties_broken_by_h_then_age() {
        let mut frontier = Frontier::new();
        frontier.push(0, 30, 20);
        frontier.push(1, 30, 10);
        frontier.push(2, 30, 20);
        frontier.push(3, 30, 10);
        frontier.push(4, 20, 20);
        assert_eq!(drain(&mut frontier), vec![4, 1, 3, 0, 2]);
    }

    #[test]
    fn decrease_key() {
        let mut frontier = Frontier::new();
        frontier.push(0, 10, 0);
        let handle = frontier.push(1, 50, 0);
        frontier.push(2, 20, 0);
        frontier.push(3, 5, 0);

        frontier.decrease_key(handle, 15, 0);
        assert_eq!(frontier.node(handle), Some(1));
        assert_eq!(drain(&mut frontier), vec![3, 0, 1, 2]);
        assert_eq!(frontier.node(handle), None);
    }

    #[test]
    fn decreased_entry_is_newest_among_ties() {
        let mut frontier = Frontier::new();
        let handle = frontier.push(0, 40, 0);
        frontier.push(1, 20, 0);
        frontier.decrease_key(handle, 20, 0);
        assert_eq!(drain(&mut frontier), vec![1, 0]);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn decrease_key_must_decrease() {
        let mut frontier = Frontier::new();
        let handle = frontier.push(0, 10, 0);
        frontier.decrease_key(handle, 10, 0);
    }

    #[test]
    fn handles_survive_reordering() {
        let mut frontier = Frontier::with_capacity(64);
        let handles: Vec<_> = (0..64).map(|i| frontier.push(i, 1000 - i as usize, 0)).collect();
        for (i, &handle) in handles.iter().enumerate().step_by(3) {
            frontier.decrease_key(handle, i, 0);
        }
        let order = drain(&mut frontier);
        assert_eq!(order.len(), 64);
        let firsts: Vec<NodeID> = (0..64).step_by(3).collect();
        assert_eq!(&order[..firsts.len()], &firsts[..]);
    }

    #[test]
    fn iter_lists_all_entries() {
        let mut frontier = Frontier::new();
        frontier.push(7, 10, 4);
        frontier.push(9, 12, 2);
        frontier.pop_min().unwrap();
        assert_eq!(frontier.iter().collect::<Vec<_>>(), vec![(9, 12, 2)]);
    }
}
