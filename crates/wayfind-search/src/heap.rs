//! Binary min-heap with lazy stale-entry deletion.
//!
//! The searches never decrease a key in place: improving a node's cost
//! inserts a fresh entry and the superseded one stays behind. Whoever
//! extracts must check its visited set immediately afterwards and drop
//! entries for nodes already finalized. That keeps the heap itself
//! oblivious to search state.
//!
//! Ordering is score ascending with ties broken by lower node id, in
//! both extraction order and [`MinHeap::snapshot`], so a run's recorded
//! trace is identical across executions.

use std::cmp::Ordering;

use wayfind_graph::NodeId;

use crate::trace::QueueEntry;

/// One prioritized entry. Several entries may exist for the same node;
/// all but the cheapest are stale by the time they surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapEntry {
    pub node: NodeId,
    pub score: f64,
}

fn entry_order(a: &HeapEntry, b: &HeapEntry) -> Ordering {
    a.score.total_cmp(&b.score).then_with(|| a.node.cmp(&b.node))
}

/// Binary min-heap over `(node, score)` entries.
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    entries: Vec<HeapEntry>,
}

impl MinHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue an entry: append, then sift up. O(log n).
    pub fn insert(&mut self, node: NodeId, score: f64) {
        self.entries.push(HeapEntry { node, score });
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the cheapest entry, or `None` when empty.
    /// Swaps the last element into the root and sifts down. O(log n).
    pub fn extract_min(&mut self) -> Option<HeapEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// A sorted copy of the current contents as display entries, without
    /// mutating the heap. Only step recording uses this; extraction
    /// order never depends on it.
    pub fn snapshot(&self) -> Vec<QueueEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(entry_order);
        sorted
            .iter()
            .map(|entry| QueueEntry {
                node: entry.node,
                label: format!("{}({:.2})", entry.node, entry.score),
            })
            .collect()
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if entry_order(&self.entries[parent], &self.entries[index]) != Ordering::Greater {
                break;
            }
            self.entries.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;
            if left < len
                && entry_order(&self.entries[left], &self.entries[smallest]) == Ordering::Less
            {
                smallest = left;
            }
            if right < len
                && entry_order(&self.entries[right], &self.entries[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }
}
