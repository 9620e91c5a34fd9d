//! Min-priority frontier and per-node search state.
//!
//! The frontier pops the smallest tentative distance first; equal
//! distances pop in ascending key order, which for grid searches is the
//! local `(x, y)` coordinate. Entries are never decreased in place: an
//! improved node is pushed again and the stale entry is skipped when it
//! surfaces (see [`Node::is_stale`]).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
struct Entry<K> {
    dist: f64,
    key: K,
}

// Reversed so that `BinaryHeap` (a max-heap) pops the minimum.
impl<K: Ord> Ord for Entry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl<K: Ord> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for Entry<K> {}

/// Deterministic min-priority queue keyed by `(distance, key)`.
#[derive(Debug)]
pub struct Frontier<K> {
    heap: BinaryHeap<Entry<K>>,
}

impl<K: Ord + Copy> Frontier<K> {
    /// An empty frontier.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// An empty frontier with room for `n` entries.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(n),
        }
    }

    /// Insert `key` at tentative distance `dist`.
    pub fn push(&mut self, dist: f64, key: K) {
        self.heap.push(Entry { dist, key });
    }

    /// Remove and return the entry with the smallest `(dist, key)`.
    pub fn pop(&mut self) -> Option<(f64, K)> {
        self.heap.pop().map(|e| (e.dist, e.key))
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<K: Ord + Copy> Default for Frontier<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Search state of one cell: best known distance from the source and the
/// cell it was reached from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node<C> {
    /// Best known distance; `f64::INFINITY` until reached.
    pub distance: f64,
    /// Cell this one was reached from; `None` for the source and for
    /// unreached cells.
    pub predecessor: Option<C>,
}

impl<C> Node<C> {
    /// A node that has not been reached.
    pub fn unreached() -> Self {
        Self {
            distance: f64::INFINITY,
            predecessor: None,
        }
    }

    /// Whether a popped frontier entry at `dist` has been superseded.
    pub fn is_stale(&self, dist: f64) -> bool {
        dist > self.distance
    }
}

/// Walk predecessors back from `target` to `source`, returning the path in
/// source-to-target order. `None` if the chain breaks or loops.
pub(crate) fn trace_back<C: Copy + PartialEq>(
    nodes: &[Node<C>],
    index_of: impl Fn(C) -> usize,
    source: C,
    target: C,
) -> Option<Vec<C>> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        if path.len() > nodes.len() {
            return None;
        }
        current = nodes[index_of(current)].predecessor?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}
