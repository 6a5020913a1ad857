//! Indexed 4-ary min-heap of vertices.
//!
//! Priorities live outside the heap (in the search state's distance store),
//! so every operation that may reorder takes a `HeapOrder`. The heap owns a
//! vertex -> position table, which is what makes `decrease_key` O(log n)
//! without handing raw handles to callers.

use crate::error::{Result, SearchError};
use crate::graph::VertexId;
use crate::store::{StoreStrategy, VertexMap, VertexStore};

const ARITY: usize = 4;
const NOT_QUEUED: usize = usize::MAX;

/// Strict "comes out of the heap first" relation between two vertices.
pub trait HeapOrder<V> {
    fn precedes(&self, a: V, b: V) -> bool;
}

impl<V, F: Fn(V, V) -> bool> HeapOrder<V> for F {
    #[inline]
    fn precedes(&self, a: V, b: V) -> bool {
        self(a, b)
    }
}

#[derive(Debug, Clone)]
pub struct IndexedHeap<V> {
    data: Vec<V>,
    position: VertexMap<V, usize>,
}

impl<V: VertexId> IndexedHeap<V> {
    pub fn new(strategy: StoreStrategy, index_bound: Option<usize>, capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            position: VertexMap::new(strategy, index_bound, capacity, NOT_QUEUED),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, v: V) -> bool {
        self.position.get(v) != NOT_QUEUED
    }

    /// Vertex with the best priority, without removing it.
    pub fn top(&self) -> Option<V> {
        self.data.first().copied()
    }

    /// Queue `v`. Pushing a vertex that is already queued is ignored.
    pub fn push<O: HeapOrder<V> + ?Sized>(&mut self, v: V, order: &O) {
        if self.contains(v) {
            debug_assert!(false, "vertex {:?} pushed twice", v);
            return;
        }
        let i = self.data.len();
        self.data.push(v);
        self.position.set(v, i);
        self.sift_up(i, order);
    }

    /// Remove and return the top vertex.
    pub fn pop<O: HeapOrder<V> + ?Sized>(&mut self, order: &O) -> Option<V> {
        let last = self.data.pop()?;
        if self.data.is_empty() {
            self.position.set(last, NOT_QUEUED);
            return Some(last);
        }
        let top = std::mem::replace(&mut self.data[0], last);
        self.position.set(top, NOT_QUEUED);
        self.position.set(last, 0);
        self.sift_down(0, order);
        Some(top)
    }

    /// Restore heap order after `v`'s priority improved. Calling this when
    /// the priority did not improve leaves the heap order unspecified.
    pub fn decrease_key<O: HeapOrder<V> + ?Sized>(&mut self, v: V, order: &O) -> Result<()> {
        let i = self.position.get(v);
        if i == NOT_QUEUED {
            return Err(SearchError::InvalidDecreaseKey {
                vertex: format!("{:?}", v),
            });
        }
        self.sift_up(i, order);
        Ok(())
    }

    /// Empty the heap in O(len), resetting only the positions that are set.
    pub fn clear(&mut self) {
        for v in self.data.drain(..) {
            self.position.set(v, NOT_QUEUED);
        }
    }

    /// Queued vertices in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = V> + '_ {
        self.data.iter().copied()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.data.swap(i, j);
        self.position.set(self.data[i], i);
        self.position.set(self.data[j], j);
    }

    fn sift_up<O: HeapOrder<V> + ?Sized>(&mut self, mut i: usize, order: &O) {
        while i > 0 {
            let parent = (i - 1) / ARITY;
            if order.precedes(self.data[i], self.data[parent]) {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down<O: HeapOrder<V> + ?Sized>(&mut self, mut i: usize, order: &O) {
        let len = self.data.len();
        loop {
            let first = i * ARITY + 1;
            if first >= len {
                break;
            }
            let end = (first + ARITY).min(len);
            let mut best = first;
            for c in first + 1..end {
                if order.precedes(self.data[c], self.data[best]) {
                    best = c;
                }
            }
            if order.precedes(self.data[best], self.data[i]) {
                self.swap(i, best);
                i = best;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn heap(n: usize) -> IndexedHeap<usize> {
        IndexedHeap::new(StoreStrategy::Dense, Some(n), n)
    }

    #[test]
    fn test_pops_in_priority_order() {
        let keys = [7u32, 3, 9, 1, 4, 8, 2, 6, 5, 0];
        let order = |a: usize, b: usize| keys[a] < keys[b];
        let mut h = heap(keys.len());
        for v in 0..keys.len() {
            h.push(v, &order);
        }
        let mut popped = Vec::new();
        while let Some(v) = h.pop(&order) {
            popped.push(keys[v]);
        }
        assert_eq!(popped, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(h.is_empty());
    }

    #[test]
    fn test_decrease_key_moves_to_top() {
        let keys = RefCell::new(vec![10u32, 20, 30, 40, 50, 60]);
        let mut h = heap(6);
        {
            let order = |a: usize, b: usize| keys.borrow()[a] < keys.borrow()[b];
            for v in 0..6 {
                h.push(v, &order);
            }
        }
        keys.borrow_mut()[5] = 1;
        let order = |a: usize, b: usize| keys.borrow()[a] < keys.borrow()[b];
        h.decrease_key(5, &order).unwrap();
        assert_eq!(h.top(), Some(5));
        assert_eq!(h.pop(&order), Some(5));
        assert_eq!(h.pop(&order), Some(0));
    }

    #[test]
    fn test_decrease_key_on_absent_vertex() {
        let order = |a: usize, b: usize| a < b;
        let mut h = heap(4);
        h.push(1, &order);
        let err = h.decrease_key(3, &order).unwrap_err();
        assert!(matches!(err, SearchError::InvalidDecreaseKey { .. }));
        h.pop(&order);
        assert!(h.decrease_key(1, &order).is_err());
    }

    #[test]
    fn test_clear_resets_positions() {
        let order = |a: u64, b: u64| a < b;
        let mut h: IndexedHeap<u64> = IndexedHeap::new(StoreStrategy::Sparse, None, 0);
        for v in [5u64, 1_000, 42] {
            h.push(v, &order);
        }
        assert!(h.contains(42));
        h.clear();
        assert!(h.is_empty());
        assert!(!h.contains(42));
        h.push(42, &order);
        assert_eq!(h.len(), 1);
        assert_eq!(h.top(), Some(42));
    }
}
