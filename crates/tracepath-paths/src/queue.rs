//! Binary min-heap ordered by a caller-supplied comparator.
//!
//! The searches need three different orderings over the same entry type
//! (cost, cost plus heuristic, heuristic alone), so the order is injected as
//! a closure instead of being fixed by an `Ord` impl.
//!
//! There is no decrease-key. Searches that find a cheaper route to a queued
//! cell push a second entry and discard the stale one when it surfaces.

use std::cmp::Ordering;
use std::fmt;

/// A min-heap over `T` ordered by `F`.
///
/// The entry for which `cmp` reports [`Ordering::Less`] against every other
/// entry is popped first.
pub struct PriorityQueue<T, F> {
    items: Vec<T>,
    cmp: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty queue ordered by `cmp`.
    pub fn new(cmp: F) -> Self {
        Self {
            items: Vec::new(),
            cmp,
        }
    }

    /// Create an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize, cmp: F) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Insert an entry. O(log n).
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the minimum entry. O(log n).
    ///
    /// Callers are expected to check [`is_empty`](Self::is_empty) first;
    /// popping an empty queue returns `None`.
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// The minimum entry without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all entries, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.items.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.items.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for PriorityQueue<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_in_order() {
        let mut q = PriorityQueue::new(|a: &i32, b: &i32| a.cmp(b));
        q.push(3);
        q.push(1);
        q.push(2);

        assert_eq!(q.len(), 3);
        assert_eq!(q.peek(), Some(&1));
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn comparator_sets_the_order() {
        // Max-heap by reversing the comparator.
        let mut q = PriorityQueue::new(|a: &i32, b: &i32| b.cmp(a));
        for v in [4, 9, 1, 7] {
            q.push(v);
        }
        assert_eq!(q.pop(), Some(9));
        assert_eq!(q.pop(), Some(7));
    }

    #[test]
    fn sequence_breaks_ties_first_in_first_out() {
        let mut q = PriorityQueue::new(|a: &(i32, u64, char), b: &(i32, u64, char)| {
            a.0.cmp(&b.0).then(a.1.cmp(&b.1))
        });
        q.push((1, 0, 'a'));
        q.push((1, 1, 'b'));
        q.push((0, 2, 'u'));
        q.push((1, 3, 'c'));

        assert_eq!(q.pop().map(|e| e.2), Some('u'));
        assert_eq!(q.pop().map(|e| e.2), Some('a'));
        assert_eq!(q.pop().map(|e| e.2), Some('b'));
        assert_eq!(q.pop().map(|e| e.2), Some('c'));
    }

    #[test]
    fn heap_sorts_many() {
        let mut q = PriorityQueue::with_capacity(64, |a: &i32, b: &i32| a.cmp(b));
        let values = [17, 3, 99, -4, 0, 3, 42, 8, 15, 23, 4, 16, -1, 7];
        for v in values {
            q.push(v);
        }
        let mut out = Vec::new();
        while !q.is_empty() {
            out.extend(q.pop());
        }
        let mut sorted = values.to_vec();
        sorted.sort();
        assert_eq!(out, sorted);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut q = PriorityQueue::new(|a: &u8, b: &u8| a.cmp(b));
        q.push(1);
        q.push(2);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
    }
}
