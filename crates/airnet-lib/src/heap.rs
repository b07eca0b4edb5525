//! Array-backed binary min-heap shared by every weighted search.
//!
//! The children of index `i` live at `2i + 1` and `2i + 2`. Unlike
//! [`std::collections::BinaryHeap`] this is a min-heap and accepts a
//! caller-supplied ordering.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// Binary min-heap ordered by natural `Ord` or a caller-supplied comparator.
pub struct PriorityQueue<T> {
    items: Vec<T>,
    compare: fn(&T, &T) -> Ordering,
}

impl<T: Ord> PriorityQueue<T> {
    /// Create an empty queue ordered by `T`'s natural ordering.
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue ordered by `compare`; the element comparing
    /// smallest is extracted first.
    pub fn with_comparator(compare: fn(&T, &T) -> Ordering) -> Self {
        Self {
            items: Vec::new(),
            compare,
        }
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Smallest element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Add an element in O(log n).
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the smallest element.
    ///
    /// Returns [`Error::EmptyQueue`] when nothing is queued.
    pub fn extract_min(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(Error::EmptyQueue);
        }

        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            // Strict comparison keeps the left child on ties.
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_min_heap<T>(queue: &PriorityQueue<T>) -> bool {
        (1..queue.items.len()).all(|i| !queue.less(i, (i - 1) / 2))
    }

    #[test]
    fn extracts_in_ascending_order() {
        let mut queue = PriorityQueue::new();
        for value in [7, 3, 9, 1, 4, 4, 8, 0, 6] {
            queue.insert(value);
            assert!(is_min_heap(&queue));
        }

        let mut drained = Vec::new();
        while !queue.is_empty() {
            drained.push(queue.extract_min().unwrap());
            assert!(is_min_heap(&queue));
        }
        assert_eq!(drained, vec![0, 1, 3, 4, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn empty_queue_reports_error() {
        let mut queue: PriorityQueue<u32> = PriorityQueue::new();
        assert!(matches!(queue.extract_min(), Err(Error::EmptyQueue)));

        queue.insert(5);
        assert_eq!(queue.extract_min().unwrap(), 5);
        assert!(matches!(queue.extract_min(), Err(Error::EmptyQueue)));
    }

    #[test]
    fn custom_comparator_is_respected() {
        let mut queue = PriorityQueue::with_comparator(|a: &u32, b: &u32| b.cmp(a));
        for value in [2, 10, 5] {
            queue.insert(value);
        }
        assert_eq!(queue.peek(), Some(&10));
        assert_eq!(queue.extract_min().unwrap(), 10);
        assert_eq!(queue.extract_min().unwrap(), 5);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn sift_down_prefers_left_child_on_equal_keys() {
        let mut queue =
            PriorityQueue::with_comparator(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
        for item in [(0, 'r'), (5, 'L'), (5, 'R'), (9, 'z')] {
            queue.insert(item);
        }
        assert_eq!(queue.items, vec![(0, 'r'), (5, 'L'), (5, 'R'), (9, 'z')]);

        assert_eq!(queue.extract_min().unwrap(), (0, 'r'));
        assert_eq!(queue.items[0], (5, 'L'));
        assert_eq!(queue.items, vec![(5, 'L'), (9, 'z'), (5, 'R')]);
    }

    #[test]
    fn tuple_keys_break_ties_on_second_field() {
        let mut queue = PriorityQueue::new();
        queue.insert((5u64, 3usize));
        queue.insert((5, 1));
        queue.insert((2, 9));
        assert_eq!(queue.extract_min().unwrap(), (2, 9));
        assert_eq!(queue.extract_min().unwrap(), (5, 1));
        assert_eq!(queue.extract_min().unwrap(), (5, 3));
    }
}
