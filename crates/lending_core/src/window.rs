//! Rolling window: a fixed-capacity ordered sequence with FIFO eviction.
//!
//! Used for the overview trend histories (capacity 12), the issuance series
//! (capacity equal to the time range's point count) and the live
//! application log (capacity 50). Newest items live at the tail.

use std::collections::vec_deque;
use std::collections::VecDeque;

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Fixed-capacity ordered sequence; pushing past capacity evicts from the head.
///
/// # Examples
///
/// ```
/// use lending_core::window::RollingWindow;
///
/// let mut window = RollingWindow::new(3);
/// for i in 1..=5 {
///     window.push(i);
/// }
/// assert_eq!(window.to_vec(), vec![3, 4, 5]);
/// assert_eq!(window.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Creates an empty window. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates a window holding the last `capacity` items of `items`.
    pub fn from_items<I>(capacity: usize, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut window = Self::new(capacity);
        window.extend(items);
        window
    }

    /// Appends `item` at the tail, returning the evicted head if capacity was exceeded.
    ///
    /// The length never exceeds capacity, not even between the append and
    /// the eviction.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Appends every item in order.
    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.push(item);
        }
    }

    /// Maximum number of items retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the window holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the window is at capacity.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Oldest item.
    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    /// Newest item.
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Item at `index`, counted from the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone> RollingWindow<T> {
    /// Copies the items out, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// Returns a new window with `item` appended; `self` is left untouched.
    pub fn pushed(&self, item: T) -> Self {
        let mut next = self.clone();
        next.push(item);
        next
    }
}

impl<'a, T> IntoIterator for &'a RollingWindow<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for RollingWindow<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
