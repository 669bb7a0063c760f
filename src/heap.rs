//! Array-backed binary min-heap under an injected [`Comparer`].
//!
//! The storage is a dense `Vec` read as a complete binary tree: the children of
//! slot `i` live at `2i + 1` and `2i + 2`, its parent at `(i - 1) / 2`. Every
//! non-root element compares not-less-than its parent. Supplying
//! [`Reverse`](crate::compare::Reverse) turns it into a max-heap.
//!
//! | Operation          | Cost     |
//! |--------------------|----------|
//! | `add`, `poll`      | O(log n) |
//! | `peek`, `len`      | O(1)     |
//! | `remove`, `contains` | O(n)   |

use std::fmt;

use tracing::trace;

use crate::compare::{is_equal, is_greater, is_less, Comparer, NaturalOrder};
use crate::error::{check_copy_bounds, CollectionError, Result};

/// Construction-time tuning for [`BinaryHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapConfig {
    /// Slots reserved up front.
    pub initial_capacity: usize,
    /// A full heap grows to `capacity * growth_factor + 1` slots.
    pub growth_factor: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 7,
            growth_factor: 2,
        }
    }
}

impl HeapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.growth_factor == 0 {
            return Err(CollectionError::InvalidArgument(
                "growth_factor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Priority queue yielding the minimum element under its comparer first.
///
/// ```
/// use dsa_collections::BinaryHeap;
///
/// let mut heap = BinaryHeap::new();
/// heap.add(3);
/// heap.add(1);
/// heap.add(2);
/// assert_eq!(heap.peek(), Ok(&1));
/// assert_eq!(heap.poll(), Ok(1));
/// assert_eq!(heap.poll(), Ok(2));
/// ```
#[derive(Clone)]
pub struct BinaryHeap<T, C = NaturalOrder> {
    items: Vec<T>,
    growth_factor: usize,
    comparer: C,
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right(i: usize) -> usize {
    2 * i + 2
}

impl<T> BinaryHeap<T, NaturalOrder> {
    pub fn new() -> Self {
        Self::with_comparer(NaturalOrder)
    }
}

impl<T> Default for BinaryHeap<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> BinaryHeap<T, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self::build(HeapConfig::default(), comparer)
    }

    pub fn with_config(config: HeapConfig, comparer: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, comparer))
    }

    fn build(config: HeapConfig, comparer: C) -> Self {
        Self {
            items: Vec::with_capacity(config.initial_capacity),
            growth_factor: config.growth_factor,
            comparer,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Elements in storage order (a level-order walk of the heap tree).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The minimum element, left in place.
    pub fn peek(&self) -> Result<&T> {
        self.items.first().ok_or(CollectionError::EmptyContainer)
    }

    fn ensure_capacity(&mut self) {
        let capacity = self.items.capacity();
        if self.items.len() < capacity {
            return;
        }
        let target = capacity.saturating_mul(self.growth_factor).saturating_add(1);
        self.items.reserve_exact(target - self.items.len());
        trace!(old_capacity = capacity, new_capacity = self.items.capacity(), "heap grown");
    }
}

impl<T, C: Comparer<T>> BinaryHeap<T, C> {
    pub fn add(&mut self, item: T) {
        self.ensure_capacity();
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the minimum element.
    pub fn poll(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(CollectionError::EmptyContainer);
        }
        let item = self.items.swap_remove(0);
        self.sift_down(0);
        Ok(item)
    }

    /// Removes the first element comparing equal to `item`.
    ///
    /// The last element takes the freed slot. Only the edge to its new parent
    /// or the edges to its new children can be out of order, never both: the
    /// slot's old subtree was ordered against the old parent. So a single
    /// comparison with the parent picks the one direction to repair.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(i) = self
            .items
            .iter()
            .position(|x| is_equal(&self.comparer, x, item))
        else {
            return false;
        };

        self.items.swap_remove(i);
        if i < self.items.len() {
            if i > 0 && is_less(&self.comparer, &self.items[i], &self.items[parent(i)]) {
                self.sift_up(i);
            } else {
                self.sift_down(i);
            }
        }
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|x| is_equal(&self.comparer, x, item))
    }

    /// Drains the heap in poll order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.items.len());
        while let Ok(item) = self.poll() {
            out.push(item);
        }
        out
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 && is_less(&self.comparer, &self.items[i], &self.items[parent(i)]) {
            self.items.swap(i, parent(i));
            i = parent(i);
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        while left(i) < len {
            let mut child = left(i);
            if right(i) < len && is_greater(&self.comparer, &self.items[child], &self.items[right(i)]) {
                child = right(i);
            }
            if !is_greater(&self.comparer, &self.items[i], &self.items[child]) {
                break;
            }
            self.items.swap(i, child);
            i = child;
        }
    }
}

impl<T: Clone, C> BinaryHeap<T, C> {
    /// Clones every element into `dest[offset..]` in storage order.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()> {
        check_copy_bounds(dest.len(), offset, self.items.len())?;
        dest[offset..offset + self.items.len()].clone_from_slice(&self.items);
        Ok(())
    }
}

impl<T, C: Comparer<T>> Extend<T> for BinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T, C: Comparer<T> + Default> FromIterator<T> for BinaryHeap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::with_comparer(C::default());
        heap.extend(iter);
        heap
    }
}

impl<'a, T, C> IntoIterator for &'a BinaryHeap<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consumes the heap in storage order. Use [`BinaryHeap::into_sorted_vec`] for
/// poll order.
impl<T, C> IntoIterator for BinaryHeap<T, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
impl<T, C: Comparer<T>> BinaryHeap<T, C> {
    /// Checks that no child compares less than its parent.
    pub(crate) fn validate(&self) {
        for i in 1..self.items.len() {
            assert!(
                !is_less(&self.comparer, &self.items[i], &self.items[parent(i)]),
                "heap property violated at slot {i}"
            );
        }
    }
}
