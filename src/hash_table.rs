//! Separate-chaining hash table.
//!
//! Each bucket is a short chain of `(K, V)` pairs kept inline when it holds a
//! single pair. The bucket for a key is `hash(key) % bucket_count`; lookups and
//! removals scan that chain linearly with the table's [`EqualityComparer`].
//!
//! | Operation                     | Cost         |
//! |-------------------------------|--------------|
//! | `add`, `set`, `get`, `remove` | O(1)*        |
//! | `contains_key`, `try_get`     | O(1)*        |
//! | `keys`, `values`, `copy_to`   | O(n)         |
//! | `len`                         | O(1)         |
//!
//! \* amortized, and assuming the hash spreads keys well. Heavy collisions
//! degrade to O(chain length) without affecting correctness.

use std::fmt;
use std::ops::Index;

use smallvec::SmallVec;
use tracing::debug;

use crate::compare::{DefaultEquality, EqualityComparer};
use crate::error::{check_copy_bounds, CollectionError, Result};

type Bucket<K, V> = SmallVec<[(K, V); 1]>;

/// Construction-time tuning for [`HashTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashTableConfig {
    /// Bucket count before the first resize.
    pub initial_buckets: usize,
    /// Resize once `len > bucket_count * load_factor`.
    pub load_factor: f64,
    /// Bucket count multiplier applied on each resize.
    pub growth_factor: usize,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_buckets: 4,
            load_factor: 0.8,
            growth_factor: 2,
        }
    }
}

impl HashTableConfig {
    pub fn validate(&self) -> Result<()> {
        if self.initial_buckets == 0 {
            return Err(CollectionError::InvalidArgument(
                "initial_buckets must be at least 1".into(),
            ));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(CollectionError::InvalidArgument(format!(
                "load_factor must be finite and positive, got {}",
                self.load_factor
            )));
        }
        if self.growth_factor < 2 {
            return Err(CollectionError::InvalidArgument(format!(
                "growth_factor must be at least 2, got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }
}

/// An associative map with separate chaining and load-factor driven resizing.
///
/// ```
/// use dsa_collections::HashTable;
///
/// let mut table = HashTable::new();
/// table.add(1, "a").unwrap();
/// table.set(1, "c");
/// assert_eq!(table.get(&1), Ok(&"c"));
/// assert!(table.add(1, "d").is_err());
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, E = DefaultEquality> {
    buckets: Vec<Bucket<K, V>>,
    count: usize,
    load_factor: f64,
    growth_factor: usize,
    comparer: E,
}

impl<K, V> HashTable<K, V, DefaultEquality> {
    pub fn new() -> Self {
        Self::with_comparer(DefaultEquality)
    }

    /// Sizes the bucket array so that `capacity` insertions do not resize.
    pub fn with_capacity(capacity: usize) -> Self {
        let defaults = HashTableConfig::default();
        let needed = (capacity as f64 / defaults.load_factor).ceil() as usize;
        Self::build(
            HashTableConfig {
                initial_buckets: needed.max(defaults.initial_buckets),
                ..defaults
            },
            DefaultEquality,
        )
    }
}

impl<K, V> Default for HashTable<K, V, DefaultEquality> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> HashTable<K, V, E> {
    pub fn with_comparer(comparer: E) -> Self {
        Self::build(HashTableConfig::default(), comparer)
    }

    pub fn with_config(config: HashTableConfig, comparer: E) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, comparer))
    }

    fn build(config: HashTableConfig, comparer: E) -> Self {
        Self {
            buckets: empty_buckets(config.initial_buckets),
            count: 0,
            load_factor: config.load_factor,
            growth_factor: config.growth_factor,
            comparer,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drops every pair. The bucket count is kept.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.buckets.len());
        self.count = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.count,
        }
    }

    /// Snapshot of all keys, in iteration order.
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Snapshot of all values, in iteration order.
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.buckets
            .iter_mut()
            .flat_map(|chain| chain.iter_mut().map(|(_, v)| v))
    }
}

impl<K, V, E: EqualityComparer<K>> HashTable<K, V, E> {
    #[inline]
    fn bucket_index(&self, key: &K) -> usize {
        (self.comparer.hash(key) % self.buckets.len() as u64) as usize
    }

    fn position(&self, bucket: usize, key: &K) -> Option<usize> {
        self.buckets[bucket]
            .iter()
            .position(|(k, _)| self.comparer.equals(k, key))
    }

    /// Grows before an insertion when the load factor has been crossed.
    fn ensure_capacity(&mut self) {
        if (self.count as f64) <= self.buckets.len() as f64 * self.load_factor {
            return;
        }

        let old_buckets = self.buckets.len();
        let new_buckets = old_buckets.saturating_mul(self.growth_factor);
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_buckets));
        let live = self.count;
        self.count = 0;
        for (key, value) in old.into_iter().flatten() {
            let idx = self.bucket_index(&key);
            self.buckets[idx].push((key, value));
            self.count += 1;
        }
        debug_assert_eq!(self.count, live);
        debug!(old_buckets, new_buckets, len = self.count, "hash table resized");
    }

    /// Inserts a new pair, failing if the key is already present.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        self.ensure_capacity();
        let idx = self.bucket_index(&key);
        if self.position(idx, &key).is_some() {
            return Err(CollectionError::DuplicateKey);
        }
        self.buckets[idx].push((key, value));
        self.count += 1;
        Ok(())
    }

    /// Inserts or overwrites, returning the replaced value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.ensure_capacity();
        let idx = self.bucket_index(&key);
        match self.position(idx, &key) {
            Some(pos) => {
                let slot = &mut self.buckets[idx][pos];
                slot.0 = key;
                Some(std::mem::replace(&mut slot.1, value))
            }
            None => {
                self.buckets[idx].push((key, value));
                self.count += 1;
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        self.try_get(key).ok_or(CollectionError::KeyNotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let idx = self.bucket_index(key);
        let pos = self.position(idx, key).ok_or(CollectionError::KeyNotFound)?;
        Ok(&mut self.buckets[idx][pos].1)
    }

    pub fn try_get(&self, key: &K) -> Option<&V> {
        let idx = self.bucket_index(key);
        self.position(idx, key).map(|pos| &self.buckets[idx][pos].1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        let idx = self.bucket_index(key);
        self.position(idx, key).is_some()
    }

    /// Removes the pair for `key`. Returns `false` if there was none.
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes the pair for `key` and hands it back.
    pub fn take(&mut self, key: &K) -> Option<(K, V)> {
        let idx = self.bucket_index(key);
        let pos = self.position(idx, key)?;
        self.count -= 1;
        Some(self.buckets[idx].remove(pos))
    }
}

impl<K, V: PartialEq, E: EqualityComparer<K>> HashTable<K, V, E> {
    /// Whether `key` is present and currently maps to `value`.
    pub fn contains_pair(&self, key: &K, value: &V) -> bool {
        self.try_get(key).is_some_and(|v| v == value)
    }

    /// Removes `key` only if it currently maps to `value`.
    pub fn remove_pair(&mut self, key: &K, value: &V) -> bool {
        self.contains_pair(key, value) && self.remove(key)
    }
}

impl<K: Clone, V: Clone, E> HashTable<K, V, E> {
    /// Clones every pair into `dest[offset..]` in iteration order.
    pub fn copy_to(&self, dest: &mut [(K, V)], offset: usize) -> Result<()> {
        check_copy_bounds(dest.len(), offset, self.count)?;
        for (slot, (k, v)) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = (k.clone(), v.clone());
        }
        Ok(())
    }
}

fn empty_buckets<K, V>(n: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::with_capacity(n);
    buckets.resize_with(n, SmallVec::new);
    buckets
}

impl<K, V, E: EqualityComparer<K>> Index<&K> for HashTable<K, V, E> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is absent. Use [`HashTable::get`] for a fallible lookup.
    fn index(&self, key: &K) -> &V {
        match self.try_get(key) {
            Some(v) => v,
            None => panic!("{}", CollectionError::KeyNotFound),
        }
    }
}

impl<K, V, E: EqualityComparer<K>> Extend<(K, V)> for HashTable<K, V, E> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, E: EqualityComparer<K> + Default> FromIterator<(K, V)> for HashTable<K, V, E> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_comparer(E::default());
        table.extend(iter);
        table
    }
}

impl<K: fmt::Debug, V: fmt::Debug, E> fmt::Debug for HashTable<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a [`HashTable`], bucket by bucket.
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Bucket<K, V>>,
    chain: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.chain.next() {
                self.remaining -= 1;
                return Some((k, v));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, E> IntoIterator for &'a HashTable<K, V, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over a [`HashTable`].
pub struct IntoIter<K, V> {
    inner: std::iter::Flatten<std::vec::IntoIter<Bucket<K, V>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.inner.next()?;
        self.remaining -= 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V, E> IntoIterator for HashTable<K, V, E> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.buckets.into_iter().flatten(),
            remaining: self.count,
        }
    }
}

#[cfg(test)]
impl<K, V, E: EqualityComparer<K>> HashTable<K, V, E> {
    /// Checks bucket placement, key uniqueness and the live count.
    pub(crate) fn validate(&self) {
        let mut seen = 0usize;
        for (idx, chain) in self.buckets.iter().enumerate() {
            for (i, (k, _)) in chain.iter().enumerate() {
                assert_eq!(self.bucket_index(k), idx, "pair stored in the wrong bucket");
                assert!(
                    chain[i + 1..].iter().all(|(other, _)| !self.comparer.equals(k, other)),
                    "duplicate key inside a bucket"
                );
                seen += 1;
            }
        }
        assert_eq!(seen, self.count, "stored pairs must match HashTable::len");
    }
}
