//! Injected ordering and equality capabilities.
//!
//! Containers take these at construction time instead of relying on the
//! element's own `Ord`/`Eq`. When none is supplied the natural one is used.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Total ordering over `T`.
pub trait Comparer<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The element's own `Ord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparer<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts the wrapped comparer. `BinaryHeap` with `Reverse` is a max-heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl Reverse<NaturalOrder> {
    pub fn natural() -> Self {
        Reverse(NaturalOrder)
    }
}

impl<T: ?Sized, C: Comparer<T>> Comparer<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Equality plus a hash consistent with it: `equals(a, b)` implies
/// `hash(a) == hash(b)`.
pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
    fn hash(&self, value: &T) -> u64;
}

/// The element's own `Eq` and `Hash`, hashed with a fixed-key SipHash so bucket
/// placement is reproducible between runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultEquality;

impl<T: Eq + Hash + ?Sized> EqualityComparer<T> for DefaultEquality {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
}

/// Equality built from a pair of closures.
///
/// ```
/// use dsa_collections::compare::{EqualityComparer, FnEquality};
///
/// let ci = FnEquality::new(
///     |a: &char, b: &char| a.eq_ignore_ascii_case(b),
///     |c: &char| c.to_ascii_lowercase() as u64,
/// );
/// assert!(ci.equals(&'A', &'a'));
/// assert_eq!(ci.hash(&'A'), ci.hash(&'a'));
/// ```
#[derive(Clone, Copy)]
pub struct FnEquality<E, H> {
    eq: E,
    hash: H,
}

impl<E, H> FnEquality<E, H> {
    pub fn new(eq: E, hash: H) -> Self {
        Self { eq, hash }
    }
}

impl<T: ?Sized, E, H> EqualityComparer<T> for FnEquality<E, H>
where
    E: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    #[inline]
    fn hash(&self, value: &T) -> u64 {
        (self.hash)(value)
    }
}

impl<E, H> std::fmt::Debug for FnEquality<E, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnEquality")
    }
}

#[inline]
pub(crate) fn is_less<T: ?Sized, C: Comparer<T>>(c: &C, a: &T, b: &T) -> bool {
    c.compare(a, b) == Ordering::Less
}

#[inline]
pub(crate) fn is_greater<T: ?Sized, C: Comparer<T>>(c: &C, a: &T, b: &T) -> bool {
    c.compare(a, b) == Ordering::Greater
}

#[inline]
pub(crate) fn is_equal<T: ?Sized, C: Comparer<T>>(c: &C, a: &T, b: &T) -> bool {
    c.compare(a, b) == Ordering::Equal
}
