//! Prefix tree (trie) over arbitrary symbol sequences.
//!
//! Edges are labelled with symbols of type `S`; a stored sequence is the path
//! from the root to a node flagged *terminal*. The tree never keeps a node
//! that is neither terminal nor has children: `remove` prunes such nodes
//! bottom-up as soon as they appear.
//!
//! Sequences come back out through a factory `Fn(&[S]) -> Q`, so the same tree
//! serves strings ([`StringTrie`]), vectors, or any caller-defined sequence
//! type.
//!
//! | Operation                   | Cost               |
//! |-----------------------------|--------------------|
//! | `add`, `contains`, `remove` | O(length × fan-out) |
//! | `len`                       | O(1)               |
//! | `iter`                      | O(nodes + Σ length) |
//!
//! Child lookup scans a node's children with the tree's equality comparer, so
//! the fan-out factor is bounded by the alphabet size.
//!
//! Iterators borrow the tree, so it cannot be modified while an enumeration
//! is in progress.

mod node;
mod symbols;

pub use symbols::Symbols;

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::compare::{DefaultEquality, EqualityComparer};
use crate::error::{check_copy_bounds, Result};
use node::{NodeArena, NodeId};

/// Sequence factory used by [`StringTrie`].
fn collect_string(symbols: &[char]) -> String {
    symbols.iter().collect()
}

fn collect_vec<S: Clone>(symbols: &[S]) -> Vec<S> {
    symbols.to_vec()
}

/// A trie of `S`-symbol sequences, handed back as `Q` values.
///
/// ```
/// use dsa_collections::StringTrie;
///
/// let mut trie = StringTrie::new();
/// trie.add("one");
/// trie.add("two");
/// trie.add("three");
/// assert!(trie.remove("two"));
///
/// let mut words: Vec<String> = trie.iter().collect();
/// words.sort();
/// assert_eq!(words, ["one", "three"]);
/// ```
#[derive(Clone)]
pub struct PrefixTree<S, Q, F = fn(&[S]) -> Q, E = DefaultEquality> {
    arena: NodeArena<S>,
    count: usize,
    factory: F,
    comparer: E,
    _marker: PhantomData<fn() -> Q>,
}

/// Prefix tree of `char` sequences rebuilt as `String`s.
pub type StringTrie = PrefixTree<char, String>;

impl StringTrie {
    pub fn new() -> Self {
        Self::with_factory(collect_string)
    }
}

impl Default for StringTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<&'a str> for StringTrie {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut trie = Self::new();
        for word in iter {
            trie.add(word);
        }
        trie
    }
}

impl<S: Clone> PrefixTree<S, Vec<S>> {
    pub fn new() -> Self {
        Self::with_factory(collect_vec)
    }
}

impl<S: Clone> Default for PrefixTree<S, Vec<S>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, Q, F: Fn(&[S]) -> Q> PrefixTree<S, Q, F> {
    /// A tree that rebuilds its sequences with `factory` and compares symbols
    /// by their own `Eq`.
    pub fn with_factory(factory: F) -> Self {
        Self::with_factory_and_comparer(factory, DefaultEquality)
    }
}

impl<S, Q, F, E> PrefixTree<S, Q, F, E> {
    pub fn with_factory_and_comparer(factory: F, comparer: E) -> Self {
        Self {
            arena: NodeArena::new(),
            count: 0,
            factory,
            comparer,
            _marker: PhantomData,
        }
    }

    /// Number of stored sequences.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drops every sequence, leaving a lone root.
    pub fn clear(&mut self) {
        self.arena = NodeArena::new();
        self.count = 0;
    }

    /// Lazily enumerates stored sequences depth-first, each node before its
    /// descendants. Every call starts a fresh traversal.
    pub fn iter(&self) -> Iter<'_, S, Q, F, E> {
        Iter {
            tree: self,
            stack: vec![NodeId::ROOT],
            buf: Vec::new(),
            remaining: self.count,
        }
    }
}

impl<S, Q, F, E: EqualityComparer<S>> PrefixTree<S, Q, F, E> {
    fn child(&self, node: NodeId, symbol: &S) -> Option<NodeId> {
        self.arena
            .get(node)
            .children
            .iter()
            .copied()
            .find(|&c| match &self.arena.get(c).symbol {
                Some(s) => self.comparer.equals(s, symbol),
                None => false,
            })
    }

    /// Node at the end of `sequence`'s path, terminal or not.
    fn walk<A: Symbols<S> + ?Sized>(&self, sequence: &A) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for symbol in sequence.symbols() {
            current = self.child(current, &symbol)?;
        }
        Some(current)
    }

    /// Stores `sequence`. Returns `false` if it was already present.
    pub fn add<A: Symbols<S> + ?Sized>(&mut self, sequence: &A) -> bool {
        let mut current = NodeId::ROOT;
        for symbol in sequence.symbols() {
            current = match self.child(current, &symbol) {
                Some(next) => next,
                None => self.arena.attach(current, symbol),
            };
        }

        let node = self.arena.get_mut(current);
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.count += 1;
        true
    }

    pub fn contains<A: Symbols<S> + ?Sized>(&self, sequence: &A) -> bool {
        self.walk(sequence)
            .is_some_and(|id| self.arena.get(id).terminal)
    }

    /// Removes `sequence` and prunes the branch it leaves dead. Returns
    /// `false` if it was not stored.
    pub fn remove<A: Symbols<S> + ?Sized>(&mut self, sequence: &A) -> bool {
        let Some(end) = self
            .walk(sequence)
            .filter(|&id| self.arena.get(id).terminal)
        else {
            return false;
        };

        self.arena.get_mut(end).terminal = false;
        self.count -= 1;

        let mut current = end;
        let mut pruned = 0usize;
        while current != NodeId::ROOT && self.arena.get(current).is_dead() {
            match self.arena.detach(current) {
                Some(parent) => current = parent,
                None => break,
            }
            pruned += 1;
        }
        if pruned > 0 {
            trace!(pruned, "prefix tree pruned dead branch");
        }
        true
    }
}

impl<S: Clone, Q, F: Fn(&[S]) -> Q, E> PrefixTree<S, Q, F, E> {
    /// Rebuilds the sequence ending at `id` by walking parent links.
    fn sequence_of(&self, id: NodeId, buf: &mut Vec<S>) -> Q {
        buf.clear();
        let mut current = self.arena.get(id);
        while let Some(parent) = current.parent {
            if let Some(symbol) = &current.symbol {
                buf.push(symbol.clone());
            }
            current = self.arena.get(parent);
        }
        buf.reverse();
        (self.factory)(buf.as_slice())
    }

    /// Writes every stored sequence into `dest[offset..]` in enumeration order.
    pub fn copy_to(&self, dest: &mut [Q], offset: usize) -> Result<()> {
        check_copy_bounds(dest.len(), offset, self.count)?;
        for (slot, sequence) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = sequence;
        }
        Ok(())
    }
}

impl<S, Q, F, E> Extend<Q> for PrefixTree<S, Q, F, E>
where
    Q: Symbols<S>,
    E: EqualityComparer<S>,
{
    fn extend<I: IntoIterator<Item = Q>>(&mut self, iter: I) {
        for sequence in iter {
            self.add(&sequence);
        }
    }
}

impl<S, Q, F, E> fmt::Debug for PrefixTree<S, Q, F, E>
where
    S: Clone,
    Q: fmt::Debug,
    F: Fn(&[S]) -> Q,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Depth-first enumeration of a [`PrefixTree`], driven by an explicit stack.
pub struct Iter<'a, S, Q, F, E> {
    tree: &'a PrefixTree<S, Q, F, E>,
    stack: Vec<NodeId>,
    buf: Vec<S>,
    remaining: usize,
}

impl<S, Q, F, E> Iterator for Iter<'_, S, Q, F, E>
where
    S: Clone,
    F: Fn(&[S]) -> Q,
{
    type Item = Q;

    fn next(&mut self) -> Option<Q> {
        if self.remaining == 0 {
            return None;
        }
        while let Some(id) = self.stack.pop() {
            let node = self.tree.arena.get(id);
            self.stack.extend(node.children.iter().rev().copied());
            if node.terminal {
                self.remaining -= 1;
                return Some(self.tree.sequence_of(id, &mut self.buf));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S, Q, F, E> ExactSizeIterator for Iter<'_, S, Q, F, E>
where
    S: Clone,
    F: Fn(&[S]) -> Q,
{
}

impl<'a, S, Q, F, E> IntoIterator for &'a PrefixTree<S, Q, F, E>
where
    S: Clone,
    F: Fn(&[S]) -> Q,
{
    type Item = Q;
    type IntoIter = Iter<'a, S, Q, F, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<S, Q, F, E> PrefixTree<S, Q, F, E> {
    /// Nodes currently allocated, root included.
    pub(crate) fn node_count(&self) -> usize {
        self.arena.live()
    }

    /// Checks parent links, the absence of dead nodes and the terminal count.
    pub(crate) fn validate(&self) {
        let mut stack = vec![NodeId::ROOT];
        let mut reachable = 0usize;
        let mut terminals = 0usize;
        while let Some(id) = stack.pop() {
            let node = self.arena.get(id);
            reachable += 1;
            if node.terminal {
                terminals += 1;
            }
            if id != NodeId::ROOT {
                assert!(!node.is_dead(), "dead node survived pruning");
                assert!(node.symbol.is_some(), "non-root node without a symbol");
            }
            for &child in &node.children {
                assert_eq!(self.arena.get(child).parent, Some(id), "broken parent link");
                stack.push(child);
            }
        }
        assert_eq!(terminals, self.count, "terminal nodes must match PrefixTree::len");
        assert_eq!(reachable, self.arena.live(), "arena holds unreachable nodes");
    }
}
