//! # dsa-collections
//!
//! Generic in-memory containers with injected comparators:
//!
//! - [`HashTable`]: separate chaining with load-factor driven resizing.
//! - [`BinaryHeap`]: array-backed min-heap; pass [`compare::Reverse`] for a max-heap.
//! - [`PrefixTree`]: trie over arbitrary symbol sequences, with [`StringTrie`]
//!   as the `char`/`String` specialization.
//!
//! None of them synchronizes internally. Wrap an instance in a lock to share
//! it between threads.
//!
//! ## Example
//!
//! ```rust
//! use dsa_collections::{BinaryHeap, HashTable, StringTrie};
//!
//! let mut table = HashTable::new();
//! table.add(1, "a").unwrap();
//! assert_eq!(table.get(&1), Ok(&"a"));
//!
//! let mut heap: BinaryHeap<u32> = [3, 1, 2].into_iter().collect();
//! assert_eq!(heap.poll(), Ok(1));
//!
//! let mut trie = StringTrie::new();
//! trie.add("hello");
//! assert!(trie.contains("hello"));
//! assert!(!trie.contains("hell"));
//! ```

pub mod compare;
pub mod error;
pub mod hash_table;
pub mod heap;
pub mod prefix_tree;

pub use compare::{Comparer, DefaultEquality, EqualityComparer, NaturalOrder, Reverse};
pub use error::{CollectionError, Result};
pub use hash_table::{HashTable, HashTableConfig};
pub use heap::{BinaryHeap, HeapConfig};
pub use prefix_tree::{PrefixTree, StringTrie, Symbols};

#[cfg(test)]
mod proptests;
