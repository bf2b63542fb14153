//! Bounded priority queue with name-keyed lookup.
//!
//! This crate provides the data structures behind a capacity-bounded
//! admission queue: a max-heap whose entries can be found, removed and
//! reprioritised by name in O(log n).
//!
//! # Design
//!
//! ```text
//! Slab<T>            - owns entries, stable arena keys
//! Vec<usize>         - heap order over arena keys
//! HashIndex<usize>   - name -> arena key, fixed prime-sized table
//! ```
//!
//! Each entry embeds its own heap position (see [`Position`]), so removing
//! or updating an arbitrary entry only needs the index lookup plus one
//! sift pass. The arena is the only owner; the index holds handles.
//!
//! # Invariants
//!
//! Between any two calls on an [`IndexedPriorityQueue`]:
//!
//! - every parent compares `>=` each of its children
//! - every queued entry's stored position is its true heap offset
//! - the set of names in the [`HashIndex`] equals the set of queued names
//! - the queue never holds more than its capacity
//!
//! # Quick Start
//!
//! ```
//! use admission_collections::HashIndex;
//!
//! let mut index: HashIndex<u32> = HashIndex::with_capacity(16);
//! index.put("alice", 3);
//! assert_eq!(index.get("alice"), Some(3));
//! assert_eq!(index.table_len(), 17);
//! ```
//!
//! See [`IndexedPriorityQueue`] for a full queue example.

#![warn(missing_docs)]

pub mod hash_index;
pub mod position;
pub mod queue;

pub use hash_index::HashIndex;
pub use position::Position;
pub use queue::{IndexedPriorityQueue, QueueEntry, RejectReason, Rejected};
