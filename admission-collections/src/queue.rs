//! Capacity-bounded max-heap with O(log n) removal and update by name.
//!
//! Entries live in a [`slab`] arena owned by the queue. The heap array holds
//! arena keys, every entry embeds its own heap position, and a [`HashIndex`]
//! maps each name to its arena key. All three are updated inside the same
//! `&mut self` call, so between calls the index and the heap always describe
//! exactly the same set of names.
//!
//! ```text
//!   index: "bob" ─┐      heap: [ 3, 0, 1 ]        entries (arena)
//!          "amy" ─┼─┐           │  │  │           0: amy  pos=1
//!          "cal" ─┼─┼─┐         │  │  └─────────► 1: cal  pos=2
//!                 │ │ │         │  └────────────► 0
//!                 └─┼─┼─────────┴───────────────► 3: bob  pos=0
//! ```

use core::fmt;
use core::marker::PhantomData;

use slab::Slab;

use crate::{HashIndex, Position};

/// Trait for types that can sit in an [`IndexedPriorityQueue`].
///
/// Implementors carry a unique name, a mutable priority and their own heap
/// position. `Ord` decides service order: the greatest entry is the root.
/// Ties on priority should be broken so that no two distinct entries compare
/// equal (e.g. earlier arrival is greater).
///
/// # Example
///
/// ```
/// use admission_collections::{Position, QueueEntry};
/// use std::cmp::Ordering;
///
/// struct Job {
///     name: String,
///     priority: i64,
///     seq: u64,
///     pos: u32,
/// }
///
/// impl QueueEntry for Job {
///     type Priority = i64;
///     fn key(&self) -> &str { &self.name }
///     fn priority(&self) -> i64 { self.priority }
///     fn set_priority(&mut self, priority: i64) { self.priority = priority; }
///     fn queue_pos(&self) -> u32 { self.pos }
///     fn set_queue_pos(&mut self, pos: u32) { self.pos = pos; }
/// }
///
/// impl Ord for Job {
///     fn cmp(&self, other: &Self) -> Ordering {
///         self.priority
///             .cmp(&other.priority)
///             .then_with(|| other.seq.cmp(&self.seq))
///     }
/// }
/// impl PartialOrd for Job {
///     fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
/// }
/// impl PartialEq for Job {
///     fn eq(&self, other: &Self) -> bool { self.cmp(other).is_eq() }
/// }
/// impl Eq for Job {}
/// ```
pub trait QueueEntry<P: Position = u32>: Ord {
    /// Priority value; higher is served first.
    type Priority: Copy + Ord;

    /// Unique name used for lookup.
    fn key(&self) -> &str;

    /// Current priority.
    fn priority(&self) -> Self::Priority;

    /// Overwrites the priority. Only the queue calls this while queued.
    fn set_priority(&mut self, priority: Self::Priority);

    /// Position in the heap array, or `P::NONE` when not queued.
    fn queue_pos(&self) -> P;

    /// Sets the position in the heap array.
    fn set_queue_pos(&mut self, pos: P);

    /// Returns `true` if this entry is currently queued.
    #[inline]
    fn in_queue(&self) -> bool {
        self.queue_pos().offset().is_some()
    }
}

/// Why an insert was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Every slot is occupied.
    Full,
    /// An entry with the same name is already queued.
    Duplicate,
}

/// A refused insert, handing the value back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected<T> {
    /// Why the insert was refused.
    pub reason: RejectReason,
    /// The value that was not inserted.
    pub value: T,
}

impl<T> Rejected<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectReason::Full => write!(f, "queue is full"),
            RejectReason::Duplicate => write!(f, "name is already queued"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for Rejected<T> {}

/// A bounded max-heap whose entries can be found, removed and reprioritised
/// by name in O(log n).
///
/// # Example
///
/// ```
/// # use admission_collections::{IndexedPriorityQueue, Position, QueueEntry};
/// # use std::cmp::Ordering;
/// # #[derive(Debug)]
/// # struct Job { name: &'static str, priority: i64, seq: u64, pos: u32 }
/// # impl Job {
/// #     fn new(name: &'static str, priority: i64, seq: u64) -> Self {
/// #         Self { name, priority, seq, pos: u32::NONE }
/// #     }
/// # }
/// # impl QueueEntry for Job {
/// #     type Priority = i64;
/// #     fn key(&self) -> &str { self.name }
/// #     fn priority(&self) -> i64 { self.priority }
/// #     fn set_priority(&mut self, p: i64) { self.priority = p; }
/// #     fn queue_pos(&self) -> u32 { self.pos }
/// #     fn set_queue_pos(&mut self, pos: u32) { self.pos = pos; }
/// # }
/// # impl Ord for Job {
/// #     fn cmp(&self, o: &Self) -> Ordering {
/// #         self.priority.cmp(&o.priority).then_with(|| o.seq.cmp(&self.seq))
/// #     }
/// # }
/// # impl PartialOrd for Job {
/// #     fn partial_cmp(&self, o: &Self) -> Option<Ordering> { Some(self.cmp(o)) }
/// # }
/// # impl PartialEq for Job { fn eq(&self, o: &Self) -> bool { self.cmp(o).is_eq() } }
/// # impl Eq for Job {}
/// let mut queue: IndexedPriorityQueue<Job> = IndexedPriorityQueue::with_capacity(3);
///
/// queue.insert(Job::new("low", 10, 1)).unwrap();
/// queue.insert(Job::new("high", 50, 2)).unwrap();
/// queue.insert(Job::new("mid", 30, 3)).unwrap();
/// assert!(queue.insert(Job::new("late", 5, 4)).is_err());
///
/// queue.update_priority("low", 99);
/// assert_eq!(queue.extract_max().unwrap().name, "low");
/// assert_eq!(queue.remove("mid").unwrap().name, "mid");
/// assert_eq!(queue.peek_max().unwrap().name, "high");
/// ```
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<T, P: Position = u32> {
    /// Owns every queued entry.
    entries: Slab<T>,
    /// Heap-ordered arena keys.
    heap: Vec<usize>,
    /// Name to arena key.
    index: HashIndex<usize>,
    capacity: usize,
    _marker: PhantomData<P>,
}

impl<T, P> IndexedPriorityQueue<T, P>
where
    T: QueueEntry<P>,
    P: Position,
{
    /// Creates an empty queue holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or not addressable by `P`.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity <= P::MAX_CAPACITY,
            "capacity exceeds position type maximum"
        );

        Self {
            entries: Slab::with_capacity(capacity),
            heap: Vec::with_capacity(capacity),
            index: HashIndex::with_capacity(capacity),
            capacity,
            _marker: PhantomData,
        }
    }

    /// Returns the number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.heap.len() == self.capacity
    }

    /// Returns the name index.
    #[inline]
    pub fn index(&self) -> &HashIndex<usize> {
        &self.index
    }

    /// Returns the greatest entry without removing it.
    #[inline]
    pub fn peek_max(&self) -> Option<&T> {
        self.heap.first().map(|&slot| &self.entries[slot])
    }

    /// Returns the entry named `name`.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|slot| &self.entries[slot])
    }

    /// Returns `true` if an entry named `name` is queued.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Returns the heap offset of the entry named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(|entry| entry.queue_pos().offset())
    }

    /// Iterates over queued entries in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.heap.iter().map(|&slot| &self.entries[slot])
    }

    /// Inserts `value`, returning the heap offset it settled at.
    ///
    /// # Errors
    ///
    /// Returns the value back with [`RejectReason::Full`] if the queue is at
    /// capacity, or [`RejectReason::Duplicate`] if its name is already queued.
    /// Nothing is modified in either case.
    pub fn insert(&mut self, value: T) -> Result<usize, Rejected<T>> {
        if self.is_full() {
            return Err(Rejected {
                reason: RejectReason::Full,
                value,
            });
        }
        if self.index.contains(value.key()) {
            return Err(Rejected {
                reason: RejectReason::Duplicate,
                value,
            });
        }

        let slot = self.entries.insert(value);
        Ok(self.attach(slot))
    }

    /// Removes and returns the greatest entry.
    pub fn extract_max(&mut self) -> Option<T> {
        let slot = *self.heap.first()?;
        self.detach(slot);
        Some(self.entries.remove(slot))
    }

    /// Removes and returns the entry named `name`.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let slot = self.index.get(name)?;
        self.detach(slot);
        Some(self.entries.remove(slot))
    }

    /// Sets the priority of the entry named `name` and restores heap order.
    ///
    /// The entry is unlinked, updated and relinked without leaving the arena,
    /// so it is the same record before and after. Returns `false` if no such
    /// entry is queued.
    pub fn update_priority(&mut self, name: &str, priority: T::Priority) -> bool {
        let Some(slot) = self.index.get(name) else {
            return false;
        };

        self.detach(slot);
        self.entries[slot].set_priority(priority);
        self.attach(slot);
        true
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
        self.entries.clear();
    }

    /// Links an arena entry into the index and the heap.
    fn attach(&mut self, slot: usize) -> usize {
        let registered = self.index.put(self.entries[slot].key(), slot);
        debug_assert!(registered, "name already indexed");

        let pos = self.heap.len();
        self.heap.push(slot);
        self.entries[slot].set_queue_pos(P::at(pos));
        self.sift_up(pos)
    }

    /// Unlinks an arena entry from the index and the heap. The entry itself
    /// stays in the arena.
    fn detach(&mut self, slot: usize) {
        let Some(pos) = self.entries[slot].queue_pos().offset() else {
            return;
        };
        self.entries[slot].set_queue_pos(P::NONE);
        self.index.remove(self.entries[slot].key());

        // Last entry moves into the hole.
        let removed = self.heap.swap_remove(pos);
        debug_assert_eq!(removed, slot);

        if pos < self.heap.len() {
            let moved = self.heap[pos];
            self.entries[moved].set_queue_pos(P::at(pos));
            // At most one of these moves it.
            let pos = self.sift_up(pos);
            self.sift_down(pos);
        }
    }

    fn sift_up(&mut self, pos: usize) -> usize {
        let slot = self.heap[pos];
        let mut hole = pos;

        while hole > 0 {
            let parent = (hole - 1) / 2;
            let parent_slot = self.heap[parent];

            if self.entries[slot] > self.entries[parent_slot] {
                self.heap[hole] = parent_slot;
                self.entries[parent_slot].set_queue_pos(P::at(hole));
                hole = parent;
            } else {
                break;
            }
        }

        if hole != pos {
            self.heap[hole] = slot;
            self.entries[slot].set_queue_pos(P::at(hole));
        }
        hole
    }

    fn sift_down(&mut self, pos: usize) -> usize {
        let len = self.heap.len();
        let slot = self.heap[pos];
        let mut hole = pos;

        loop {
            let left = 2 * hole + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let greater = if right < len
                && self.entries[self.heap[right]] > self.entries[self.heap[left]]
            {
                right
            } else {
                left
            };

            let greater_slot = self.heap[greater];
            if self.entries[greater_slot] > self.entries[slot] {
                self.heap[hole] = greater_slot;
                self.entries[greater_slot].set_queue_pos(P::at(hole));
                hole = greater;
            } else {
                break;
            }
        }

        if hole != pos {
            self.heap[hole] = slot;
            self.entries[slot].set_queue_pos(P::at(hole));
        }
        hole
    }
}
