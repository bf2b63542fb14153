//! Fixed-size chained hash index from names to arena handles.
//!
//! The index never resizes. Its table length is chosen once at construction
//! as the smallest prime at or above the requested capacity, and each key is
//! routed to a bucket through a SHA-256 digest of its bytes:
//!
//! ```text
//! name ──sha256──► hex digest ──31-poly hash──► i32 ──rem_euclid(len)──► slot
//! ```
//!
//! Buckets are unordered chains. A name appears in at most one bucket, at
//! most once; [`put`](HashIndex::put) never overwrites.

use sha2::{Digest, Sha256};

/// Name-keyed lookup table holding non-owning handles.
///
/// `H` is whatever the owner uses to find the record (an arena key in
/// [`IndexedPriorityQueue`](crate::IndexedPriorityQueue)).
///
/// # Example
///
/// ```
/// use admission_collections::HashIndex;
///
/// let mut index: HashIndex<usize> = HashIndex::with_capacity(10);
/// assert_eq!(index.table_len(), 11);
///
/// assert!(index.put("alice", 0));
/// assert!(!index.put("alice", 7)); // never overwrites
///
/// assert_eq!(index.get("alice"), Some(0));
/// assert_eq!(index.remove("alice"), Some(0));
/// assert!(index.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct HashIndex<H> {
    buckets: Box<[Vec<(Box<str>, H)>]>,
    len: usize,
}

impl<H: Copy> HashIndex<H> {
    /// Creates an index whose table length is the smallest prime `>= capacity`.
    ///
    /// Capacities 1, 2 and 3 are used as-is; 0 yields a single bucket.
    pub fn with_capacity(capacity: usize) -> Self {
        let table_len = table_len_for(capacity);
        Self {
            buckets: (0..table_len).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    /// Returns the number of distinct keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no keys are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed number of buckets.
    #[inline]
    pub fn table_len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the handle stored under `name`.
    pub fn get(&self, name: &str) -> Option<H> {
        self.buckets[self.slot(name)]
            .iter()
            .find(|(key, _)| &**key == name)
            .map(|&(_, handle)| handle)
    }

    /// Returns `true` if `name` is stored.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Stores `handle` under `name`.
    ///
    /// Returns `false` and leaves the index untouched if `name` is already
    /// present.
    pub fn put(&mut self, name: &str, handle: H) -> bool {
        let slot = self.slot(name);
        let bucket = &mut self.buckets[slot];
        if bucket.iter().any(|(key, _)| &**key == name) {
            return false;
        }
        bucket.push((name.into(), handle));
        self.len += 1;
        true
    }

    /// Removes `name`, returning its handle if it was present.
    pub fn remove(&mut self, name: &str) -> Option<H> {
        let slot = self.slot(name);
        let bucket = &mut self.buckets[slot];
        let at = bucket.iter().position(|(key, _)| &**key == name)?;
        let (_, handle) = bucket.swap_remove(at);
        self.len -= 1;
        Some(handle)
    }

    /// Iterates over every stored key, bucket by bucket.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(key, _)| &**key))
    }

    /// Returns the chain length of bucket `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= table_len()`.
    #[inline]
    pub fn bucket_len(&self, slot: usize) -> usize {
        self.buckets[slot].len()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    #[inline]
    fn slot(&self, name: &str) -> usize {
        slot_for(name, self.buckets.len())
    }
}

/// Computes the bucket for `name` in a table of `table_len` buckets.
///
/// # Panics
///
/// Panics if `table_len` is 0.
pub fn slot_for(name: &str, table_len: usize) -> usize {
    assert!(table_len > 0, "table length must be > 0");
    let hex = format!("{:x}", Sha256::digest(name.as_bytes()));
    i64::from(poly_hash(&hex)).rem_euclid(table_len as i64) as usize
}

/// Returns the table length used for a requested `capacity`.
pub fn table_len_for(capacity: usize) -> usize {
    match capacity {
        0 => 1,
        1..=3 => capacity,
        n if is_prime(n) => n,
        n => next_prime(n),
    }
}

// 31-polynomial string hash with i32 wraparound.
#[inline]
fn poly_hash(s: &str) -> i32 {
    s.bytes()
        .fold(0i32, |h, b| h.wrapping_mul(31).wrapping_add(i32::from(b)))
}

// Only called for n > 3.
fn is_prime(n: usize) -> bool {
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Walks the 6k±1 candidates upward from `n`.
fn next_prime(mut n: usize) -> usize {
    match n % 6 {
        0 | 4 => n += 1,
        2 => n += 3,
        3 => n += 2,
        _ => {}
    }
    while !is_prime(n) {
        n += if n % 6 == 5 { 2 } else { 4 };
    }
    n
}
