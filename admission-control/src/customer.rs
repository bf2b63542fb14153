//! Customer records as stored in the admission queue.

use core::cmp::Ordering;
use core::fmt;

use admission_collections::{Position, QueueEntry};

/// A customer waiting for (or passing through) admission.
///
/// `name` and `arrival` are fixed at creation. `priority` (the customer's
/// investment) changes only through the queue, and `queue_pos` is maintained
/// by the queue.
///
/// Ordering is by priority, then by arrival: of two equal priorities, the
/// earlier arrival compares greater and is served first.
#[derive(Debug, Clone)]
pub struct Customer {
    name: String,
    priority: i64,
    arrival: u64,
    queue_pos: u32,
}

impl Customer {
    /// Creates a customer that is not yet queued.
    pub fn new(name: impl Into<String>, priority: i64, arrival: u64) -> Self {
        Self {
            name: name.into(),
            priority,
            arrival,
            queue_pos: u32::NONE,
        }
    }

    /// Returns the customer's unique name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consumes the record, returning its name.
    #[inline]
    pub fn into_name(self) -> String {
        self.name
    }

    /// Returns the current priority.
    #[inline]
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Returns the arrival sequence number.
    #[inline]
    pub fn arrival(&self) -> u64 {
        self.arrival
    }

    /// Returns the heap offset, or `None` if not queued.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        self.queue_pos.offset()
    }
}

impl QueueEntry for Customer {
    type Priority = i64;

    #[inline]
    fn key(&self) -> &str {
        &self.name
    }

    #[inline]
    fn priority(&self) -> i64 {
        self.priority
    }

    #[inline]
    fn set_priority(&mut self, priority: i64) {
        self.priority = priority;
    }

    #[inline]
    fn queue_pos(&self) -> u32 {
        self.queue_pos
    }

    #[inline]
    fn set_queue_pos(&mut self, pos: u32) {
        self.queue_pos = pos;
    }
}

impl Ord for Customer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.arrival.cmp(&self.arrival))
    }
}

impl PartialOrd for Customer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Customer {}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.priority, self.arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_priority_is_greater() {
        let low = Customer::new("low", 10, 1);
        let high = Customer::new("high", 20, 2);
        assert!(high > low);
    }

    #[test]
    fn earlier_arrival_wins_ties() {
        let early = Customer::new("early", 10, 1);
        let late = Customer::new("late", 10, 2);
        assert!(early > late);
        assert_ne!(early, late);
    }

    #[test]
    fn new_customer_is_not_queued() {
        let c = Customer::new("a", 1, 1);
        assert_eq!(c.position(), None);
        assert!(!c.in_queue());
    }

    #[test]
    fn position_tracks_heap_offset() {
        let mut queue: admission_collections::IndexedPriorityQueue<Customer> =
            admission_collections::IndexedPriorityQueue::with_capacity(2);
        queue.insert(Customer::new("a", 1, 1)).unwrap();
        queue.insert(Customer::new("b", 5, 2)).unwrap();

        assert_eq!(queue.get("b").unwrap().position(), Some(0));
        assert_eq!(queue.get("a").unwrap().position(), Some(1));

        let b = queue.extract_max().unwrap();
        assert_eq!(b.position(), None);
        assert_eq!(queue.get("a").unwrap().position(), Some(0));
    }

    #[test]
    fn display() {
        assert_eq!(Customer::new("ann", 42, 7).to_string(), "ann, 42, 7");
    }
}
