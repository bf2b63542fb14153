//! Admission policy over the indexed customer queue.
//!
//! Every arrival ends in one of three places:
//!
//! ```text
//!                      priority > threshold
//!   arrive ─────────────────────────────────────────────► bank
//!     │
//!     ├── room in queue ──────────────────────────────────► queue
//!     │
//!     └── queue full ──┬── priority > current max ────────► bank
//!                      └── otherwise ─────────────────────► turned away
//! ```
//!
//! Waiting customers leave through [`see_next`](AdmissionController::see_next)
//! (manager), [`handle_emergency`](AdmissionController::handle_emergency)
//! (bank or walk-out) or [`walk_out`](AdmissionController::walk_out).

use admission_collections::IndexedPriorityQueue;

use crate::{
    AdmissionConfig, ConfigError, Customer, Event, Notifier, RngSwing, SwingSource,
    TracingNotifier,
};

/// Running totals kept by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Arrivals processed, including ones sent straight to the bank.
    pub processed: u64,
    /// Customers forwarded to the bank.
    pub sent_to_bank: u64,
    /// Customers released to a manager.
    pub seen_by_manager: u64,
    /// Walk-outs, voluntary or after an emergency.
    pub walked_out: u64,
}

/// Decides, per arrival, whether a customer waits, goes to the bank or is
/// turned away, and manages the waiting queue afterwards.
///
/// # Example
///
/// ```
/// use admission_control::{
///     AdmissionConfig, AdmissionController, Event, RecordingNotifier, ScriptedSwings,
/// };
///
/// let mut cu = AdmissionController::with_parts(
///     AdmissionConfig::new(2, 1_000),
///     RecordingNotifier::new(),
///     ScriptedSwings::default(),
/// )
/// .unwrap();
///
/// assert_eq!(cu.arrive("A", 30).as_deref(), Some("A"));
/// assert_eq!(cu.arrive("B", 50).as_deref(), Some("B"));
/// assert_eq!(cu.arrive("C", 40), None); // full, not above the max
/// assert_eq!(cu.arrive("D", 60), None); // full, outbids the max: bank
///
/// assert_eq!(cu.see_next().as_deref(), Some("B"));
/// assert_eq!(cu.notifier().names(Event::SentToBank), vec!["D"]);
/// ```
#[derive(Debug)]
pub struct AdmissionController<N = TracingNotifier, S = RngSwing> {
    queue: IndexedPriorityQueue<Customer>,
    priority_threshold: i64,
    capacity: usize,
    counters: Counters,
    notifier: N,
    swings: S,
}

impl AdmissionController {
    /// Creates a controller that logs events through `tracing` and draws
    /// emergency swings from an OS-seeded generator.
    pub fn new(config: AdmissionConfig) -> Result<Self, ConfigError> {
        Self::with_parts(config, TracingNotifier, RngSwing::from_os_rng())
    }
}

impl<N, S> AdmissionController<N, S>
where
    N: Notifier,
    S: SwingSource,
{
    /// Creates a controller with the given notifier and swing source.
    pub fn with_parts(config: AdmissionConfig, notifier: N, swings: S) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            queue: IndexedPriorityQueue::with_capacity(config.capacity),
            priority_threshold: config.priority_threshold,
            capacity: config.capacity,
            counters: Counters::default(),
            notifier,
            swings,
        })
    }

    /// Processes a new arrival.
    ///
    /// Returns the name if the customer was queued, `None` if they were sent
    /// to the bank or turned away. Sending a newcomer to the bank also drops
    /// any waiting customer with the same name.
    pub fn arrive(&mut self, name: &str, priority: i64) -> Option<String> {
        self.counters.processed += 1;
        let customer = Customer::new(name, priority, self.counters.processed);

        if priority > self.priority_threshold {
            tracing::debug!(customer = name, priority, "above threshold");
            self.queue.remove(name);
            self.send_to_bank(&customer);
            return None;
        }

        if !self.queue.is_full() {
            return match self.queue.insert(customer) {
                Ok(pos) => {
                    tracing::debug!(customer = name, priority, pos, "admitted");
                    Some(name.to_owned())
                }
                Err(rejected) => {
                    tracing::debug!(customer = name, reason = ?rejected.reason, "not admitted");
                    None
                }
            };
        }

        let max = self.queue.peek_max()?;
        let (max_priority, max_arrival) = (max.priority(), max.arrival());

        if priority > max_priority {
            tracing::debug!(customer = name, priority, max_priority, "outbids full queue");
            self.queue.remove(name);
            self.send_to_bank(&customer);
            return None;
        }

        // Eviction of the current max is gated on the newcomer having arrived
        // no later than it. Arrival numbers only grow, so this never fires.
        if customer.arrival() <= max_arrival {
            let evicted = self.queue.extract_max()?;
            self.send_to_bank(&evicted);
            if let Err(rejected) = self.queue.insert(customer) {
                tracing::debug!(customer = name, reason = ?rejected.reason, "not admitted");
            }
            return Some(evicted.into_name());
        }

        tracing::debug!(customer = name, priority, max_priority, "queue full, turned away");
        None
    }

    /// Releases the highest-priority waiting customer to a manager.
    ///
    /// Returns `None` if nobody is waiting.
    pub fn see_next(&mut self) -> Option<String> {
        let customer = self.queue.extract_max()?;
        self.counters.seen_by_manager += 1;
        self.notifier.notify(&customer, Event::SeeingManager);
        Some(customer.into_name())
    }

    /// Applies a random priority swing to a waiting customer.
    ///
    /// The customer leaves for the bank if the new priority is above the
    /// threshold, or walks out if it is zero or less. Returns `true` if they
    /// left the queue, `false` if they stayed or were not waiting.
    pub fn handle_emergency(&mut self, name: &str) -> bool {
        let Some(customer) = self.queue.get(name) else {
            return false;
        };

        let before = customer.priority();
        let swing = self.swings.next_swing();
        let after = swing.apply(before);
        self.queue.update_priority(name, after);

        tracing::debug!(
            customer = name,
            before,
            after,
            direction = ?swing.direction,
            percent = swing.percent,
            "emergency"
        );

        if after > self.priority_threshold {
            if let Some(customer) = self.queue.remove(name) {
                self.send_to_bank(&customer);
            }
            true
        } else if after <= 0 {
            self.walk_out(name);
            true
        } else {
            false
        }
    }

    /// Removes a customer who leaves on their own.
    ///
    /// The walk-out is counted even if nobody by that name is waiting.
    pub fn walk_out(&mut self, name: &str) {
        self.counters.walked_out += 1;
        let removed = self.queue.remove(name).is_some();
        tracing::debug!(customer = name, removed, "walked out");
    }

    /// Returns the priority above which arrivals bypass the queue.
    #[inline]
    pub fn priority_threshold(&self) -> i64 {
        self.priority_threshold
    }

    /// Returns the queue capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of arrivals processed.
    #[inline]
    pub fn processed(&self) -> u64 {
        self.counters.processed
    }

    /// Returns the number of customers sent to the bank.
    #[inline]
    pub fn sent_to_bank(&self) -> u64 {
        self.counters.sent_to_bank
    }

    /// Returns the number of customers released to a manager.
    #[inline]
    pub fn seen_by_manager(&self) -> u64 {
        self.counters.seen_by_manager
    }

    /// Returns the number of walk-outs.
    #[inline]
    pub fn walked_out(&self) -> u64 {
        self.counters.walked_out
    }

    /// Returns all counters at once.
    #[inline]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Returns the waiting queue.
    #[inline]
    pub fn queue(&self) -> &IndexedPriorityQueue<Customer> {
        &self.queue
    }

    /// Returns the notifier.
    #[inline]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the notifier mutably.
    #[inline]
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    fn send_to_bank(&mut self, customer: &Customer) {
        self.counters.sent_to_bank += 1;
        self.notifier.notify(customer, Event::SentToBank);
    }
}
