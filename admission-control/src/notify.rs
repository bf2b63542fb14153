//! One-way notifications about customers leaving the queue.
//!
//! The controller reports two events: a customer forwarded to the bank, and
//! a customer starting to see a manager. Notifiers observe; they never
//! influence queue state.

use core::fmt;

use crate::Customer;

/// What happened to a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Forwarded to the bank, leaving the queue or never entering it.
    SentToBank,
    /// Released from the queue to a manager.
    SeeingManager,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::SentToBank => f.write_str("sent to bank"),
            Event::SeeingManager => f.write_str("seeing a manager"),
        }
    }
}

/// Receiver for customer events.
pub trait Notifier {
    /// Called once per event.
    fn notify(&mut self, customer: &Customer, event: Event);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    #[inline]
    fn notify(&mut self, customer: &Customer, event: Event) {
        (**self).notify(customer, event);
    }
}

/// Emits each event as a `tracing` event at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, customer: &Customer, event: Event) {
        tracing::info!(
            customer = customer.name(),
            priority = customer.priority(),
            arrival = customer.arrival(),
            %event,
            "customer {event}"
        );
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Vec<(String, Event)>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded `(name, event)` pairs.
    pub fn events(&self) -> &[(String, Event)] {
        &self.events
    }

    /// Returns names recorded for `event`, in order.
    pub fn names(&self, event: Event) -> Vec<&str> {
        self.events
            .iter()
            .filter(|(_, e)| *e == event)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Drains the recorded events.
    pub fn take(&mut self) -> Vec<(String, Event)> {
        core::mem::take(&mut self.events)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, customer: &Customer, event: Event) {
        self.events.push((customer.name().to_owned(), event));
    }
}
