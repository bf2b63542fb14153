//! Admission control for a capacity-bounded customer queue.
//!
//! Customers arrive with a priority (their investment). Each arrival is
//! either queued, forwarded to the bank, or turned away, and queued
//! customers later leave to see a manager, to the bank after an emergency,
//! or by walking out.
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | [`AdmissionController`] | Policy: arrivals, manager pulls, emergencies, walk-outs |
//! | [`Customer`] | Queue entry: name, priority, arrival number, heap position |
//! | [`Notifier`] | Receives bank / manager events ([`TracingNotifier`], [`RecordingNotifier`]) |
//! | [`SwingSource`] | Emergency randomness ([`RngSwing`], [`ScriptedSwings`]) |
//! | [`AdmissionConfig`] | Capacity and priority threshold |
//!
//! The queue itself is [`admission_collections::IndexedPriorityQueue`].
//!
//! # Concurrency
//!
//! The controller is a plain single-owner value. The heap and its name
//! index must change together, so shared use goes through one lock around
//! the whole controller (e.g. `Mutex<AdmissionController>`), never separate
//! locks per structure.
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for [`AdmissionConfig`]

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod customer;
pub mod notify;
pub mod swing;

pub use config::{AdmissionConfig, ConfigError};
pub use controller::{AdmissionController, Counters};
pub use customer::Customer;
pub use notify::{Event, Notifier, RecordingNotifier, TracingNotifier};
pub use swing::{Direction, RngSwing, ScriptedSwings, Swing, SwingSource};
