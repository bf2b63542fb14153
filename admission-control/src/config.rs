//! Construction parameters for [`AdmissionController`](crate::AdmissionController).

use admission_collections::Position;

/// Largest capacity the queue's `u32` positions can address.
pub const MAX_CAPACITY: usize = <u32 as Position>::MAX_CAPACITY;

/// Queue capacity and the priority above which arrivals bypass the queue.
///
/// # Example
///
/// ```
/// use admission_control::AdmissionConfig;
///
/// let config = AdmissionConfig::new(2, 1_000);
/// assert!(config.validate().is_ok());
/// assert!(AdmissionConfig::new(0, 1_000).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdmissionConfig {
    /// Maximum number of waiting customers.
    pub capacity: usize,
    /// Arrivals with a priority strictly above this go straight to the bank.
    pub priority_threshold: i64,
}

impl AdmissionConfig {
    /// Creates a config.
    pub const fn new(capacity: usize, priority_threshold: i64) -> Self {
        Self {
            capacity,
            priority_threshold,
        }
    }

    /// Checks that the queue can be built from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.capacity,
                max: MAX_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self::new(64, 1_000)
    }
}

/// Invalid construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The queue must hold at least one customer.
    #[error("capacity must be > 0")]
    ZeroCapacity,
    /// The queue cannot address this many positions.
    #[error("capacity {requested} exceeds maximum {max}")]
    CapacityTooLarge {
        /// Requested capacity.
        requested: usize,
        /// Largest supported capacity.
        max: usize,
    },
}
