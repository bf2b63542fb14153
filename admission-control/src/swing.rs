//! Random priority swings applied during emergencies.
//!
//! An emergency moves a customer's priority by a whole percentage between 0
//! and 9, down or up with equal probability. The draw comes from a
//! [`SwingSource`] owned by the controller so tests can script it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Direction of a swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Priority drops.
    Decrease,
    /// Priority rises.
    Increase,
}

/// One emergency draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swing {
    /// Which way the priority moves.
    pub direction: Direction,
    /// Magnitude in whole percent, `0..=9`.
    pub percent: u8,
}

impl Swing {
    /// A swing that leaves the priority unchanged.
    pub const NONE: Swing = Swing::up(0);

    /// Largest magnitude a random source produces.
    pub const MAX_PERCENT: u8 = 9;

    /// Creates a decreasing swing.
    pub const fn down(percent: u8) -> Self {
        Self {
            direction: Direction::Decrease,
            percent,
        }
    }

    /// Creates an increasing swing.
    pub const fn up(percent: u8) -> Self {
        Self {
            direction: Direction::Increase,
            percent,
        }
    }

    /// Applies the swing to `priority`.
    ///
    /// The result is `priority ± priority * percent / 100`, truncated toward
    /// zero as a whole and clamped to the `i64` range. An increase on a
    /// negative priority pushes it further below zero, and any non-zero
    /// decrease takes a priority of 1 down to 0.
    ///
    /// ```
    /// use admission_control::Swing;
    ///
    /// assert_eq!(Swing::down(9).apply(100), 91);
    /// assert_eq!(Swing::down(9).apply(50), 45);
    /// assert_eq!(Swing::up(5).apply(50), 52);
    /// assert_eq!(Swing::down(1).apply(1), 0);
    /// ```
    pub fn apply(self, priority: i64) -> i64 {
        let pct = i128::from(self.percent);
        let scale = match self.direction {
            Direction::Decrease => 100 - pct,
            Direction::Increase => 100 + pct,
        };
        // i128 division truncates toward zero.
        let swung = i128::from(priority) * scale / 100;
        swung.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

/// Source of emergency swings.
pub trait SwingSource {
    /// Draws the next swing.
    fn next_swing(&mut self) -> Swing;
}

/// Swings drawn from a random number generator.
///
/// Decreases with probability 0.5; the magnitude is uniform over `0..=9`.
#[derive(Debug, Clone)]
pub struct RngSwing<R = SmallRng> {
    rng: R,
}

impl RngSwing<SmallRng> {
    /// Seeds a `SmallRng` from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }

    /// Seeds a `SmallRng` from `seed`, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RngSwing<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SwingSource for RngSwing<R> {
    fn next_swing(&mut self) -> Swing {
        let direction = if self.rng.random_bool(0.5) {
            Direction::Decrease
        } else {
            Direction::Increase
        };
        Swing {
            direction,
            percent: self.rng.random_range(0..=Swing::MAX_PERCENT),
        }
    }
}

/// Replays a fixed list of swings, cycling when exhausted.
///
/// An empty script yields [`Swing::NONE`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedSwings {
    script: Vec<Swing>,
    next: usize,
}

impl ScriptedSwings {
    /// Creates a source that replays `script`.
    pub fn new(script: impl IntoIterator<Item = Swing>) -> Self {
        Self {
            script: script.into_iter().collect(),
            next: 0,
        }
    }

    /// Number of swings drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl SwingSource for ScriptedSwings {
    fn next_swing(&mut self) -> Swing {
        if self.script.is_empty() {
            return Swing::NONE;
        }
        let swing = self.script[self.next % self.script.len()];
        self.next += 1;
        swing
    }
}
