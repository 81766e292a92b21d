/*! The discrete time model used throughout the analysis

All durations are measured in cycles of a fixed reference clock. The
bus, the interconnects, and the processing system are assumed to run
in the same clock domain. */

use derive_more::{Add, AddAssign, Display, From, Mul, Sub, Sum};

/// This library uses a simple discrete time model: time is counted
/// in clock cycles.
pub type Time = u64;

/// The nominal frequency of the reference clock (100 MHz).
pub const CLOCK_RATE_HZ: Time = 100_000_000;

const MILLIS_PER_SECOND: f64 = 1_000.0;

/// An interval length, measured in clock cycles.
///
/// Multiplying a `Duration` by a plain `u64` scales it by a count,
/// e.g., the number of interfering transactions.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Add,
    AddAssign,
    Sub,
    Mul,
    Sum,
    From,
    Display,
)]
pub struct Duration(Time);

impl Duration {
    /// The empty interval.
    pub const fn zero() -> Duration {
        Duration(0)
    }

    /// The number of clock cycles in this interval.
    pub const fn cycles(self) -> Time {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_sub(rhs.0))
    }

    /// Add two intervals, clamping at the largest representable length.
    pub fn saturating_add(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_add(rhs.0))
    }

    /// Scale by a count, clamping at the largest representable length.
    pub fn saturating_mul(self, n: u64) -> Duration {
        Duration(self.0.saturating_mul(n))
    }

    /// Convert to milliseconds at the reference clock rate.
    pub fn to_millis(self) -> f64 {
        self.0 as f64 / CLOCK_RATE_HZ as f64 * MILLIS_PER_SECOND
    }

    /// Convert milliseconds at the reference clock rate to cycles.
    ///
    /// Partial cycles are rounded up; negative inputs yield zero.
    pub fn from_millis(ms: f64) -> Duration {
        let cycles = (ms * CLOCK_RATE_HZ as f64 / MILLIS_PER_SECOND).ceil();
        Duration(cycles.max(0.0) as Time)
    }
}

/// Divide two interval lengths, rounding up.
pub(crate) fn divide_with_ceil(a: Duration, b: Duration) -> u64 {
    a.0 / b.0 + (a.0 % b.0 > 0) as u64
}
