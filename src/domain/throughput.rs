use std::fmt;
use std::ops::Add;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThroughputError {
    #[error("throughput must not be NaN")]
    NotANumber,
    #[error("throughput must not be negative, got {0}")]
    Negative(f64),
    #[error("dividing throughput {dividend} by {divisor} is indeterminate")]
    IndeterminateDivision { dividend: f64, divisor: f64 },
}

/// Work items completed per working day.
///
/// Always non-negative and never NaN. Positive infinity is allowed and models
/// a day in which any amount of remaining work can be finished.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Throughput(f64);

impl Throughput {
    pub const ZERO: Throughput = Throughput(0.0);

    pub fn new(value: f64) -> Result<Self, ThroughputError> {
        if value.is_nan() {
            return Err(ThroughputError::NotANumber);
        }
        if value < 0.0 {
            return Err(ThroughputError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn from_work_items(work_items: u64) -> Self {
        Self(work_items as f64)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_infinite(self) -> bool {
        self.0.is_infinite()
    }

    /// Number of whole work items this throughput can finish.
    pub fn whole_work_items(self) -> u64 {
        if self.is_infinite() {
            return u64::MAX;
        }
        self.0.floor() as u64
    }

    /// The part of this throughput that does not add up to a whole work item.
    /// Infinite throughput has no remainder.
    pub fn fractional_remainder(self) -> Throughput {
        if self.is_infinite() {
            return Throughput::ZERO;
        }
        Throughput(self.0 - self.0.floor())
    }

    /// Divides `self` by `divisor`.
    ///
    /// `inf / inf` and `0 / 0` have no meaningful result and are reported as
    /// [`ThroughputError::IndeterminateDivision`] instead of yielding NaN.
    pub fn ratio(self, divisor: Throughput) -> Result<f64, ThroughputError> {
        let both_infinite = self.is_infinite() && divisor.is_infinite();
        let both_zero = self.0 == 0.0 && divisor.0 == 0.0;
        if both_infinite || both_zero {
            return Err(ThroughputError::IndeterminateDivision {
                dividend: self.0,
                divisor: divisor.0,
            });
        }
        Ok(self.0 / divisor.0)
    }
}

impl Add for Throughput {
    type Output = Throughput;

    fn add(self, rhs: Throughput) -> Throughput {
        // Both operands are non-negative, so the sum can't be NaN.
        Throughput(self.0 + rhs.0)
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
