use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkEstimateError {
    #[error("estimated days for {identifier} must be a non-negative number, got {days}")]
    InvalidDays { identifier: String, days: f64 },
}

/// Forecast for the roadmap or one of its projects, taken from a single trial.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkEstimate {
    identifier: String,
    estimated_days: f64,
    is_indeterminate: bool,
}

impl WorkEstimate {
    pub fn new(
        identifier: impl Into<String>,
        estimated_days: f64,
        is_indeterminate: bool,
    ) -> Result<Self, WorkEstimateError> {
        let identifier = identifier.into();
        if estimated_days.is_nan() || estimated_days < 0.0 {
            return Err(WorkEstimateError::InvalidDays {
                identifier,
                days: estimated_days,
            });
        }
        Ok(Self {
            identifier,
            estimated_days,
            is_indeterminate,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn estimated_days(&self) -> f64 {
        self.estimated_days
    }

    /// `true` when the trial hit its iteration cap before this work was done;
    /// `estimated_days` is then a lower bound.
    pub fn is_indeterminate(&self) -> bool {
        self.is_indeterminate
    }
}
