use serde::Serialize;

use crate::services::estimations_collection::TimeTillCompletionEstimationsCollection;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastPercentile {
    pub days: f64,
    /// Working day on which the work is done, `None` if it lies beyond the
    /// supported calendar range.
    pub date: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntityForecast {
    pub id: String,
    pub indeterminate_trials: usize,
    pub p0: ForecastPercentile,
    pub p50: ForecastPercentile,
    pub p85: ForecastPercentile,
    pub p100: ForecastPercentile,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub throughput_source: String,
    pub roadmap_source: String,
    pub start_date: String,
    pub simulations: usize,
    pub maximum_iterations: u32,
    pub total_work_items: u64,
    pub roadmap: EntityForecast,
    pub projects: Vec<EntityForecast>,
}

#[derive(Debug, Clone)]
pub struct ForecastOutput {
    pub report: ForecastReport,
    /// Roadmap-level days of every trial, sorted ascending.
    pub roadmap_days: Vec<f64>,
    pub estimations: TimeTillCompletionEstimationsCollection,
}
