use thiserror::Error;
use tracing::trace;

use crate::domain::estimate::{WorkEstimate, WorkEstimateError};
use crate::domain::input_sample::InputSample;
use crate::domain::roadmap::{Roadmap, RoadmapError};
use crate::domain::throughput::{Throughput, ThroughputError};
use crate::services::estimations_collection::EstimationsCollectionError;
use crate::services::random_index::RandomIndexSource;

#[derive(Error, Debug)]
pub enum EstimationError {
    #[error("maximum number of iterations must be at least 1")]
    InvalidMaximumIterations,
    #[error("number of simulations must be at least 1")]
    InvalidNumberOfSimulations,
    #[error("input samples are empty")]
    EmptyInputSamples,
    #[error("roadmap has no remaining work")]
    NoRemainingWork,
    #[error("invalid roadmap: {0}")]
    Roadmap(#[from] RoadmapError),
    #[error("failed to collect estimations: {0}")]
    Collection(#[from] EstimationsCollectionError),
    #[error("random index {index} is out of range 0..{upper_bound}")]
    RandomIndexOutOfRange { index: usize, upper_bound: usize },
    #[error("roadmap became inconsistent during estimation: {0}")]
    InconsistentRoadmap(#[source] RoadmapError),
    #[error("throughput arithmetic failed: {0}")]
    Throughput(#[from] ThroughputError),
    #[error("trial produced no roadmap estimate")]
    MissingRoadmapEstimate,
    #[error("produced an invalid estimate: {0}")]
    InvalidEstimate(#[from] WorkEstimateError),
}

/// Runs a single trial: depletes one roadmap day by day, drawing each day's
/// throughput from the historical samples.
pub struct TimeTillCompletionEstimator<S: RandomIndexSource> {
    input_samples: Vec<InputSample>,
    random_source: S,
    maximum_iterations: u32,
}

impl<S: RandomIndexSource> TimeTillCompletionEstimator<S> {
    pub fn new(
        input_samples: Vec<InputSample>,
        random_source: S,
        maximum_iterations: u32,
    ) -> Result<Self, EstimationError> {
        if maximum_iterations < 1 {
            return Err(EstimationError::InvalidMaximumIterations);
        }
        Ok(Self {
            input_samples,
            random_source,
            maximum_iterations,
        })
    }

    pub fn input_samples(&self) -> &[InputSample] {
        &self.input_samples
    }

    pub fn maximum_iterations(&self) -> u32 {
        self.maximum_iterations
    }

    /// Estimates the working days needed to finish `roadmap`.
    ///
    /// Returns the roadmap estimate followed by one estimate per project, in
    /// the roadmap's project order. Estimates of work left unfinished when the
    /// iteration cap is reached are flagged as indeterminate.
    pub fn estimate(&mut self, mut roadmap: Roadmap) -> Result<Vec<WorkEstimate>, EstimationError> {
        if self.input_samples.is_empty() {
            return Err(EstimationError::EmptyInputSamples);
        }
        if !roadmap.has_remaining_work() {
            return Err(EstimationError::NoRemainingWork);
        }

        let mut roadmap_days = 0.0_f64;
        let mut project_days = vec![0.0_f64; roadmap.projects().len()];
        let mut leftover = Throughput::ZERO;
        let mut iterations = 0_u32;

        while roadmap.has_remaining_work() && iterations < self.maximum_iterations {
            iterations += 1;

            let throughput = self.draw_throughput()? + leftover;
            let day_consumed = consumed_fraction_of_day(throughput, roadmap.total_remaining_work())?;
            let touched = self.allocate_work(&mut roadmap, throughput.whole_work_items())?;

            for (index, project) in roadmap.projects().iter().enumerate() {
                if touched[index] {
                    project_days[index] += day_consumed;
                } else if project.has_remaining_work() {
                    project_days[index] += 1.0;
                }
            }

            leftover = throughput.fractional_remainder();
            roadmap_days += day_consumed;

            trace!(
                iteration = iterations,
                throughput = throughput.value(),
                day_consumed,
                remaining = roadmap.total_remaining_work(),
                "simulated day"
            );
        }

        let mut estimates = Vec::with_capacity(roadmap.projects().len() + 1);
        estimates.push(WorkEstimate::new(
            roadmap.label(),
            roadmap_days,
            roadmap.has_remaining_work(),
        )?);
        for (project, days) in roadmap.projects().iter().zip(project_days) {
            estimates.push(WorkEstimate::new(
                project.name(),
                days,
                project.has_remaining_work(),
            )?);
        }
        Ok(estimates)
    }

    fn draw_throughput(&mut self) -> Result<Throughput, EstimationError> {
        let upper_bound = self.input_samples.len();
        let index = self.random_source.next_index(upper_bound);
        self.input_samples
            .get(index)
            .map(|sample| sample.throughput)
            .ok_or(EstimationError::RandomIndexOutOfRange { index, upper_bound })
    }

    /// Completes up to `work_items` items, one at a time, each on a randomly
    /// chosen eligible project. Returns which projects received work.
    fn allocate_work(
        &mut self,
        roadmap: &mut Roadmap,
        work_items: u64,
    ) -> Result<Vec<bool>, EstimationError> {
        let mut touched = vec![false; roadmap.projects().len()];
        for _ in 0..work_items {
            let eligible = roadmap.eligible_projects();
            if eligible.is_empty() {
                break;
            }
            let index = self.random_source.next_index(eligible.len());
            let project_index = *eligible
                .get(index)
                .ok_or(EstimationError::RandomIndexOutOfRange {
                    index,
                    upper_bound: eligible.len(),
                })?;
            roadmap
                .complete_work_item(project_index)
                .map_err(EstimationError::InconsistentRoadmap)?;
            touched[project_index] = true;
        }
        Ok(touched)
    }
}

/// Share of a working day needed to use `throughput` on `remaining_work` items.
/// The pacing is based on the whole roadmap, not on the tier that receives work.
fn consumed_fraction_of_day(
    throughput: Throughput,
    remaining_work: u64,
) -> Result<f64, EstimationError> {
    let remaining = Throughput::from_work_items(remaining_work);
    if throughput <= remaining {
        return Ok(1.0);
    }
    Ok(remaining.ratio(throughput)?)
}
