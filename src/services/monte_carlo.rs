use tracing::{debug, info, warn};

use crate::domain::input_sample::InputSample;
use crate::domain::roadmap_configuration::RoadmapConfiguration;
use crate::services::estimations_collection::TimeTillCompletionEstimationsCollection;
use crate::services::random_index::RandomIndexSource;
use crate::services::time_till_completion::{EstimationError, TimeTillCompletionEstimator};

/// Repeats [`TimeTillCompletionEstimator`] trials over fresh copies of one
/// roadmap configuration and collects every trial's estimates.
pub struct MonteCarloTimeTillCompletionEstimator<S: RandomIndexSource> {
    number_of_simulations: usize,
    estimator: TimeTillCompletionEstimator<S>,
}

impl<S: RandomIndexSource> MonteCarloTimeTillCompletionEstimator<S> {
    pub fn new(
        number_of_simulations: usize,
        maximum_iterations: u32,
        input_samples: Vec<InputSample>,
        random_source: S,
    ) -> Result<Self, EstimationError> {
        if number_of_simulations < 1 {
            return Err(EstimationError::InvalidNumberOfSimulations);
        }
        let estimator =
            TimeTillCompletionEstimator::new(input_samples, random_source, maximum_iterations)?;
        Ok(Self {
            number_of_simulations,
            estimator,
        })
    }

    pub fn number_of_simulations(&self) -> usize {
        self.number_of_simulations
    }

    pub fn maximum_iterations(&self) -> u32 {
        self.estimator.maximum_iterations()
    }

    pub fn estimate(
        &mut self,
        configuration: &RoadmapConfiguration,
    ) -> Result<TimeTillCompletionEstimationsCollection, EstimationError> {
        if self.estimator.input_samples().is_empty() {
            return Err(EstimationError::EmptyInputSamples);
        }

        let mut collection = TimeTillCompletionEstimationsCollection::new(
            self.number_of_simulations,
            configuration.number_of_projects(),
        )?;

        info!(
            roadmap = %configuration.name,
            projects = configuration.number_of_projects(),
            work_items = configuration.total_work_items(),
            simulations = self.number_of_simulations,
            maximum_iterations = self.estimator.maximum_iterations(),
            samples = self.estimator.input_samples().len(),
            "starting forecast"
        );

        let mut indeterminate_trials = 0_usize;
        for simulation in 0..self.number_of_simulations {
            let roadmap = configuration.to_roadmap()?;
            let mut project_estimates = self.estimator.estimate(roadmap)?;
            if project_estimates.is_empty() {
                return Err(EstimationError::MissingRoadmapEstimate);
            }
            // The roadmap estimate leads, projects follow in column order.
            let roadmap_estimate = project_estimates.remove(0);

            debug!(
                simulation,
                days = roadmap_estimate.estimated_days(),
                indeterminate = roadmap_estimate.is_indeterminate(),
                "finished trial"
            );
            if roadmap_estimate.is_indeterminate() {
                indeterminate_trials += 1;
            }

            collection.add_estimations(roadmap_estimate, project_estimates)?;
        }

        if indeterminate_trials > 0 {
            warn!(
                indeterminate_trials,
                simulations = self.number_of_simulations,
                maximum_iterations = self.estimator.maximum_iterations(),
                "some trials reached the iteration cap before finishing the roadmap"
            );
        }
        info!(simulations = collection.len(), "forecast finished");

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::estimate::WorkEstimate;
    use crate::services::random_index::RngIndexSource;
    use crate::test_support::{ConstantIndexSource, roadmap_configuration, samples};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn new_rejects_invalid_counts() {
        let result =
            MonteCarloTimeTillCompletionEstimator::new(0, 10, samples(&[1.0]), ConstantIndexSource(0));
        assert!(matches!(
            result,
            Err(EstimationError::InvalidNumberOfSimulations)
        ));

        let result =
            MonteCarloTimeTillCompletionEstimator::new(10, 0, samples(&[1.0]), ConstantIndexSource(0));
        assert!(matches!(
            result,
            Err(EstimationError::InvalidMaximumIterations)
        ));
    }

    #[test]
    fn empty_samples_fail_only_when_estimating() {
        let mut estimator =
            MonteCarloTimeTillCompletionEstimator::new(3, 10, Vec::new(), ConstantIndexSource(0))
                .unwrap();
        let error = estimator
            .estimate(&roadmap_configuration(&[("A", 1, 3)]))
            .unwrap_err();
        assert!(matches!(error, EstimationError::EmptyInputSamples));
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let mut estimator =
            MonteCarloTimeTillCompletionEstimator::new(3, 10, samples(&[1.0]), ConstantIndexSource(0))
                .unwrap();
        let error = estimator
            .estimate(&roadmap_configuration(&[("A", 1, 3), ("A", 1, 2)]))
            .unwrap_err();
        assert!(matches!(error, EstimationError::Roadmap(_)));
    }

    #[test]
    fn every_trial_starts_from_the_configuration() {
        let mut estimator =
            MonteCarloTimeTillCompletionEstimator::new(2, 100, samples(&[2.0]), ConstantIndexSource(0))
                .unwrap();

        let collection = estimator
            .estimate(&roadmap_configuration(&[("Only", 1, 10)]))
            .unwrap();

        assert_eq!(collection.len(), 2);
        assert!(collection.is_full());
        for simulation in 0..2 {
            let roadmap = collection.roadmap_estimate(simulation).unwrap();
            let project = collection.project_estimate(0, simulation).unwrap();
            assert_eq!(roadmap.estimated_days(), 5.0);
            assert_eq!(project.estimated_days(), 5.0);
            assert!(!roadmap.is_indeterminate());
            assert!(!project.is_indeterminate());
        }
    }

    #[test]
    fn non_integer_throughput_finishes_partway_through_the_last_day() {
        let mut estimator =
            MonteCarloTimeTillCompletionEstimator::new(1, 25, samples(&[3.0]), ConstantIndexSource(0))
                .unwrap();

        let collection = estimator
            .estimate(&roadmap_configuration(&[("Only", 1, 10)]))
            .unwrap();

        let roadmap = collection.roadmap_estimate(0).unwrap();
        let project = collection.project_estimate(0, 0).unwrap();
        assert!((roadmap.estimated_days() - 3.333333).abs() < 1e-6);
        assert!((project.estimated_days() - 3.333333).abs() < 1e-6);
        assert!(!roadmap.is_indeterminate());
    }

    #[test]
    fn zero_throughput_makes_every_trial_indeterminate() {
        let mut estimator = MonteCarloTimeTillCompletionEstimator::new(
            20,
            17,
            samples(&[0.0, 0.0, 0.0]),
            RngIndexSource::new(StdRng::seed_from_u64(5)),
        )
        .unwrap();

        let collection = estimator
            .estimate(&roadmap_configuration(&[("A", 2, 3), ("B", 1, 3)]))
            .unwrap();

        for estimate in collection.roadmap_estimates() {
            assert!(estimate.is_indeterminate());
            assert_eq!(estimate.estimated_days(), 17.0);
        }
    }

    #[test]
    fn determinate_estimates_stay_within_positive_throughput_bounds() {
        let mut estimator = MonteCarloTimeTillCompletionEstimator::new(
            500,
            1000,
            samples(&[1.0, 2.0, 3.0]),
            RngIndexSource::new(StdRng::seed_from_u64(7)),
        )
        .unwrap();

        let collection = estimator
            .estimate(&roadmap_configuration(&[("A", 2, 4), ("B", 1, 6)]))
            .unwrap();

        let lower = 10.0 / 3.0;
        let upper = 10.0 / 1.0;
        let days: Vec<f64> = collection
            .roadmap_estimates()
            .map(WorkEstimate::estimated_days)
            .collect();
        assert_eq!(days.len(), 500);
        assert!(days.iter().all(|day| *day >= lower - 1e-9 && *day <= upper + 1e-9));
        assert!(collection.roadmap_estimates().all(|estimate| !estimate.is_indeterminate()));
        // Resampling should not collapse onto a single outcome.
        assert!(days.iter().any(|day| (*day - days[0]).abs() > 1e-9));
    }

    #[test]
    fn project_columns_follow_configuration_order() {
        let mut estimator = MonteCarloTimeTillCompletionEstimator::new(
            10,
            100,
            samples(&[1.0, 2.0]),
            RngIndexSource::new(StdRng::seed_from_u64(1)),
        )
        .unwrap();

        let collection = estimator
            .estimate(&roadmap_configuration(&[("Low", 1, 2), ("High", 3, 2), ("Mid", 2, 2)]))
            .unwrap();

        assert_eq!(collection.project_identifiers(), vec!["Low", "High", "Mid"]);
        assert_eq!(collection.roadmap_identifier(), Some("Roadmap"));
        for simulation in 0..10 {
            let projects = collection.project_estimates(simulation).unwrap();
            let high = projects[1].estimated_days();
            let mid = projects[2].estimated_days();
            let low = projects[0].estimated_days();
            assert!(high <= mid && mid <= low);
        }
    }
}
