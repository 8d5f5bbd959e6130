use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::info;

use crate::domain::estimate::WorkEstimate;
use crate::domain::input_sample::InputSample;
use crate::domain::roadmap_configuration::RoadmapConfiguration;
use crate::services::estimations_collection::EstimationsCollectionError;
use crate::services::forecast_types::{
    EntityForecast, ForecastOutput, ForecastPercentile, ForecastReport,
};
use crate::services::histogram::{HistogramError, write_histogram_png};
use crate::services::monte_carlo::MonteCarloTimeTillCompletionEstimator;
use crate::services::percentiles::SortedDays;
use crate::services::random_index::{RandomIndexSource, RngIndexSource};
use crate::services::roadmap_yaml::{RoadmapYamlError, load_roadmap_from_yaml_file};
use crate::services::throughput_yaml::{ThroughputYamlError, load_input_samples_from_yaml_file};
use crate::services::time_till_completion::EstimationError;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("failed to load throughput samples: {0}")]
    Throughput(#[from] ThroughputYamlError),
    #[error("failed to load roadmap: {0}")]
    Roadmap(#[from] RoadmapYamlError),
    #[error("invalid start date: {0}")]
    InvalidStartDate(String),
    #[error("estimation failed: {0}")]
    Estimation(#[from] EstimationError),
    #[error("failed to summarize estimations: {0}")]
    Collection(#[from] EstimationsCollectionError),
    #[error("failed to render histogram: {0}")]
    Histogram(#[from] HistogramError),
}

pub struct ForecastRequest<'a> {
    pub throughput_path: &'a str,
    pub roadmap_path: &'a str,
    pub simulations: usize,
    pub maximum_iterations: u32,
    pub start_date: &'a str,
    /// Fixed seed for reproducible runs; fresh entropy otherwise.
    pub seed: Option<u64>,
}

pub(crate) fn forecast_from_files(
    request: &ForecastRequest<'_>,
    histogram_path: &str,
) -> Result<ForecastOutput, ForecastError> {
    let input_samples = load_input_samples_from_yaml_file(request.throughput_path)?;
    let configuration = load_roadmap_from_yaml_file(request.roadmap_path)?;
    let start_date = NaiveDate::parse_from_str(request.start_date, "%Y-%m-%d")
        .map_err(|_| ForecastError::InvalidStartDate(request.start_date.to_string()))?;

    let rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut output = run_forecast(
        input_samples,
        &configuration,
        request.simulations,
        request.maximum_iterations,
        start_date,
        RngIndexSource::new(rng),
    )?;
    output.report.throughput_source = data_source_name(request.throughput_path);
    output.report.roadmap_source = data_source_name(request.roadmap_path);

    write_histogram_png(histogram_path, &output.roadmap_days)?;
    info!(path = histogram_path, "wrote forecast histogram");
    Ok(output)
}

pub(crate) fn run_forecast<S: RandomIndexSource>(
    input_samples: Vec<InputSample>,
    configuration: &RoadmapConfiguration,
    simulations: usize,
    maximum_iterations: u32,
    start_date: NaiveDate,
    random_source: S,
) -> Result<ForecastOutput, ForecastError> {
    let mut estimator = MonteCarloTimeTillCompletionEstimator::new(
        simulations,
        maximum_iterations,
        input_samples,
        random_source,
    )?;
    let estimations = estimator.estimate(configuration)?;

    let roadmap_id = estimations
        .roadmap_identifier()
        .unwrap_or(&configuration.name);
    let roadmap = entity_forecast(roadmap_id, estimations.roadmap_estimates(), start_date);

    let mut projects = Vec::with_capacity(estimations.number_of_projects());
    for (index, id) in estimations.project_identifiers().into_iter().enumerate() {
        let estimates = estimations.estimates_for_project(index)?;
        projects.push(entity_forecast(id, estimates, start_date));
    }

    let roadmap_days: SortedDays = estimations
        .roadmap_estimates()
        .map(WorkEstimate::estimated_days)
        .collect();

    let report = ForecastReport {
        throughput_source: String::new(),
        roadmap_source: String::new(),
        start_date: start_date.format("%Y-%m-%d").to_string(),
        simulations: estimator.number_of_simulations(),
        maximum_iterations: estimator.maximum_iterations(),
        total_work_items: configuration.total_work_items(),
        roadmap,
        projects,
    };

    Ok(ForecastOutput {
        report,
        roadmap_days: roadmap_days.into_values(),
        estimations,
    })
}

fn entity_forecast<'a>(
    id: &str,
    estimates: impl Iterator<Item = &'a WorkEstimate>,
    start_date: NaiveDate,
) -> EntityForecast {
    let mut indeterminate_trials = 0;
    let days: SortedDays = estimates
        .inspect(|estimate| {
            if estimate.is_indeterminate() {
                indeterminate_trials += 1;
            }
        })
        .map(WorkEstimate::estimated_days)
        .collect();

    EntityForecast {
        id: id.to_string(),
        indeterminate_trials,
        p0: forecast_percentile(&days, 0.0, start_date),
        p50: forecast_percentile(&days, 50.0, start_date),
        p85: forecast_percentile(&days, 85.0, start_date),
        p100: forecast_percentile(&days, 100.0, start_date),
    }
}

fn forecast_percentile(days: &SortedDays, percentile: f64, start_date: NaiveDate) -> ForecastPercentile {
    let days = days.percentile(percentile).unwrap_or(0.0);
    ForecastPercentile {
        days,
        date: end_date_from_days(start_date, days).map(|date| date.format("%Y-%m-%d").to_string()),
    }
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The working day on which work taking `days` working days is done. The
/// first working day on or after `start_date` counts as day one; partial days
/// round up.
fn end_date_from_days(start_date: NaiveDate, days: f64) -> Option<NaiveDate> {
    let workdays = days.ceil().max(0.0) as u64;
    let first = next_workday(start_date)?;
    add_workdays(first, workdays.saturating_sub(1))
}

fn add_workdays(workday: NaiveDate, count: u64) -> Option<NaiveDate> {
    let mut date = workday.checked_add_days(Days::new((count / 5).checked_mul(7)?))?;
    for _ in 0..count % 5 {
        date = next_workday(date.succ_opt()?)?;
    }
    Some(date)
}

fn next_workday(mut date: NaiveDate) -> Option<NaiveDate> {
    while is_weekend(date) {
        date = date.succ_opt()?;
    }
    Some(date)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
