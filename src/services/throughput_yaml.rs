use std::io;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::input_sample::InputSample;
use crate::domain::throughput::{Throughput, ThroughputError};

#[derive(Error, Debug)]
pub enum ThroughputYamlError {
    #[error("failed to read throughput file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse throughput yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid date format: {0}")]
    InvalidDate(String),
    #[error("invalid throughput in entry {index}: {source}")]
    InvalidThroughput {
        index: usize,
        source: ThroughputError,
    },
    #[error("throughput data is empty")]
    Empty,
}

#[derive(Deserialize)]
struct ThroughputRecord {
    date: Option<String>,
    #[serde(alias = "completed_issues")]
    throughput: f64,
}

pub fn load_input_samples_from_yaml_file(path: &str) -> Result<Vec<InputSample>, ThroughputYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_input_samples_from_yaml_str(&contents)
}

/// Parses a list of `{date, throughput}` entries. `completed_issues` is
/// accepted in place of `throughput`, and `.inf` is a valid throughput.
pub fn deserialize_input_samples_from_yaml_str(
    input: &str,
) -> Result<Vec<InputSample>, ThroughputYamlError> {
    let records: Vec<ThroughputRecord> = serde_yaml::from_str(input)?;
    if records.is_empty() {
        return Err(ThroughputYamlError::Empty);
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let throughput = Throughput::new(record.throughput)
                .map_err(|source| ThroughputYamlError::InvalidThroughput { index, source })?;
            let sample = match record.date {
                Some(text) => InputSample::on_date(parse_date(&text)?, throughput),
                None => InputSample::new(throughput),
            };
            Ok(sample)
        })
        .collect()
}

fn parse_date(value: &str) -> Result<NaiveDate, ThroughputYamlError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ThroughputYamlError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::on_date;
    use assert_fs::prelude::*;

    #[test]
    fn deserialize_reads_dates_and_throughput() {
        let yaml = "- date: 2026-02-09\n  throughput: 5\n- date: 2026-02-10\n  throughput: 2.5\n- throughput: .inf\n";
        let samples = deserialize_input_samples_from_yaml_str(yaml).unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].date, Some(on_date(2026, 2, 9)));
        assert_eq!(samples[0].throughput.value(), 5.0);
        assert_eq!(samples[1].throughput.value(), 2.5);
        assert_eq!(samples[2].date, None);
        assert!(samples[2].throughput.is_infinite());
    }

    #[test]
    fn deserialize_accepts_completed_issues() {
        let yaml = "- date: 2026-01-26\n  completed_issues: 2\n- date: 2026-01-27\n  completed_issues: 0\n";
        let samples = deserialize_input_samples_from_yaml_str(yaml).unwrap();

        let values: Vec<f64> = samples.iter().map(|s| s.throughput.value()).collect();
        assert_eq!(values, vec![2.0, 0.0]);
    }

    #[test]
    fn deserialize_rejects_negative_throughput() {
        let yaml = "- throughput: 1\n- throughput: -3\n";
        let error = deserialize_input_samples_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            ThroughputYamlError::InvalidThroughput { index: 1, .. }
        ));
    }

    #[test]
    fn deserialize_rejects_nan_throughput() {
        let error = deserialize_input_samples_from_yaml_str("- throughput: .nan\n").unwrap_err();
        assert!(matches!(
            error,
            ThroughputYamlError::InvalidThroughput { index: 0, .. }
        ));
    }

    #[test]
    fn deserialize_rejects_invalid_dates_and_empty_lists() {
        let error =
            deserialize_input_samples_from_yaml_str("- date: 2026-13-01\n  throughput: 1\n")
                .unwrap_err();
        assert!(matches!(error, ThroughputYamlError::InvalidDate(_)));

        let error = deserialize_input_samples_from_yaml_str("[]").unwrap_err();
        assert!(matches!(error, ThroughputYamlError::Empty));
    }

    #[test]
    fn load_reads_samples_from_file() {
        let input_file = assert_fs::NamedTempFile::new("throughput.yaml").unwrap();
        input_file
            .write_str("- date: 2026-01-26\n  throughput: 3\n")
            .unwrap();

        let samples = load_input_samples_from_yaml_file(input_file.path().to_str().unwrap()).unwrap();
        assert_eq!(samples.len(), 1);

        let error = load_input_samples_from_yaml_file("/nonexistent/throughput.yaml").unwrap_err();
        assert!(matches!(error, ThroughputYamlError::Read(_)));
    }
}
