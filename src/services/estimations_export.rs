use std::io;

use csv::Writer;
use thiserror::Error;

use crate::domain::estimate::WorkEstimate;
use crate::services::estimations_collection::{
    EstimationsCollectionError, TimeTillCompletionEstimationsCollection,
};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv: {0}")]
    Io(#[from] io::Error),
    #[error("failed to read estimations: {0}")]
    Collection(#[from] EstimationsCollectionError),
}

pub fn write_estimations_csv_file(
    path: &str,
    collection: &TimeTillCompletionEstimationsCollection,
) -> Result<(), ExportError> {
    write_estimations_csv(Writer::from_path(path)?, collection)
}

/// Writes one row per simulation. Every estimate becomes two columns: its
/// days, headed by its identifier, and its indeterminate flag.
pub fn write_estimations_csv<W: io::Write>(
    mut writer: Writer<W>,
    collection: &TimeTillCompletionEstimationsCollection,
) -> Result<(), ExportError> {
    let Some(roadmap_identifier) = collection.roadmap_identifier() else {
        writer.flush()?;
        return Ok(());
    };

    let mut header = Vec::with_capacity(2 * (collection.number_of_projects() + 1));
    for identifier in std::iter::once(roadmap_identifier).chain(collection.project_identifiers()) {
        header.push(identifier.to_string());
        header.push(format!("{identifier} is indeterminate"));
    }
    writer.write_record(&header)?;

    for simulation in 0..collection.len() {
        let roadmap = collection.roadmap_estimate(simulation)?;
        let projects = collection.project_estimates(simulation)?;

        let mut record = Vec::with_capacity(header.len());
        for estimate in std::iter::once(roadmap).chain(projects) {
            push_estimate(&mut record, estimate);
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn push_estimate(record: &mut Vec<String>, estimate: &WorkEstimate) {
    record.push(format!("{:.6}", estimate.estimated_days()));
    record.push(estimate.is_indeterminate().to_string());
}
