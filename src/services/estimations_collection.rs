use thiserror::Error;

use crate::domain::estimate::WorkEstimate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimationsCollectionError {
    #[error("{parameter} must be at least 1, got {value}")]
    InvalidSize { parameter: &'static str, value: usize },
    #[error("collection already holds all {capacity} simulations")]
    Full { capacity: usize },
    #[error("expected {expected} project estimates, got {actual}")]
    ProjectCountMismatch { expected: usize, actual: usize },
    #[error(
        "project estimate at position {position} is for {actual}, but earlier simulations recorded {expected}"
    )]
    IdentifierMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
    #[error("roadmap estimate is for {actual}, but earlier simulations recorded {expected}")]
    RoadmapIdentifierMismatch { expected: String, actual: String },
    #[error("{parameter} {value} is out of range, valid values are 0..{upper_bound}")]
    OutOfRange {
        parameter: &'static str,
        value: usize,
        upper_bound: usize,
    },
}

#[derive(Debug, Clone)]
struct SimulationRow {
    roadmap: WorkEstimate,
    projects: Vec<WorkEstimate>,
}

/// Per-simulation estimates of a Monte Carlo run.
///
/// Holds at most `number_of_simulations` rows, each made of one roadmap
/// estimate followed by exactly `number_of_projects` project estimates.
/// Position `i` of every row belongs to the same project.
#[derive(Debug, Clone)]
pub struct TimeTillCompletionEstimationsCollection {
    number_of_simulations: usize,
    number_of_projects: usize,
    rows: Vec<SimulationRow>,
}

impl TimeTillCompletionEstimationsCollection {
    pub fn new(
        number_of_simulations: usize,
        number_of_projects: usize,
    ) -> Result<Self, EstimationsCollectionError> {
        if number_of_simulations < 1 {
            return Err(EstimationsCollectionError::InvalidSize {
                parameter: "number_of_simulations",
                value: number_of_simulations,
            });
        }
        if number_of_projects < 1 {
            return Err(EstimationsCollectionError::InvalidSize {
                parameter: "number_of_projects",
                value: number_of_projects,
            });
        }
        Ok(Self {
            number_of_simulations,
            number_of_projects,
            rows: Vec::with_capacity(number_of_simulations),
        })
    }

    pub fn add_estimations(
        &mut self,
        roadmap_estimate: WorkEstimate,
        project_estimates: Vec<WorkEstimate>,
    ) -> Result<(), EstimationsCollectionError> {
        if self.is_full() {
            return Err(EstimationsCollectionError::Full {
                capacity: self.number_of_simulations,
            });
        }
        if project_estimates.len() != self.number_of_projects {
            return Err(EstimationsCollectionError::ProjectCountMismatch {
                expected: self.number_of_projects,
                actual: project_estimates.len(),
            });
        }

        if let Some(first) = self.rows.first() {
            if first.roadmap.identifier() != roadmap_estimate.identifier() {
                return Err(EstimationsCollectionError::RoadmapIdentifierMismatch {
                    expected: first.roadmap.identifier().to_string(),
                    actual: roadmap_estimate.identifier().to_string(),
                });
            }
            for (position, (recorded, candidate)) in
                first.projects.iter().zip(&project_estimates).enumerate()
            {
                if recorded.identifier() != candidate.identifier() {
                    return Err(EstimationsCollectionError::IdentifierMismatch {
                        position,
                        expected: recorded.identifier().to_string(),
                        actual: candidate.identifier().to_string(),
                    });
                }
            }
        }

        self.rows.push(SimulationRow {
            roadmap: roadmap_estimate,
            projects: project_estimates,
        });
        Ok(())
    }

    pub fn number_of_simulations(&self) -> usize {
        self.number_of_simulations
    }

    pub fn number_of_projects(&self) -> usize {
        self.number_of_projects
    }

    /// Number of simulations added so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.number_of_simulations
    }

    pub fn roadmap_identifier(&self) -> Option<&str> {
        self.rows.first().map(|row| row.roadmap.identifier())
    }

    pub fn project_identifiers(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.projects.iter().map(WorkEstimate::identifier).collect())
            .unwrap_or_default()
    }

    pub fn roadmap_estimate(&self, simulation: usize) -> Result<&WorkEstimate, EstimationsCollectionError> {
        Ok(&self.row(simulation)?.roadmap)
    }

    pub fn project_estimates(&self, simulation: usize) -> Result<&[WorkEstimate], EstimationsCollectionError> {
        Ok(&self.row(simulation)?.projects)
    }

    pub fn project_estimate(
        &self,
        project: usize,
        simulation: usize,
    ) -> Result<&WorkEstimate, EstimationsCollectionError> {
        let row = self.row(simulation)?;
        row.projects
            .get(project)
            .ok_or(EstimationsCollectionError::OutOfRange {
                parameter: "project",
                value: project,
                upper_bound: row.projects.len(),
            })
    }

    pub fn roadmap_estimates(&self) -> impl Iterator<Item = &WorkEstimate> {
        self.rows.iter().map(|row| &row.roadmap)
    }

    /// All estimates recorded for the project at `project`, in simulation order.
    pub fn estimates_for_project(
        &self,
        project: usize,
    ) -> Result<impl Iterator<Item = &WorkEstimate>, EstimationsCollectionError> {
        if project >= self.number_of_projects {
            return Err(EstimationsCollectionError::OutOfRange {
                parameter: "project",
                value: project,
                upper_bound: self.number_of_projects,
            });
        }
        Ok(self.rows.iter().map(move |row| &row.projects[project]))
    }

    fn row(&self, simulation: usize) -> Result<&SimulationRow, EstimationsCollectionError> {
        self.rows
            .get(simulation)
            .ok_or(EstimationsCollectionError::OutOfRange {
                parameter: "simulation",
                value: simulation,
                upper_bound: self.rows.len(),
            })
    }
}
