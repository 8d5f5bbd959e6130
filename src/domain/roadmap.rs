use std::collections::HashSet;

use thiserror::Error;

use crate::domain::project::{Project, ProjectError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoadmapError {
    #[error("roadmap must contain at least one project")]
    NoProjects,
    #[error("project {0} has no remaining work items")]
    ProjectWithoutWork(String),
    #[error("project name {0} is used more than once")]
    DuplicateProjectName(String),
    #[error("no project at index {0}")]
    UnknownProjectIndex(usize),
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// The prioritized projects of a single trial.
///
/// Projects keep the order they were given in; that order is the column order
/// of every estimate produced for this roadmap. Priority tiers are stored as
/// indices into it, highest priority first.
#[derive(Debug, Clone)]
pub struct Roadmap {
    label: String,
    projects: Vec<Project>,
    tiers: Vec<Vec<usize>>,
}

impl Roadmap {
    pub fn new(label: impl Into<String>, projects: Vec<Project>) -> Result<Self, RoadmapError> {
        if projects.is_empty() {
            return Err(RoadmapError::NoProjects);
        }

        let mut names = HashSet::with_capacity(projects.len());
        for project in &projects {
            if !project.has_remaining_work() {
                return Err(RoadmapError::ProjectWithoutWork(project.name().to_string()));
            }
            if !names.insert(project.name()) {
                return Err(RoadmapError::DuplicateProjectName(project.name().to_string()));
            }
        }

        let tiers = priority_tiers(&projects);
        Ok(Self {
            label: label.into(),
            projects,
            tiers,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn total_remaining_work(&self) -> u64 {
        self.projects
            .iter()
            .map(|project| u64::from(project.remaining_work_items()))
            .sum()
    }

    pub fn has_remaining_work(&self) -> bool {
        self.projects.iter().any(Project::has_remaining_work)
    }

    /// Indices of the projects that may receive work right now: those with
    /// remaining work in the highest priority tier that still has any.
    /// Empty once the roadmap is depleted.
    pub fn eligible_projects(&self) -> Vec<usize> {
        self.tiers
            .iter()
            .map(|tier| {
                tier.iter()
                    .copied()
                    .filter(|index| self.projects[*index].has_remaining_work())
                    .collect::<Vec<_>>()
            })
            .find(|eligible| !eligible.is_empty())
            .unwrap_or_default()
    }

    pub fn complete_work_item(&mut self, project_index: usize) -> Result<(), RoadmapError> {
        let project = self
            .projects
            .get_mut(project_index)
            .ok_or(RoadmapError::UnknownProjectIndex(project_index))?;
        project.complete_work_item()?;
        Ok(())
    }
}

fn priority_tiers(projects: &[Project]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..projects.len()).collect();
    order.sort_by_key(|index| std::cmp::Reverse(projects[*index].priority()));

    let mut tiers: Vec<Vec<usize>> = Vec::new();
    let mut current_priority = None;
    for index in order {
        let priority = projects[index].priority();
        if current_priority == Some(priority) {
            if let Some(tier) = tiers.last_mut() {
                tier.push(index);
            }
        } else {
            tiers.push(vec![index]);
            current_priority = Some(priority);
        }
    }
    tiers
}
