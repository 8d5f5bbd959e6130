use crate::domain::project::Project;
use crate::domain::roadmap::{Roadmap, RoadmapError};

pub const DEFAULT_ROADMAP_NAME: &str = "Roadmap";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfiguration {
    pub name: String,
    pub priority: i32,
    pub work_items: u32,
}

/// Immutable description of a roadmap. Every trial materializes its own
/// [`Roadmap`] from it, so trials never observe each other's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapConfiguration {
    pub name: String,
    pub projects: Vec<ProjectConfiguration>,
}

impl RoadmapConfiguration {
    pub fn number_of_projects(&self) -> usize {
        self.projects.len()
    }

    pub fn total_work_items(&self) -> u64 {
        self.projects
            .iter()
            .map(|project| u64::from(project.work_items))
            .sum()
    }

    pub fn to_roadmap(&self) -> Result<Roadmap, RoadmapError> {
        let projects = self
            .projects
            .iter()
            .map(|project| Project::new(project.name.clone(), project.priority, project.work_items))
            .collect();
        Roadmap::new(self.name.clone(), projects)
    }
}
