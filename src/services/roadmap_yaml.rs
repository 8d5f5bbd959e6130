use std::collections::HashSet;
use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::roadmap_configuration::{
    DEFAULT_ROADMAP_NAME, ProjectConfiguration, RoadmapConfiguration,
};

#[derive(Error, Debug)]
pub enum RoadmapYamlError {
    #[error("failed to read roadmap yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse roadmap yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("roadmap has no projects")]
    NoProjects,
    #[error("project name must not be empty")]
    MissingProjectName,
    #[error("project name {0} is used more than once")]
    DuplicateProjectName(String),
    #[error("project {0} has no work items")]
    NoWorkItems(String),
}

#[derive(Deserialize)]
struct RoadmapRecord {
    name: Option<String>,
    projects: Vec<ProjectRecord>,
}

#[derive(Deserialize)]
struct ProjectRecord {
    name: String,
    #[serde(default)]
    priority: i32,
    work_items: u32,
}

pub fn load_roadmap_from_yaml_file(path: &str) -> Result<RoadmapConfiguration, RoadmapYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_roadmap_from_yaml_str(&contents)
}

pub fn deserialize_roadmap_from_yaml_str(input: &str) -> Result<RoadmapConfiguration, RoadmapYamlError> {
    let record: RoadmapRecord = serde_yaml::from_str(input)?;
    if record.projects.is_empty() {
        return Err(RoadmapYamlError::NoProjects);
    }

    let mut names = HashSet::with_capacity(record.projects.len());
    let mut projects = Vec::with_capacity(record.projects.len());
    for project in record.projects {
        let name = project.name.trim().to_string();
        if name.is_empty() {
            return Err(RoadmapYamlError::MissingProjectName);
        }
        if project.work_items == 0 {
            return Err(RoadmapYamlError::NoWorkItems(name));
        }
        if !names.insert(name.clone()) {
            return Err(RoadmapYamlError::DuplicateProjectName(name));
        }
        projects.push(ProjectConfiguration {
            name,
            priority: project.priority,
            work_items: project.work_items,
        });
    }

    let name = record
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ROADMAP_NAME.to_string());

    Ok(RoadmapConfiguration { name, projects })
}
