use crate::domain::input_sample::InputSample;
use crate::domain::roadmap_configuration::{
    DEFAULT_ROADMAP_NAME, ProjectConfiguration, RoadmapConfiguration,
};
use crate::domain::throughput::Throughput;
use crate::services::random_index::RandomIndexSource;

// A mock RandomIndexSource that always returns the same index
pub struct ConstantIndexSource(pub usize);

impl RandomIndexSource for ConstantIndexSource {
    fn next_index(&mut self, _upper_bound: usize) -> usize {
        self.0
    }
}

// Replays a fixed sequence of indices, starting over when it runs out
pub struct ScriptedIndexSource {
    indices: Vec<usize>,
    position: usize,
}

impl ScriptedIndexSource {
    pub fn new(indices: Vec<usize>) -> Self {
        assert!(!indices.is_empty(), "script needs at least one index");
        Self {
            indices,
            position: 0,
        }
    }
}

impl RandomIndexSource for ScriptedIndexSource {
    fn next_index(&mut self, _upper_bound: usize) -> usize {
        let index = self.indices[self.position % self.indices.len()];
        self.position += 1;
        index
    }
}

pub fn samples(values: &[f64]) -> Vec<InputSample> {
    values
        .iter()
        .map(|value| InputSample::new(Throughput::new(*value).unwrap()))
        .collect()
}

/// Builds a configuration from `(name, priority, work_items)` triples.
pub fn roadmap_configuration(projects: &[(&str, i32, u32)]) -> RoadmapConfiguration {
    RoadmapConfiguration {
        name: DEFAULT_ROADMAP_NAME.to_string(),
        projects: projects
            .iter()
            .map(|(name, priority, work_items)| ProjectConfiguration {
                name: (*name).to_string(),
                priority: *priority,
                work_items: *work_items,
            })
            .collect(),
    }
}

pub fn on_date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
