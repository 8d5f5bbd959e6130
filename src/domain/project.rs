use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error("project {0} has no remaining work items")]
    NoRemainingWork(String),
}

/// A named unit of backlog work.
///
/// Higher `priority` values are worked on first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    priority: i32,
    remaining_work_items: u32,
}

impl Project {
    pub fn new(name: impl Into<String>, priority: i32, remaining_work_items: u32) -> Self {
        Self {
            name: name.into(),
            priority,
            remaining_work_items,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn remaining_work_items(&self) -> u32 {
        self.remaining_work_items
    }

    pub fn has_remaining_work(&self) -> bool {
        self.remaining_work_items > 0
    }

    pub fn complete_work_item(&mut self) -> Result<(), ProjectError> {
        if self.remaining_work_items == 0 {
            return Err(ProjectError::NoRemainingWork(self.name.clone()));
        }
        self.remaining_work_items -= 1;
        Ok(())
    }
}
