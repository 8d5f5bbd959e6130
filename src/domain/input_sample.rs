use chrono::NaiveDate;

use crate::domain::throughput::Throughput;

/// One historical throughput observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSample {
    pub date: Option<NaiveDate>,
    pub throughput: Throughput,
}

impl InputSample {
    pub fn new(throughput: Throughput) -> Self {
        Self {
            date: None,
            throughput,
        }
    }

    pub fn on_date(date: NaiveDate, throughput: Throughput) -> Self {
        Self {
            date: Some(date),
            throughput,
        }
    }
}
