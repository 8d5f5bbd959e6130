use std::collections::BTreeMap;

use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Trial results grouped into `sqrt(n)` buckets of equal width, counted from
/// the smallest value.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    pub origin: f64,
    pub bin_width: f64,
    pub counts: BTreeMap<i32, usize>,
}

impl HistogramBins {
    pub fn from_values(values: &[f64]) -> Self {
        let origin = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let origin = if origin.is_finite() { origin } else { 0.0 };

        let bin_width = (max_value - origin) / (values.len() as f64).sqrt();
        // All values equal (or a single value): one unit-wide bucket.
        let bin_width = if bin_width.is_finite() && bin_width > f64::EPSILON {
            bin_width
        } else {
            1.0
        };

        let mut counts = BTreeMap::new();
        for value in values {
            let bucket = ((value - origin) / bin_width).floor() as i32;
            *counts.entry(bucket).or_insert(0usize) += 1;
        }

        Self {
            origin,
            bin_width,
            counts,
        }
    }

    pub fn bucket_start(&self, bucket: i32) -> f64 {
        self.origin + bucket as f64 * self.bin_width
    }

    fn last_bucket(&self) -> i32 {
        self.counts.keys().next_back().copied().unwrap_or(0)
    }

    fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(1)
    }
}

pub fn write_histogram_png(output_path: &str, days: &[f64]) -> Result<(), HistogramError> {
    if days.is_empty() {
        return Ok(());
    }
    render_histogram_png(output_path, &HistogramBins::from_values(days))
}

fn render_histogram_png(output_path: &str, bins: &HistogramBins) -> Result<(), HistogramError> {
    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Forecast Results", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..(bins.last_bucket() + 1), 0..(bins.max_count() + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Working days until completion")
        .y_desc("Frequency")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|bucket| format!("{:.2}", bins.bucket_start(*bucket)))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(bins.counts.iter().map(|(bucket, count)| {
            Rectangle::new([(*bucket, 0), (*bucket + 1, *count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
