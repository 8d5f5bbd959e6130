use crate::services::forecast_types::{EntityForecast, ForecastPercentile, ForecastReport};

pub fn format_forecast_report(report: &ForecastReport) -> String {
    let mut lines = Vec::new();
    lines.push("Forecast Report".to_string());
    lines.push(format!("Throughput source: {}", report.throughput_source));
    lines.push(format!("Roadmap source: {}", report.roadmap_source));
    lines.push(format!("Start date: {}", report.start_date));
    lines.push(format!("Simulations: {}", report.simulations));
    lines.push(format!("Maximum iterations: {}", report.maximum_iterations));
    lines.push(format!("Work items: {}", report.total_work_items));
    lines.push(String::new());
    lines.push("Percentiles:".to_string());
    lines.push("Id | P0 | P50 | P85 | P100 | Indeterminate".to_string());
    lines.push("---|----|-----|-----|------|--------------".to_string());
    lines.push(format_entity_row(&report.roadmap));
    for project in &report.projects {
        lines.push(format_entity_row(project));
    }

    lines.join("\n")
}

fn format_entity_row(entity: &EntityForecast) -> String {
    format!(
        "{} | {} | {} | {} | {} | {}",
        entity.id,
        format_percentile(&entity.p0),
        format_percentile(&entity.p50),
        format_percentile(&entity.p85),
        format_percentile(&entity.p100),
        entity.indeterminate_trials
    )
}

fn format_percentile(percentile: &ForecastPercentile) -> String {
    let date = percentile.date.as_deref().unwrap_or("n/a");
    format!("{:.2} ({date})", percentile.days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentile(days: f64, date: Option<&str>) -> ForecastPercentile {
        ForecastPercentile {
            days,
            date: date.map(str::to_string),
        }
    }

    fn entity(id: &str, indeterminate_trials: usize) -> EntityForecast {
        EntityForecast {
            id: id.to_string(),
            indeterminate_trials,
            p0: percentile(1.0, Some("2026-02-02")),
            p50: percentile(5.5, Some("2026-02-06")),
            p85: percentile(10.0, Some("2026-02-11")),
            p100: percentile(15.25, None),
        }
    }

    fn build_report() -> ForecastReport {
        ForecastReport {
            throughput_source: "throughput.yaml".to_string(),
            roadmap_source: "roadmap.yaml".to_string(),
            start_date: "2026-02-01".to_string(),
            simulations: 100,
            maximum_iterations: 1000,
            total_work_items: 12,
            roadmap: entity("Q3", 0),
            projects: vec![entity("Billing", 0), entity("Search", 7)],
        }
    }

    #[test]
    fn format_forecast_report_includes_header_and_table() {
        let output = format_forecast_report(&build_report());

        assert!(output.contains("Forecast Report"));
        assert!(output.contains("Throughput source: throughput.yaml"));
        assert!(output.contains("Roadmap source: roadmap.yaml"));
        assert!(output.contains("Start date: 2026-02-01"));
        assert!(output.contains("Simulations: 100"));
        assert!(output.contains("Maximum iterations: 1000"));
        assert!(output.contains("Work items: 12"));
        assert!(output.contains("Id | P0 | P50 | P85 | P100 | Indeterminate"));
    }

    #[test]
    fn format_forecast_report_lists_roadmap_before_projects() {
        let output = format_forecast_report(&build_report());
        let rows: Vec<&str> = output.lines().skip(11).collect();

        assert_eq!(
            rows,
            vec![
                "Q3 | 1.00 (2026-02-02) | 5.50 (2026-02-06) | 10.00 (2026-02-11) | 15.25 (n/a) | 0",
                "Billing | 1.00 (2026-02-02) | 5.50 (2026-02-06) | 10.00 (2026-02-11) | 15.25 (n/a) | 0",
                "Search | 1.00 (2026-02-02) | 5.50 (2026-02-06) | 10.00 (2026-02-11) | 15.25 (n/a) | 7",
            ]
        );
    }
}
