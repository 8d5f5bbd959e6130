use std::process::ExitCode;

use tracing::error;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_forecast_report;
use crate::services::estimations_export::write_estimations_csv_file;
use crate::services::forecast::{ForecastRequest, forecast_from_files};

pub fn forecast_command(cmd: Commands) -> ExitCode {
    let Commands::Forecast {
        throughput,
        roadmap,
        output,
        simulations,
        maximum_iterations,
        start_date,
        csv,
        seed,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let request = ForecastRequest {
        throughput_path: &throughput,
        roadmap_path: &roadmap,
        simulations,
        maximum_iterations,
        start_date: &start_date,
        seed,
    };

    let histogram_path = format!("{output}.png");
    let forecast = match forecast_from_files(&request, &histogram_path) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "forecast failed");
            eprintln!("Failed to forecast roadmap: {e}");
            return ExitCode::FAILURE;
        }
    };

    let yaml = match serde_yaml::to_string(&forecast.report) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize forecast output: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&output, yaml) {
        eprintln!("Failed to write forecast output: {e}");
        return ExitCode::FAILURE;
    }

    if let Some(csv_path) = &csv {
        if let Err(e) = write_estimations_csv_file(csv_path, &forecast.estimations) {
            error!(error = %e, path = %csv_path, "csv export failed");
            eprintln!("Failed to write estimations csv: {e}");
            return ExitCode::FAILURE;
        }
    }

    println!("{}", format_forecast_report(&forecast.report));
    println!(
        "Forecast for {} work items written to {output}",
        forecast.report.total_work_items
    );
    println!("Forecast histogram written to {histogram_path}");
    if let Some(csv_path) = csv {
        println!("Trial estimates written to {csv_path}");
    }
    ExitCode::SUCCESS
}
