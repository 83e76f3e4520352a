use std::collections::BTreeMap;
use std::process::ExitCode;

use serde::Serialize;
use shootcal_core::{ScheduleInputs, refresh_aggregates};

use crate::cli::CountsArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ProjectStore, print_json};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CountsReport {
    project_id: String,
    department_counts: BTreeMap<String, u32>,
    location_counts: BTreeMap<String, u32>,
    area_counts: BTreeMap<String, u32>,
}

pub fn run_counts(args: CountsArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let store = ProjectStore::open(&args.target)?;
    let mut calendar = store.load_calendar()?;

    let inputs = ScheduleInputs::load(&store.source, &store.project_id);
    refresh_aggregates(&mut calendar, &inputs);

    let report = CountsReport {
        project_id: store.project_id.clone(),
        department_counts: calendar.department_counts,
        location_counts: calendar.location_counts,
        area_counts: calendar.area_counts,
    };

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            print_section("Departments", &report.department_counts);
            print_section("Locations", &report.location_counts);
            print_section("Areas", &report.area_counts);
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn print_section(title: &str, counts: &BTreeMap<String, u32>) {
    println!("{}:", title);
    if counts.is_empty() {
        println!("  (none)");
    }
    for (key, count) in counts {
        println!("  {}: {}", key, count);
    }
}
