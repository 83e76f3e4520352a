use std::process::ExitCode;

use shootcal_core::{CalendarData, CalendarDay, ScheduleInputs, build_calendar};
use tracing::{info, warn};

use crate::cli::GenerateArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ProjectStore, print_json};

pub fn run_generate(args: GenerateArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let store = ProjectStore::open(&args.target)?;
    let project = store.load_project()?;
    let stored = store.stored_calendar()?;

    let existing = if args.fresh { None } else { stored.as_ref() };
    let inputs = ScheduleInputs::load(&store.source, &project.id);
    let calendar = build_calendar(&project, &inputs, existing);

    if args.write {
        // An incomplete project must not wipe out a calendar that has days.
        let stored_days = stored.as_ref().map_or(0, |c| c.days.len());
        if calendar.days.is_empty() && stored_days > 0 {
            warn!(project_id = %project.id, stored_days, "Refusing to overwrite calendar");
            return Err(CliError::input(format!(
                "Refusing to replace the stored calendar of '{}' ({} days) with an empty one. \
                 Check the project's prep and shoot start dates",
                project.id, stored_days
            )));
        }
        store.save_calendar(&calendar)?;
        info!(path = %store.calendar_path.display(), "Wrote calendar");
    }

    match output_format {
        OutputFormat::Json => print_json(&calendar)?,
        OutputFormat::Text => print_text(&calendar),
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn print_text(calendar: &CalendarData) {
    for day in &calendar.days {
        println!("{}", day_line(day));
    }

    match (calendar.days.first(), calendar.days.last()) {
        (Some(first), Some(last)) => println!(
            "{}: {} days, {} shoot days, {} to {}",
            calendar.project_id,
            calendar.days.len(),
            calendar.shoot_day_count(),
            first.date,
            last.date
        ),
        _ => println!(
            "{}: no days (project dates incomplete)",
            calendar.project_id
        ),
    }
}

pub fn day_line(day: &CalendarDay) -> String {
    let number = day
        .shoot_day
        .map_or_else(|| "-".to_string(), |n| n.to_string());
    let line = format!(
        "{}  {:<9}  {:<15}  {:>3}  {}",
        day.date,
        day.day_of_week,
        day.day_type.to_string(),
        number,
        day.notes
    );
    line.trim_end().to_string()
}
