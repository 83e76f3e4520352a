use std::process::ExitCode;

use shootcal_core::{CalendarDay, ScheduleError};

use crate::cli::ShowDayArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ProjectStore, parse_date, print_json};

pub fn run_show_day(args: ShowDayArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let date = parse_date(&args.date, "--date")?;
    let store = ProjectStore::open(&args.target)?;
    let calendar = store.load_calendar()?;

    let day = calendar
        .day(date)
        .ok_or(ScheduleError::DayNotFound(date))?;

    match output_format {
        OutputFormat::Json => print_json(day)?,
        OutputFormat::Text => print_text(day),
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn print_text(day: &CalendarDay) {
    let or_dash = |s: &str| {
        let s = s.trim();
        if s.is_empty() { "-".to_string() } else { s.to_string() }
    };

    println!("Date: {} {}", day.date, day.date.format("%A"));
    println!("Type: {}", day.day_type);
    match day.shoot_day {
        Some(n) => println!("Shoot day: {}", n),
        None => println!("Shoot day: -"),
    }
    println!("Location: {}", or_dash(&day.location));
    println!("Area: {}", or_dash(&day.location_area));
    println!("Departments: {}", or_dash(&day.departments.join(", ")));
    println!("Second unit: {}", or_dash(&day.second_unit));
    println!("Notes: {}", or_dash(&day.notes));
}
