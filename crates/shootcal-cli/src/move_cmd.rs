use std::process::ExitCode;

use chrono::Utc;
use serde::Serialize;
use shootcal_core::{MoveMode, MoveOutcome, ScheduleInputs, move_day, refresh_aggregates};

use crate::cli::MoveDayArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ProjectStore, parse_date, print_json};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveReport {
    #[serde(flatten)]
    outcome: MoveOutcome,
    shoot_days: usize,
    saved: bool,
}

pub fn run_move_day(args: MoveDayArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let mode: MoveMode = args.mode.parse()?;
    let from = parse_date(&args.from, "--from")?;
    let to = parse_date(&args.to, "--to")?;

    let store = ProjectStore::open(&args.target)?;
    let mut calendar = store.load_calendar()?;

    let outcome = move_day(&mut calendar, from, to, mode)?;
    let inputs = ScheduleInputs::load(&store.source, &store.project_id);
    refresh_aggregates(&mut calendar, &inputs);

    if args.write {
        calendar.last_updated = Some(Utc::now());
        store.save_calendar(&calendar)?;
    }

    let report = MoveReport {
        outcome,
        shoot_days: calendar.shoot_day_count(),
        saved: args.write,
    };

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_text(&report),
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn print_text(report: &MoveReport) {
    let outcome = &report.outcome;
    let label = |n: Option<u32>| n.map_or_else(|| "-".to_string(), |n| n.to_string());

    println!(
        "Moved shoot day {} from {} to {} ({})",
        label(outcome.original_shoot_day),
        outcome.from_date,
        outcome.to_date,
        outcome.mode
    );
    println!("Now shoot day {} of {}", label(outcome.new_shoot_day), report.shoot_days);
    if let Some(displaced) = outcome.target_shoot_day {
        println!("Shoot day {} moved to {}", displaced, outcome.from_date);
    }
    if !report.saved {
        println!("Dry run: pass --write to save");
    }
}
