use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use shootcal_core::{CalendarData, JsonDirSource, Project};
use tracing::debug;

use crate::cli::ProjectArgs;
use crate::error::{CliError, CliResult};

/// A project resolved inside the data directory.
pub struct ProjectStore {
    pub source: JsonDirSource,
    pub project_id: String,
    pub calendar_path: PathBuf,
    project_path: PathBuf,
}

impl ProjectStore {
    pub fn open(args: &ProjectArgs) -> CliResult<Self> {
        let source = JsonDirSource::new(&args.data_dir);
        let project_id = args.project.trim().to_string();

        let (Some(project_path), Some(calendar_path)) = (
            source.project_path(&project_id),
            source.calendar_path(&project_id),
        ) else {
            return Err(CliError::input(format!(
                "Invalid project id '{}'",
                args.project
            )));
        };

        Ok(ProjectStore {
            source,
            project_id,
            calendar_path,
            project_path,
        })
    }

    /// The project record; a missing record means an unknown project.
    pub fn load_project(&self) -> CliResult<Project> {
        if !self.project_path.exists() {
            return Err(CliError::input(format!(
                "Project '{}' not found in {}",
                self.project_id,
                self.source.root().display()
            )));
        }

        let mut project: Project = read_json(&self.project_path)?;
        if project.id.trim().is_empty() {
            project.id = self.project_id.clone();
        }
        Ok(project)
    }

    pub fn stored_calendar(&self) -> CliResult<Option<CalendarData>> {
        if !self.calendar_path.exists() {
            return Ok(None);
        }
        let calendar: CalendarData = read_json(&self.calendar_path)?;
        debug!(
            path = %self.calendar_path.display(),
            days = calendar.days.len(),
            "Loaded stored calendar"
        );
        Ok(Some(calendar))
    }

    /// The stored calendar, required by commands that edit or report on it.
    pub fn load_calendar(&self) -> CliResult<CalendarData> {
        self.stored_calendar()?.ok_or_else(|| {
            CliError::input(format!(
                "No calendar for project '{}'. Run `shootcal generate --write` first",
                self.project_id
            ))
        })
    }

    pub fn save_calendar(&self, calendar: &CalendarData) -> CliResult<()> {
        write_json(&self.calendar_path, calendar)?;
        debug!(path = %self.calendar_path.display(), "Saved calendar");
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn parse_date(s: &str, flag: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
        CliError::input(format!(
            "Invalid {} date '{}': {}. Expected: YYYY-MM-DD",
            flag, s, e
        ))
    })
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}
