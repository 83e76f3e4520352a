//! Override and reference data loaders.
//!
//! The engine never decides where records live. A [`ScheduleSource`] hands it
//! plain collections; a missing collection is an empty one. Two sources are
//! provided: [`MemorySource`] for embedding and tests, and [`JsonDirSource`]
//! for the on-disk data directory used by the command line tool.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{
    Department, HiatusPeriod, Holiday, Location, LocationArea, SpecialDate, WorkingWeekend,
};

/// Supplier of per-project overrides and global reference data.
///
/// Implementations return an empty list when nothing is stored and never fail.
pub trait ScheduleSource {
    fn load_holidays(&self, project_id: &str) -> Vec<Holiday>;
    fn load_working_weekends(&self, project_id: &str) -> Vec<WorkingWeekend>;
    fn load_hiatus_periods(&self, project_id: &str) -> Vec<HiatusPeriod>;
    /// Project special dates followed by the global ones.
    fn load_special_dates(&self, project_id: &str) -> Vec<SpecialDate>;
    fn load_location_areas(&self) -> Vec<LocationArea>;
    fn load_locations(&self) -> Vec<Location>;
    fn load_departments(&self) -> Vec<Department>;
}

/// Everything the builder and aggregator read besides the project itself.
#[derive(Debug, Clone, Default)]
pub struct ScheduleInputs {
    pub holidays: Vec<Holiday>,
    pub working_weekends: Vec<WorkingWeekend>,
    pub hiatus_periods: Vec<HiatusPeriod>,
    pub special_dates: Vec<SpecialDate>,
    pub location_areas: Vec<LocationArea>,
    pub locations: Vec<Location>,
    pub departments: Vec<Department>,
}

impl ScheduleInputs {
    /// Collect all lists for `project_id` from `source`.
    pub fn load<S: ScheduleSource + ?Sized>(source: &S, project_id: &str) -> Self {
        let inputs = ScheduleInputs {
            holidays: source.load_holidays(project_id),
            working_weekends: source.load_working_weekends(project_id),
            hiatus_periods: source.load_hiatus_periods(project_id),
            special_dates: source.load_special_dates(project_id),
            location_areas: source.load_location_areas(),
            locations: source.load_locations(),
            departments: source.load_departments(),
        };
        debug!(
            project_id,
            holidays = inputs.holidays.len(),
            working_weekends = inputs.working_weekends.len(),
            hiatus_periods = inputs.hiatus_periods.len(),
            special_dates = inputs.special_dates.len(),
            "Loaded schedule inputs"
        );
        inputs
    }
}

/// In-memory source.
///
/// Project-scoped lists are keyed by project id; special dates stored under
/// [`MemorySource::global_special_dates`] apply to every project.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub holidays: HashMap<String, Vec<Holiday>>,
    pub working_weekends: HashMap<String, Vec<WorkingWeekend>>,
    pub hiatus_periods: HashMap<String, Vec<HiatusPeriod>>,
    pub special_dates: HashMap<String, Vec<SpecialDate>>,
    pub global_special_dates: Vec<SpecialDate>,
    pub location_areas: Vec<LocationArea>,
    pub locations: Vec<Location>,
    pub departments: Vec<Department>,
}

impl ScheduleSource for MemorySource {
    fn load_holidays(&self, project_id: &str) -> Vec<Holiday> {
        self.holidays.get(project_id).cloned().unwrap_or_default()
    }

    fn load_working_weekends(&self, project_id: &str) -> Vec<WorkingWeekend> {
        self.working_weekends
            .get(project_id)
            .cloned()
            .unwrap_or_default()
    }

    fn load_hiatus_periods(&self, project_id: &str) -> Vec<HiatusPeriod> {
        self.hiatus_periods
            .get(project_id)
            .cloned()
            .unwrap_or_default()
    }

    fn load_special_dates(&self, project_id: &str) -> Vec<SpecialDate> {
        let mut dates = self
            .special_dates
            .get(project_id)
            .cloned()
            .unwrap_or_default();
        dates.extend(self.global_special_dates.iter().cloned());
        dates
    }

    fn load_location_areas(&self) -> Vec<LocationArea> {
        self.location_areas.clone()
    }

    fn load_locations(&self) -> Vec<Location> {
        self.locations.clone()
    }

    fn load_departments(&self) -> Vec<Department> {
        self.departments.clone()
    }
}

/// Source backed by a data directory of JSON documents:
///
/// ```text
/// <root>/projects/<id>/main.json            project record
/// <root>/projects/<id>/calendar.json        persisted calendar
/// <root>/projects/<id>/holidays.json
/// <root>/projects/<id>/weekends.json
/// <root>/projects/<id>/hiatus.json
/// <root>/projects/<id>/special_dates.json
/// <root>/special_dates.json                 global special dates
/// <root>/locations.json
/// <root>/location_areas.json
/// <root>/departments.json
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonDirSource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a project's files, or `None` for ids that would
    /// escape the `projects` directory.
    pub fn project_dir(&self, project_id: &str) -> Option<PathBuf> {
        let valid = !project_id.is_empty()
            && project_id != "."
            && project_id != ".."
            && !project_id.contains(['/', '\\']);
        valid.then(|| self.root.join("projects").join(project_id))
    }

    pub fn project_path(&self, project_id: &str) -> Option<PathBuf> {
        self.project_dir(project_id).map(|dir| dir.join("main.json"))
    }

    pub fn calendar_path(&self, project_id: &str) -> Option<PathBuf> {
        self.project_dir(project_id)
            .map(|dir| dir.join("calendar.json"))
    }

    fn project_list<T: DeserializeOwned>(&self, project_id: &str, file: &str) -> Vec<T> {
        match self.project_dir(project_id) {
            Some(dir) => read_list(&dir.join(file)),
            None => {
                warn!(project_id, "Rejected unsafe project id");
                Vec::new()
            }
        }
    }
}

impl ScheduleSource for JsonDirSource {
    fn load_holidays(&self, project_id: &str) -> Vec<Holiday> {
        self.project_list(project_id, "holidays.json")
    }

    fn load_working_weekends(&self, project_id: &str) -> Vec<WorkingWeekend> {
        self.project_list(project_id, "weekends.json")
    }

    fn load_hiatus_periods(&self, project_id: &str) -> Vec<HiatusPeriod> {
        self.project_list(project_id, "hiatus.json")
    }

    fn load_special_dates(&self, project_id: &str) -> Vec<SpecialDate> {
        let mut dates: Vec<SpecialDate> = self.project_list(project_id, "special_dates.json");
        dates.extend(read_list::<SpecialDate>(
            &self.root.join("special_dates.json"),
        ));
        dates
    }

    fn load_location_areas(&self) -> Vec<LocationArea> {
        read_list(&self.root.join("location_areas.json"))
    }

    fn load_locations(&self) -> Vec<Location> {
        read_list(&self.root.join("locations.json"))
    }

    fn load_departments(&self) -> Vec<Department> {
        read_list(&self.root.join("departments.json"))
    }
}

/// Read a JSON array, treating a missing or broken file as empty.
///
/// Records are decoded one at a time; a malformed record is skipped with a
/// warning and the rest of the file is kept.
fn read_list<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }
    let records = match try_read_records(path) {
        Ok(records) => records,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Ignoring unreadable data file");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(path = %path.display(), index, error = %err, "Skipping malformed record");
                None
            }
        })
        .collect()
}

fn try_read_records(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}
