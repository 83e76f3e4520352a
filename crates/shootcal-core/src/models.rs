//! Core data types for shootcal.
//!
//! This module defines the records the engine consumes and produces:
//! - [`Project`] - The date boundaries of a production
//! - [`Holiday`], [`WorkingWeekend`], [`HiatusPeriod`], [`SpecialDate`] - Override records
//! - [`Department`], [`Location`], [`LocationArea`] - Global reference data
//! - [`DayType`] - Display classification of a day
//! - [`CalendarDay`] - One scheduled date
//! - [`CalendarData`] - The complete schedule of a project
//!
//! Every type serializes with camelCase keys; the persisted JSON is read by
//! other tools and must keep this shape.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

fn default_true() -> bool {
    true
}

/// Accepts `null`, an empty string, a plain `YYYY-MM-DD` date or a datetime
/// whose date part comes before a `T`.
fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", raw, e)))
}

/// The slice of a project record the calendar engine reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub prep_start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub shoot_start_date: Option<NaiveDate>,
    /// Defaults to four weeks after the shoot start when absent.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub wrap_date: Option<NaiveDate>,
}

/// A bank holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_working: bool,
    /// Only meaningful when `is_working` is set.
    #[serde(default)]
    pub is_shoot_day: bool,
}

impl Holiday {
    /// A worked holiday that is also counted as a shoot day.
    pub fn allows_shooting(&self) -> bool {
        self.is_working && self.is_shoot_day
    }
}

/// A Saturday or Sunday designated as a working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingWeekend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An inclusive blackout range during which nothing is shot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiatusPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub name: String,
}

impl HiatusPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Kind of a [`SpecialDate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialDateType {
    Travel,
    Meeting,
    Rehearsal,
    #[default]
    #[serde(other)]
    Other,
}

impl SpecialDateType {
    /// Label used as the prefix of generated notes.
    pub fn label(self) -> &'static str {
        match self {
            SpecialDateType::Travel => "Travel",
            SpecialDateType::Meeting => "Meeting",
            SpecialDateType::Rehearsal => "Rehearsal",
            SpecialDateType::Other => "Other",
        }
    }
}

impl std::fmt::Display for SpecialDateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialDateType::Travel => write!(f, "travel"),
            SpecialDateType::Meeting => write!(f, "meeting"),
            SpecialDateType::Rehearsal => write!(f, "rehearsal"),
            SpecialDateType::Other => write!(f, "other"),
        }
    }
}

/// A named non-production event on a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: SpecialDateType,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A non-working special date suppresses shooting on that date.
    #[serde(default = "default_true")]
    pub is_working: bool,
}

/// A department whose short code tags calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A named filming location belonging to an area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub area_id: String,
}

/// A group of locations, used for colouring and roll-up counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationArea {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Display classification of a calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayType {
    Hiatus,
    Holiday,
    Prep,
    Shoot,
    WorkingWeekend,
    Weekend,
    #[default]
    Normal,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Hiatus => write!(f, "hiatus"),
            DayType::Holiday => write!(f, "holiday"),
            DayType::Prep => write!(f, "prep"),
            DayType::Shoot => write!(f, "shoot"),
            DayType::WorkingWeekend => write!(f, "working-weekend"),
            DayType::Weekend => write!(f, "weekend"),
            DayType::Normal => write!(f, "normal"),
        }
    }
}

/// One date of the schedule.
///
/// The first group of fields is derived from the date and the override lists
/// and is recomputed on every build. The second group is edited by users and
/// survives regeneration untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub month_name: String,
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub is_prep: bool,
    #[serde(default)]
    pub is_weekend: bool,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub is_working_holiday: bool,
    #[serde(default)]
    pub is_hiatus: bool,
    #[serde(default)]
    pub is_working_weekend: bool,
    #[serde(default)]
    pub day_type: DayType,
    #[serde(default)]
    pub is_shoot_day: bool,
    #[serde(default)]
    pub shoot_day: Option<u32>,

    #[serde(default)]
    pub main_unit: String,
    #[serde(default)]
    pub extras: u32,
    #[serde(default)]
    pub featured_extras: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub location_area: String,
    #[serde(default)]
    pub sequence: String,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub second_unit: String,
    #[serde(default)]
    pub second_unit_location: String,
    #[serde(default)]
    pub is_split_day: bool,
    /// Per-day keys this version does not know about; they travel with the
    /// day's content.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CalendarDay {
    /// A day with empty editable fields and date facts filled in from `date`.
    ///
    /// All classification flags start cleared.
    pub fn blank(date: NaiveDate) -> Self {
        use chrono::Datelike;

        CalendarDay {
            date,
            day_of_week: date.format("%A").to_string(),
            month_name: date.format("%B").to_string(),
            day: date.day(),
            month: date.month(),
            year: date.year(),
            is_prep: false,
            is_weekend: false,
            is_holiday: false,
            is_working_holiday: false,
            is_hiatus: false,
            is_working_weekend: false,
            day_type: DayType::Normal,
            is_shoot_day: false,
            shoot_day: None,
            main_unit: String::new(),
            extras: 0,
            featured_extras: 0,
            location: String::new(),
            location_area: String::new(),
            sequence: String::new(),
            departments: Vec::new(),
            notes: String::new(),
            second_unit: String::new(),
            second_unit_location: String::new(),
            is_split_day: false,
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_saturday(&self) -> bool {
        use chrono::Datelike;
        self.date.weekday() == Weekday::Sat
    }

    /// Whether a shoot day may be placed on this date.
    pub fn can_host_shoot_day(&self) -> bool {
        !((self.is_weekend && !self.is_working_weekend)
            || (self.is_holiday && !self.is_working_holiday)
            || self.is_hiatus)
    }
}

/// The complete schedule of one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarData {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub days: Vec<CalendarDay>,
    #[serde(default)]
    pub department_counts: BTreeMap<String, u32>,
    #[serde(default)]
    pub location_areas: Vec<LocationArea>,
    #[serde(default)]
    pub location_counts: BTreeMap<String, u32>,
    #[serde(default)]
    pub area_counts: BTreeMap<String, u32>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Top-level keys this version does not know about, written back verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CalendarData {
    /// A calendar without days, as returned for incomplete projects.
    pub fn empty(project_id: impl Into<String>) -> Self {
        CalendarData {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn shoot_day_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_shoot_day).count()
    }

    /// Sort days chronologically and number shoot days `1..=k` from scratch.
    pub fn renumber_shoot_days(&mut self) {
        self.days.sort_by_key(|d| d.date);

        let mut counter = 0;
        for day in &mut self.days {
            if day.is_shoot_day {
                counter += 1;
                day.shoot_day = Some(counter);
            } else {
                day.shoot_day = None;
            }
        }
    }
}
