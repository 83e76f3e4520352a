//! Calendar generation.
//!
//! Walks every date from prep start to wrap, classifies it, numbers the shoot
//! days and merges in whatever users already entered on a previous calendar.
//! Regenerating from the builder's own output changes nothing but
//! `lastUpdated`.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::aggregate::{LocationDirectory, refresh_aggregates};
use crate::classify::{DayFlags, OverrideIndex, classify_day, resolve_day_type};
use crate::error::{Result, ScheduleError};
use crate::loaders::ScheduleInputs;
use crate::models::{CalendarData, CalendarDay, DayType, Project};

/// Length of the shoot when a project has no wrap date.
pub const DEFAULT_SHOOT_LENGTH_DAYS: u64 = 28;

/// Notes starting with one of these were written by the builder and may be
/// replaced; anything else was typed by a user and is left alone.
pub const AUTO_NOTE_PREFIXES: [&str; 7] = [
    "Bank Holiday",
    "Hiatus:",
    "Working Weekend",
    "Travel:",
    "Meeting:",
    "Rehearsal:",
    "Other:",
];

/// The wrap date of `project`: explicit, or four weeks after shoot start.
pub fn resolve_wrap_date(project: &Project) -> Option<NaiveDate> {
    project.wrap_date.or_else(|| {
        project
            .shoot_start_date?
            .checked_add_days(Days::new(DEFAULT_SHOOT_LENGTH_DAYS))
    })
}

/// Build the calendar of `project`, never failing.
///
/// A project without prep or shoot start dates yields a calendar with no
/// days, so callers can still show an incomplete project.
pub fn build_calendar(
    project: &Project,
    inputs: &ScheduleInputs,
    existing: Option<&CalendarData>,
) -> CalendarData {
    build_calendar_at(project, inputs, existing, Utc::now())
}

/// [`build_calendar`] with an explicit `lastUpdated` instant.
pub fn build_calendar_at(
    project: &Project,
    inputs: &ScheduleInputs,
    existing: Option<&CalendarData>,
    now: DateTime<Utc>,
) -> CalendarData {
    match try_build_calendar_at(project, inputs, existing, now) {
        Ok(calendar) => calendar,
        Err(err) => {
            warn!(project_id = %project.id, error = %err, "Returning empty calendar");
            CalendarData::empty(project.id.clone())
        }
    }
}

/// Build the calendar of `project`, reporting why it could not be built.
pub fn try_build_calendar(
    project: &Project,
    inputs: &ScheduleInputs,
    existing: Option<&CalendarData>,
) -> Result<CalendarData> {
    try_build_calendar_at(project, inputs, existing, Utc::now())
}

/// [`try_build_calendar`] with an explicit `lastUpdated` instant.
pub fn try_build_calendar_at(
    project: &Project,
    inputs: &ScheduleInputs,
    existing: Option<&CalendarData>,
    now: DateTime<Utc>,
) -> Result<CalendarData> {
    let (Some(prep_start), Some(shoot_start)) = (project.prep_start_date, project.shoot_start_date)
    else {
        return Err(ScheduleError::MissingProjectDates(project.id.clone()));
    };
    let wrap = resolve_wrap_date(project).ok_or_else(|| {
        ScheduleError::DateOutOfRange(format!("no wrap date after shoot start {shoot_start}"))
    })?;

    if wrap < prep_start {
        warn!(project_id = %project.id, %prep_start, %wrap, "Wrap date precedes prep start");
    }

    let overrides = OverrideIndex::new(
        &inputs.holidays,
        &inputs.working_weekends,
        &inputs.hiatus_periods,
        &inputs.special_dates,
    );
    let directory = LocationDirectory::new(&inputs.locations);
    let previous: HashMap<NaiveDate, &CalendarDay> = existing
        .map(|calendar| calendar.days.iter().map(|d| (d.date, d)).collect())
        .unwrap_or_default();

    let mut days = Vec::new();
    let mut shoot_day = 0;
    let mut current = prep_start;

    while current <= wrap {
        let flags = classify_day(current, shoot_start, &overrides);
        let day_type = resolve_day_type(&flags);
        let number = flags.is_shoot_day.then(|| {
            shoot_day += 1;
            shoot_day
        });

        let mut day = match previous.get(&current) {
            Some(old) => (*old).clone(),
            None => CalendarDay::blank(current),
        };
        apply_date_facts(&mut day, current, &flags, day_type, number);
        apply_auto_note(&mut day, auto_note(current, &flags, &overrides));
        if day.location_area.trim().is_empty() {
            if let Some(area) = directory.area_of(&day.location) {
                day.location_area = area.to_string();
            }
        }
        days.push(day);

        current = current.succ_opt().ok_or_else(|| {
            ScheduleError::DateOutOfRange(format!("no day after {current}"))
        })?;
    }

    debug!(
        project_id = %project.id,
        days = days.len(),
        shoot_days = shoot_day,
        merged = previous.len(),
        "Built calendar"
    );

    let mut calendar = CalendarData {
        project_id: project.id.clone(),
        days,
        last_updated: Some(now),
        extra: existing.map(|c| c.extra.clone()).unwrap_or_default(),
        ..Default::default()
    };
    refresh_aggregates(&mut calendar, inputs);

    Ok(calendar)
}

/// Overwrite the date-derived fields of `day`, leaving editable ones alone.
fn apply_date_facts(
    day: &mut CalendarDay,
    date: NaiveDate,
    flags: &DayFlags,
    day_type: DayType,
    shoot_day: Option<u32>,
) {
    let facts = CalendarDay::blank(date);
    day.date = date;
    day.day_of_week = facts.day_of_week;
    day.month_name = facts.month_name;
    day.day = facts.day;
    day.month = facts.month;
    day.year = facts.year;
    day.is_prep = flags.is_prep;
    day.is_weekend = flags.is_weekend;
    day.is_holiday = flags.is_holiday;
    day.is_working_holiday = flags.is_working_holiday;
    day.is_hiatus = flags.is_hiatus;
    day.is_working_weekend = flags.is_working_weekend;
    day.day_type = day_type;
    day.is_shoot_day = flags.is_shoot_day;
    day.shoot_day = shoot_day;
}

pub fn is_auto_note(note: &str) -> bool {
    let note = note.trim();
    note.is_empty()
        || AUTO_NOTE_PREFIXES
            .iter()
            .any(|p| note.starts_with(p) || note == p.trim_end_matches(':'))
}

/// `"Label: detail"`, or the bare label when there is no detail.
fn labelled(label: &str, detail: &str) -> String {
    if detail.is_empty() {
        label.to_string()
    } else {
        format!("{label}: {detail}")
    }
}

/// Explanatory note for `date`, if any override applies.
///
/// Precedence: special date, working weekend, hiatus, holiday.
fn auto_note(date: NaiveDate, flags: &DayFlags, overrides: &OverrideIndex) -> Option<String> {
    if let Some(special) = overrides.special_date(date) {
        let name = special.name.trim();
        let description = special.description.as_deref().map_or("", str::trim);
        let detail = match (name.is_empty(), description.is_empty()) {
            (false, false) => format!("{name} - {description}"),
            (false, true) => name.to_string(),
            _ => description.to_string(),
        };
        return Some(labelled(special.kind.label(), &detail));
    }

    if flags.is_working_weekend {
        let description = overrides
            .working_weekend(date)
            .and_then(|w| w.description.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty());
        return Some(labelled("Working Weekend", description.unwrap_or_default()));
    }

    if flags.is_hiatus {
        let name = overrides.hiatus(date).map(|h| h.name.trim()).unwrap_or_default();
        return Some(labelled("Hiatus", name));
    }

    if flags.is_holiday {
        let name = overrides.holiday(date).map(|h| h.name.trim()).unwrap_or_default();
        return Some(labelled("Bank Holiday", name));
    }

    None
}

/// Replace a generated (or empty) note; clear a generated note whose reason
/// has gone away. User notes are never touched.
fn apply_auto_note(day: &mut CalendarDay, note: Option<String>) {
    if is_auto_note(&day.notes) {
        day.notes = note.unwrap_or_default();
    }
}
