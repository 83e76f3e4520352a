//! Schedule statistics.
//!
//! Two independent passes over a finished day sequence: department tag counts
//! and location/area occurrence counts. Both are pure functions of the days
//! and the reference data; results are kept in `BTreeMap`s so the serialized
//! calendar is stable between runs.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::loaders::ScheduleInputs;
use crate::models::{CalendarData, CalendarDay, Department, Location};

/// Codes used by older calendars before departments were configurable.
///
/// Explicit department definitions take precedence over these.
pub const LEGACY_DEPARTMENT_CODES: [(&str, &str); 10] = [
    ("SFX", "sfx"),
    ("STN", "stunts"),
    ("CR", "crane"),
    ("ST", "steadicam"),
    ("PR", "prosthetics"),
    ("LL", "lowLoader"),
    ("VFX", "vfx"),
    ("ANI", "animals"),
    ("UW", "underwater"),
    ("INCY", "intimacy"),
];

/// Count keys that are always present and derived from day flags.
pub const METRIC_MAIN: &str = "main";
pub const METRIC_SECOND_UNIT: &str = "secondUnit";
pub const METRIC_SIXTH_DAY: &str = "sixthDay";
pub const METRIC_SPLIT_DAY: &str = "splitDay";

const PLACEHOLDER_LOCATIONS: [&str; 5] = ["-", "--", "tbc", "tbd", "n/a"];

/// Canonical form of a department tag: trimmed and upper-cased.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_uppercase()
}

/// `"Hair & Make-Up"` becomes `"hair_make_up"`.
fn snake_case(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Map of normalised department code to count key.
///
/// A definition's key is its `id` lower-cased, else its snake-cased `name`,
/// else its lower-cased code. The first definition of a code wins; legacy
/// codes fill in whatever the definitions leave unmapped.
pub fn department_key_map(departments: &[Department]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    for department in departments {
        let code = normalize_tag(&department.code);
        if code.is_empty() {
            continue;
        }
        let key = non_blank(department.id.as_ref())
            .map(str::to_lowercase)
            .or_else(|| non_blank(department.name.as_ref()).map(snake_case))
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| code.to_lowercase());
        map.entry(code).or_insert(key);
    }

    for (code, key) in LEGACY_DEPARTMENT_CODES {
        map.entry(code.to_string()).or_insert_with(|| key.to_string());
    }

    map
}

/// Department and unit counts for a day sequence.
///
/// Every mapped key starts at zero. A day adds at most one to each key,
/// however often it repeats a tag. Tags without a mapping are ignored.
/// The standard metrics are written last and win over a department that
/// happens to map to the same key.
pub fn department_counts(
    days: &[CalendarDay],
    departments: &[Department],
) -> BTreeMap<String, u32> {
    let key_map = department_key_map(departments);

    let mut counts: BTreeMap<String, u32> = key_map.values().map(|key| (key.clone(), 0)).collect();

    for day in days {
        let keys: BTreeSet<&String> = day
            .departments
            .iter()
            .filter_map(|tag| key_map.get(&normalize_tag(tag)))
            .collect();
        for key in keys {
            *counts.entry(key.clone()).or_insert(0) += 1;
        }
    }

    let shoot_days = || days.iter().filter(|d| d.is_shoot_day);
    let metrics = [
        (METRIC_MAIN, shoot_days().count()),
        (
            METRIC_SECOND_UNIT,
            days.iter().filter(|d| !d.second_unit.trim().is_empty()).count(),
        ),
        (METRIC_SIXTH_DAY, shoot_days().filter(|d| d.is_saturday()).count()),
        (METRIC_SPLIT_DAY, shoot_days().filter(|d| d.is_split_day).count()),
    ];
    for (key, value) in metrics {
        counts.insert(key.to_string(), u32::try_from(value).unwrap_or(u32::MAX));
    }

    counts
}

/// Blank and filler values such as `TBC` do not name a location.
pub fn is_placeholder_location(location: &str) -> bool {
    let trimmed = location.trim();
    trimmed.is_empty()
        || PLACEHOLDER_LOCATIONS
            .iter()
            .any(|p| trimmed.eq_ignore_ascii_case(p))
}

/// Lookup from location name to area id.
#[derive(Debug, Default)]
pub struct LocationDirectory<'a> {
    area_by_name: HashMap<&'a str, &'a str>,
}

impl<'a> LocationDirectory<'a> {
    pub fn new(locations: &'a [Location]) -> Self {
        let mut area_by_name = HashMap::new();
        for location in locations {
            let name = location.name.trim();
            let area = location.area_id.trim();
            if !name.is_empty() && !area.is_empty() {
                area_by_name.entry(name).or_insert(area);
            }
        }
        LocationDirectory { area_by_name }
    }

    pub fn area_of(&self, location: &str) -> Option<&'a str> {
        self.area_by_name.get(location.trim()).copied()
    }
}

/// Occurrence counts per location name and per area id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationTally {
    pub location_counts: BTreeMap<String, u32>,
    pub area_counts: BTreeMap<String, u32>,
}

/// Count how often each location is used and roll the counts up by area.
///
/// A day's area is the one its location belongs to, falling back to the
/// day's own `locationArea`. Days with placeholder locations are skipped.
pub fn location_counts(days: &[CalendarDay], locations: &[Location]) -> LocationTally {
    let directory = LocationDirectory::new(locations);
    let mut tally = LocationTally::default();

    for day in days {
        if is_placeholder_location(&day.location) {
            continue;
        }
        let name = day.location.trim();
        *tally.location_counts.entry(name.to_string()).or_insert(0) += 1;

        let area = directory.area_of(name).or_else(|| {
            let own = day.location_area.trim();
            (!own.is_empty()).then_some(own)
        });
        if let Some(area) = area {
            *tally.area_counts.entry(area.to_string()).or_insert(0) += 1;
        }
    }

    tally
}

/// Recompute every count of `calendar` and refresh its reference copies.
pub fn refresh_aggregates(calendar: &mut CalendarData, inputs: &ScheduleInputs) {
    calendar.department_counts = department_counts(&calendar.days, &inputs.departments);

    let tally = location_counts(&calendar.days, &inputs.locations);
    calendar.location_counts = tally.location_counts;
    calendar.area_counts = tally.area_counts;

    calendar.location_areas = inputs.location_areas.clone();
    calendar.departments = inputs.departments.clone();
}
