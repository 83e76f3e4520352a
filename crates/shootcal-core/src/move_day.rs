//! Moving shoot days between dates.
//!
//! A move exchanges what is planned on two dates. Everything that belongs to
//! the date itself (weekday, prep/weekend/holiday/hiatus flags, day type)
//! stays put; the planned content travels. Shoot days are renumbered from
//! scratch afterwards, so numbering is contiguous whatever was moved.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::classify::{DayFlags, resolve_day_type};
use crate::error::{Result, ScheduleError};
use crate::models::{CalendarData, CalendarDay};

/// How a move treats the two dates involved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveMode {
    /// Exchange the content of the source and destination dates.
    #[default]
    Swap,
}

impl std::fmt::Display for MoveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveMode::Swap => write!(f, "swap"),
        }
    }
}

impl FromStr for MoveMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "swap" => Ok(MoveMode::Swap),
            _ => Err(ScheduleError::UnsupportedMoveMode(s.to_string())),
        }
    }
}

/// What a successful move did, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub mode: MoveMode,
    /// Shoot-day number of the moved content before the move.
    pub original_shoot_day: Option<u32>,
    /// Shoot-day number the destination date held before the move.
    pub target_shoot_day: Option<u32>,
    /// Shoot-day number of the moved content after renumbering.
    pub new_shoot_day: Option<u32>,
}

/// Move the shoot day planned on `from` to `to`.
///
/// Fails without touching `calendar` when either date is missing, when
/// `from` is not a shoot day, or when `to` cannot host one (a weekend that is
/// not a working weekend, a holiday that is not worked, or a hiatus day).
///
/// Counts are not refreshed here; call
/// [`refresh_aggregates`](crate::aggregate::refresh_aggregates) afterwards.
pub fn move_day(
    calendar: &mut CalendarData,
    from: NaiveDate,
    to: NaiveDate,
    mode: MoveMode,
) -> Result<MoveOutcome> {
    let from_idx = position(calendar, from)?;
    let to_idx = position(calendar, to)?;

    let source = &calendar.days[from_idx];
    if !source.is_shoot_day {
        return Err(ScheduleError::NotAShootDay(from));
    }
    let destination = &calendar.days[to_idx];
    if !destination.can_host_shoot_day() {
        return Err(ScheduleError::IneligibleDestination(to));
    }

    let original_shoot_day = source.shoot_day;
    let target_shoot_day = destination.shoot_day;
    let destination_was_shooting = destination.is_shoot_day;

    match mode {
        MoveMode::Swap => {
            if from_idx != to_idx {
                swap_content(&mut calendar.days, from_idx, to_idx);

                let moved = &mut calendar.days[to_idx];
                moved.is_shoot_day = true;
                moved.day_type = resolve_day_type(&DayFlags::from(&*moved));

                let displaced = &mut calendar.days[from_idx];
                displaced.is_shoot_day = destination_was_shooting;
                displaced.day_type = resolve_day_type(&DayFlags::from(&*displaced));
            }
        }
    }

    calendar.renumber_shoot_days();
    let new_shoot_day = calendar.day(to).and_then(|d| d.shoot_day);

    debug!(
        %from,
        %to,
        %mode,
        ?original_shoot_day,
        ?new_shoot_day,
        "Moved shoot day"
    );

    Ok(MoveOutcome {
        from_date: from,
        to_date: to,
        mode,
        original_shoot_day,
        target_shoot_day,
        new_shoot_day,
    })
}

fn position(calendar: &CalendarData, date: NaiveDate) -> Result<usize> {
    calendar
        .days
        .iter()
        .position(|d| d.date == date)
        .ok_or(ScheduleError::DayNotFound(date))
}

/// Exchange the records at `a` and `b`, then give each its date facts back.
fn swap_content(days: &mut [CalendarDay], a: usize, b: usize) {
    days.swap(a, b);
    let (low, high) = (a.min(b), a.max(b));
    let (head, tail) = days.split_at_mut(high);
    swap_date_identity(&mut head[low], &mut tail[0]);
}

fn swap_date_identity(a: &mut CalendarDay, b: &mut CalendarDay) {
    use std::mem::swap;

    swap(&mut a.date, &mut b.date);
    swap(&mut a.day_of_week, &mut b.day_of_week);
    swap(&mut a.month_name, &mut b.month_name);
    swap(&mut a.day, &mut b.day);
    swap(&mut a.month, &mut b.month);
    swap(&mut a.year, &mut b.year);
    swap(&mut a.is_prep, &mut b.is_prep);
    swap(&mut a.is_weekend, &mut b.is_weekend);
    swap(&mut a.is_holiday, &mut b.is_holiday);
    swap(&mut a.is_working_holiday, &mut b.is_working_holiday);
    swap(&mut a.is_hiatus, &mut b.is_hiatus);
    swap(&mut a.is_working_weekend, &mut b.is_working_weekend);
    swap(&mut a.day_type, &mut b.day_type);
}

impl From<&CalendarDay> for DayFlags {
    fn from(day: &CalendarDay) -> Self {
        DayFlags {
            is_prep: day.is_prep,
            is_weekend: day.is_weekend,
            is_holiday: day.is_holiday,
            is_working_holiday: day.is_working_holiday,
            is_hiatus: day.is_hiatus,
            is_working_weekend: day.is_working_weekend,
            is_shoot_day: day.is_shoot_day,
        }
    }
}
