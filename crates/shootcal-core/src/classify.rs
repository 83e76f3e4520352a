//! Day classification.
//!
//! Decides, for a single date, which override rules apply and whether the
//! date is a shoot day. The precedence is fixed:
//!
//! 1. Hiatus and non-working special dates always prevent shooting.
//! 2. A holiday prevents shooting unless its record is both working and a
//!    shoot day.
//! 3. A weekend prevents shooting unless a working-weekend record exists.
//! 4. Dates before the shoot start are prep and never shoot days.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{DayType, HiatusPeriod, Holiday, SpecialDate, WorkingWeekend};

/// Date-indexed view over the override lists of one project.
///
/// When several records share a date the first one in list order is used.
#[derive(Debug, Default)]
pub struct OverrideIndex<'a> {
    holidays: HashMap<NaiveDate, &'a Holiday>,
    working_weekends: HashMap<NaiveDate, &'a WorkingWeekend>,
    special_dates: HashMap<NaiveDate, &'a SpecialDate>,
    non_working_special: HashMap<NaiveDate, &'a SpecialDate>,
    hiatus_periods: &'a [HiatusPeriod],
}

impl<'a> OverrideIndex<'a> {
    pub fn new(
        holidays: &'a [Holiday],
        working_weekends: &'a [WorkingWeekend],
        hiatus_periods: &'a [HiatusPeriod],
        special_dates: &'a [SpecialDate],
    ) -> Self {
        let mut index = OverrideIndex {
            hiatus_periods,
            ..Default::default()
        };
        for holiday in holidays {
            index.holidays.entry(holiday.date).or_insert(holiday);
        }
        for weekend in working_weekends {
            index.working_weekends.entry(weekend.date).or_insert(weekend);
        }
        for special in special_dates {
            index.special_dates.entry(special.date).or_insert(special);
            if !special.is_working {
                index.non_working_special.entry(special.date).or_insert(special);
            }
        }
        index
    }

    pub fn holiday(&self, date: NaiveDate) -> Option<&'a Holiday> {
        self.holidays.get(&date).copied()
    }

    pub fn working_weekend(&self, date: NaiveDate) -> Option<&'a WorkingWeekend> {
        self.working_weekends.get(&date).copied()
    }

    pub fn hiatus(&self, date: NaiveDate) -> Option<&'a HiatusPeriod> {
        self.hiatus_periods.iter().find(|h| h.contains(date))
    }

    pub fn special_date(&self, date: NaiveDate) -> Option<&'a SpecialDate> {
        self.special_dates.get(&date).copied()
    }

    /// Whether any special date record on `date` is marked non-working.
    pub fn blocks_shooting(&self, date: NaiveDate) -> bool {
        self.non_working_special.contains_key(&date)
    }
}

/// Flags computed for one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayFlags {
    pub is_prep: bool,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_working_holiday: bool,
    pub is_hiatus: bool,
    pub is_working_weekend: bool,
    pub is_shoot_day: bool,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classify `date` for a project whose shoot starts on `shoot_start`.
pub fn classify_day(
    date: NaiveDate,
    shoot_start: NaiveDate,
    overrides: &OverrideIndex,
) -> DayFlags {
    let is_weekend = is_weekend(date);
    let is_working_weekend = is_weekend && overrides.working_weekend(date).is_some();

    let holiday = overrides.holiday(date);
    let is_holiday = holiday.is_some();
    let is_working_holiday = holiday.is_some_and(|h| h.is_working);
    let holiday_allows_shooting = holiday.is_none_or(Holiday::allows_shooting);

    let is_hiatus = overrides.hiatus(date).is_some();
    let is_prep = date < shoot_start;

    let is_shoot_day = !is_prep
        && (!is_weekend || is_working_weekend)
        && holiday_allows_shooting
        && !is_hiatus
        && !overrides.blocks_shooting(date);

    DayFlags {
        is_prep,
        is_weekend,
        is_holiday,
        is_working_holiday,
        is_hiatus,
        is_working_weekend,
        is_shoot_day,
    }
}

/// Display category of a day; the first matching rule wins.
pub fn resolve_day_type(flags: &DayFlags) -> DayType {
    if flags.is_hiatus {
        DayType::Hiatus
    } else if flags.is_holiday {
        DayType::Holiday
    } else if flags.is_prep {
        DayType::Prep
    } else if flags.is_weekend {
        if flags.is_working_weekend {
            DayType::WorkingWeekend
        } else {
            DayType::Weekend
        }
    } else if flags.is_shoot_day {
        DayType::Shoot
    } else {
        DayType::Normal
    }
}
