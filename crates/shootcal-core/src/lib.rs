//! # shootcal-core
//!
//! A production calendar engine for film projects.
//!
//! Given a project's prep start, shoot start and wrap dates plus four lists
//! of overrides, this library produces one record per calendar date with a
//! consistent classification and shoot-day numbering.
//!
//! ## Features
//!
//! - **Classification**: Bank holidays, working weekends, hiatus ranges and
//!   special dates resolved with a fixed precedence; hiatus always wins.
//! - **Contiguous Numbering**: Shoot days are numbered `1..=k` in date order,
//!   before and after every edit.
//! - **Safe Regeneration**: Rebuilding keeps every user-entered field and
//!   never overwrites a user note.
//! - **Day Moves**: Swap the content of two dates while each date keeps its
//!   own weekday and override flags.
//! - **Statistics**: Department tag counts and location/area usage.
//!
//! ## Example
//!
//! ```rust
//! use shootcal_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! let project = Project {
//!     id: "feature-1".into(),
//!     prep_start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
//!     shoot_start_date: NaiveDate::from_ymd_opt(2024, 1, 8),
//!     wrap_date: None,
//! };
//!
//! let calendar = build_calendar(&project, &ScheduleInputs::default(), None);
//!
//! let first = calendar.day(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()).unwrap();
//! assert_eq!(first.shoot_day, Some(1));
//! assert_eq!(calendar.days.len(), 36);
//! ```

pub mod aggregate;
pub mod builder;
pub mod classify;
pub mod error;
pub mod loaders;
pub mod models;
pub mod move_day;

// Re-export commonly used types at the crate root
pub use aggregate::{LocationTally, department_counts, location_counts, refresh_aggregates};
pub use builder::{build_calendar, build_calendar_at, try_build_calendar, try_build_calendar_at};
pub use classify::{DayFlags, OverrideIndex, classify_day, resolve_day_type};
pub use error::{Result, ScheduleError};
pub use loaders::{JsonDirSource, MemorySource, ScheduleInputs, ScheduleSource};
pub use models::{
    CalendarData, CalendarDay, DayType, Department, HiatusPeriod, Holiday, Location,
    LocationArea, Project, SpecialDate, SpecialDateType, WorkingWeekend,
};
pub use move_day::{MoveMode, MoveOutcome, move_day};

/// Prelude module for convenient imports.
///
/// ```
/// use shootcal_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::refresh_aggregates;
    pub use crate::builder::{build_calendar, try_build_calendar};
    pub use crate::error::{Result, ScheduleError};
    pub use crate::loaders::{JsonDirSource, MemorySource, ScheduleInputs, ScheduleSource};
    pub use crate::models::*;
    pub use crate::move_day::{MoveMode, MoveOutcome, move_day};
}
