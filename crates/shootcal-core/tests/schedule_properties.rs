use chrono::{Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use shootcal_core::prelude::*;
use shootcal_core::try_build_calendar_at;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

fn offset(days: u64) -> NaiveDate {
    base().checked_add_days(Days::new(days)).unwrap()
}

#[derive(Debug, Clone)]
struct Scenario {
    project: Project,
    inputs: ScheduleInputs,
}

fn scenario() -> impl Strategy<Value = Scenario> {
    (
        0u64..200,
        0u64..40,
        prop::option::of(0u64..90),
        prop::collection::vec(0u64..200, 0..6),
        prop::collection::vec((0u64..200, any::<bool>(), any::<bool>()), 0..6),
        prop::collection::vec((0u64..200, 0u64..10), 0..3),
        prop::collection::vec((0u64..200, any::<bool>()), 0..4),
    )
        .prop_map(
            |(prep, prep_len, wrap_len, weekends, holidays, hiatuses, specials)| {
                let prep_start = offset(prep);
                let shoot_start = offset(prep + prep_len);
                let wrap_date = wrap_len.map(|len| offset(prep + prep_len + len));

                let inputs = ScheduleInputs {
                    working_weekends: weekends
                        .into_iter()
                        .map(|d| WorkingWeekend {
                            id: None,
                            date: offset(d),
                            description: None,
                        })
                        .collect(),
                    holidays: holidays
                        .into_iter()
                        .map(|(d, is_working, is_shoot_day)| Holiday {
                            id: None,
                            date: offset(d),
                            name: "Holiday".into(),
                            is_working,
                            is_shoot_day,
                        })
                        .collect(),
                    hiatus_periods: hiatuses
                        .into_iter()
                        .map(|(d, len)| HiatusPeriod {
                            id: None,
                            start_date: offset(d),
                            end_date: offset(d + len),
                            name: "Hiatus".into(),
                        })
                        .collect(),
                    special_dates: specials
                        .into_iter()
                        .map(|(d, is_working)| SpecialDate {
                            id: None,
                            date: offset(d),
                            kind: SpecialDateType::Travel,
                            name: "Travel".into(),
                            description: None,
                            is_working,
                        })
                        .collect(),
                    ..Default::default()
                };

                Scenario {
                    project: Project {
                        id: "prop".into(),
                        prep_start_date: Some(prep_start),
                        shoot_start_date: Some(shoot_start),
                        wrap_date,
                    },
                    inputs,
                }
            },
        )
}

fn build(scenario: &Scenario, existing: Option<&CalendarData>) -> CalendarData {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().unwrap();
    try_build_calendar_at(&scenario.project, &scenario.inputs, existing, now).unwrap()
}

fn assert_contiguous(calendar: &CalendarData) -> std::result::Result<(), TestCaseError> {
    let numbers: Vec<u32> = calendar.days.iter().filter_map(|d| d.shoot_day).collect();
    let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
    prop_assert_eq!(numbers, expected);
    for day in &calendar.days {
        prop_assert_eq!(day.shoot_day.is_some(), day.is_shoot_day);
    }
    Ok(())
}

proptest! {
    #[test]
    fn one_day_per_date(scenario in scenario()) {
        let calendar = build(&scenario, None);
        let prep = scenario.project.prep_start_date.unwrap();
        let wrap = shootcal_core::builder::resolve_wrap_date(&scenario.project).unwrap();

        let expected = (wrap - prep).num_days() + 1;
        prop_assert_eq!(calendar.days.len() as i64, expected);
        prop_assert_eq!(calendar.days.first().map(|d| d.date), Some(prep));
        prop_assert!(
            calendar
                .days
                .windows(2)
                .all(|w| Some(w[1].date) == w[0].date.succ_opt())
        );
    }

    #[test]
    fn shoot_days_are_contiguous(scenario in scenario()) {
        let calendar = build(&scenario, None);
        assert_contiguous(&calendar)?;
        prop_assert_eq!(
            calendar.department_counts["main"] as usize,
            calendar.shoot_day_count()
        );
    }

    #[test]
    fn prep_flag_matches_shoot_start(scenario in scenario()) {
        let calendar = build(&scenario, None);
        let shoot_start = scenario.project.shoot_start_date.unwrap();
        for day in &calendar.days {
            prop_assert_eq!(day.is_prep, day.date < shoot_start);
            if day.is_prep {
                prop_assert!(!day.is_shoot_day);
            }
        }
    }

    #[test]
    fn hiatus_is_never_a_shoot_day(scenario in scenario()) {
        let calendar = build(&scenario, None);
        for day in &calendar.days {
            let in_hiatus = scenario.inputs.hiatus_periods.iter().any(|h| h.contains(day.date));
            prop_assert_eq!(day.is_hiatus, in_hiatus);
            if in_hiatus {
                prop_assert!(!day.is_shoot_day);
                prop_assert_eq!(day.day_type, DayType::Hiatus);
            }
        }
    }

    #[test]
    fn regeneration_is_idempotent(scenario in scenario()) {
        let first = build(&scenario, None);
        let second = build(&scenario, Some(&first));
        prop_assert_eq!(&first, &second);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        prop_assert_eq!(first_json, second_json);
    }

    #[test]
    fn moves_keep_numbering_contiguous(
        scenario in scenario(),
        pick in 0usize..1000,
        target in 0usize..1000
    ) {
        let mut calendar = build(&scenario, None);
        let shoot_dates: Vec<NaiveDate> =
            calendar.days.iter().filter(|d| d.is_shoot_day).map(|d| d.date).collect();
        prop_assume!(!shoot_dates.is_empty());

        let from = shoot_dates[pick % shoot_dates.len()];
        let to = calendar.days[target % calendar.days.len()].date;
        let before = calendar.clone();

        match move_day(&mut calendar, from, to, MoveMode::Swap) {
            Ok(_) => {
                assert_contiguous(&calendar)?;
                prop_assert!(calendar.day(to).unwrap().is_shoot_day);
                prop_assert_eq!(calendar.days.len(), before.days.len());
            }
            Err(err) => {
                prop_assert!(err.rejection_kind().is_some());
                prop_assert_eq!(&calendar, &before);
            }
        }
    }
}
