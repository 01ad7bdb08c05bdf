use chart_ticks::core::{
    CalendarDomain, CalendarInterval, CalendarUnit, calendar_major_ticks, calendar_tick_plan,
    calendar_tick_values, nice_calendar_endpoints, nice_calendar_interval,
};
use chart_ticks::error::TickError;
use chrono::{NaiveDate, NaiveDateTime};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, 0))
        .expect("valid datetime")
}

fn interval(code: &str) -> CalendarInterval {
    code.parse().expect("interval code")
}

#[test]
fn one_day_with_six_ticks_uses_three_hours() {
    let domain = CalendarDomain::new((at(2024, 3, 5, 0, 0), at(2024, 3, 6, 0, 0)));
    assert_eq!(
        nice_calendar_interval(&domain, 6).expect("interval"),
        CalendarInterval::new(CalendarUnit::Hour, 3)
    );

    let plan = calendar_tick_plan(&domain, 6).expect("plan");
    let expected: Vec<NaiveDateTime> = (0..=8)
        .map(|i| at(2024, 3, 5, 0, 0) + chrono::TimeDelta::hours(3 * i))
        .collect();
    assert_eq!(plan.major_ticks, expected);
    assert!(plan.minor_ticks.is_empty());
    assert_eq!(plan.tick_labels[0], "Tue 05 00h");
    assert_eq!(plan.tick_labels[1], "03h");
    assert_eq!(plan.tick_labels[8], "Wed 06 00h");
    assert_eq!(plan.suffix, "2024/03");
    assert_eq!(
        plan.display_limits,
        (at(2024, 3, 5, 0, 0), at(2024, 3, 6, 0, 0))
    );
}

#[test]
fn equal_limits_are_a_degenerate_span() {
    let moment = at(2024, 3, 5, 12, 0);
    let domain = CalendarDomain::new((moment, moment));
    let result = calendar_tick_plan(&domain, 5);
    assert!(matches!(
        result,
        Err(TickError::DegenerateSpan { seconds: 0 })
    ));
}

#[test]
fn zero_requested_ticks_is_rejected() {
    let domain = CalendarDomain::new((at(2024, 3, 5, 0, 0), at(2024, 3, 6, 0, 0)));
    assert!(matches!(
        nice_calendar_interval(&domain, 0),
        Err(TickError::InvalidTickCount(0))
    ));
}

#[test]
fn capped_upper_bound_replaces_last_tick() {
    let domain = CalendarDomain::new((at(2024, 3, 5, 0, 0), at(2024, 3, 5, 22, 0)))
        .with_capped(false, true);
    let plan = calendar_tick_plan(&domain, 6).expect("plan");
    assert_eq!(plan.major_ticks.last().copied(), Some(at(2024, 3, 5, 22, 0)));
    assert_eq!(plan.major_ticks[plan.major_ticks.len() - 2], at(2024, 3, 5, 21, 0));
    assert_eq!(plan.tick_labels.last().map(String::as_str), Some("22h"));
    assert!(plan.minor_ticks.is_empty());
}

#[test]
fn capped_lower_bound_replaces_first_tick() {
    let domain = CalendarDomain::new((at(2024, 3, 5, 2, 0), at(2024, 3, 6, 0, 0)))
        .with_capped(true, false);
    let plan = calendar_tick_plan(&domain, 6).expect("plan");
    assert_eq!(plan.major_ticks[0], at(2024, 3, 5, 2, 0));
    assert_eq!(plan.major_ticks[1], at(2024, 3, 5, 3, 0));
    assert_eq!(plan.tick_labels[0], "Tue 05 02h");
}

#[test]
fn quarterly_majors_take_monthly_minors() {
    let domain = CalendarDomain::new((at(2024, 1, 1, 0, 0), at(2024, 8, 1, 0, 0)));
    let (majors, minors) = calendar_tick_values(&domain, interval("3b")).expect("ticks");
    assert_eq!(
        majors,
        vec![
            at(2024, 1, 1, 0, 0),
            at(2024, 4, 1, 0, 0),
            at(2024, 7, 1, 0, 0),
            at(2024, 10, 1, 0, 0),
        ]
    );
    assert_eq!(
        minors,
        vec![
            at(2024, 2, 1, 0, 0),
            at(2024, 3, 1, 0, 0),
            at(2024, 5, 1, 0, 0),
            at(2024, 6, 1, 0, 0),
            at(2024, 8, 1, 0, 0),
        ]
    );
}

#[test]
fn hourly_majors_split_into_quarter_hours() {
    let domain = CalendarDomain::new((at(2024, 3, 5, 10, 0), at(2024, 3, 5, 12, 0)));
    let (majors, minors) = calendar_tick_values(&domain, interval("h")).expect("ticks");
    assert_eq!(
        majors,
        vec![at(2024, 3, 5, 10, 0), at(2024, 3, 5, 11, 0), at(2024, 3, 5, 12, 0)]
    );
    assert_eq!(minors.len(), 6);
    assert_eq!(minors[0], at(2024, 3, 5, 10, 15));
    assert!(minors.iter().all(|minor| !majors.contains(minor)));
}

#[test]
fn data_close_to_first_tick_adds_an_interval_before_it() {
    let domain = CalendarDomain::new((at(2024, 3, 5, 0, 30), at(2024, 3, 6, 0, 0)));
    let majors = calendar_major_ticks(&domain, interval("3h")).expect("majors");
    assert_eq!(majors[0], at(2024, 3, 4, 21, 0));
    assert_eq!(majors[1], at(2024, 3, 5, 0, 0));
    assert_eq!(majors.last().copied(), Some(at(2024, 3, 6, 0, 0)));
}

#[test]
fn endpoints_truncate_lower_and_round_up_upper() {
    let domain = CalendarDomain::new((at(2024, 3, 5, 10, 20), at(2024, 3, 5, 15, 40)));
    let (start, stop) = nice_calendar_endpoints(&domain, interval("h")).expect("endpoints");
    assert_eq!(start, at(2024, 3, 5, 10, 0));
    assert_eq!(stop, at(2024, 3, 5, 16, 0));

    // 2024-03-07 is a Thursday; weeks start on the preceding Sunday.
    let domain = CalendarDomain::new((at(2024, 3, 7, 9, 0), at(2024, 3, 20, 9, 0)));
    let (start, stop) = nice_calendar_endpoints(&domain, interval("w")).expect("endpoints");
    assert_eq!(start, at(2024, 3, 3, 0, 0));
    assert_eq!(stop, at(2024, 3, 24, 0, 0));
}

#[test]
fn forcing_seconds_over_years_is_refused() {
    let domain = CalendarDomain::new((at(2022, 1, 1, 0, 0), at(2024, 1, 1, 0, 0)));
    let result = calendar_tick_values(&domain, interval("s"));
    assert!(matches!(result, Err(TickError::TooManyTicks { .. })));
}

#[test]
fn decades_label_every_tick_with_its_year() {
    let domain = CalendarDomain::new((at(1995, 1, 1, 0, 0), at(2041, 1, 1, 0, 0)));
    let plan = calendar_tick_plan(&domain, 5).expect("plan");
    assert_eq!(plan.major_ticks[0], at(1990, 1, 1, 0, 0));
    assert!(plan.tick_labels.iter().all(|label| label.len() == 4));
    assert!(plan.suffix.is_empty());
}
