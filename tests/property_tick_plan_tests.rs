use chart_ticks::core::{
    CalendarDomain, NumericDomain, NumericTickOptions, calendar_tick_plan, nice_interval,
    numeric_tick_plan,
};
use chrono::{DateTime, NaiveDateTime};
use proptest::prelude::*;

fn from_seconds(seconds: i64) -> NaiveDateTime {
    DateTime::from_timestamp(seconds, 0)
        .expect("timestamp in range")
        .naive_utc()
}

const YEAR_2000: i64 = 946_684_800;
const YEAR_2030: i64 = 1_893_456_000;

proptest! {
    #[test]
    fn numeric_majors_cover_limits_with_even_spacing(
        lower in -1_000_000.0f64..1_000_000.0,
        span in 0.01f64..1_000_000.0,
        requested in 1usize..20
    ) {
        let upper = lower + span;
        let domain = NumericDomain::new((lower, upper));
        let plan = numeric_tick_plan(&domain, requested, &NumericTickOptions::default())
            .expect("plan");
        let step = nice_interval((lower, upper), requested, &[1.0, 2.0, 5.0]);
        let tolerance = step * 1e-4;

        let majors = &plan.major_ticks;
        prop_assert!(majors.len() >= 2);
        prop_assert!(majors[0] <= lower + tolerance);
        prop_assert!(majors[majors.len() - 1] >= upper - tolerance);
        for pair in majors.windows(2) {
            prop_assert!(pair[1] > pair[0]);
            prop_assert!(((pair[1] - pair[0]) - step).abs() <= tolerance);
        }
        prop_assert_eq!(plan.tick_labels.len(), majors.len());
    }

    #[test]
    fn numeric_minors_stay_between_and_apart_from_majors(
        lower in -1_000.0f64..1_000.0,
        span in 0.5f64..10_000.0,
        requested in 2usize..12
    ) {
        let domain = NumericDomain::new((lower, lower + span));
        let plan = numeric_tick_plan(&domain, requested, &NumericTickOptions::default())
            .expect("plan");
        let first = plan.major_ticks[0];
        let last = plan.major_ticks[plan.major_ticks.len() - 1];

        for minor in &plan.minor_ticks {
            prop_assert!(*minor > first && *minor < last);
            prop_assert!(plan
                .major_ticks
                .iter()
                .all(|major| (major - minor).abs() > span * 1e-9));
        }
    }

    #[test]
    fn numeric_caps_pin_both_ends(
        lower in -1_000.0f64..1_000.0,
        span in 0.5f64..10_000.0,
        requested in 1usize..12
    ) {
        let upper = lower + span;
        let domain = NumericDomain::new((lower, upper)).with_capped(true, true);
        let plan = numeric_tick_plan(&domain, requested, &NumericTickOptions::default())
            .expect("plan");

        prop_assert_eq!(plan.major_ticks[0], lower);
        prop_assert_eq!(plan.major_ticks[plan.major_ticks.len() - 1], upper);
        prop_assert_eq!(plan.display_limits, (lower, upper));
        prop_assert!(plan.minor_ticks.iter().all(|minor| *minor > lower && *minor < upper));
    }

    #[test]
    fn numeric_plan_is_idempotent(
        lower in -1_000.0f64..1_000.0,
        span in 0.5f64..10_000.0,
        requested in 1usize..12
    ) {
        let domain = NumericDomain::new((lower, lower + span));
        let options = NumericTickOptions::default();
        let first = numeric_tick_plan(&domain, requested, &options).expect("first plan");
        let second = numeric_tick_plan(&domain, requested, &options).expect("second plan");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn calendar_majors_cover_limits_in_order(
        start in YEAR_2000..YEAR_2030,
        span in 60i64..630_720_000,
        requested in 2usize..12
    ) {
        let lower = from_seconds(start);
        let upper = from_seconds(start + span);
        let domain = CalendarDomain::new((lower, upper));
        let plan = calendar_tick_plan(&domain, requested).expect("plan");

        let majors = &plan.major_ticks;
        prop_assert!(majors[0] <= lower);
        prop_assert!(majors[majors.len() - 1] >= upper);
        prop_assert!(majors.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(plan.minor_ticks.iter().all(|minor| !majors.contains(minor)));
        prop_assert_eq!(plan.tick_labels.len(), majors.len());
    }

    #[test]
    fn calendar_caps_pin_both_ends(
        start in YEAR_2000..YEAR_2030,
        span in 60i64..630_720_000,
        requested in 2usize..12
    ) {
        let lower = from_seconds(start);
        let upper = from_seconds(start + span);
        let domain = CalendarDomain::new((lower, upper)).with_capped(true, true);
        let plan = calendar_tick_plan(&domain, requested).expect("plan");

        prop_assert_eq!(plan.major_ticks[0], lower);
        prop_assert_eq!(plan.major_ticks[plan.major_ticks.len() - 1], upper);
        prop_assert!(plan.minor_ticks.iter().all(|minor| *minor > lower && *minor < upper));
    }
}
