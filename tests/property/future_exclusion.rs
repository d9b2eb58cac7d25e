//! No policy ever plans a note for a day after today

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use periodic_notes::calendar::Calendar;
use periodic_notes::config::PeriodicConfig;
use periodic_notes::generation::{plan_month_days, plan_monthly};
use periodic_notes::index::ExistingArtifacts;
use periodic_notes::policy::BackfillPolicy;
use proptest::prelude::*;

fn policy_strategy() -> impl Strategy<Value = BackfillPolicy> {
    prop_oneof![
        Just(BackfillPolicy::None),
        Just(BackfillPolicy::Month),
        Just(BackfillPolicy::Year),
    ]
}

fn calendar_for(ordinal: u32, hour: u32) -> Calendar {
    let date = NaiveDate::from_yo_opt(2024, ordinal).unwrap();
    let now = Utc.from_utc_datetime(&date.and_hms_opt(hour, 30, 0).unwrap());
    Calendar::at(now, chrono_tz::UTC)
}

#[test]
fn test_daily_plans_never_reach_the_future() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1u32..=366, 0u32..24, policy_strategy()),
            |(ordinal, hour, policy)| {
                let calendar = calendar_for(ordinal, hour);
                let mut config = PeriodicConfig::default();
                config.daily.backfill = policy;

                let mut total = 0;
                for month in 1..=12 {
                    let notes = plan_month_days(&config, &calendar, month, &ExistingArtifacts::default());
                    for note in &notes {
                        prop_assert!(note.date.naive_date() <= calendar.today());
                        if policy == BackfillPolicy::None {
                            prop_assert_eq!(note.date.naive_date(), calendar.today());
                        }
                    }
                    total += notes.len();
                }

                if policy == BackfillPolicy::Year {
                    prop_assert_eq!(total as u32, calendar.today().ordinal());
                }
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn test_monthly_plans_never_reach_the_future() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1u32..=366, 0u32..24, policy_strategy(), 1u32..=31),
            |(ordinal, hour, policy, day_of_month)| {
                let calendar = calendar_for(ordinal, hour);
                let mut config = PeriodicConfig::default();
                config.monthly.backfill = policy;
                config.monthly.day_of_month = day_of_month;

                let notes = plan_monthly(&config, &calendar, &[]);
                for note in &notes {
                    prop_assert!(note.date.naive_date() <= calendar.today());
                    if policy != BackfillPolicy::Year {
                        prop_assert_eq!(note.date.month(), calendar.current_month());
                    }
                }
                prop_assert!(notes.len() as u32 <= calendar.current_month());
                Ok(())
            },
        )
        .unwrap();
}
