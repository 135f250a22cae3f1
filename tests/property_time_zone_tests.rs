use proptest::prelude::*;
use timeline_rs::core::{FixedTimeSource, Period, TimeZoneClock};

const ZONES: [&str; 6] = [
    "UTC",
    "America/New_York",
    "Europe/London",
    "Asia/Kolkata",
    "Australia/Lord_Howe",
    "America/Sao_Paulo",
];

fn period_strategy() -> impl Strategy<Value = Period> {
    prop_oneof![Just(Period::Day), Just(Period::Week), Just(Period::Month)]
}

proptest! {
    #[test]
    fn start_of_period_is_idempotent(
        zone_index in 0usize..ZONES.len(),
        instant in 946_684_800_000i64..2_208_988_800_000,
        period in period_strategy()
    ) {
        let clock = TimeZoneClock::new(ZONES[zone_index], FixedTimeSource::new(0));
        let start = clock.start_of_period(instant, period);

        prop_assert!(start <= instant);
        prop_assert_eq!(clock.start_of_period(start, period), start);
        prop_assert!(clock.next_period_start(instant, period) > instant);
    }

    #[test]
    fn day_start_is_local_midnight_where_midnight_exists(
        zone_index in 0usize..5,
        instant in 946_684_800_000i64..2_208_988_800_000
    ) {
        // Sao Paulo (index 5) has historical midnight DST gaps.
        let clock = TimeZoneClock::new(ZONES[zone_index], FixedTimeSource::new(0));
        let start = clock.start_of_period(instant, Period::Day);
        prop_assert_eq!(clock.local_hour(start), 0);
        prop_assert_eq!(clock.local_date(start), clock.local_date(instant));
    }
}
