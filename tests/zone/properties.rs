use tzrules::{
    tz::{
        AdjustmentRule, Offset, RuleFormat, RuleZone, TransitionMode,
        TransitionTime, Weekday,
    },
    Instant,
};

use crate::{day, european_rule, zone_info};

/// A zone exercising every kind of map: fillers around and between rules,
/// recurring rules measured against each clock, a standard only rule, a
/// zero delta rule and a date line rule.
fn zone() -> RuleZone {
    let mut utc = european_rule(
        day(1950, 1, 1),
        day(1970, 1, 1),
        Offset::constant(2),
        3600,
    );
    utc.daylight_start = utc.daylight_start.with_mode(TransitionMode::Utc);
    utc.daylight_end = utc.daylight_end.with_mode(TransitionMode::Utc);
    let standard_only = AdjustmentRule {
        start: day(1970, 1, 1),
        end: day(1980, 1, 1),
        base_offset: Offset::constant(3),
        daylight_delta: 0,
        daylight_start: TransitionTime::fixed(1, 1, 0),
        daylight_end: TransitionTime::fixed(1, 1, 0),
    };
    let mut standard = european_rule(
        day(1980, 6, 1),
        day(1996, 1, 1),
        Offset::constant(1),
        1800,
    );
    standard.daylight_start = TransitionTime::floating(
        4,
        1,
        Weekday::Friday,
        86400,
    )
    .unwrap()
    .with_mode(TransitionMode::Standard);
    let zero = european_rule(
        day(1996, 1, 1),
        day(2011, 1, 1),
        Offset::constant(1),
        0,
    );
    let dateline = european_rule(
        day(2011, 1, 1),
        day(2040, 1, 1),
        Offset::constant(-10),
        23 * 3600,
    );
    let info = zone_info(
        RuleFormat::Separated,
        Offset::constant(1),
        vec![utc, standard_only, standard, zero, dateline],
    );
    RuleZone::from_info(&info).unwrap()
}

fn instant(second: i64) -> Instant {
    let (min, max) = (Instant::MIN.as_second(), Instant::MAX.as_second());
    // Mostly land in the last two centuries, where the rules are.
    let second = if second % 4 == 0 {
        min + second.rem_euclid(max - min + 1)
    } else {
        second.rem_euclid(6_000_000_000) - 3_000_000_000
    };
    Instant::from_second(second).unwrap()
}

#[test]
fn sentinels_resolve_to_first_and_last() {
    let zone = zone();
    let first = zone.resolve(Instant::BEFORE_TIME);
    assert_eq!(first.start(), Instant::BEFORE_TIME);
    assert_eq!(first.end(), day(1950, 1, 1));
    // Resolving an instant that shares a cache slot with the end of time
    // must not leak into the last interval.
    let early = zone.resolve(Instant::from_second(255 << 21).unwrap());
    assert!(early.end() < Instant::AFTER_TIME);
    let last = zone.resolve(Instant::AFTER_TIME);
    assert_eq!(last.start(), day(2040, 1, 1));
    assert_eq!(last.end(), Instant::AFTER_TIME);
    assert!(last.contains(Instant::AFTER_TIME));
}

quickcheck::quickcheck! {
    fn prop_resolve_contains(second: i64) -> bool {
        let t = instant(second);
        let interval = zone().resolve(t);
        interval.start() <= t && t < interval.end()
    }

    fn prop_resolve_is_deterministic(seconds: Vec<i64>) -> bool {
        let cached = zone();
        seconds.iter().map(|&s| instant(s)).all(|t| {
            let fresh = zone();
            let a = cached.resolve(t);
            let b = cached.resolve(t);
            a == b && a == fresh.resolve(t)
        })
    }

    fn prop_neighbors_are_contiguous(second: i64) -> bool {
        let zone = zone();
        let interval = zone.resolve(instant(second));
        let next_ok = interval.end() == Instant::AFTER_TIME
            || zone.resolve(interval.end()).start() == interval.end();
        let previous_ok = interval.start() == Instant::BEFORE_TIME || {
            let before = Instant::from_second(
                interval.start().as_second() - 1,
            )
            .unwrap();
            zone.resolve(before).end() == interval.start()
        };
        next_ok && previous_ok
    }

    fn prop_offsets_are_bounded(second: i64) -> bool {
        let zone = zone();
        let interval = zone.resolve(instant(second));
        let wall = interval.wall_offset();
        let standard = interval.standard_offset();
        wall.seconds() == standard.seconds() + interval.savings().seconds()
            && zone.min_offset() <= wall
            && wall <= zone.max_offset()
            && interval.is_daylight() == (interval.savings() != Offset::ZERO)
    }
}
