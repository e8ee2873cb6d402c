use tzrules::{
    tz::{Offset, RuleFormat, RuleZone, ZoneInterval},
    Instant,
};

use crate::{day, european_rule, zone_info, Result};

fn t(y: i16, m: i8, d: i8, h: i8) -> Instant {
    Instant::from_utc(y, m, d, h, 0, 0).unwrap()
}

fn forever() -> RuleZone {
    let rule = european_rule(
        Instant::BEFORE_TIME,
        Instant::AFTER_TIME,
        Offset::constant(1),
        3600,
    );
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![rule]);
    RuleZone::from_info(&info).unwrap()
}

#[test]
fn following() -> Result {
    let zone = forever();
    let got: Vec<(Instant, Offset)> = zone
        .following(day(2024, 1, 1))
        .take(4)
        .map(|i| (i.start(), i.wall_offset()))
        .collect();
    assert_eq!(
        got,
        vec![
            (t(2024, 3, 31, 1), Offset::constant(2)),
            (t(2024, 10, 27, 1), Offset::constant(1)),
            (t(2025, 3, 30, 1), Offset::constant(2)),
            (t(2025, 10, 26, 1), Offset::constant(1)),
        ],
    );

    // Starting exactly at a transition skips the interval it starts.
    let next = zone.following(t(2024, 3, 31, 1)).next().unwrap();
    assert_eq!(next.start(), t(2024, 10, 27, 1));
    Ok(())
}

#[test]
fn preceding() -> Result {
    let zone = forever();
    let got: Vec<(Instant, Instant)> = zone
        .preceding(day(2024, 1, 1))
        .take(2)
        .map(|i| (i.start(), i.end()))
        .collect();
    assert_eq!(
        got,
        vec![
            (t(2023, 10, 29, 1), t(2024, 3, 31, 1)),
            (t(2023, 3, 26, 1), t(2023, 10, 29, 1)),
        ],
    );

    // Starting exactly at a transition yields the interval that ends there.
    let previous = zone.preceding(t(2024, 3, 31, 1)).next().unwrap();
    assert_eq!(previous.end(), t(2024, 3, 31, 1));
    Ok(())
}

#[test]
fn bounded_zone_iterates_to_the_ends() -> Result {
    let rules = vec![
        european_rule(
            day(2000, 1, 1),
            day(2002, 1, 1),
            Offset::constant(1),
            3600,
        ),
        european_rule(
            day(2002, 6, 1),
            day(2003, 1, 1),
            Offset::constant(2),
            3600,
        ),
    ];
    let info = zone_info(RuleFormat::Separated, Offset::constant(1), rules);
    let zone = RuleZone::from_info(&info)?;

    let forward: Vec<ZoneInterval> =
        zone.following(Instant::BEFORE_TIME).collect();
    let first = zone.resolve(Instant::BEFORE_TIME);
    assert_eq!(first.start(), Instant::BEFORE_TIME);
    assert_eq!(first.end(), forward[0].start());
    for pair in forward.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start(), "{}", pair[0]);
    }
    assert_eq!(forward.last().unwrap().end(), Instant::AFTER_TIME);

    let mut backward: Vec<ZoneInterval> =
        zone.preceding(Instant::AFTER_TIME).collect();
    backward.reverse();
    assert_eq!(backward[0], first);
    assert_eq!(&backward[1..], &forward[..]);

    // Both iterators are fused.
    let mut it = zone.following(Instant::MAX);
    assert!(it.next().is_none());
    assert!(it.next().is_none());
    Ok(())
}
