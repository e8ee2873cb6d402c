use tzrules::{
    tz::{
        AdjustmentRule, Offset, RuleFormat, RuleZone, TransitionTime,
        Weekday,
    },
    Instant,
};

use crate::{before, day, european_rule, zone_info, Result};

#[test]
fn fixed_offset_zone() -> Result {
    let zone = RuleZone::fixed("Etc/GMT-3", "GMT+03", Offset::constant(3));
    for &t in &[
        Instant::BEFORE_TIME,
        Instant::MIN,
        Instant::UNIX_EPOCH,
        day(2024, 2, 29),
        Instant::MAX,
        Instant::AFTER_TIME,
    ] {
        let interval = zone.resolve(t);
        assert_eq!(interval.start(), Instant::BEFORE_TIME, "{t}");
        assert_eq!(interval.end(), Instant::AFTER_TIME, "{t}");
        assert_eq!(interval.wall_offset(), Offset::constant(3));
        assert_eq!(interval.savings(), Offset::ZERO);
        assert_eq!(interval.name(), "GMT+03");
    }
    assert_eq!(zone.min_offset(), Offset::constant(3));
    assert_eq!(zone.max_offset(), Offset::constant(3));
    Ok(())
}

/// A zone with no rules at all is its base offset everywhere.
#[test]
fn no_rules_is_fixed() -> Result {
    let info = zone_info(RuleFormat::Separated, Offset::constant(-5), vec![]);
    let zone = RuleZone::from_info(&info)?;
    let interval = zone.resolve(day(1999, 1, 1));
    assert_eq!(interval.start(), Instant::BEFORE_TIME);
    assert_eq!(interval.end(), Instant::AFTER_TIME);
    assert_eq!(interval.wall_offset(), Offset::constant(-5));
    assert_eq!(interval.name(), "Test Standard Time");
    Ok(())
}

#[test]
fn single_rule_with_fillers() -> Result {
    let rule = european_rule(
        day(2000, 1, 1),
        day(2010, 1, 1),
        Offset::constant(1),
        3600,
    );
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![rule]);
    let zone = RuleZone::from_info(&info)?;
    assert_eq!(zone.min_offset(), Offset::constant(1));
    assert_eq!(zone.max_offset(), Offset::constant(2));

    let early = zone.resolve(day(1995, 7, 1));
    assert_eq!(early.name(), "Test Standard Time");
    assert_eq!(early.start(), Instant::BEFORE_TIME);
    assert_eq!(early.end(), day(2000, 1, 1));
    assert_eq!(early.wall_offset(), Offset::constant(1));
    assert_eq!(early.savings(), Offset::ZERO);

    let summer = zone.resolve(day(2005, 4, 1));
    assert_eq!(summer.name(), "Test Daylight Time");
    assert_eq!(summer.start(), Instant::from_utc(2005, 3, 27, 1, 0, 0)?);
    assert_eq!(summer.end(), Instant::from_utc(2005, 10, 30, 1, 0, 0)?);
    assert_eq!(summer.wall_offset(), Offset::constant(2));
    assert_eq!(summer.savings(), Offset::constant(1));
    assert_eq!(summer.standard_offset(), Offset::constant(1));

    // Winter runs from the end of one summer to the start of the next.
    let t = day(2005, 1, 15);
    let winter = zone.resolve(t);
    assert!(winter.contains(t));
    assert_eq!(winter.name(), "Test Standard Time");
    assert_eq!(winter.start(), Instant::from_utc(2004, 10, 31, 1, 0, 0)?);
    assert_eq!(winter.end(), summer.start());
    assert_eq!(winter.wall_offset(), Offset::constant(1));

    // The first and last intervals of the rule are clipped to its window.
    let first = zone.resolve(day(2000, 1, 1));
    assert_eq!(first.start(), day(2000, 1, 1));
    assert_eq!(first.end(), Instant::from_utc(2000, 3, 26, 1, 0, 0)?);
    assert_eq!(first.name(), "Test Standard Time");
    let last = zone.resolve(before(day(2010, 1, 1)));
    assert_eq!(last.start(), Instant::from_utc(2009, 10, 25, 1, 0, 0)?);
    assert_eq!(last.end(), day(2010, 1, 1));

    let after = zone.resolve(day(2015, 7, 1));
    assert_eq!(after.start(), day(2010, 1, 1));
    assert_eq!(after.end(), Instant::AFTER_TIME);
    assert_eq!(after.wall_offset(), Offset::constant(1));
    assert_eq!(after.savings(), Offset::ZERO);

    insta::assert_snapshot!(
        summer,
        @"Test Daylight Time: [2005-03-27T01:00:00Z, 2005-10-30T01:00:00Z) +02 (+01)",
    );
    Ok(())
}

#[test]
fn one_day_gap_between_rules() -> Result {
    let a = european_rule(
        day(2000, 1, 1),
        day(2005, 1, 1),
        Offset::constant(2),
        3600,
    );
    let b = european_rule(
        day(2005, 1, 2),
        day(2010, 1, 1),
        Offset::constant(3),
        3600,
    );
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![a, b]);
    let zone = RuleZone::from_info(&info)?;

    let gap = zone.resolve(Instant::from_utc(2005, 1, 1, 12, 0, 0)?);
    assert_eq!(gap.start(), day(2005, 1, 1));
    assert_eq!(gap.end(), day(2005, 1, 2));
    assert_eq!(gap.wall_offset(), Offset::constant(1));
    assert_eq!(gap.savings(), Offset::ZERO);
    assert_eq!(gap.name(), "Test Standard Time");

    assert_eq!(
        zone.resolve(before(day(2005, 1, 1))).wall_offset(),
        Offset::constant(2),
    );
    assert_eq!(
        zone.resolve(day(2005, 1, 2)).wall_offset(),
        Offset::constant(3),
    );
    assert_eq!(zone.min_offset(), Offset::constant(1));
    assert_eq!(zone.max_offset(), Offset::constant(4));
    Ok(())
}

#[test]
fn adjacent_rules_change_standard_offset() -> Result {
    let a = european_rule(
        Instant::BEFORE_TIME,
        day(2011, 3, 1),
        Offset::constant(3),
        3600,
    );
    let mut b = european_rule(
        day(2011, 3, 1),
        Instant::AFTER_TIME,
        Offset::constant(4),
        0,
    );
    b.daylight_start = TransitionTime::fixed(1, 1, 0);
    b.daylight_end = TransitionTime::fixed(1, 1, 0);
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(3), vec![a, b]);
    let zone = RuleZone::from_info(&info)?;

    let winter = zone.resolve(day(2011, 1, 1));
    assert_eq!(winter.wall_offset(), Offset::constant(3));
    assert_eq!(winter.end(), day(2011, 3, 1));
    let after = zone.resolve(day(2011, 3, 1));
    assert_eq!(after.start(), day(2011, 3, 1));
    assert_eq!(after.end(), Instant::AFTER_TIME);
    assert_eq!(after.wall_offset(), Offset::constant(4));
    assert_eq!(after.savings(), Offset::ZERO);
    // No filler anywhere, so the base offset doesn't widen the bounds.
    assert_eq!(zone.min_offset(), Offset::constant(3));
    assert_eq!(zone.max_offset(), Offset::constant(4));
    Ok(())
}

#[test]
fn zero_delta_daylight_gets_one_hour() -> Result {
    let rule = european_rule(
        day(2000, 1, 1),
        day(2010, 1, 1),
        Offset::constant(1),
        0,
    );
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![rule]);
    let zone = RuleZone::from_info(&info)?;

    let summer = zone.resolve(day(2005, 7, 1));
    assert_eq!(summer.name(), "Test Daylight Time");
    assert_eq!(summer.savings(), Offset::constant(1));
    assert_eq!(summer.wall_offset(), Offset::constant(1));
    assert!(summer.is_daylight());

    let winter = zone.resolve(day(2005, 12, 1));
    assert_eq!(winter.name(), "Test Standard Time");
    assert_eq!(winter.savings(), Offset::ZERO);
    assert_eq!(winter.wall_offset(), Offset::constant(1));
    Ok(())
}

#[test]
fn fixed_date_transitions() -> Result {
    let rule = AdjustmentRule {
        start: Instant::BEFORE_TIME,
        end: Instant::AFTER_TIME,
        base_offset: Offset::constant(-3),
        daylight_delta: 3600,
        daylight_start: TransitionTime::fixed(10, 15, 0),
        // Midnight at the end of February, whatever its length.
        daylight_end: TransitionTime::fixed(2, -1, 86400),
    };
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(-3), vec![rule]);
    let zone = RuleZone::from_info(&info)?;

    let summer = zone.resolve(day(2024, 1, 1));
    assert_eq!(summer.start(), Instant::from_utc(2023, 10, 15, 3, 0, 0)?);
    // 2024-03-01T00:00 at -02:00.
    assert_eq!(summer.end(), Instant::from_utc(2024, 3, 1, 2, 0, 0)?);
    let summer = zone.resolve(day(2025, 1, 1));
    assert_eq!(summer.end(), Instant::from_utc(2025, 3, 1, 2, 0, 0)?);
    Ok(())
}

#[test]
fn malformed_rules_are_rejected() -> Result {
    let inverted = european_rule(
        day(2010, 1, 1),
        day(2000, 1, 1),
        Offset::constant(1),
        3600,
    );
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![inverted]);
    let err = RuleZone::from_info(&info).unwrap_err();
    assert!(err.is_malformed_rule());
    insta::assert_snapshot!(
        err,
        @"failed to normalize adjustment rule 0 of zone `Test/Zone`: validity window `2010-01-01T00:00:00Z` to `2000-01-01T00:00:00Z` is empty or inverted",
    );

    let mut bad_month = european_rule(
        day(2000, 1, 1),
        day(2010, 1, 1),
        Offset::constant(1),
        3600,
    );
    bad_month.daylight_start.month = 13;
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![bad_month]);
    let err = RuleZone::from_info(&info).unwrap_err();
    assert!(err.is_malformed_rule());
    insta::assert_snapshot!(
        err,
        @"failed to normalize adjustment rule 0 of zone `Test/Zone`: invalid start of daylight saving time: transition month 13 is invalid, expected 1..=12",
    );

    let a = european_rule(
        day(2000, 1, 1),
        day(2010, 1, 1),
        Offset::constant(1),
        3600,
    );
    let b = european_rule(
        day(2009, 1, 1),
        day(2020, 1, 1),
        Offset::constant(1),
        3600,
    );
    let info = zone_info(
        RuleFormat::Separated,
        Offset::constant(1),
        vec![a.clone(), b.clone()],
    );
    assert!(RuleZone::from_info(&info).unwrap_err().is_malformed_rule());
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![b, a]);
    assert!(RuleZone::from_info(&info).unwrap_err().is_malformed_rule());

    let mut huge = european_rule(
        day(2000, 1, 1),
        day(2010, 1, 1),
        Offset::constant(1),
        3600,
    );
    huge.daylight_delta = 90_000;
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![huge]);
    assert!(RuleZone::from_info(&info).unwrap_err().is_malformed_rule());

    assert!(TransitionTime::floating(3, 6, Weekday::Sunday, 0)
        .unwrap_err()
        .is_malformed_rule());
    Ok(())
}

#[test]
fn unrepresentable_offsets_are_range_errors() -> Result {
    // +18 standard plus one hour of savings doesn't fit.
    let rule = european_rule(
        day(2000, 1, 1),
        day(2010, 1, 1),
        Offset::constant(18),
        3600,
    );
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(1), vec![rule]);
    let err = RuleZone::from_info(&info).unwrap_err();
    assert!(err.is_range());
    assert!(!err.is_malformed_rule());
    Ok(())
}
