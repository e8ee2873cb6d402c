use tzrules::{
    tz::{
        normalize::AdjustmentRuleNormalizer, HostZone, Offset, RuleFormat,
        RuleZone,
    },
    Instant,
};

use crate::{day, european_rule, zone_info, Result};

/// A host that reports the same answer for every instant.
struct ConstantHost {
    offset: Offset,
    daylight: bool,
}

impl HostZone for ConstantHost {
    fn utc_offset(&self, _: Instant) -> Offset {
        self.offset
    }

    fn is_daylight(&self, _: Instant) -> bool {
        self.daylight
    }
}

fn t(y: i16, m: i8, d: i8, h: i8) -> Instant {
    Instant::from_utc(y, m, d, h, 0, 0).unwrap()
}

#[test]
fn one_interval_per_rule() -> Result {
    let _ = env_logger::try_init();

    let spring = t(2005, 3, 27, 1);
    let autumn = t(2005, 10, 30, 1);
    let rules = vec![
        european_rule(Instant::BEFORE_TIME, spring, Offset::constant(1), 0),
        european_rule(spring, autumn, Offset::constant(1), 3600),
        european_rule(autumn, Instant::AFTER_TIME, Offset::constant(1), 0),
    ];
    let info = zone_info(RuleFormat::Inferred, Offset::constant(1), rules);
    let zone = RuleZone::from_info(&info)?;

    let winter = zone.resolve(day(2005, 1, 1));
    assert_eq!(winter.start(), Instant::BEFORE_TIME);
    assert_eq!(winter.end(), spring);
    assert_eq!(winter.name(), "Test Standard Time");
    assert_eq!(winter.wall_offset(), Offset::constant(1));

    // The rule's own transition descriptors are ignored: the whole window
    // is one daylight interval.
    let summer = zone.resolve(day(2005, 7, 1));
    assert_eq!((summer.start(), summer.end()), (spring, autumn));
    assert_eq!(summer.name(), "Test Daylight Time");
    assert_eq!(summer.wall_offset(), Offset::constant(2));
    assert_eq!(summer.savings(), Offset::constant(1));

    let later = zone.resolve(day(2030, 7, 1));
    assert_eq!(later.start(), autumn);
    assert_eq!(later.end(), Instant::AFTER_TIME);
    assert_eq!(later.wall_offset(), Offset::constant(1));

    assert_eq!(zone.min_offset(), Offset::constant(1));
    assert_eq!(zone.max_offset(), Offset::constant(2));
    Ok(())
}

#[test]
fn host_daylight_with_zero_delta() -> Result {
    let _ = env_logger::try_init();

    let rule =
        european_rule(day(2005, 4, 1), day(2005, 9, 1), Offset::ZERO, 0);
    let info =
        zone_info(RuleFormat::Inferred, Offset::constant(-5), vec![rule]);
    let host = ConstantHost { offset: Offset::constant(-4), daylight: true };
    let zone = RuleZone::from_host(&info, &host)?;

    let summer = zone.resolve(day(2005, 7, 1));
    assert_eq!(summer.name(), "Test Daylight Time");
    assert_eq!(summer.savings(), Offset::constant(1));
    assert_eq!(summer.standard_offset(), Offset::constant(-5));
    assert_eq!(summer.wall_offset(), Offset::constant(-4));
    Ok(())
}

#[test]
fn host_standard_with_nonzero_delta() -> Result {
    let _ = env_logger::try_init();

    let rule =
        european_rule(day(2005, 4, 1), day(2005, 9, 1), Offset::ZERO, 3600);
    let info =
        zone_info(RuleFormat::Inferred, Offset::constant(-5), vec![rule]);
    let host = ConstantHost { offset: Offset::constant(-5), daylight: false };
    let zone = RuleZone::from_host(&info, &host)?;

    let interval = zone.resolve(day(2005, 7, 1));
    assert_eq!(interval.name(), "Test Standard Time");
    assert_eq!(interval.savings(), Offset::ZERO);
    assert_eq!(interval.wall_offset(), Offset::constant(-5));
    Ok(())
}

#[test]
fn normalized_rules_report_repairs() -> Result {
    let rules = vec![
        european_rule(day(2000, 1, 1), day(2001, 1, 1), Offset::ZERO, 0),
        european_rule(
            day(2001, 1, 1),
            day(2002, 1, 1),
            Offset::ZERO,
            23 * 3600,
        ),
    ];
    let info = zone_info(RuleFormat::Inferred, Offset::constant(9), rules);
    let host = ConstantHost { offset: Offset::constant(10), daylight: true };
    let normalizer = AdjustmentRuleNormalizer::new(&info, &host);
    let normalized = normalizer.normalize_all()?;
    assert_eq!(normalized.len(), 2);

    assert_eq!(normalized[0].savings(), Offset::constant(1));
    assert_eq!(normalized[0].standard_offset(), Offset::constant(9));
    assert_eq!(normalized[0].start(), day(2000, 1, 1));
    assert_eq!(normalized[0].end(), day(2001, 1, 1));

    assert_eq!(normalized[1].savings(), Offset::constant(-1));
    assert_eq!(normalized[1].standard_offset(), Offset::constant(11));
    Ok(())
}
