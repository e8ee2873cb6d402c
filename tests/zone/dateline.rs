use tzrules::tz::{
    normalize::{fix_host_savings, wrap_date_line},
    Offset, RuleFormat, RuleZone,
};

use crate::{day, european_rule, zone_info, Result};

#[test]
fn plus_23_hours_is_minus_one() -> Result {
    let _ = env_logger::try_init();

    let rule = european_rule(
        day(2000, 1, 1),
        day(2010, 1, 1),
        Offset::constant(-10),
        23 * 3600,
    );
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(-10), vec![rule]);
    let zone = RuleZone::from_info(&info)?;

    let summer = zone.resolve(day(2005, 7, 1));
    assert_eq!(summer.name(), "Test Daylight Time");
    assert_eq!(summer.savings(), Offset::constant(-1));
    assert_eq!(summer.wall_offset(), Offset::constant(-11));
    assert_eq!(summer.standard_offset(), Offset::constant(-10));
    assert_eq!(zone.min_offset(), Offset::constant(-11));
    assert_eq!(zone.max_offset(), Offset::constant(-10));
    Ok(())
}

#[test]
fn minus_23_hours_is_plus_one() -> Result {
    let _ = env_logger::try_init();

    let rule = european_rule(
        day(2000, 1, 1),
        day(2010, 1, 1),
        Offset::constant(12),
        -23 * 3600,
    );
    let info =
        zone_info(RuleFormat::Separated, Offset::constant(12), vec![rule]);
    let zone = RuleZone::from_info(&info)?;

    let summer = zone.resolve(day(2005, 7, 1));
    assert_eq!(summer.savings(), Offset::constant(1));
    assert_eq!(summer.wall_offset(), Offset::constant(13));
    let winter = zone.resolve(day(2005, 1, 1));
    assert_eq!(winter.savings(), Offset::ZERO);
    assert_eq!(winter.wall_offset(), Offset::constant(12));
    Ok(())
}

#[test]
fn heuristics_in_isolation() {
    assert_eq!(wrap_date_line(23 * 3600), -3600);
    assert_eq!(wrap_date_line(-23 * 3600), 3600);
    assert_eq!(wrap_date_line(14 * 3600), 14 * 3600);
    assert_eq!(wrap_date_line(-14 * 3600), -14 * 3600);
    assert_eq!(wrap_date_line(14 * 3600 + 1), -10 * 3600 + 1);
    assert_eq!(wrap_date_line(0), 0);

    assert_eq!(fix_host_savings(0, true), 3600);
    assert_eq!(fix_host_savings(1800, true), 1800);
    assert_eq!(fix_host_savings(3600, false), 0);
    assert_eq!(fix_host_savings(0, false), 0);
}

quickcheck::quickcheck! {
    fn prop_wrapped_savings_within_14_hours(raw: i32) -> bool {
        let raw = raw % (24 * 3600 + 1);
        let wrapped = wrap_date_line(raw);
        wrapped.abs() <= 14 * 3600 && (raw - wrapped) % (24 * 3600) == 0
    }
}
