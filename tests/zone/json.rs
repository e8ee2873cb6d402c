use tzrules::{
    tz::{HostZoneInfo, Offset, RuleFormat, RuleZone, TransitionMode, Weekday},
    Instant,
};

use crate::{day, Result};

/// A decoded host zone, as it might be cached on disk.
const FEED: &str = r#"{
    "id": "Europe/Example",
    "standard_name": "Example Standard Time",
    "daylight_name": "Example Daylight Time",
    "base_offset": 3600,
    "format": "Separated",
    "rules": [
        {
            "start": 946684800,
            "end": 9223372036854775807,
            "base_offset": 3600,
            "daylight_delta": 3600,
            "daylight_start": {
                "mode": "Wall",
                "month": 3,
                "day_of_month": -1,
                "day_of_week": "Sunday",
                "advance": false,
                "time_of_day": 7200
            },
            "daylight_end": {
                "mode": "Wall",
                "month": 10,
                "day_of_month": -1,
                "day_of_week": "Sunday",
                "advance": false,
                "time_of_day": 10800
            }
        }
    ]
}"#;

#[test]
fn load_feed_from_json() -> Result {
    let info: HostZoneInfo = serde_json::from_str(FEED).unwrap();
    assert_eq!(info.format, RuleFormat::Separated);
    assert_eq!(info.base_offset, Offset::constant(1));
    let rule = &info.rules[0];
    assert_eq!(rule.start, day(2000, 1, 1));
    assert_eq!(rule.end, Instant::AFTER_TIME);
    assert_eq!(rule.daylight_start.mode, TransitionMode::Wall);
    assert_eq!(rule.daylight_start.day_of_week, Some(Weekday::Sunday));

    let zone = RuleZone::from_info(&info)?;
    let summer = zone.resolve(day(2024, 7, 1));
    assert_eq!(summer.name(), "Example Daylight Time");
    assert_eq!(summer.wall_offset(), Offset::constant(2));

    let json = serde_json::to_string(&info).unwrap();
    let again: HostZoneInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(again, info);
    Ok(())
}

#[test]
fn out_of_range_values_are_rejected() {
    let bad_offset =
        FEED.replacen(r#""base_offset": 3600"#, r#""base_offset": 65000"#, 1);
    assert!(serde_json::from_str::<HostZoneInfo>(&bad_offset).is_err());

    let bad_instant = FEED.replace("946684800", "999999999999999");
    assert!(serde_json::from_str::<HostZoneInfo>(&bad_instant).is_err());
}
