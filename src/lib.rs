/*!
Resolves the UTC offset and daylight saving state of a time zone described
by a set of recurring "adjustment rules."

Host time zone databases commonly describe a zone as a handful of rules,
each valid for a window of time, each with a base UTC offset, a daylight
delta and a pair of yearly transition descriptors ("DST starts on the last
Sunday of March at 02:00 wall clock time"). This crate turns such a rule
set into a *total* function from instants to [`ZoneInterval`](tz::ZoneInterval)s:
for every point on the time axis, exactly one interval with a constant wall
offset and savings.

The main entry point is [`RuleZone`](tz::RuleZone):

```
use tzrules::{
    tz::{
        AdjustmentRule, HostZoneInfo, Offset, RuleFormat, RuleZone,
        TransitionTime, Weekday,
    },
    Instant,
};

let rule = AdjustmentRule {
    start: Instant::from_utc(2000, 1, 1, 0, 0, 0)?,
    end: Instant::from_utc(2010, 1, 1, 0, 0, 0)?,
    base_offset: Offset::constant(1),
    daylight_delta: 3600,
    daylight_start: TransitionTime::floating(3, 5, Weekday::Sunday, 2 * 3600)?,
    daylight_end: TransitionTime::floating(10, 5, Weekday::Sunday, 3 * 3600)?,
};
let info = HostZoneInfo {
    id: "Europe/Example".into(),
    standard_name: "Example Standard Time".into(),
    daylight_name: "Example Daylight Time".into(),
    base_offset: Offset::constant(1),
    format: RuleFormat::Separated,
    rules: vec![rule],
};
let zone = RuleZone::from_info(&info)?;

let interval = zone.resolve(Instant::from_utc(2005, 4, 1, 0, 0, 0)?);
assert_eq!(interval.name(), "Example Daylight Time");
assert_eq!(interval.wall_offset(), Offset::constant(2));
assert_eq!(interval.savings(), Offset::constant(1));

// Outside of the rule's window, the zone's base offset is used.
let interval = zone.resolve(Instant::from_utc(1990, 7, 1, 0, 0, 0)?);
assert_eq!(interval.name(), "Example Standard Time");
assert_eq!(interval.wall_offset(), Offset::constant(1));
assert_eq!(interval.start(), Instant::BEFORE_TIME);

# Ok::<(), tzrules::Error>(())
```

# Crate features

* **std** (enabled by default) - When enabled, lookups on a [`RuleZone`](tz::RuleZone)
are memoized in a small bucketed cache, and the process level
[`SystemZoneCache`](tz::system::SystemZoneCache) is available.
* **logging** - When enabled, the `log` crate is used to emit messages
about zone construction and about the heuristic repairs applied to host
adjustment rules.
* **serde** - When enabled, the host feed types and [`Instant`] and
[`Offset`](tz::Offset) implement `Serialize` and `Deserialize`.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub use crate::{error::Error, instant::Instant};

#[macro_use]
mod logging;

mod error;
mod instant;
pub mod tz;
mod util;
