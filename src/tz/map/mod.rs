/*!
Maps from instants to zone intervals.

A [`ZoneIntervalMap`] is a closed set of variants, each of which answers one
question: which [`ZoneInterval`] contains this instant? Maps compose by
wrapping. A built zone is a [`CachedMap`] around a [`StitchedMap`], which in
turn holds one [`BoundedMap`] per rule validity window, each wrapping a
single fixed interval or a [`RecurringIntervalMap`].

Every variant except the bounded and stitched maps is conceptually infinite
in both directions. Bounding happens exclusively through [`BoundedMap`].
*/

use crate::{tz::ZoneInterval, Instant};

pub use self::{
    cached::CachedMap,
    recurring::{DaylightFixMap, RecurringIntervalMap},
    stitched::{BoundedMap, StitchedMap},
};

mod cached;
mod recurring;
mod stitched;

/// A total function from instants to zone intervals.
///
/// For every instant `t`, `map.lookup(t).contains(t)` is true.
#[derive(Clone, Debug)]
pub enum ZoneIntervalMap {
    /// One interval, used for every instant.
    Single(ZoneInterval),
    /// Alternating standard and daylight time.
    Recurring(RecurringIntervalMap),
    /// Rewrites the savings of daylight intervals produced by another map.
    DaylightFix(DaylightFixMap),
    /// Bounded maps stitched into one map covering the whole time axis.
    Stitched(StitchedMap),
}

impl ZoneIntervalMap {
    /// Returns the interval containing the given instant.
    pub fn lookup(&self, instant: Instant) -> ZoneInterval {
        match *self {
            ZoneIntervalMap::Single(ref interval) => interval.clone(),
            ZoneIntervalMap::Recurring(ref map) => map.lookup(instant),
            ZoneIntervalMap::DaylightFix(ref map) => map.lookup(instant),
            ZoneIntervalMap::Stitched(ref map) => map.lookup(instant),
        }
    }
}

impl From<ZoneInterval> for ZoneIntervalMap {
    fn from(interval: ZoneInterval) -> ZoneIntervalMap {
        ZoneIntervalMap::Single(interval)
    }
}

impl From<RecurringIntervalMap> for ZoneIntervalMap {
    fn from(map: RecurringIntervalMap) -> ZoneIntervalMap {
        ZoneIntervalMap::Recurring(map)
    }
}

impl From<DaylightFixMap> for ZoneIntervalMap {
    fn from(map: DaylightFixMap) -> ZoneIntervalMap {
        ZoneIntervalMap::DaylightFix(map)
    }
}

impl From<StitchedMap> for ZoneIntervalMap {
    fn from(map: StitchedMap) -> ZoneIntervalMap {
        ZoneIntervalMap::Stitched(map)
    }
}
