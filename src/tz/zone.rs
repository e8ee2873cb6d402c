use alloc::{sync::Arc, vec::Vec};

use crate::{
    error::{err, Error, ErrorContext},
    tz::{
        map::{CachedMap, StitchedMap},
        normalize::AdjustmentRuleNormalizer,
        HostZone, HostZoneInfo, Offset, ZoneInterval,
    },
    Instant,
};

/// A time zone built from host adjustment rules.
///
/// A `RuleZone` is a total function from instants to [`ZoneInterval`]s: every
/// instant, including the two sentinels, is contained by exactly one
/// interval, and intervals of consecutive instants are either the same or
/// adjacent.
///
/// Building a zone normalizes every rule of the host feed, stitches the
/// rules' validity windows together (filling gaps with the zone's base
/// offset) and puts a small lookup cache in front of the result. Building
/// can fail, but once built, resolving an instant cannot.
///
/// A `RuleZone` is cheap to clone, and may be shared freely between
/// threads.
///
/// # Example
///
/// ```
/// use tzrules::{tz::{Offset, RuleZone}, Instant};
///
/// let zone = RuleZone::fixed("Etc/Example", "Example Time", Offset::constant(-5));
/// let interval = zone.resolve(Instant::from_utc(2024, 6, 1, 0, 0, 0)?);
/// assert_eq!(interval.wall_offset(), Offset::constant(-5));
/// assert_eq!(interval.start(), Instant::BEFORE_TIME);
/// assert_eq!(interval.end(), Instant::AFTER_TIME);
/// assert_eq!(zone.following(Instant::UNIX_EPOCH).count(), 0);
///
/// # Ok::<(), tzrules::Error>(())
/// ```
#[derive(Clone)]
pub struct RuleZone {
    inner: Arc<RuleZoneInner>,
}

struct RuleZoneInner {
    id: Arc<str>,
    standard_name: Arc<str>,
    daylight_name: Arc<str>,
    base_offset: Offset,
    min_offset: Offset,
    max_offset: Offset,
    map: CachedMap,
}

impl RuleZone {
    /// Builds a zone from a host feed.
    ///
    /// [`RuleFormat::Inferred`](crate::tz::RuleFormat::Inferred) rules are
    /// inferred from the feed itself. Use [`RuleZone::from_host`] to ask the
    /// host instead.
    ///
    /// # Errors
    ///
    /// This returns an error when any rule is malformed, when the rules are
    /// out of order or overlap, or when an offset is not representable.
    pub fn from_info(info: &HostZoneInfo) -> Result<RuleZone, Error> {
        RuleZone::from_host(info, info)
    }

    /// Builds a zone from a host feed, asking the given host about the
    /// standard offset and daylight saving state of
    /// [`RuleFormat::Inferred`](crate::tz::RuleFormat::Inferred) rules.
    ///
    /// # Errors
    ///
    /// This returns an error when any rule is malformed, when the rules are
    /// out of order or overlap, or when an offset is not representable.
    pub fn from_host(
        info: &HostZoneInfo,
        host: &dyn HostZone,
    ) -> Result<RuleZone, Error> {
        let normalizer = AdjustmentRuleNormalizer::new(info, host);
        let rules = normalizer.normalize_all()?;

        let mut bounds: Option<(Offset, Offset)> = None;
        for rule in rules.iter() {
            let (lo, hi) = rule.offset_range();
            bounds = Some(match bounds {
                None => (lo, hi),
                Some((min, max)) => (min.min(lo), max.max(hi)),
            });
        }
        let windows: Vec<_> =
            rules.into_iter().map(|rule| rule.into_map()).collect();
        let standard_name = Arc::clone(normalizer.standard_name());
        let map = StitchedMap::new(
            windows,
            info.base_offset,
            Arc::clone(&standard_name),
        )
        .with_context(|| {
            err!("failed to stitch adjustment rules of zone `{}`", info.id)
        })?;
        let base = info.base_offset;
        let (min_offset, max_offset) = match bounds {
            None => (base, base),
            Some((min, max)) if map.has_filler() => {
                (min.min(base), max.max(base))
            }
            Some(bounds) => bounds,
        };
        debug!(
            "built zone `{}` from {} adjustment rules \
             with offsets from {min_offset} to {max_offset}",
            info.id,
            info.rules.len(),
        );
        Ok(RuleZone {
            inner: Arc::new(RuleZoneInner {
                id: Arc::from(info.id.as_str()),
                standard_name,
                daylight_name: Arc::from(info.daylight_name.as_str()),
                base_offset: base,
                min_offset,
                max_offset,
                map: CachedMap::new(map),
            }),
        })
    }

    /// Builds a zone with the given offset everywhere, and no daylight
    /// saving time.
    pub fn fixed(id: &str, name: &str, offset: Offset) -> RuleZone {
        let name: Arc<str> = Arc::from(name);
        let interval = ZoneInterval::fixed(Arc::clone(&name), offset);
        RuleZone {
            inner: Arc::new(RuleZoneInner {
                id: Arc::from(id),
                standard_name: Arc::clone(&name),
                daylight_name: name,
                base_offset: offset,
                min_offset: offset,
                max_offset: offset,
                map: CachedMap::new(interval),
            }),
        }
    }

    /// Returns the host identifier of this zone.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Returns the display name of standard time.
    pub fn standard_name(&self) -> &str {
        &self.inner.standard_name
    }

    /// Returns the display name of daylight saving time.
    pub fn daylight_name(&self) -> &str {
        &self.inner.daylight_name
    }

    /// Returns the offset used wherever no rule applies.
    pub fn base_offset(&self) -> Offset {
        self.inner.base_offset
    }

    /// Returns a lower bound on every wall and standard offset in this
    /// zone.
    pub fn min_offset(&self) -> Offset {
        self.inner.min_offset
    }

    /// Returns an upper bound on every wall and standard offset in this
    /// zone.
    pub fn max_offset(&self) -> Offset {
        self.inner.max_offset
    }

    /// Returns the interval containing the given instant.
    ///
    /// `Instant::BEFORE_TIME` resolves to the first interval of the zone
    /// and `Instant::AFTER_TIME` to the last.
    #[inline]
    pub fn resolve(&self, instant: Instant) -> ZoneInterval {
        self.inner.map.lookup(instant)
    }

    /// Returns an iterator over the intervals of this zone starting after
    /// the given instant, moving forward in time.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::{
    ///     tz::{
    ///         AdjustmentRule, HostZoneInfo, Offset, RuleFormat, RuleZone,
    ///         TransitionTime, Weekday,
    ///     },
    ///     Instant,
    /// };
    ///
    /// let info = HostZoneInfo {
    ///     id: "Europe/Example".into(),
    ///     standard_name: "EXT".into(),
    ///     daylight_name: "EXST".into(),
    ///     base_offset: Offset::constant(1),
    ///     format: RuleFormat::Separated,
    ///     rules: vec![AdjustmentRule {
    ///         start: Instant::BEFORE_TIME,
    ///         end: Instant::AFTER_TIME,
    ///         base_offset: Offset::constant(1),
    ///         daylight_delta: 3600,
    ///         daylight_start: TransitionTime::floating(3, 5, Weekday::Sunday, 7200)?,
    ///         daylight_end: TransitionTime::floating(10, 5, Weekday::Sunday, 10800)?,
    ///     }],
    /// };
    /// let zone = RuleZone::from_info(&info)?;
    /// let starts: Vec<String> = zone
    ///     .following(Instant::from_utc(2024, 1, 1, 0, 0, 0)?)
    ///     .take(3)
    ///     .map(|i| format!("{} {}", i.start(), i.name()))
    ///     .collect();
    /// assert_eq!(starts, vec![
    ///     "2024-03-31T01:00:00Z EXST",
    ///     "2024-10-27T01:00:00Z EXT",
    ///     "2025-03-30T01:00:00Z EXST",
    /// ]);
    ///
    /// # Ok::<(), tzrules::Error>(())
    /// ```
    pub fn following(&self, instant: Instant) -> RuleZoneFollowing<'_> {
        RuleZoneFollowing { zone: self, cur: instant }
    }

    /// Returns an iterator over the intervals of this zone starting before
    /// the given instant, moving backward in time.
    ///
    /// The first interval yielded is the one containing the second before
    /// the given instant.
    pub fn preceding(&self, instant: Instant) -> RuleZonePreceding<'_> {
        RuleZonePreceding { zone: self, cur: instant }
    }

    /// Returns true when both zones share the same built state.
    #[cfg(test)]
    pub(crate) fn ptr_eq(&self, other: &RuleZone) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl core::fmt::Debug for RuleZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("RuleZone")
            .field("id", &self.inner.id)
            .field("min_offset", &self.inner.min_offset)
            .field("max_offset", &self.inner.max_offset)
            .field("map", &self.inner.map)
            .finish()
    }
}

/// An iterator over zone intervals going forward in time.
///
/// This iterator is created by [`RuleZone::following`].
#[derive(Clone, Debug)]
pub struct RuleZoneFollowing<'z> {
    zone: &'z RuleZone,
    cur: Instant,
}

impl<'z> Iterator for RuleZoneFollowing<'z> {
    type Item = ZoneInterval;

    fn next(&mut self) -> Option<ZoneInterval> {
        let current = self.zone.resolve(self.cur);
        if current.end() == Instant::AFTER_TIME {
            self.cur = Instant::AFTER_TIME;
            return None;
        }
        let next = self.zone.resolve(current.end());
        self.cur = next.start();
        Some(next)
    }
}

impl<'z> core::iter::FusedIterator for RuleZoneFollowing<'z> {}

/// An iterator over zone intervals going backward in time.
///
/// This iterator is created by [`RuleZone::preceding`].
#[derive(Clone, Debug)]
pub struct RuleZonePreceding<'z> {
    zone: &'z RuleZone,
    cur: Instant,
}

impl<'z> Iterator for RuleZonePreceding<'z> {
    type Item = ZoneInterval;

    fn next(&mut self) -> Option<ZoneInterval> {
        if self.cur == Instant::BEFORE_TIME {
            return None;
        }
        let previous = self.zone.resolve(self.cur.previous_second());
        self.cur = previous.start();
        Some(previous)
    }
}

impl<'z> core::iter::FusedIterator for RuleZonePreceding<'z> {}
