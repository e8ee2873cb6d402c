use alloc::{sync::Arc, vec::Vec};

use crate::{
    error::{rule::Error as RuleError, Error},
    tz::{map::ZoneIntervalMap, Offset, ZoneInterval},
    Instant,
};

/// Restricts a map to a validity window `[start, end)`.
///
/// Intervals returned by a bounded map are clipped to its window, so that
/// no interval claims to be valid outside of the rule that produced it.
#[derive(Clone, Debug)]
pub struct BoundedMap {
    start: Instant,
    end: Instant,
    map: ZoneIntervalMap,
}

impl BoundedMap {
    /// Creates a new bounded map.
    ///
    /// # Errors
    ///
    /// This returns an error when `start >= end`.
    pub fn new(
        start: Instant,
        end: Instant,
        map: impl Into<ZoneIntervalMap>,
    ) -> Result<BoundedMap, Error> {
        if start >= end {
            return Err(RuleError::EmptyWindow { start, end }.into());
        }
        Ok(BoundedMap { start, end, map: map.into() })
    }

    /// Returns the start of this map's window.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Returns the end of this map's window.
    pub fn end(&self) -> Instant {
        self.end
    }

    /// Returns the interval containing the given instant, clipped to this
    /// map's window.
    ///
    /// The instant must be within this map's window.
    pub fn lookup(&self, instant: Instant) -> ZoneInterval {
        debug_assert!(
            self.start <= instant
                && (instant < self.end || instant == Instant::AFTER_TIME),
            "{instant} is not in window {}..{}",
            self.start,
            self.end,
        );
        self.map.lookup(instant).clip(self.start, self.end)
    }
}

/// Stitches bounded maps into one map covering the whole time axis.
///
/// Gaps between windows, and the time before the first window and after the
/// last one, are filled with fixed intervals at the zone's base standard
/// offset, carrying the zone's standard name and no savings.
///
/// # Example
///
/// ```
/// use tzrules::{
///     tz::{map::{BoundedMap, StitchedMap}, Offset, ZoneInterval},
///     Instant,
/// };
///
/// let start = Instant::from_utc(2000, 1, 1, 0, 0, 0)?;
/// let end = Instant::from_utc(2010, 1, 1, 0, 0, 0)?;
/// let window = BoundedMap::new(
///     start,
///     end,
///     ZoneInterval::fixed("Shifted", Offset::constant(3)),
/// )?;
/// let map = StitchedMap::new(vec![window], Offset::constant(2), "Base")?;
///
/// let before = map.lookup(Instant::from_utc(1999, 1, 1, 0, 0, 0)?);
/// assert_eq!(before.name(), "Base");
/// assert_eq!(before.start(), Instant::BEFORE_TIME);
/// assert_eq!(before.end(), start);
///
/// let during = map.lookup(start);
/// assert_eq!(during.name(), "Shifted");
/// assert_eq!((during.start(), during.end()), (start, end));
///
/// let after = map.lookup(end);
/// assert_eq!(after.wall_offset(), Offset::constant(2));
/// assert_eq!(after.end(), Instant::AFTER_TIME);
///
/// # Ok::<(), tzrules::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct StitchedMap {
    /// Ordered by start, contiguous, with the first starting at
    /// `BEFORE_TIME` and the last ending at `AFTER_TIME`.
    maps: Vec<BoundedMap>,
    /// The number of synthesized filler windows.
    fillers: usize,
}

impl StitchedMap {
    /// Stitches the given windows, which must be ordered by start and must
    /// not overlap.
    ///
    /// # Errors
    ///
    /// This returns an error when the windows are out of order or overlap.
    pub fn new(
        windows: Vec<BoundedMap>,
        base_offset: Offset,
        standard_name: impl Into<Arc<str>>,
    ) -> Result<StitchedMap, Error> {
        let standard_name = standard_name.into();
        let filler = |start: Instant, end: Instant| {
            debug!(
                "synthesizing {base_offset} filler for {start}..{end} \
                 between rule windows",
            );
            let interval = ZoneInterval::fixed(
                Arc::clone(&standard_name),
                base_offset,
            );
            BoundedMap { start, end, map: ZoneIntervalMap::Single(interval) }
        };

        let mut maps = Vec::with_capacity(windows.len() * 2 + 1);
        let mut fillers = 0;
        let mut previous: Option<(Instant, Instant)> = None;
        for window in windows {
            let (start, end) = (window.start, window.end);
            match previous {
                None if start > Instant::BEFORE_TIME => {
                    maps.push(filler(Instant::BEFORE_TIME, start));
                    fillers += 1;
                }
                None => {}
                Some((previous_start, _)) if start < previous_start => {
                    return Err(RuleError::OutOfOrder {
                        previous: previous_start,
                        start,
                    }
                    .into());
                }
                Some((_, previous_end)) if start < previous_end => {
                    return Err(RuleError::Overlapping {
                        previous_end,
                        start,
                    }
                    .into());
                }
                Some((_, previous_end)) if previous_end < start => {
                    maps.push(filler(previous_end, start));
                    fillers += 1;
                }
                Some(_) => {}
            }
            previous = Some((start, end));
            maps.push(window);
        }
        match previous {
            None => {
                maps.push(filler(Instant::BEFORE_TIME, Instant::AFTER_TIME));
                fillers += 1;
            }
            Some((_, end)) if end < Instant::AFTER_TIME => {
                maps.push(filler(end, Instant::AFTER_TIME));
                fillers += 1;
            }
            Some(_) => {}
        }
        Ok(StitchedMap { maps, fillers })
    }

    /// Returns true when at least one filler interval was synthesized.
    pub fn has_filler(&self) -> bool {
        self.fillers > 0
    }

    /// Returns the stitched windows, in order, fillers included.
    pub fn windows(&self) -> &[BoundedMap] {
        &self.maps
    }

    /// Returns the interval containing the given instant.
    pub fn lookup(&self, instant: Instant) -> ZoneInterval {
        // The first window starts at `BEFORE_TIME`, so the partition point
        // is always at least 1.
        let index = self
            .maps
            .partition_point(|map| map.start <= instant)
            .saturating_sub(1);
        self.maps[index].lookup(instant)
    }
}
