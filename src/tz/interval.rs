use alloc::sync::Arc;

use crate::{
    error::{rule::Error as RuleError, Error, ErrorContext},
    tz::Offset,
    Instant,
};

/// A maximal half-open span of time, `[start, end)`, over which a zone's
/// wall offset and savings are constant.
///
/// Every interval has a display name (for example, "Central European Summer
/// Time"), a wall offset (the offset clocks actually show) and a savings
/// component (the daylight saving delta included in the wall offset). The
/// standard offset is always `wall_offset - savings`, and is guaranteed to
/// be a valid [`Offset`].
///
/// Either end may be a sentinel: an interval starting at
/// [`Instant::BEFORE_TIME`] extends into the unbounded past, and one ending
/// at [`Instant::AFTER_TIME`] extends into the unbounded future.
///
/// Intervals are immutable. They are cheap to clone, since the name is
/// reference counted.
///
/// # Example
///
/// ```
/// use tzrules::{tz::{Offset, ZoneInterval}, Instant};
///
/// let interval = ZoneInterval::new(
///     "Example Daylight Time",
///     Instant::from_utc(2005, 3, 27, 1, 0, 0)?,
///     Instant::from_utc(2005, 10, 30, 1, 0, 0)?,
///     Offset::constant(2),
///     Offset::constant(1),
/// )?;
/// assert_eq!(interval.standard_offset(), Offset::constant(1));
/// assert!(interval.contains(Instant::from_utc(2005, 7, 1, 0, 0, 0)?));
/// assert!(!interval.contains(interval.end()));
///
/// # Ok::<(), tzrules::Error>(())
/// ```
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct ZoneInterval {
    name: Arc<str>,
    start: Instant,
    end: Instant,
    wall_offset: Offset,
    savings: Offset,
}

impl ZoneInterval {
    /// Creates a new zone interval.
    ///
    /// # Errors
    ///
    /// This returns an error when `start >= end`, or when `wall_offset -
    /// savings` is not a valid offset.
    pub fn new(
        name: impl Into<Arc<str>>,
        start: Instant,
        end: Instant,
        wall_offset: Offset,
        savings: Offset,
    ) -> Result<ZoneInterval, Error> {
        if start >= end {
            return Err(RuleError::EmptyWindow { start, end }.into());
        }
        wall_offset.checked_sub(savings).context(format_args!(
            "savings `{savings}` cannot be part of wall offset `{wall_offset}`",
        ))?;
        Ok(ZoneInterval {
            name: name.into(),
            start,
            end,
            wall_offset,
            savings,
        })
    }

    /// Creates an interval covering the whole time axis with the given
    /// offset and no savings.
    pub fn fixed(name: impl Into<Arc<str>>, offset: Offset) -> ZoneInterval {
        ZoneInterval {
            name: name.into(),
            start: Instant::BEFORE_TIME,
            end: Instant::AFTER_TIME,
            wall_offset: offset,
            savings: Offset::ZERO,
        }
    }

    /// Returns the display name of this interval.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first instant in this interval.
    #[inline]
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Returns the first instant after this interval.
    #[inline]
    pub fn end(&self) -> Instant {
        self.end
    }

    /// Returns the offset observed by clocks during this interval.
    #[inline]
    pub fn wall_offset(&self) -> Offset {
        self.wall_offset
    }

    /// Returns the daylight saving component of the wall offset.
    #[inline]
    pub fn savings(&self) -> Offset {
        self.savings
    }

    /// Returns `wall_offset - savings`.
    #[inline]
    pub fn standard_offset(&self) -> Offset {
        Offset::constant_seconds(
            self.wall_offset.seconds() - self.savings.seconds(),
        )
    }

    /// Returns true when this interval has nonzero savings.
    #[inline]
    pub fn is_daylight(&self) -> bool {
        self.savings != Offset::ZERO
    }

    /// Returns true when `start <= instant < end`.
    ///
    /// As a special case, an interval ending at [`Instant::AFTER_TIME`]
    /// contains `Instant::AFTER_TIME`, so that every instant, sentinels
    /// included, is contained by exactly one interval of a zone.
    #[inline]
    pub fn contains(&self, instant: Instant) -> bool {
        self.start <= instant
            && (instant < self.end
                || (self.end == Instant::AFTER_TIME
                    && instant == Instant::AFTER_TIME))
    }

    /// Creates an interval from parts that are already known to uphold the
    /// invariants checked by [`ZoneInterval::new`].
    pub(crate) fn from_parts(
        name: Arc<str>,
        start: Instant,
        end: Instant,
        wall_offset: Offset,
        savings: Offset,
    ) -> ZoneInterval {
        debug_assert!(start < end, "interval {start}..{end} is empty");
        debug_assert!(wall_offset.checked_sub(savings).is_ok());
        ZoneInterval { name, start, end, wall_offset, savings }
    }

    /// Returns a copy of this interval with its start and end clipped to
    /// the given window.
    ///
    /// Callers must ensure that this interval and the window intersect.
    pub(crate) fn clip(&self, start: Instant, end: Instant) -> ZoneInterval {
        let clipped = ZoneInterval {
            name: Arc::clone(&self.name),
            start: self.start.max(start),
            end: self.end.min(end),
            wall_offset: self.wall_offset,
            savings: self.savings,
        };
        debug_assert!(clipped.start < clipped.end, "{clipped:?} is empty");
        clipped
    }

    /// Returns a copy of this interval with the given savings, keeping the
    /// wall offset unchanged.
    ///
    /// Callers must ensure that `wall_offset - savings` is valid.
    pub(crate) fn with_savings(&self, savings: Offset) -> ZoneInterval {
        ZoneInterval { savings, ..self.clone() }
    }
}

impl core::fmt::Debug for ZoneInterval {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ZoneInterval")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("wall_offset", &self.wall_offset)
            .field("savings", &self.savings)
            .finish()
    }
}

/// Writes the interval as `name: [start, end) wall (savings)`, for example
/// `Example Daylight Time: [2005-03-27T01:00:00Z, 2005-10-30T01:00:00Z) +02 (+01)`.
impl core::fmt::Display for ZoneInterval {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{}: [{}, {}) {} ({})",
            self.name, self.start, self.end, self.wall_offset, self.savings,
        )
    }
}
