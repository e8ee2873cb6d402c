use alloc::sync::Arc;

use crate::{
    error::{rule::Error as RuleError, Error},
    tz::{Offset, ZoneYearOffset},
    util::itime,
    Instant,
};

/// A yearly recurring transition into a named period with fixed savings.
///
/// A recurrence is valid for the years `min_year..=max_year` (inclusive).
/// Either bound may be unbounded, in which case the recurrence is evaluated
/// over every representable year.
///
/// Each year has exactly one transition, computed by a [`ZoneYearOffset`].
/// A recurrence is a pure function object: it has no state beyond its
/// description, and every search below is deterministic.
///
/// # Example
///
/// ```
/// use tzrules::{
///     tz::{Offset, TransitionMode, Weekday, ZoneRecurrence, ZoneYearOffset},
///     Instant,
/// };
///
/// let summer = ZoneRecurrence::forever(
///     "Example Summer Time",
///     Offset::constant(1),
///     ZoneYearOffset::new(
///         TransitionMode::Utc, 3, -1, Some(Weekday::Sunday), false, 3600,
///     )?,
/// );
/// let std = Offset::constant(1);
/// let t = Instant::from_utc(2024, 1, 1, 0, 0, 0)?;
/// let next = summer.next(t, std, Offset::ZERO);
/// assert_eq!(next, Some(Instant::from_utc(2024, 3, 31, 1, 0, 0)?));
/// let prev = summer.previous_or_same(t, std, Offset::ZERO);
/// assert_eq!(prev, Some(Instant::from_utc(2023, 3, 26, 1, 0, 0)?));
///
/// # Ok::<(), tzrules::Error>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ZoneRecurrence {
    name: Arc<str>,
    savings: Offset,
    year_offset: ZoneYearOffset,
    min_year: i32,
    max_year: i32,
}

impl ZoneRecurrence {
    /// The unbounded lower year bound.
    pub const UNBOUNDED_MIN_YEAR: i32 = i32::MIN;

    /// The unbounded upper year bound.
    pub const UNBOUNDED_MAX_YEAR: i32 = i32::MAX;

    /// Creates a new recurrence valid for `min_year..=max_year`.
    ///
    /// # Errors
    ///
    /// This returns an error when `min_year > max_year`.
    pub fn new(
        name: impl Into<Arc<str>>,
        savings: Offset,
        year_offset: ZoneYearOffset,
        min_year: i32,
        max_year: i32,
    ) -> Result<ZoneRecurrence, Error> {
        if min_year > max_year {
            return Err(RuleError::YearRange { min: min_year, max: max_year }
                .into());
        }
        Ok(ZoneRecurrence {
            name: name.into(),
            savings,
            year_offset,
            min_year,
            max_year,
        })
    }

    /// Creates a new recurrence that is valid in every year.
    pub fn forever(
        name: impl Into<Arc<str>>,
        savings: Offset,
        year_offset: ZoneYearOffset,
    ) -> ZoneRecurrence {
        ZoneRecurrence {
            name: name.into(),
            savings,
            year_offset,
            min_year: ZoneRecurrence::UNBOUNDED_MIN_YEAR,
            max_year: ZoneRecurrence::UNBOUNDED_MAX_YEAR,
        }
    }

    /// Returns the name of the period this recurrence transitions into.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the savings of the period this recurrence transitions into.
    pub fn savings(&self) -> Offset {
        self.savings
    }

    /// Returns the yearly transition descriptor.
    pub fn year_offset(&self) -> &ZoneYearOffset {
        &self.year_offset
    }

    /// Returns the first year this recurrence is valid for.
    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    /// Returns the last year this recurrence is valid for.
    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Returns the earliest transition strictly after `instant`.
    ///
    /// `standard` is the zone's standard offset and `previous_savings` is
    /// the savings in effect just before this recurrence fires.
    ///
    /// This returns `None` when there is no such transition within this
    /// recurrence's year range, or when it would be beyond the finite
    /// instant range.
    pub fn next(
        &self,
        instant: Instant,
        standard: Offset,
        previous_savings: Offset,
    ) -> Option<Instant> {
        // Transitions of a local year may land in the neighboring UTC
        // year, so start one year early.
        let start = match instant.utc_year() {
            Some(year) => i32::from(year) - 1,
            None if instant == Instant::BEFORE_TIME => i32::MIN,
            None => return None,
        };
        let first = start.max(self.min_year).max(i32::from(itime::YEAR_MIN));
        let last = self.max_year.min(i32::from(itime::YEAR_MAX));
        for year in first..=last {
            let t =
                self.year_offset.instant_for(year, standard, previous_savings);
            if t == Instant::AFTER_TIME {
                return None;
            }
            if t > instant {
                return Some(t);
            }
        }
        None
    }

    /// Returns the latest transition at or before `instant`.
    ///
    /// The parameters are interpreted as for [`ZoneRecurrence::next`].
    ///
    /// This returns `None` when there is no such transition within this
    /// recurrence's year range, or when it would be before the finite
    /// instant range.
    pub fn previous_or_same(
        &self,
        instant: Instant,
        standard: Offset,
        previous_savings: Offset,
    ) -> Option<Instant> {
        let start = match instant.utc_year() {
            Some(year) => i32::from(year) + 1,
            None if instant == Instant::AFTER_TIME => i32::MAX,
            None => return None,
        };
        let first = self.min_year.max(i32::from(itime::YEAR_MIN));
        let last = start.min(self.max_year).min(i32::from(itime::YEAR_MAX));
        for year in (first..=last).rev() {
            let t =
                self.year_offset.instant_for(year, standard, previous_savings);
            if t == Instant::BEFORE_TIME {
                return None;
            }
            if t <= instant && t != Instant::AFTER_TIME {
                return Some(t);
            }
        }
        None
    }

    /// Returns the shared name of this recurrence.
    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }
}
