use alloc::{boxed::Box, sync::Arc};

use crate::{
    error::{err, rule::Error as RuleError, Error, ErrorContext},
    tz::{map::ZoneIntervalMap, Offset, ZoneInterval, ZoneRecurrence},
    Instant,
};

/// Alternates between standard time and daylight saving time forever.
///
/// The map holds two recurrences: one that resumes standard time (with zero
/// savings) and one that starts daylight saving time. The interval
/// containing an instant starts at the most recent transition of either
/// recurrence, and ends at the next transition after it.
///
/// When both recurrences fire at the same instant, daylight saving time
/// wins.
///
/// # Example
///
/// ```
/// use tzrules::{
///     tz::{
///         map::RecurringIntervalMap, Offset, TransitionMode, Weekday,
///         ZoneRecurrence, ZoneYearOffset,
///     },
///     Instant,
/// };
///
/// let last_sunday = |month| ZoneYearOffset::new(
///     TransitionMode::Utc, month, -1, Some(Weekday::Sunday), false, 3600,
/// );
/// let map = RecurringIntervalMap::new(
///     Offset::constant(1),
///     ZoneRecurrence::forever("CET", Offset::ZERO, last_sunday(10)?),
///     ZoneRecurrence::forever("CEST", Offset::constant(1), last_sunday(3)?),
/// )?;
///
/// let interval = map.lookup(Instant::from_utc(2024, 7, 1, 0, 0, 0)?);
/// assert_eq!(interval.name(), "CEST");
/// assert_eq!(interval.start(), Instant::from_utc(2024, 3, 31, 1, 0, 0)?);
/// assert_eq!(interval.end(), Instant::from_utc(2024, 10, 27, 1, 0, 0)?);
/// assert_eq!(interval.wall_offset(), Offset::constant(2));
///
/// # Ok::<(), tzrules::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct RecurringIntervalMap {
    standard_offset: Offset,
    standard: ZoneRecurrence,
    daylight: ZoneRecurrence,
}

impl RecurringIntervalMap {
    /// Creates a new map alternating between the two recurrences.
    ///
    /// # Errors
    ///
    /// This returns an error when the standard recurrence has nonzero
    /// savings, or when the standard offset plus daylight savings is not a
    /// valid offset.
    pub fn new(
        standard_offset: Offset,
        standard: ZoneRecurrence,
        daylight: ZoneRecurrence,
    ) -> Result<RecurringIntervalMap, Error> {
        if standard.savings() != Offset::ZERO {
            return Err(RuleError::StandardSavings {
                savings: standard.savings(),
            }
            .into());
        }
        standard_offset.checked_add(daylight.savings()).with_context(|| {
            err!(
                "daylight time `{}` has an unrepresentable wall offset",
                daylight.name(),
            )
        })?;
        Ok(RecurringIntervalMap { standard_offset, standard, daylight })
    }

    /// Returns the standard offset shared by both recurrences.
    pub fn standard_offset(&self) -> Offset {
        self.standard_offset
    }

    /// Returns the recurrence that resumes standard time.
    pub fn standard(&self) -> &ZoneRecurrence {
        &self.standard
    }

    /// Returns the recurrence that starts daylight saving time.
    pub fn daylight(&self) -> &ZoneRecurrence {
        &self.daylight
    }

    /// Returns the interval containing the given instant.
    pub fn lookup(&self, instant: Instant) -> ZoneInterval {
        let std = self.standard_offset;
        let (standard, daylight) = (&self.standard, &self.daylight);
        let to_daylight =
            daylight.previous_or_same(instant, std, standard.savings());
        let to_standard =
            standard.previous_or_same(instant, std, daylight.savings());
        let (active, start) = match (to_daylight, to_standard) {
            (Some(d), Some(s)) if d >= s => (daylight, d),
            (_, Some(s)) => (standard, s),
            (Some(d), None) => (daylight, d),
            (None, None) => {
                // Before either recurrence has fired, we're in whichever
                // period is left by the first transition.
                let next_daylight =
                    daylight.next(instant, std, standard.savings());
                let next_standard =
                    standard.next(instant, std, daylight.savings());
                let active = match (next_daylight, next_standard) {
                    (Some(d), Some(s)) if s < d => daylight,
                    (None, Some(_)) => daylight,
                    _ => standard,
                };
                (active, Instant::BEFORE_TIME)
            }
        };
        let other =
            if core::ptr::eq(active, daylight) { standard } else { daylight };
        // The active recurrence firing again also ends the interval. This
        // only happens when the two recurrences don't strictly alternate.
        // Its transitions are evaluated exactly as when finding `start`.
        let end = [
            other.next(start, std, active.savings()),
            active.next(start, std, other.savings()),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(Instant::AFTER_TIME);
        ZoneInterval::from_parts(
            Arc::clone(active.name_arc()),
            start,
            end,
            Offset::constant_seconds(
                std.seconds() + active.savings().seconds(),
            ),
            active.savings(),
        )
    }
}

/// Gives daylight intervals produced by another map a substitute savings.
///
/// Some hosts report daylight saving time with a zero delta. A daylight
/// period must be distinguishable from standard time, so every interval
/// named with the daylight name is rewritten to carry the substitute
/// savings (one hour, in practice). Wall offsets and all other intervals
/// are left untouched.
#[derive(Clone, Debug)]
pub struct DaylightFixMap {
    inner: Box<ZoneIntervalMap>,
    daylight_name: Arc<str>,
    savings: Offset,
}

impl DaylightFixMap {
    /// Wraps the given map.
    pub fn new(
        inner: impl Into<ZoneIntervalMap>,
        daylight_name: impl Into<Arc<str>>,
        savings: Offset,
    ) -> DaylightFixMap {
        DaylightFixMap {
            inner: Box::new(inner.into()),
            daylight_name: daylight_name.into(),
            savings,
        }
    }

    /// Returns the interval containing the given instant.
    pub fn lookup(&self, instant: Instant) -> ZoneInterval {
        let interval = self.inner.lookup(instant);
        if interval.name() != &*self.daylight_name {
            return interval;
        }
        if interval.wall_offset().checked_sub(self.savings).is_err() {
            return interval;
        }
        interval.with_savings(self.savings)
    }
}
