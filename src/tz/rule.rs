use crate::{
    error::{rule::Error as RuleError, Error},
    tz::Offset,
    util::itime::{self, IDate, IEpochDay},
    Instant,
};

/// A day of the week.
///
/// The discriminants are the traditional "Sunday is zero" numbering used by
/// most host time zone databases.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i8)]
#[allow(missing_docs)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Converts a weekday number, where Sunday is `0` and Saturday is `6`,
    /// to a weekday.
    ///
    /// # Errors
    ///
    /// This returns an error when the number is not in the range `0..=6`.
    pub fn from_sunday_zero_offset(offset: i8) -> Result<Weekday, Error> {
        let weekday = match offset {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => return Err(Error::range("weekday", offset, 0, 6)),
        };
        Ok(weekday)
    }

    /// Returns this weekday as a number, where Sunday is `0` and Saturday
    /// is `6`.
    #[inline]
    pub fn to_sunday_zero_offset(self) -> i8 {
        self as i8
    }
}

/// The clock against which a transition's time of day is measured.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionMode {
    /// The time of day is a UTC clock reading.
    Utc,
    /// The time of day is read from a clock showing the zone's standard
    /// offset, even when daylight saving time is in effect.
    Standard,
    /// The time of day is read from a clock showing the offset in effect
    /// just before the transition. That is, standard offset plus the savings
    /// of the period being left.
    Wall,
}

/// Describes when, within any given year, a transition occurs.
///
/// A descriptor is either a fixed date ("October 1st at 02:00") or a
/// floating one ("the last Sunday of March at 01:00"). Floating dates start
/// at a day of month and move forward (`advance = true`) or backward
/// (`advance = false`) to the nearest day matching the weekday, including
/// the starting day itself.
///
/// # Example
///
/// This shows the start of daylight saving time in the European Union.
///
/// ```
/// use tzrules::{
///     tz::{Offset, TransitionMode, Weekday, ZoneYearOffset},
///     Instant,
/// };
///
/// let last_sunday_of_march = ZoneYearOffset::new(
///     TransitionMode::Utc, 3, -1, Some(Weekday::Sunday), false, 3600,
/// )?;
/// let start = last_sunday_of_march.instant_for(
///     2024,
///     Offset::constant(1),
///     Offset::ZERO,
/// );
/// assert_eq!(start, Instant::from_utc(2024, 3, 31, 1, 0, 0)?);
///
/// # Ok::<(), tzrules::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ZoneYearOffset {
    mode: TransitionMode,
    month: i8,
    day_of_month: i8,
    day_of_week: Option<Weekday>,
    advance: bool,
    time_of_day: i32,
}

impl ZoneYearOffset {
    /// Creates a new transition descriptor.
    ///
    /// `day_of_month` counts from the start of the month when positive and
    /// from the end when negative, so `-1` is the last day of the month. A
    /// positive day past the end of a short month is clamped to its last
    /// day, except when advancing to a weekday, in which case the search
    /// starts from the first day of the next month.
    ///
    /// `time_of_day` is in seconds and may be `86400`, which is midnight at
    /// the end of the computed day.
    ///
    /// # Errors
    ///
    /// This returns an error when `month` is not in `1..=12`, when
    /// `day_of_month` is `0` or not in `-31..=31`, or when `time_of_day` is
    /// not in `0..=86400`.
    pub fn new(
        mode: TransitionMode,
        month: i8,
        day_of_month: i8,
        day_of_week: Option<Weekday>,
        advance: bool,
        time_of_day: i32,
    ) -> Result<ZoneYearOffset, Error> {
        if !(1 <= month && month <= 12) {
            return Err(RuleError::Month { month }.into());
        }
        if day_of_month == 0 || !(-31 <= day_of_month && day_of_month <= 31) {
            return Err(RuleError::DayOfMonth { day: day_of_month }.into());
        }
        if !(0 <= time_of_day && time_of_day <= 86_400) {
            return Err(RuleError::TimeOfDay { seconds: time_of_day }.into());
        }
        Ok(ZoneYearOffset {
            mode,
            month,
            day_of_month,
            day_of_week,
            advance,
            time_of_day,
        })
    }

    /// Returns the clock this descriptor's time of day is measured against.
    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// Returns the month of the transition, in `1..=12`.
    pub fn month(&self) -> i8 {
        self.month
    }

    /// Returns the starting day of month.
    pub fn day_of_month(&self) -> i8 {
        self.day_of_month
    }

    /// Returns the weekday the transition is moved to, if any.
    pub fn day_of_week(&self) -> Option<Weekday> {
        self.day_of_week
    }

    /// Returns true when the weekday search moves forward.
    pub fn advance(&self) -> bool {
        self.advance
    }

    /// Returns the time of day, in seconds.
    pub fn time_of_day(&self) -> i32 {
        self.time_of_day
    }

    /// Returns the instant at which this transition occurs in the given
    /// year.
    ///
    /// `standard` is the zone's standard offset and `savings` is the
    /// savings in effect just before the transition. Which of them are used
    /// depends on the descriptor's [`TransitionMode`].
    ///
    /// This never fails. A year outside of `-9999..=9999`, or a transition
    /// that lands outside of the finite instant range, yields
    /// [`Instant::BEFORE_TIME`] or [`Instant::AFTER_TIME`].
    pub fn instant_for(
        &self,
        year: i32,
        standard: Offset,
        savings: Offset,
    ) -> Instant {
        if year < i32::from(itime::YEAR_MIN) {
            return Instant::BEFORE_TIME;
        }
        if year > i32::from(itime::YEAR_MAX) {
            return Instant::AFTER_TIME;
        }
        // OK because of the range check above.
        let year = year as i16;
        let local = self.local_day(year).to_second(self.time_of_day);
        let offset = match self.mode {
            TransitionMode::Utc => 0,
            TransitionMode::Standard => standard.seconds(),
            TransitionMode::Wall => standard.seconds() + savings.seconds(),
        };
        Instant::from_local_second(local, offset)
    }

    /// Returns the local calendar day of this transition in the given year.
    fn local_day(&self, year: i16) -> IEpochDay {
        let last = IDate::last_of_month(year, self.month);
        let start = if self.day_of_month < 0 {
            let day = (last.day + 1 + self.day_of_month).max(1);
            IDate { day, ..last }.to_epoch_day()
        } else if self.day_of_month <= last.day {
            IDate { day: self.day_of_month, ..last }.to_epoch_day()
        } else if self.day_of_week.is_some() && self.advance {
            last.to_epoch_day().add_days(1)
        } else {
            last.to_epoch_day()
        };
        let Some(weekday) = self.day_of_week else { return start };
        let target = weekday.to_sunday_zero_offset();
        let current = start.weekday_sunday_zero();
        if self.advance {
            start.add_days(i32::from((target - current).rem_euclid(7)))
        } else {
            start.add_days(-i32::from((current - target).rem_euclid(7)))
        }
    }

    /// Returns true when this descriptor is a fixed January 1st at (about)
    /// midnight. Hosts use a pair of these to say "no daylight saving time."
    pub(crate) fn is_start_of_year(&self) -> bool {
        self.month == 1
            && self.day_of_month == 1
            && self.day_of_week.is_none()
            && self.time_of_day < 60
    }
}
