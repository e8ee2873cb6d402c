use crate::{
    error::Error,
    util::itime::{self, IDate, IEpochDay},
};

/// A point on the global time axis.
///
/// An `Instant` is a number of seconds since the Unix epoch,
/// `1970-01-01T00:00:00Z`, in the range `-9999-01-01T00:00:00Z` through
/// `9999-12-31T23:59:59Z` (inclusive). There are no leap seconds.
///
/// In addition to the finite range, there are two sentinel values,
/// [`Instant::BEFORE_TIME`] and [`Instant::AFTER_TIME`], which compare less
/// than and greater than every finite instant, respectively. They are used
/// as the open ends of zone intervals and rule validity windows. They never
/// have calendar fields: asking a sentinel which year it falls in is
/// meaningless, and this crate never does it.
///
/// # Example
///
/// ```
/// use tzrules::Instant;
///
/// let t = Instant::from_utc(2005, 4, 1, 0, 0, 0)?;
/// assert_eq!(t.as_second(), 1_112_313_600);
/// assert_eq!(t.to_string(), "2005-04-01T00:00:00Z");
///
/// assert!(Instant::BEFORE_TIME < Instant::MIN);
/// assert!(Instant::MAX < Instant::AFTER_TIME);
///
/// # Ok::<(), tzrules::Error>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Instant {
    second: i64,
}

impl Instant {
    /// A sentinel that compares less than every other instant. It represents
    /// the unbounded past.
    pub const BEFORE_TIME: Instant = Instant { second: i64::MIN };

    /// A sentinel that compares greater than every other instant. It
    /// represents the unbounded future.
    pub const AFTER_TIME: Instant = Instant { second: i64::MAX };

    /// The minimum finite instant, `-9999-01-01T00:00:00Z`.
    pub const MIN: Instant = Instant { second: -377_705_116_800 };

    /// The maximum finite instant, `9999-12-31T23:59:59Z`.
    pub const MAX: Instant = Instant { second: 253_402_300_799 };

    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Instant = Instant { second: 0 };

    /// Creates a finite instant from a number of seconds since the Unix
    /// epoch.
    ///
    /// # Errors
    ///
    /// This returns an error if the given number of seconds is outside the
    /// range `Instant::MIN..=Instant::MAX`.
    pub fn from_second(second: i64) -> Result<Instant, Error> {
        if !(Instant::MIN.second <= second && second <= Instant::MAX.second) {
            return Err(Error::range(
                "instant seconds",
                second,
                Instant::MIN.second,
                Instant::MAX.second,
            ));
        }
        Ok(Instant { second })
    }

    /// Creates a finite instant in a `const` context.
    ///
    /// # Panics
    ///
    /// When the given number of seconds is out of range.
    pub const fn constant(second: i64) -> Instant {
        if !(Instant::MIN.second <= second && second <= Instant::MAX.second) {
            panic!("instant seconds out of range");
        }
        Instant { second }
    }

    /// Creates a finite instant from a civil datetime in UTC.
    ///
    /// # Errors
    ///
    /// This returns an error if any of the fields are out of range, or if
    /// the day doesn't exist in the given month.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::Instant;
    ///
    /// assert_eq!(Instant::from_utc(1970, 1, 1, 0, 0, 0)?, Instant::UNIX_EPOCH);
    /// assert!(Instant::from_utc(2023, 2, 29, 0, 0, 0).is_err());
    ///
    /// # Ok::<(), tzrules::Error>(())
    /// ```
    pub fn from_utc(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
    ) -> Result<Instant, Error> {
        if !(itime::YEAR_MIN <= year && year <= itime::YEAR_MAX) {
            return Err(Error::range(
                "year",
                year,
                itime::YEAR_MIN,
                itime::YEAR_MAX,
            ));
        }
        if !(1 <= month && month <= 12) {
            return Err(Error::range("month", month, 1, 12));
        }
        let max_day = itime::days_in_month(year, month);
        if !(1 <= day && day <= max_day) {
            return Err(Error::range("day", day, 1, max_day));
        }
        if !(0 <= hour && hour <= 23) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0 <= minute && minute <= 59) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0 <= second && second <= 59) {
            return Err(Error::range("second", second, 0, 59));
        }
        let second_of_day = i32::from(hour) * 3600
            + i32::from(minute) * 60
            + i32::from(second);
        let day = IDate { year, month, day }.to_epoch_day();
        Instant::from_second(day.to_second(second_of_day))
    }

    /// Returns the number of seconds since the Unix epoch.
    ///
    /// For the sentinels, this returns `i64::MIN` and `i64::MAX`,
    /// respectively.
    #[inline]
    pub const fn as_second(self) -> i64 {
        self.second
    }

    /// Returns true when this instant is neither [`Instant::BEFORE_TIME`]
    /// nor [`Instant::AFTER_TIME`].
    #[inline]
    pub const fn is_finite(self) -> bool {
        self.second != i64::MIN && self.second != i64::MAX
    }

    /// Converts a local clock reading, in seconds since the Unix epoch as
    /// seen on a clock running `offset_seconds` ahead of UTC, to an instant.
    ///
    /// The offset is raw seconds rather than an `Offset` since a wall clock
    /// offset is a sum of two offsets and need not be in range itself.
    ///
    /// Readings that land outside of the finite range are clamped to the
    /// corresponding sentinel.
    pub(crate) fn from_local_second(
        local: i64,
        offset_seconds: i32,
    ) -> Instant {
        let second = local - i64::from(offset_seconds);
        if second < Instant::MIN.second {
            Instant::BEFORE_TIME
        } else if second > Instant::MAX.second {
            Instant::AFTER_TIME
        } else {
            Instant { second }
        }
    }

    /// Returns the calendar year, in UTC, containing this instant.
    ///
    /// This returns `None` for the sentinels.
    pub(crate) fn utc_year(self) -> Option<i16> {
        if !self.is_finite() {
            return None;
        }
        Some(IEpochDay::from_second(self.second).to_date().year)
    }

    /// Returns the instant one second before this one.
    ///
    /// The sentinels are returned unchanged, and stepping back from
    /// `Instant::MIN` yields `Instant::BEFORE_TIME`.
    pub(crate) fn previous_second(self) -> Instant {
        if !self.is_finite() {
            self
        } else if self == Instant::MIN {
            Instant::BEFORE_TIME
        } else {
            Instant { second: self.second - 1 }
        }
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Writes the instant as an RFC 3339 timestamp in UTC, for example
/// `2005-04-01T00:00:00Z`. The sentinels are written as `StartOfTime` and
/// `EndOfTime`.
impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if *self == Instant::BEFORE_TIME {
            return f.write_str("StartOfTime");
        }
        if *self == Instant::AFTER_TIME {
            return f.write_str("EndOfTime");
        }
        let day = IEpochDay::from_second(self.second);
        let date = day.to_date();
        let second_of_day = self.second - day.to_second(0);
        if date.year < 0 {
            write!(f, "-{:06}", -i32::from(date.year))?;
        } else {
            write!(f, "{:04}", date.year)?;
        }
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            date.month,
            date.day,
            second_of_day / 3600,
            (second_of_day / 60) % 60,
            second_of_day % 60,
        )
    }
}

impl TryFrom<i64> for Instant {
    type Error = Error;

    /// Converts seconds since the Unix epoch to an instant, accepting
    /// `i64::MIN` and `i64::MAX` as the two sentinels.
    fn try_from(second: i64) -> Result<Instant, Error> {
        match second {
            i64::MIN => Ok(Instant::BEFORE_TIME),
            i64::MAX => Ok(Instant::AFTER_TIME),
            _ => Instant::from_second(second),
        }
    }
}

impl From<Instant> for i64 {
    fn from(instant: Instant) -> i64 {
        instant.as_second()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Instant {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.second)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Instant {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Instant, D::Error> {
        let second = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Instant::try_from(second).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        // Mostly stay within a few centuries of the epoch, since that's
        // where rules live, but sometimes range over everything.
        let second = if bool::arbitrary(g) {
            i64::arbitrary(g).rem_euclid(16_000_000_000) - 8_000_000_000
        } else {
            i64::arbitrary(g).rem_euclid(Instant::MAX.second + 1)
                - i64::arbitrary(g).rem_euclid(-Instant::MIN.second + 1)
        };
        let second = second.clamp(Instant::MIN.second, Instant::MAX.second);
        Instant::from_second(second).unwrap_or(Instant::UNIX_EPOCH)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            self.second.shrink().filter_map(|s| Instant::from_second(s).ok()),
        )
    }
}
