use core::ops::Neg;

use crate::error::{offset::Error as OffsetError, Error};

/// Represents a fixed time zone offset.
///
/// Negative offsets correspond to time zones west of the prime meridian,
/// while positive offsets correspond to time zones east of the prime
/// meridian. Equivalently, in all cases, `civil-time - offset = UTC`.
///
/// An offset has second granularity and is limited to the range
/// `-18:00..=+18:00`. Every offset in a [`ZoneInterval`](crate::tz::ZoneInterval),
/// whether it is a wall offset, a standard offset or a savings component,
/// is in this range.
///
/// # Display format
///
/// This type implements the `std::fmt::Display` trait. It will convert the
/// offset to a string format in the form `{sign}{hours}[:{minutes}[:{seconds}]]`,
/// where `minutes` and `seconds` are only present when non-zero. For example:
///
/// ```
/// use tzrules::tz::Offset;
///
/// let o = Offset::constant(-5);
/// assert_eq!(o.to_string(), "-05");
/// let o = Offset::constant_seconds(-18_060);
/// assert_eq!(o.to_string(), "-05:01");
/// let o = Offset::constant_seconds(-18_062);
/// assert_eq!(o.to_string(), "-05:01:02");
/// let o = Offset::constant_seconds(5 * 3600 + 30 * 60);
/// assert_eq!(o.to_string(), "+05:30");
///
/// // No offset.
/// assert_eq!(Offset::ZERO.to_string(), "+00");
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    /// The minimum possible time zone offset, `-18:00`.
    pub const MIN: Offset = Offset { seconds: -MAX_SECONDS };

    /// The maximum possible time zone offset, `+18:00`.
    pub const MAX: Offset = Offset { seconds: MAX_SECONDS };

    /// The offset corresponding to UTC.
    pub const UTC: Offset = Offset::ZERO;

    /// The offset corresponding to no offset at all.
    ///
    /// This is the same value as [`Offset::UTC`], but reads better when
    /// talking about savings.
    pub const ZERO: Offset = Offset { seconds: 0 };

    /// One hour. This is the savings substituted for a daylight period
    /// that a host reports with a zero delta.
    pub(crate) const HOUR: Offset = Offset { seconds: 3600 };

    /// Creates a new time zone offset in a `const` context from a given
    /// number of hours.
    ///
    /// # Panics
    ///
    /// This routine panics when the given number of hours is outside the
    /// range `-18..=18`.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::tz::Offset;
    ///
    /// assert_eq!(Offset::constant(-5).seconds(), -18_000);
    /// assert_eq!(Offset::constant(5).seconds(), 18_000);
    /// ```
    #[inline]
    pub const fn constant(hours: i8) -> Offset {
        if !(-18 <= hours && hours <= 18) {
            panic!("invalid time zone offset hours")
        }
        Offset::constant_seconds((hours as i32) * 60 * 60)
    }

    /// Creates a new time zone offset in a `const` context from a given
    /// number of seconds.
    ///
    /// The fallible non-const version of this constructor is
    /// [`Offset::from_seconds`].
    ///
    /// # Panics
    ///
    /// This routine panics when the given number of seconds is outside the
    /// range `-64,800..=64,800`.
    #[inline]
    pub const fn constant_seconds(seconds: i32) -> Offset {
        if !(-MAX_SECONDS <= seconds && seconds <= MAX_SECONDS) {
            panic!("invalid time zone offset seconds")
        }
        Offset { seconds }
    }

    /// Creates a new time zone offset from a given number of seconds.
    ///
    /// # Errors
    ///
    /// This routine returns an error when the given number of seconds is
    /// outside the range `-64,800..=64,800`.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::tz::Offset;
    ///
    /// let o = Offset::from_seconds(-18_000)?;
    /// assert_eq!(o, Offset::constant(-5));
    /// assert!(Offset::from_seconds(-18 * 3600 - 1).is_err());
    ///
    /// # Ok::<(), tzrules::Error>(())
    /// ```
    #[inline]
    pub fn from_seconds(seconds: i32) -> Result<Offset, Error> {
        if !(-MAX_SECONDS <= seconds && seconds <= MAX_SECONDS) {
            return Err(Error::range(
                "offset seconds",
                seconds,
                -MAX_SECONDS,
                MAX_SECONDS,
            ));
        }
        Ok(Offset { seconds })
    }

    /// Returns the total number of seconds in this offset.
    #[inline]
    pub const fn seconds(self) -> i32 {
        self.seconds
    }

    /// Returns the negation of this offset.
    ///
    /// This never panics, since the range of offsets is symmetric.
    #[inline]
    pub const fn negate(self) -> Offset {
        Offset { seconds: -self.seconds }
    }

    /// Returns true if and only if this offset is less than zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Adds the given offset to this one.
    ///
    /// # Errors
    ///
    /// This returns an error when the sum is outside the range of an
    /// offset.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::tz::Offset;
    ///
    /// let wall = Offset::constant(1).checked_add(Offset::constant(1))?;
    /// assert_eq!(wall, Offset::constant(2));
    ///
    /// let err = Offset::constant(10).checked_add(Offset::constant(10));
    /// assert!(err.unwrap_err().is_range());
    ///
    /// # Ok::<(), tzrules::Error>(())
    /// ```
    #[inline]
    pub fn checked_add(self, rhs: Offset) -> Result<Offset, Error> {
        Offset::from_seconds(self.seconds + rhs.seconds)
            .map_err(|_| OffsetError::OverflowAdd { lhs: self, rhs }.into())
    }

    /// Subtracts the given offset from this one.
    ///
    /// # Errors
    ///
    /// This returns an error when the difference is outside the range of an
    /// offset.
    #[inline]
    pub fn checked_sub(self, rhs: Offset) -> Result<Offset, Error> {
        Offset::from_seconds(self.seconds - rhs.seconds)
            .map_err(|_| OffsetError::OverflowSub { lhs: self, rhs }.into())
    }

    fn part_hours(self) -> i32 {
        self.seconds / 3600
    }

    fn part_minutes(self) -> i32 {
        (self.seconds / 60) % 60
    }

    fn part_seconds(self) -> i32 {
        self.seconds % 60
    }
}

const MAX_SECONDS: i32 = 18 * 60 * 60;

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "Offset({sign}{:02}:{:02}:{:02})",
            self.part_hours().abs(),
            self.part_minutes().abs(),
            self.part_seconds().abs(),
        )
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "+" };
        let hours = self.part_hours().abs();
        let minutes = self.part_minutes().abs();
        let seconds = self.part_seconds().abs();
        if hours == 0 && minutes == 0 && seconds == 0 {
            write!(f, "+00")
        } else if minutes == 0 && seconds == 0 {
            write!(f, "{sign}{hours:02}")
        } else if seconds == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}

/// Negate this offset.
///
/// This never panics.
impl Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        self.negate()
    }
}

impl TryFrom<i32> for Offset {
    type Error = Error;

    fn try_from(seconds: i32) -> Result<Offset, Error> {
        Offset::from_seconds(seconds)
    }
}

impl From<Offset> for i32 {
    fn from(offset: Offset) -> i32 {
        offset.seconds()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Offset {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.seconds)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Offset {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Offset, D::Error> {
        let seconds = <i32 as serde::Deserialize>::deserialize(deserializer)?;
        Offset::from_seconds(seconds).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Offset {
    fn arbitrary(g: &mut quickcheck::Gen) -> Offset {
        // Real offsets are almost always whole quarter hours.
        let quarters = i32::arbitrary(g).rem_euclid(4 * 36 + 1) - 4 * 18;
        Offset { seconds: quarters * 15 * 60 }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            self.seconds.shrink().filter_map(|s| Offset::from_seconds(s).ok()),
        )
    }
}
