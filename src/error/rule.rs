use crate::{error, tz::Offset, Instant};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    DaylightDelta { seconds: i32 },
    DayOfMonth { day: i8 },
    EmptyWindow { start: Instant, end: Instant },
    Month { month: i8 },
    OutOfOrder { previous: Instant, start: Instant },
    Overlapping { previous_end: Instant, start: Instant },
    StandardSavings { savings: Offset },
    TimeOfDay { seconds: i32 },
    Week { week: i8 },
    YearRange { min: i32, max: i32 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Rule(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            DaylightDelta { seconds } => write!(
                f,
                "daylight delta of {seconds} seconds is not in the \
                 supported range of -86400..=86400",
            ),
            DayOfMonth { day } => write!(
                f,
                "transition day of month {day} is invalid, \
                 expected 1..=31 or -31..=-1",
            ),
            EmptyWindow { start, end } => write!(
                f,
                "validity window `{start}` to `{end}` is empty or inverted",
            ),
            Month { month } => write!(
                f,
                "transition month {month} is invalid, expected 1..=12",
            ),
            OutOfOrder { previous, start } => write!(
                f,
                "validity window starting at `{start}` comes after a \
                 window starting at `{previous}`, but windows must be \
                 ordered by their start",
            ),
            Overlapping { previous_end, start } => write!(
                f,
                "validity window starting at `{start}` overlaps the \
                 previous window, which ends at `{previous_end}`",
            ),
            StandardSavings { savings } => write!(
                f,
                "standard time recurrence must have zero savings, \
                 but has savings of `{savings}`",
            ),
            TimeOfDay { seconds } => write!(
                f,
                "transition time of day of {seconds} seconds is invalid, \
                 expected 0..=86400",
            ),
            Week { week } => write!(
                f,
                "transition week {week} is invalid, expected 1..=5",
            ),
            YearRange { min, max } => write!(
                f,
                "recurrence year range {min}..={max} is empty",
            ),
        }
    }
}
