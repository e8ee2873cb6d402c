use crate::{error, tz::Offset};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    OverflowAdd { lhs: Offset, rhs: Offset },
    OverflowSub { lhs: Offset, rhs: Offset },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Offset(err).into()
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
            OverflowAdd { lhs, rhs } => write!(
                f,
                "adding time zone offset `{rhs}` to `{lhs}` \
                 overflowed the supported offset range",
            ),
            OverflowSub { lhs, rhs } => write!(
                f,
                "subtracting time zone offset `{rhs}` from `{lhs}` \
                 overflowed the supported offset range",
            ),
        }
    }
}
