use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    NoHostDefault,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::System(err).into()
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
            NoHostDefault => f.write_str(
                "host did not report a default time zone \
                 (UTC is not substituted automatically)",
            ),
        }
    }
}
