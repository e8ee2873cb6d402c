use alloc::sync::Arc;

/// Creates a new ad hoc error with no causal chain.
///
/// This accepts the same arguments as the `format!` macro.
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::from_args(format_args!($($tt)*))
    }}
}

pub(crate) use err;

pub(crate) mod offset;
pub(crate) mod rule;
pub(crate) mod system;

/// An error that can occur in this crate.
///
/// Errors only ever occur while *building* a time zone from host adjustment
/// rules, or while constructing the values that go into a build (offsets,
/// instants, transition descriptors). Once a [`RuleZone`](crate::tz::RuleZone)
/// exists, resolving an instant against it cannot fail.
///
/// The broad categories are:
///
/// * A host adjustment rule is structurally malformed. For example, its
/// validity window is inverted, or one of its transition descriptors names
/// a month that doesn't exist. See [`Error::is_malformed_rule`].
/// * A value falls outside of the representable range. For example, a UTC
/// offset of more than 18 hours. See [`Error::is_range`].
/// * The host could not provide a default time zone. See
/// [`Error::is_no_host_default`].
///
/// # Design
///
/// There is only one error type for every fallible operation. Errors form a
/// chain: higher level operations attach context (like which rule of which
/// zone failed) to the lower level error that caused them. The `Display`
/// impl prints the whole chain, most general context first.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cloneable and the size of an
    /// error equal to one word.
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from
    /// Rust's standard library (available in `core`) to create a
    /// `core::fmt::Arguments`.
    ///
    /// This is useful for host integrations that need to report their own
    /// failures through the same error type.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::Error;
    ///
    /// let err = Error::from_args(format_args!("registry key missing"));
    /// assert_eq!(err.to_string(), "registry key missing");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated as a result of a value being
    /// outside of its representable range.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::tz::Offset;
    ///
    /// assert!(Offset::from_seconds(19 * 60 * 60).unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        use self::ErrorKind::*;
        matches!(*self.root().kind(), Range(_) | Offset(_))
    }

    /// Returns true when this error originated from a host adjustment rule
    /// (or a transition descriptor within one) that violates a structural
    /// invariant.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::tz::{TransitionMode, ZoneYearOffset};
    ///
    /// let err = ZoneYearOffset::new(
    ///     TransitionMode::Wall, 13, 1, None, false, 0,
    /// ).unwrap_err();
    /// assert!(err.is_malformed_rule());
    /// ```
    pub fn is_malformed_rule(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Rule(_))
    }

    /// Returns true when this error originated from the host being unable
    /// to report a default time zone.
    pub fn is_no_host_default(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::System(self::system::Error::NoHostDefault)
        )
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "offset seconds")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        match err.inner.as_mut().and_then(Arc::get_mut) {
            Some(inner) => {
                debug_assert!(
                    inner.cause.is_none(),
                    "cause of consequence must be `None`"
                );
                inner.cause = Some(self);
                err
            }
            // The consequent is shared, so we can't attach a cause to it.
            // Keep the root cause instead, since that is what the error
            // predicates inspect.
            None => self,
        }
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) =
            err.inner.as_ref().and_then(|inner| inner.cause.as_ref())
        {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f
                    .debug_struct("Error")
                    .field("kind", &"None")
                    .finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Offset(self::offset::Error),
    Range(RangeError),
    Rule(self::rule::Error),
    System(self::system::Error),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Offset(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            Rule(ref err) => err.fmt(f),
            System(ref err) => err.fmt(f),
            Unknown => f.write_str("unknown tzrules error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Some(Arc::new(ErrorInner { kind, cause: None })) }
    }
}

/// A generic error message.
///
/// This supports the `Error::from_args` public API, which permits callers to
/// manifest their own `Error` values from an arbitrary message. It's also
/// used internally for context messages that carry dynamic data, like the
/// identifier of the zone being built.
struct AdhocError {
    message: alloc::boxed::Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        let (given, min, max) = (given.into(), min.into(), max.into());
        RangeError { what, given, min, max }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `ErrorContext::context` work without needing
/// to rely on public `From` impls.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl<'a> IntoError for core::fmt::Arguments<'a> {
    fn into_error(self) -> Error {
        Error::from_args(self)
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// The closure avoids paying the cost of contextual error creation (which
    /// allocates) in the happy path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}
