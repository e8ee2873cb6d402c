// Not every level is used in every feature configuration.
#![allow(unused_macros)]

/// Emits a log record at the given level, but only when the `logging`
/// feature is enabled. Otherwise, the arguments are not even evaluated.
macro_rules! log {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "logging")]
        {
            log::log!(log::Level::$level, $($arg)+);
        }
    };
}

macro_rules! error {
    ($($arg:tt)+) => { log!(Error, $($arg)+) }
}

macro_rules! warn {
    ($($arg:tt)+) => { log!(Warn, $($arg)+) }
}

macro_rules! info {
    ($($arg:tt)+) => { log!(Info, $($arg)+) }
}

macro_rules! debug {
    ($($arg:tt)+) => { log!(Debug, $($arg)+) }
}

macro_rules! trace {
    ($($arg:tt)+) => { log!(Trace, $($arg)+) }
}

/// Records that a heuristic repair was applied to a host adjustment rule.
///
/// Repairs are never errors, but they change what the host told us. So we
/// always want them visible at DEBUG level with enough context to find the
/// offending rule.
macro_rules! repair {
    ($zone:expr, $index:expr, $($arg:tt)+) => {{
        #[cfg(not(feature = "logging"))]
        {
            let _ = (&$zone, &$index);
        }
        debug!(
            "zone {}, adjustment rule {}: {}",
            $zone,
            $index,
            format_args!($($arg)+),
        );
    }};
}
