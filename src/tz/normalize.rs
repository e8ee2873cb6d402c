/*!
Host adjustment rules, and their normalization into bounded interval maps.

Host time zone databases describe a zone as an ordered list of
[`AdjustmentRule`]s. Host data is known to be ambiguous in a few places, so
every rule goes through a fixed sequence of heuristic repairs before it is
turned into a [`BoundedMap`]. Each repair is a pure function in this module,
so it can be tested on its own. Repairs are never errors, but they are
logged at `DEBUG` level when the `logging` feature is enabled.

Rules that are structurally malformed (an inverted validity window, a
transition descriptor naming a month that doesn't exist and so on) are
rejected. There is no best effort: a zone either builds completely or not
at all.
*/

use alloc::{string::String, sync::Arc, vec::Vec};

use crate::{
    error::{err, rule::Error as RuleError, Error, ErrorContext},
    tz::{
        map::{
            BoundedMap, DaylightFixMap, RecurringIntervalMap, ZoneIntervalMap,
        },
        Offset, TransitionMode, Weekday, ZoneInterval, ZoneRecurrence,
        ZoneYearOffset,
    },
    Instant,
};

/// A transition descriptor, as decoded from a host feed.
///
/// This is the unvalidated counterpart of a [`ZoneYearOffset`]. Its fields
/// have the same meaning.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionTime {
    /// The clock `time_of_day` is read from.
    pub mode: TransitionMode,
    /// The month, in `1..=12`.
    pub month: i8,
    /// The day of the month. Negative values count from the end of the
    /// month.
    pub day_of_month: i8,
    /// When present, the date moves to the nearest day with this weekday.
    pub day_of_week: Option<Weekday>,
    /// Whether the weekday search moves forward or backward.
    pub advance: bool,
    /// Seconds since midnight, in `0..=86400`.
    pub time_of_day: i32,
}

impl TransitionTime {
    /// A fixed date transition, measured against the wall clock.
    pub fn fixed(month: i8, day: i8, time_of_day: i32) -> TransitionTime {
        TransitionTime {
            mode: TransitionMode::Wall,
            month,
            day_of_month: day,
            day_of_week: None,
            advance: false,
            time_of_day,
        }
    }

    /// A transition on the `week`-th `weekday` of `month`, measured against
    /// the wall clock. A `week` of `5` means the last such weekday of the
    /// month, which may be the fourth one.
    ///
    /// # Errors
    ///
    /// This returns an error when `week` is not in `1..=5`.
    ///
    /// # Example
    ///
    /// ```
    /// use tzrules::tz::{TransitionTime, Weekday};
    ///
    /// let t = TransitionTime::floating(3, 2, Weekday::Sunday, 7200)?;
    /// assert_eq!((t.day_of_month, t.advance), (8, true));
    /// let t = TransitionTime::floating(10, 5, Weekday::Sunday, 7200)?;
    /// assert_eq!((t.day_of_month, t.advance), (-1, false));
    ///
    /// # Ok::<(), tzrules::Error>(())
    /// ```
    pub fn floating(
        month: i8,
        week: i8,
        weekday: Weekday,
        time_of_day: i32,
    ) -> Result<TransitionTime, Error> {
        let (day_of_month, advance) = match week {
            5 => (-1, false),
            1..=4 => (1 + 7 * (week - 1), true),
            _ => return Err(RuleError::Week { week }.into()),
        };
        Ok(TransitionTime {
            mode: TransitionMode::Wall,
            month,
            day_of_month,
            day_of_week: Some(weekday),
            advance,
            time_of_day,
        })
    }

    /// Returns this descriptor with its time of day measured against the
    /// given clock instead.
    pub fn with_mode(self, mode: TransitionMode) -> TransitionTime {
        TransitionTime { mode, ..self }
    }

    /// Validates this descriptor.
    ///
    /// # Errors
    ///
    /// See [`ZoneYearOffset::new`].
    pub fn to_year_offset(&self) -> Result<ZoneYearOffset, Error> {
        ZoneYearOffset::new(
            self.mode,
            self.month,
            self.day_of_month,
            self.day_of_week,
            self.advance,
            self.time_of_day,
        )
    }
}

/// One rule of a host time zone, valid for `[start, end)`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustmentRule {
    /// The first instant this rule applies to. May be `BEFORE_TIME`.
    pub start: Instant,
    /// The first instant this rule no longer applies to. May be
    /// `AFTER_TIME`.
    pub end: Instant,
    /// The standard offset of this rule. Only meaningful for
    /// [`RuleFormat::Separated`] feeds.
    pub base_offset: Offset,
    /// The raw daylight delta, in seconds. This may be outside of the range
    /// of an [`Offset`] (hosts encode date line changes as deltas of about
    /// ±24 hours), but must be in `-86400..=86400`.
    pub daylight_delta: i32,
    /// When daylight saving time starts.
    pub daylight_start: TransitionTime,
    /// When daylight saving time ends.
    pub daylight_end: TransitionTime,
}

/// How a host feed expresses the standard offset of its rules.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleFormat {
    /// Every rule carries its own standard offset, and its transition
    /// descriptors recur every year of its window.
    Separated,
    /// Rules don't separate their standard offset from the zone's. Each rule
    /// describes a single period, and the standard offset and savings are
    /// inferred by asking the host about the rule's start.
    Inferred,
}

/// A host time zone, decoded into its adjustment rules.
///
/// Two snapshots comparing equal describe the same zone.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostZoneInfo {
    /// The host's identifier for this zone.
    pub id: String,
    /// The display name of standard time.
    pub standard_name: String,
    /// The display name of daylight saving time.
    pub daylight_name: String,
    /// The zone's overall standard offset. It applies wherever no rule
    /// does.
    pub base_offset: Offset,
    /// How the rules express their standard offset.
    pub format: RuleFormat,
    /// The rules, ordered by start. Windows must not overlap.
    pub rules: Vec<AdjustmentRule>,
}

/// Answers questions about a zone from the host's point of view.
///
/// This is used to infer the standard offset and savings of
/// [`RuleFormat::Inferred`] rules.
pub trait HostZone {
    /// Returns the wall offset the host reports for the given instant.
    fn utc_offset(&self, instant: Instant) -> Offset;

    /// Returns whether the host reports daylight saving time for the given
    /// instant.
    fn is_daylight(&self, instant: Instant) -> bool;
}

impl<'a, H: HostZone + ?Sized> HostZone for &'a H {
    fn utc_offset(&self, instant: Instant) -> Offset {
        (**self).utc_offset(instant)
    }

    fn is_daylight(&self, instant: Instant) -> bool {
        (**self).is_daylight(instant)
    }
}

/// A snapshot answers host questions from its own rules: the rule in effect
/// at an instant is in daylight saving time when its (date line corrected)
/// delta is nonzero.
impl HostZone for HostZoneInfo {
    fn utc_offset(&self, instant: Instant) -> Offset {
        let Some(rule) = self.rule_at(instant) else {
            return self.base_offset;
        };
        let savings = wrap_date_line(rule.daylight_delta);
        Offset::from_seconds(rule.base_offset.seconds() + savings)
            .unwrap_or(rule.base_offset)
    }

    fn is_daylight(&self, instant: Instant) -> bool {
        self.rule_at(instant)
            .map_or(false, |rule| wrap_date_line(rule.daylight_delta) != 0)
    }
}

impl HostZoneInfo {
    fn rule_at(&self, instant: Instant) -> Option<&AdjustmentRule> {
        self.rules.iter().find(|r| r.start <= instant && instant < r.end)
    }
}

/// Turns one date line change encoded as a daylight delta into the real
/// savings.
///
/// A delta whose magnitude is more than 14 hours is a redefinition of the
/// zone across the date line, so 24 hours are added or subtracted. For
/// example, `+23h` becomes `-1h` and `-23h` becomes `+1h`.
///
/// # Example
///
/// ```
/// use tzrules::tz::normalize::wrap_date_line;
///
/// assert_eq!(wrap_date_line(23 * 3600), -3600);
/// assert_eq!(wrap_date_line(-23 * 3600), 3600);
/// assert_eq!(wrap_date_line(3600), 3600);
/// ```
pub fn wrap_date_line(savings: i32) -> i32 {
    const LIMIT: i32 = 14 * 60 * 60;
    const DAY: i32 = 24 * 60 * 60;
    if savings > LIMIT {
        savings - DAY
    } else if savings < -LIMIT {
        savings + DAY
    } else {
        savings
    }
}

/// Reconciles a raw daylight delta with whether the host reports daylight
/// saving time.
///
/// A daylight period with a zero delta gets one hour of savings, so that it
/// remains distinguishable from standard time. A standard period with a
/// nonzero delta gets no savings at all.
pub fn fix_host_savings(savings: i32, host_daylight: bool) -> i32 {
    match (host_daylight, savings) {
        (true, 0) => Offset::HOUR.seconds(),
        (false, _) => 0,
        (true, savings) => savings,
    }
}

/// Infers a rule's standard offset from the wall offset the host reports
/// at its start.
///
/// # Errors
///
/// This returns an error when the standard offset is not representable.
pub fn infer_standard_offset(
    host_offset: Offset,
    host_daylight: bool,
    savings: Offset,
) -> Result<Offset, Error> {
    if host_daylight {
        host_offset.checked_sub(savings)
    } else {
        Ok(host_offset)
    }
}

/// Returns true when both descriptors are a fixed January 1st at (about)
/// midnight, which is how hosts spell "this rule has no daylight saving
/// time."
pub fn is_standard_only(start: &ZoneYearOffset, end: &ZoneYearOffset) -> bool {
    start.is_start_of_year() && end.is_start_of_year()
}

/// A rule after normalization.
#[derive(Clone, Debug)]
pub struct NormalizedRule {
    standard_offset: Offset,
    savings: Offset,
    map: BoundedMap,
}

impl NormalizedRule {
    /// Returns the start of the rule's validity window.
    pub fn start(&self) -> Instant {
        self.map.start()
    }

    /// Returns the end of the rule's validity window.
    pub fn end(&self) -> Instant {
        self.map.end()
    }

    /// Returns the rule's standard offset.
    pub fn standard_offset(&self) -> Offset {
        self.standard_offset
    }

    /// Returns the rule's savings, after every repair.
    pub fn savings(&self) -> Offset {
        self.savings
    }

    /// Returns the map for the rule's validity window.
    pub fn map(&self) -> &BoundedMap {
        &self.map
    }

    /// Returns the smallest and largest of the standard and daylight wall
    /// offsets of this rule.
    pub(crate) fn offset_range(&self) -> (Offset, Offset) {
        let daylight = Offset::constant_seconds(
            self.standard_offset.seconds() + self.savings.seconds(),
        );
        let standard = self.standard_offset;
        (standard.min(daylight), standard.max(daylight))
    }

    pub(crate) fn into_map(self) -> BoundedMap {
        self.map
    }
}

/// Normalizes the adjustment rules of one host zone.
///
/// # Example
///
/// This normalizes a rule whose daylight delta encodes a date line change.
///
/// ```
/// use tzrules::{
///     tz::{
///         normalize::AdjustmentRuleNormalizer, AdjustmentRule, HostZoneInfo,
///         Offset, RuleFormat, TransitionTime, Weekday,
///     },
///     Instant,
/// };
///
/// let rule = AdjustmentRule {
///     start: Instant::from_utc(2000, 1, 1, 0, 0, 0)?,
///     end: Instant::from_utc(2010, 1, 1, 0, 0, 0)?,
///     base_offset: Offset::constant(-10),
///     daylight_delta: 23 * 3600,
///     daylight_start: TransitionTime::floating(3, 5, Weekday::Sunday, 7200)?,
///     daylight_end: TransitionTime::floating(10, 5, Weekday::Sunday, 10800)?,
/// };
/// let info = HostZoneInfo {
///     id: "Pacific/Example".into(),
///     standard_name: "Example Standard Time".into(),
///     daylight_name: "Example Daylight Time".into(),
///     base_offset: Offset::constant(-10),
///     format: RuleFormat::Separated,
///     rules: vec![rule.clone()],
/// };
/// let normalizer = AdjustmentRuleNormalizer::new(&info, &info);
/// let normalized = normalizer.normalize(0, &rule)?;
/// assert_eq!(normalized.savings(), Offset::constant(-1));
///
/// # Ok::<(), tzrules::Error>(())
/// ```
pub struct AdjustmentRuleNormalizer<'a> {
    info: &'a HostZoneInfo,
    host: &'a dyn HostZone,
    standard_name: Arc<str>,
    daylight_name: Arc<str>,
}

impl<'a> AdjustmentRuleNormalizer<'a> {
    /// Creates a normalizer for the rules of the given zone. The host is
    /// only consulted for [`RuleFormat::Inferred`] rules.
    pub fn new(
        info: &'a HostZoneInfo,
        host: &'a dyn HostZone,
    ) -> AdjustmentRuleNormalizer<'a> {
        AdjustmentRuleNormalizer {
            info,
            host,
            standard_name: Arc::from(info.standard_name.as_str()),
            daylight_name: Arc::from(info.daylight_name.as_str()),
        }
    }

    /// Returns the shared standard name of the zone.
    pub(crate) fn standard_name(&self) -> &Arc<str> {
        &self.standard_name
    }

    /// Normalizes every rule of the zone, in order.
    ///
    /// # Errors
    ///
    /// This returns the error of the first rule that fails to normalize.
    pub fn normalize_all(&self) -> Result<Vec<NormalizedRule>, Error> {
        self.info
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| self.normalize(index, rule))
            .collect()
    }

    /// Normalizes one rule. The index is only used for error messages and
    /// logging.
    ///
    /// # Errors
    ///
    /// This returns an error when the rule is malformed, or when its
    /// offsets are not representable.
    pub fn normalize(
        &self,
        index: usize,
        rule: &AdjustmentRule,
    ) -> Result<NormalizedRule, Error> {
        self.normalize_impl(index, rule).with_context(|| {
            err!(
                "failed to normalize adjustment rule {index} of zone `{}`",
                self.info.id,
            )
        })
    }

    fn normalize_impl(
        &self,
        index: usize,
        rule: &AdjustmentRule,
    ) -> Result<NormalizedRule, Error> {
        if rule.start >= rule.end {
            return Err(RuleError::EmptyWindow {
                start: rule.start,
                end: rule.end,
            }
            .into());
        }
        if !(-86_400 <= rule.daylight_delta && rule.daylight_delta <= 86_400) {
            return Err(RuleError::DaylightDelta {
                seconds: rule.daylight_delta,
            }
            .into());
        }
        let daylight_start = rule
            .daylight_start
            .to_year_offset()
            .context(err!("invalid start of daylight saving time"))?;
        let daylight_end = rule
            .daylight_end
            .to_year_offset()
            .context(err!("invalid end of daylight saving time"))?;
        match self.info.format {
            RuleFormat::Separated => {
                self.separated(index, rule, daylight_start, daylight_end)
            }
            RuleFormat::Inferred => self.inferred(index, rule),
        }
    }

    fn separated(
        &self,
        index: usize,
        rule: &AdjustmentRule,
        daylight_start: ZoneYearOffset,
        daylight_end: ZoneYearOffset,
    ) -> Result<NormalizedRule, Error> {
        let standard = rule.base_offset;
        let savings = self.savings(index, rule.daylight_delta)?;
        if is_standard_only(&daylight_start, &daylight_end) {
            repair!(
                self.info.id,
                index,
                "transitions only at the start of the year, \
                 using standard offset {standard} for the whole rule",
            );
            let interval =
                ZoneInterval::fixed(Arc::clone(&self.standard_name), standard);
            return self.finish(rule, standard, Offset::ZERO, interval);
        }

        let recurring = RecurringIntervalMap::new(
            standard,
            ZoneRecurrence::forever(
                Arc::clone(&self.standard_name),
                Offset::ZERO,
                daylight_end,
            ),
            ZoneRecurrence::forever(
                Arc::clone(&self.daylight_name),
                savings,
                daylight_start,
            ),
        )?;
        if savings != Offset::ZERO {
            return self.finish(rule, standard, savings, recurring);
        }
        repair!(
            self.info.id,
            index,
            "daylight saving time with zero delta, \
             giving daylight intervals one hour of savings",
        );
        // The rewrite keeps wall offsets, so daylight intervals have a
        // standard offset an hour below this rule's.
        standard.checked_sub(Offset::HOUR)?;
        let fixed = DaylightFixMap::new(
            recurring,
            Arc::clone(&self.daylight_name),
            Offset::HOUR,
        );
        self.finish(rule, standard, savings, fixed)
    }

    fn inferred(
        &self,
        index: usize,
        rule: &AdjustmentRule,
    ) -> Result<NormalizedRule, Error> {
        let host_daylight = self.host.is_daylight(rule.start);
        let host_offset = self.host.utc_offset(rule.start);
        let fixed = fix_host_savings(rule.daylight_delta, host_daylight);
        if fixed != rule.daylight_delta {
            repair!(
                self.info.id,
                index,
                "host reports {} time with a delta of {}s, using {}s",
                if host_daylight { "daylight" } else { "standard" },
                rule.daylight_delta,
                fixed,
            );
        }
        let savings = self.savings(index, fixed)?;
        let standard =
            infer_standard_offset(host_offset, host_daylight, savings)
                .with_context(|| {
                    err!("cannot infer standard offset from {host_offset}")
                })?;
        let wall = standard.checked_add(savings)?;
        let name = if host_daylight {
            Arc::clone(&self.daylight_name)
        } else {
            Arc::clone(&self.standard_name)
        };
        let interval = ZoneInterval::new(
            name,
            Instant::BEFORE_TIME,
            Instant::AFTER_TIME,
            wall,
            savings,
        )?;
        self.finish(rule, standard, savings, interval)
    }

    /// Applies the date line wrap to a raw delta and converts it to an
    /// offset.
    fn savings(&self, index: usize, raw: i32) -> Result<Offset, Error> {
        let wrapped = wrap_date_line(raw);
        if wrapped != raw {
            repair!(
                self.info.id,
                index,
                "delta of {raw}s crosses the date line, using {wrapped}s",
            );
        }
        Offset::from_seconds(wrapped)
    }

    fn finish(
        &self,
        rule: &AdjustmentRule,
        standard_offset: Offset,
        savings: Offset,
        map: impl Into<ZoneIntervalMap>,
    ) -> Result<NormalizedRule, Error> {
        let map = BoundedMap::new(rule.start, rule.end, map)?;
        Ok(NormalizedRule { standard_offset, savings, map })
    }
}

impl<'a> core::fmt::Debug for AdjustmentRuleNormalizer<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("AdjustmentRuleNormalizer")
            .field("zone", &self.info.id)
            .finish()
    }
}
