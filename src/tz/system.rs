/*!
Caching of the host's default time zone.

The host is asked for its default zone on every [`SystemZoneCache::get`], but
a new [`RuleZone`] is only built when the host's answer differs from the
snapshot the cached zone was built from. Building a zone normalizes every
rule, so this matters when the default zone is consulted often.
*/

use std::sync::RwLock;

use crate::{
    error::{system::Error as SystemError, Error},
    tz::{HostZone, HostZoneInfo, RuleZone},
};

/// A host that can report its default time zone.
pub trait SystemHost: HostZone {
    /// Returns a snapshot of the host's current default zone, or `None` if
    /// the host has no default zone.
    fn default_zone(&self) -> Option<HostZoneInfo>;
}

/// A cache of the zone built from the host's default zone.
///
/// # Example
///
/// ```
/// use tzrules::{
///     tz::{
///         system::{SystemHost, SystemZoneCache},
///         HostZone, HostZoneInfo, Offset, RuleFormat,
///     },
///     Instant,
/// };
///
/// struct Host;
///
/// impl HostZone for Host {
///     fn utc_offset(&self, _: Instant) -> Offset { Offset::constant(9) }
///     fn is_daylight(&self, _: Instant) -> bool { false }
/// }
///
/// impl SystemHost for Host {
///     fn default_zone(&self) -> Option<HostZoneInfo> {
///         Some(HostZoneInfo {
///             id: "Asia/Example".into(),
///             standard_name: "XST".into(),
///             daylight_name: "XDT".into(),
///             base_offset: Offset::constant(9),
///             format: RuleFormat::Separated,
///             rules: vec![],
///         })
///     }
/// }
///
/// static CACHE: SystemZoneCache = SystemZoneCache::new();
///
/// let zone = CACHE.get(&Host)?;
/// assert_eq!(zone.id(), "Asia/Example");
/// assert_eq!(
///     zone.resolve(Instant::UNIX_EPOCH).wall_offset(),
///     Offset::constant(9),
/// );
///
/// # Ok::<(), tzrules::Error>(())
/// ```
pub struct SystemZoneCache {
    snapshot: RwLock<Option<(HostZoneInfo, RuleZone)>>,
}

impl SystemZoneCache {
    /// Creates an empty cache.
    pub const fn new() -> SystemZoneCache {
        SystemZoneCache { snapshot: RwLock::new(None) }
    }

    /// Returns the zone for the host's current default zone.
    ///
    /// If the host reports the same zone as the last call, the previously
    /// built zone is returned. Otherwise, a new zone is built and cached.
    ///
    /// # Errors
    ///
    /// This returns an error when the host has no default zone, or when
    /// building a zone from the host's snapshot fails. In the latter case,
    /// the cache is left unchanged.
    pub fn get<H: SystemHost>(&self, host: &H) -> Result<RuleZone, Error> {
        let Some(info) = host.default_zone() else {
            warn!("host did not report a default time zone");
            return Err(SystemError::NoHostDefault.into());
        };
        {
            // Zones and snapshots are immutable once stored, so a poisoned
            // lock still guards a consistent pair.
            let snapshot =
                self.snapshot.read().unwrap_or_else(|err| err.into_inner());
            if let Some((ref cached, ref zone)) = *snapshot {
                if *cached == info {
                    return Ok(zone.clone());
                }
            }
        }
        let zone = RuleZone::from_host(&info, host)?;
        let mut snapshot =
            self.snapshot.write().unwrap_or_else(|err| err.into_inner());
        let previous = snapshot
            .replace((info, zone.clone()))
            .map(|(previous, _)| previous.id);
        #[cfg(not(feature = "logging"))]
        {
            let _ = &previous;
        }
        info!(
            "cached host default time zone `{}` (previously {:?})",
            zone.id(),
            previous,
        );
        Ok(zone)
    }

    /// Forgets the cached zone, so that the next call to
    /// [`SystemZoneCache::get`] rebuilds it.
    pub fn reset(&self) {
        let mut snapshot =
            self.snapshot.write().unwrap_or_else(|err| err.into_inner());
        *snapshot = None;
    }
}

impl Default for SystemZoneCache {
    fn default() -> SystemZoneCache {
        SystemZoneCache::new()
    }
}

impl core::fmt::Debug for SystemZoneCache {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let snapshot =
            self.snapshot.read().unwrap_or_else(|err| err.into_inner());
        let id = snapshot.as_ref().map(|(info, _)| info.id.as_str());
        f.debug_struct("SystemZoneCache").field("id", &id).finish()
    }
}
