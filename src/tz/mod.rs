/*!
Routines for building and querying time zones from host adjustment rules.

The primary type in this module is [`RuleZone`]. It is built from a
[`HostZoneInfo`], which is a snapshot of a host zone's adjustment rules, and
answers which [`ZoneInterval`] contains any given [`Instant`](crate::Instant).

Building proceeds in layers, each of which is public so that it can be used
on its own:

* A [`ZoneYearOffset`] turns a year into a transition instant, and a
[`ZoneRecurrence`] repeats one over a range of years.
* The [`normalize`] module turns each [`AdjustmentRule`] into a bounded map
with an explicit standard offset and savings.
* The [`map`] module holds the interval maps: recurring pairs of transitions,
bounded windows and the stitching of windows into a total map, and the lookup
cache put in front of the result.
*/

pub use self::{
    interval::ZoneInterval,
    normalize::{
        AdjustmentRule, HostZone, HostZoneInfo, RuleFormat, TransitionTime,
    },
    offset::Offset,
    recurrence::ZoneRecurrence,
    rule::{TransitionMode, Weekday, ZoneYearOffset},
    zone::{RuleZone, RuleZoneFollowing, RuleZonePreceding},
};

mod interval;
pub mod map;
pub mod normalize;
mod offset;
mod recurrence;
mod rule;
#[cfg(feature = "std")]
pub mod system;
mod zone;
