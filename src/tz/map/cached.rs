use crate::{
    tz::{map::ZoneIntervalMap, ZoneInterval},
    Instant,
};

/// Memoizes lookups on another map.
///
/// The cache is a small table of buckets, each remembering the last interval
/// computed for instants hashing to it. Instants are hashed by a coarse
/// period (about 24 days), so nearby lookups tend to share a bucket, and
/// hence an interval.
///
/// Since intervals are immutable and recomputing one is deterministic, a
/// bucket being overwritten by a concurrent lookup never changes what is
/// returned. Bucket access never blocks: when a bucket is contended, the
/// lookup is simply recomputed.
///
/// Without the `std` feature, this is a pass-through.
pub struct CachedMap {
    map: ZoneIntervalMap,
    #[cfg(feature = "std")]
    buckets: alloc::boxed::Box<[std::sync::RwLock<Option<ZoneInterval>>]>,
}

/// The number of buckets. Must be a power of 2.
#[cfg(feature = "std")]
const BUCKETS: usize = 256;

/// Instants within the same `2^PERIOD_SHIFT` seconds share a bucket.
#[cfg(feature = "std")]
const PERIOD_SHIFT: u32 = 21;

impl CachedMap {
    /// Wraps the given map.
    pub fn new(map: impl Into<ZoneIntervalMap>) -> CachedMap {
        CachedMap {
            map: map.into(),
            #[cfg(feature = "std")]
            buckets: (0..BUCKETS)
                .map(|_| std::sync::RwLock::new(None))
                .collect(),
        }
    }

    /// Returns the wrapped map.
    pub fn map(&self) -> &ZoneIntervalMap {
        &self.map
    }

    /// Returns the interval containing the given instant.
    #[cfg(feature = "std")]
    pub fn lookup(&self, instant: Instant) -> ZoneInterval {
        let bucket = &self.buckets[bucket_index(instant)];
        if let Ok(cached) = bucket.try_read() {
            if let Some(ref interval) = *cached {
                if interval.contains(instant) {
                    return interval.clone();
                }
            }
        }
        trace!("interval cache miss for {instant}");
        let interval = self.map.lookup(instant);
        if let Ok(mut cached) = bucket.try_write() {
            *cached = Some(interval.clone());
        }
        interval
    }

    /// Returns the interval containing the given instant.
    #[cfg(not(feature = "std"))]
    pub fn lookup(&self, instant: Instant) -> ZoneInterval {
        self.map.lookup(instant)
    }

    /// Discards every cached interval.
    pub fn clear(&self) {
        #[cfg(feature = "std")]
        for bucket in self.buckets.iter() {
            // A poisoned bucket only ever holds a complete interval, so
            // it's fine to keep using it.
            let mut cached =
                bucket.write().unwrap_or_else(|err| err.into_inner());
            *cached = None;
        }
    }
}

impl core::fmt::Debug for CachedMap {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("CachedMap").field("map", &self.map).finish()
    }
}

#[cfg(feature = "std")]
fn bucket_index(instant: Instant) -> usize {
    // Arithmetic shift, so this is fine for negative seconds and the
    // sentinels too.
    ((instant.as_second() >> PERIOD_SHIFT) as usize) & (BUCKETS - 1)
}
