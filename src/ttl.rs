//! Time-to-live handling.
//!
//! A TTL is either a fixed number of seconds or a calendar-aware interval.
//! Intervals resolve against the calendar rather than a fixed approximation:
//! "one month" measured from the Unix epoch is the length of January 1970,
//! not a hardcoded thirty days.

use chrono::{DateTime, Days, Months, TimeDelta, Utc};

use crate::error::{CacheError, CacheResult};

/// Time-to-live for a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Fixed lifetime in seconds, counted from the moment of the write.
    ///
    /// Negative values are legal and produce an entry that is already
    /// stale, which the next read purges.
    Seconds(i64),

    /// Calendar-aware lifetime.
    Interval(Interval),
}

/// Calendar components of an interval TTL.
///
/// All components default to zero, so a struct update expression spells
/// out only the parts that matter:
///
/// ```
/// use simple_file_cache::{Interval, Ttl};
///
/// let ttl = Ttl::Interval(Interval { days: 3, hours: 12, ..Interval::default() });
/// assert_eq!(ttl.to_seconds().unwrap(), 3 * 86_400 + 12 * 3_600);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interval {
    pub years: u32,
    pub months: u32,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Interval {
    /// Resolve the interval to a number of seconds by adding its components
    /// to the zero Unix epoch and reading back the resulting timestamp.
    ///
    /// Returns `None` when the interval is not representable (component
    /// arithmetic overflows or the resulting date is out of range).
    pub fn to_seconds(&self) -> Option<i64> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let extra = self
            .hours
            .checked_mul(3_600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)?;
        let end = DateTime::<Utc>::from_timestamp(0, 0)?
            .checked_add_months(Months::new(months))?
            .checked_add_days(Days::new(self.days))?
            .checked_add_signed(TimeDelta::try_seconds(i64::try_from(extra).ok()?)?)?;
        Some(end.timestamp())
    }
}

impl Ttl {
    /// Convert to a lifetime in whole seconds.
    ///
    /// Fails with [`CacheError::InvalidArgument`] when an interval cannot
    /// be represented as a timestamp offset.
    pub fn to_seconds(self) -> CacheResult<i64> {
        match self {
            Ttl::Seconds(secs) => Ok(secs),
            Ttl::Interval(interval) => interval.to_seconds().ok_or_else(|| {
                CacheError::InvalidArgument(format!("ttl interval out of range: {:?}", interval))
            }),
        }
    }

    /// Absolute expiration timestamp for an entry written at `now`.
    pub(crate) fn expire_at(self, now: i64) -> CacheResult<i64> {
        let secs = self.to_seconds()?;
        now.checked_add(secs).ok_or_else(|| {
            CacheError::InvalidArgument(format!(
                "ttl of {} seconds overflows the expiration timestamp",
                secs
            ))
        })
    }
}

/// Current Unix time in whole seconds.
pub(crate) fn unix_now() -> i64 {
    Utc::now().timestamp()
}
