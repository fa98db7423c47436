//! Sources of "today" for resolving the default month.

use std::fmt::Debug;

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Provides the current local date.
///
/// Handlers never read the wall clock directly so that the default month can
/// be pinned in tests with [FixedClock].
pub trait Clock: Debug + Send + Sync {
    /// The current date in the local timezone.
    fn today(&self) -> Date;
}

/// A [Clock] backed by the system time in a canonical timezone, e.g. "Pacific/Auckland".
#[derive(Debug, Clone)]
pub struct SystemClock {
    timezone: String,
}

impl SystemClock {
    /// Create a clock for `canonical_timezone`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
    /// known timezone name.
    pub fn new(canonical_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(canonical_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(canonical_timezone.to_owned()));
        }

        Ok(Self {
            timezone: canonical_timezone.to_owned(),
        })
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        let offset = get_local_offset(&self.timezone).unwrap_or_else(|| {
            tracing::warn!("Could not get offset for timezone {}, using UTC", self.timezone);
            UtcOffset::UTC
        });

        OffsetDateTime::now_utc().to_offset(offset).date()
    }
}

/// A [Clock] that always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}
