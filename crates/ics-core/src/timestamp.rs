//! Timezone-aware timestamp parsing and min/max bounds.
//!
//! Each entry is a civil date-time tagged with its own IANA zone. Entries are
//! compared by absolute instant, so `1970-01-01 00:00:00 Europe/Paris` sorts
//! before `1970-01-01 00:00:01 America/Caracas` even though its civil fields
//! are smaller only by a second and the zones differ by five hours.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::dst::DstPolicy;
use crate::error::{IcsError, Result};
use crate::format::TimestampFormat;

/// iCalendar local date-time layout (`DTSTART;TZID=...:19700101T010000`).
const ICS_LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A civil date-time together with the zone it was expressed in.
///
/// Equality, ordering and hashing use the absolute instant only: the same
/// moment written in two zones compares equal.
#[derive(Debug, Clone, Copy)]
pub struct ParsedInstant {
    datetime: DateTime<Tz>,
}

impl ParsedInstant {
    pub fn new(datetime: DateTime<Tz>) -> Self {
        Self { datetime }
    }

    /// Wall-clock date-time in the instant's own zone.
    pub fn civil(&self) -> NaiveDateTime {
        self.datetime.naive_local()
    }

    pub fn zone(&self) -> Tz {
        self.datetime.timezone()
    }

    /// IANA identifier of the zone, e.g. `Europe/Zurich`.
    pub fn tzid(&self) -> &'static str {
        self.datetime.timezone().name()
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.datetime.with_timezone(&Utc)
    }

    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.datetime
    }

    /// Civil time as an iCalendar local value, `YYYYMMDDTHHMMSS`.
    pub fn to_ics_local(&self) -> String {
        self.datetime.format(ICS_LOCAL_FORMAT).to_string()
    }
}

impl PartialEq for ParsedInstant {
    fn eq(&self, other: &Self) -> bool {
        self.to_utc() == other.to_utc()
    }
}

impl Eq for ParsedInstant {}

impl PartialOrd for ParsedInstant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParsedInstant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_utc().cmp(&other.to_utc())
    }
}

impl Hash for ParsedInstant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_utc().hash(state);
    }
}

impl fmt::Display for ParsedInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.datetime.format("%Y-%m-%d %H:%M:%S"),
            self.tzid()
        )
    }
}

impl From<DateTime<Tz>> for ParsedInstant {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::new(datetime)
    }
}

/// Parser for timestamp entries with a fixed layout and zone defaults.
///
/// Configuration is a plain value: changing the format needs `&mut self` (or
/// consumes the builder), so one instance cannot be reconfigured while
/// another borrower is parsing with it.
///
/// # Example
/// ```
/// use ics_core::TimestampSet;
///
/// let set = TimestampSet::new();
/// let (min, max) = set
///     .min_max(&["1970-01-01 00:00:01 America/Caracas", "1970-01-01 00:00:00 Europe/Paris"])
///     .unwrap();
/// assert_eq!(min.tzid(), "Europe/Paris");
/// assert_eq!(max.tzid(), "America/Caracas");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampSet {
    format: TimestampFormat,
    default_zone: Tz,
    dst_policy: DstPolicy,
}

impl Default for TimestampSet {
    fn default() -> Self {
        Self {
            format: TimestampFormat::default(),
            default_zone: Tz::UTC,
            dst_policy: DstPolicy::default(),
        }
    }
}

impl TimestampSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamp_format(mut self, format: impl Into<TimestampFormat>) -> Self {
        self.format = format.into();
        self
    }

    /// Zone used to interpret entries when the format has no zone token.
    pub fn with_default_zone(mut self, zone: Tz) -> Self {
        self.default_zone = zone;
        self
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.format
    }

    /// Replace the layout used by subsequent parses. Instants parsed earlier
    /// are unaffected.
    pub fn set_timestamp_format(&mut self, format: impl Into<TimestampFormat>) {
        self.format = format.into();
    }

    pub fn default_zone(&self) -> Tz {
        self.default_zone
    }

    pub fn dst_policy(&self) -> DstPolicy {
        self.dst_policy
    }

    /// Parse one entry against the configured format.
    ///
    /// # Errors
    /// Returns `IcsError::InvalidTimestampFormat` if the entry does not have
    /// the exact shape of the format, a numeric field is out of range, the
    /// zone token is missing or unknown, or the local time falls in a DST
    /// gap under [`DstPolicy::Reject`].
    pub fn parse(&self, raw: &str) -> Result<ParsedInstant> {
        let invalid = || IcsError::InvalidTimestampFormat {
            input: raw.to_string(),
            format: self.format.to_string(),
        };

        let fields = self.format.match_fields(raw).ok_or_else(invalid)?;

        let civil = NaiveDate::from_ymd_opt(fields.year, fields.month, fields.day)
            .and_then(|date| date.and_hms_opt(fields.hour, fields.minute, fields.second))
            .ok_or_else(invalid)?;

        let zone = match fields.zone {
            Some(token) => token.parse::<Tz>().map_err(|_| invalid())?,
            None => self.default_zone,
        };

        let datetime = self.dst_policy.resolve(zone, civil).ok_or_else(invalid)?;
        Ok(ParsedInstant::new(datetime))
    }

    /// Parse every entry and return the earliest and latest absolute instant.
    ///
    /// Each bound keeps the zone it was written in. With a single entry both
    /// bounds are that entry; among entries at the same instant the first one
    /// in input order is returned for both bounds.
    ///
    /// # Errors
    /// Returns `IcsError::EmptyTimestampList` for an empty slice and the first
    /// `IcsError::InvalidTimestampFormat` encountered otherwise.
    pub fn min_max<S: AsRef<str>>(&self, raws: &[S]) -> Result<(ParsedInstant, ParsedInstant)> {
        let mut parsed = raws.iter().map(|raw| self.parse(raw.as_ref()));

        let first = parsed.next().ok_or(IcsError::EmptyTimestampList)??;
        let (mut min, mut max) = (first, first);

        for instant in parsed {
            let instant = instant?;
            if instant < min {
                min = instant;
            }
            if instant > max {
                max = instant;
            }
        }

        tracing::trace!(
            count = raws.len(),
            min = %min,
            max = %max,
            "computed timestamp bounds"
        );
        Ok((min, max))
    }
}
