//! DST transition policies for local wall-clock times.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Policy for local times that do not exist in a zone because of a DST gap
/// (e.g. 02:30 on the night clocks spring forward from 02:00 to 03:00).
///
/// Ambiguous times (the repeated hour when clocks fall back) always resolve
/// to the earliest of the two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Read the wall time with the offset in force before the gap, which
    /// lands the instant after the gap (02:30 becomes 03:30).
    #[default]
    ShiftForward,
    /// Treat a time inside the gap as invalid input.
    Reject,
}

impl DstPolicy {
    /// Resolve a civil date-time in `tz` to a zoned instant.
    ///
    /// Returns `None` only for a gap time under [`DstPolicy::Reject`].
    pub fn resolve(self, tz: Tz, civil: NaiveDateTime) -> Option<DateTime<Tz>> {
        match tz.from_local_datetime(&civil) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => match self {
                DstPolicy::Reject => None,
                DstPolicy::ShiftForward => {
                    // Gaps never span a full day, so the offset a day earlier
                    // is the one in force right before the transition.
                    let before = tz
                        .offset_from_utc_datetime(&(civil - Duration::days(1)))
                        .fix();
                    let utc = civil - Duration::seconds(i64::from(before.local_minus_utc()));
                    Some(utc.and_utc().with_timezone(&tz))
                }
            },
        }
    }
}
