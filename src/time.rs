use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

/// A wall-clock instant, in nanoseconds since the Unix epoch.
///
/// Negative values are instants before the epoch. There is no "unset" value:
/// fields that may be missing are `Option<TimePoint>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePoint(i64);

impl TimePoint {
    pub const fn from_nanos(nanos: i64) -> Self {
        TimePoint(nanos)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Captures the current wall-clock time.
    pub fn now() -> Self {
        let nanos = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_nanos() as i64,
            // clock set before 1970
            Err(e) => -(e.duration().as_nanos() as i64),
        };
        TimePoint(nanos)
    }

    /// Returns `ts` if given, otherwise the current time.
    pub fn or_now(ts: Option<TimePoint>) -> Self {
        ts.unwrap_or_else(TimePoint::now)
    }

    /// Signed distance `self - earlier` in nanoseconds.
    pub fn nanos_since(self, earlier: TimePoint) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl From<SystemTime> for TimePoint {
    fn from(t: SystemTime) -> Self {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => TimePoint(d.as_nanos() as i64),
            Err(e) => TimePoint(-(e.duration().as_nanos() as i64)),
        }
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders an optional timestamp, `-` when unset.
pub(crate) struct OptTime(pub Option<TimePoint>);

impl fmt::Display for OptTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ts) => write!(f, "{ts}"),
            None => f.write_str("-"),
        }
    }
}
