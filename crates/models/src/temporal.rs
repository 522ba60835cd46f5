use chrono::{DateTime, Utc};
use serde::Serialize;

/// A closed interval of instants, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// Creates a new `Window` if `start` is not after `end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Whether `instant` lies strictly after `now`
pub fn is_future(instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    instant > now
}

/// Whether `instant` has been reached, i.e. `now >= instant`
pub fn has_passed(instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= instant
}

/// Whether the present instants are non-decreasing; missing entries are skipped
pub fn is_chronological(instants: &[Option<DateTime<Utc>>]) -> bool {
    instants
        .iter()
        .flatten()
        .zip(instants.iter().flatten().skip(1))
        .all(|(earlier, later)| earlier <= later)
}
