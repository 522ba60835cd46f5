use crate::{audit::Audit, temporal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
};
use strum::{AsRefStr, EnumIter, EnumString};

/// The earliest academic year the registrar accepts
pub const MIN_YEAR: i32 = 2003;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Last digit of the trimester code
    pub fn code_suffix(&self) -> i32 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
        }
    }
}

/// Numeric trimester code: two-digit year followed by the season suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrimesterCode(pub i32);

impl TrimesterCode {
    pub fn of(year: i32, season: Season) -> Self {
        Self((year % 100) * 10 + season.code_suffix())
    }
}

impl Deref for TrimesterCode {
    type Target = i32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for TrimesterCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:03}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TrimesterStatus {
    Upcoming,
    CourseSelection,
    SectionCreation,
    SectionSelection,
    Ongoing,
    Completed,
}

impl TrimesterStatus {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

/// The four registration boundaries of a trimester
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub course_selection_start: Option<DateTime<Utc>>,
    pub course_selection_end: Option<DateTime<Utc>>,
    pub section_registration_start: Option<DateTime<Utc>>,
    pub section_registration_end: Option<DateTime<Utc>>,
}

impl Calendar {
    /// Boundaries in the order they must occur
    pub fn boundaries(&self) -> [Option<DateTime<Utc>>; 4] {
        [
            self.course_selection_start,
            self.course_selection_end,
            self.section_registration_start,
            self.section_registration_end,
        ]
    }

    pub fn is_chronological(&self) -> bool {
        temporal::is_chronological(&self.boundaries())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trimester {
    pub audit: Audit,
    pub year: i32,
    pub season: Season,
    pub code: i32,
    pub status: TrimesterStatus,
    pub calendar: Calendar,
}

impl Trimester {
    /// The code this trimester must carry given its year and season
    pub fn expected_code(&self) -> TrimesterCode {
        TrimesterCode::of(self.year, self.season)
    }
}
