use crate::audit::Audit;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

/// Allowed credit counts for a subject
pub const CREDIT_RANGE: RangeInclusive<i16> = 1..=5;

/// Grades are on a four point scale
pub const GRADE_RANGE: RangeInclusive<f32> = 0.0..=4.0;

/// Whether a grade lies on the four point scale
pub fn is_valid_grade(grade: f32) -> bool {
    GRADE_RANGE.contains(&grade)
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectType {
    Theory,
    Lab,
}

impl SubjectType {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub audit: Audit,
    /// Catalogue code, e.g. "CSE1111"
    pub code_name: String,
    pub name: String,
    pub credits: i16,
    pub subject_type: SubjectType,
}

/// A "requires" edge: `subject_id` can only be taken after `required_subject_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub audit: Audit,
    pub subject_id: Option<Uuid>,
    pub required_subject_id: Option<Uuid>,
    pub min_grade: f32,
}

impl Prerequisite {
    /// The `(subject, required)` pair when both ends are set
    pub fn edge(&self) -> Option<(Uuid, Uuid)> {
        Some((self.subject_id?, self.required_subject_id?))
    }
}
