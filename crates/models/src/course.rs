use crate::{audit::Audit, subject::is_valid_grade};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Selected,
    Registered,
    Completed,
    Dropped,
}

impl CourseStatus {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

/// Why a status cannot carry the given section/grade combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StateError {
    SectionNotAllowed(CourseStatus),
    SectionRequired(CourseStatus),
    GradeNotAllowed(CourseStatus),
    GradeRequired,
    GradeOutOfRange(f32),
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::SectionNotAllowed(status) => {
                write!(f, "a {} course cannot be assigned a section", status.as_str())
            }
            Self::SectionRequired(status) => {
                write!(f, "a {} course must be assigned a section", status.as_str())
            }
            Self::GradeNotAllowed(status) => {
                write!(f, "a {} course cannot carry a grade", status.as_str())
            }
            Self::GradeRequired => write!(f, "a COMPLETED course must carry a grade"),
            Self::GradeOutOfRange(grade) => write!(f, "grade {grade} is outside 0.0-4.0"),
        }
    }
}

/// The section/grade fields a course carries, keyed by its status
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CourseState {
    Selected,
    Registered { section: Uuid },
    Completed { section: Uuid, grade: f32 },
    Dropped { section: Uuid },
}

impl CourseState {
    /// Builds the state from its flat stored form, rejecting combinations the status forbids
    pub fn new(
        status: CourseStatus,
        section: Option<Uuid>,
        grade: Option<f32>,
    ) -> Result<Self, StateError> {
        match (status, section, grade) {
            (CourseStatus::Selected, None, None) => Ok(Self::Selected),
            (CourseStatus::Selected, Some(_), _) => Err(StateError::SectionNotAllowed(status)),

            (CourseStatus::Registered, Some(section), None) => Ok(Self::Registered { section }),
            (CourseStatus::Dropped, Some(section), None) => Ok(Self::Dropped { section }),
            (CourseStatus::Registered | CourseStatus::Dropped, None, _) => {
                Err(StateError::SectionRequired(status))
            }

            (CourseStatus::Completed, Some(section), Some(grade)) => {
                if is_valid_grade(grade) {
                    Ok(Self::Completed { section, grade })
                } else {
                    Err(StateError::GradeOutOfRange(grade))
                }
            }
            (CourseStatus::Completed, None, _) => Err(StateError::SectionRequired(status)),
            (CourseStatus::Completed, Some(_), None) => Err(StateError::GradeRequired),

            (_, _, Some(_)) => Err(StateError::GradeNotAllowed(status)),
        }
    }

    pub fn status(&self) -> CourseStatus {
        match self {
            Self::Selected => CourseStatus::Selected,
            Self::Registered { .. } => CourseStatus::Registered,
            Self::Completed { .. } => CourseStatus::Completed,
            Self::Dropped { .. } => CourseStatus::Dropped,
        }
    }

    pub fn section(&self) -> Option<Uuid> {
        match self {
            Self::Selected => None,
            Self::Registered { section }
            | Self::Completed { section, .. }
            | Self::Dropped { section } => Some(*section),
        }
    }

    pub fn grade(&self) -> Option<f32> {
        match self {
            Self::Completed { grade, .. } => Some(*grade),
            _ => None,
        }
    }

    /// The section whose seat this course occupies, if any
    pub fn seat(&self) -> Option<Uuid> {
        match self {
            Self::Registered { section } | Self::Completed { section, .. } => Some(*section),
            Self::Selected | Self::Dropped { .. } => None,
        }
    }
}

/// A student's enrollment record for one subject in one trimester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub audit: Audit,
    pub student_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub trimester_id: Option<Uuid>,
    pub status: CourseStatus,
    pub section_id: Option<Uuid>,
    pub grade: Option<f32>,
}

impl Course {
    pub fn state(&self) -> Result<CourseState, StateError> {
        CourseState::new(self.status, self.section_id, self.grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_state() {
        let section = Uuid::new_v4();

        assert_eq!(
            CourseState::new(CourseStatus::Selected, None, None),
            Ok(CourseState::Selected)
        );
        assert_eq!(
            CourseState::new(CourseStatus::Selected, Some(section), None),
            Err(StateError::SectionNotAllowed(CourseStatus::Selected))
        );
        assert_eq!(
            CourseState::new(CourseStatus::Selected, None, Some(3.0)),
            Err(StateError::GradeNotAllowed(CourseStatus::Selected))
        );
    }

    #[test]
    fn test_registered_and_dropped_states() {
        let section = Uuid::new_v4();

        for status in [CourseStatus::Registered, CourseStatus::Dropped] {
            let state = CourseState::new(status, Some(section), None).unwrap();
            assert_eq!(state.status(), status);
            assert_eq!(state.section(), Some(section));

            assert_eq!(
                CourseState::new(status, None, None),
                Err(StateError::SectionRequired(status))
            );
            assert_eq!(
                CourseState::new(status, Some(section), Some(2.0)),
                Err(StateError::GradeNotAllowed(status))
            );
        }
    }

    #[test]
    fn test_completed_state() {
        let section = Uuid::new_v4();

        let state = CourseState::new(CourseStatus::Completed, Some(section), Some(4.0)).unwrap();
        assert_eq!(state.grade(), Some(4.0));

        assert_eq!(
            CourseState::new(CourseStatus::Completed, Some(section), None),
            Err(StateError::GradeRequired)
        );
        assert_eq!(
            CourseState::new(CourseStatus::Completed, None, Some(3.0)),
            Err(StateError::SectionRequired(CourseStatus::Completed))
        );
        assert_eq!(
            CourseState::new(CourseStatus::Completed, Some(section), Some(4.5)),
            Err(StateError::GradeOutOfRange(4.5))
        );
    }

    #[test]
    fn test_seat() {
        let section = Uuid::new_v4();

        assert_eq!(CourseState::Selected.seat(), None);
        assert_eq!(CourseState::Registered { section }.seat(), Some(section));
        assert_eq!(
            CourseState::Completed {
                section,
                grade: 3.5
            }
            .seat(),
            Some(section)
        );
        assert_eq!(CourseState::Dropped { section }.seat(), None);
    }
}
