use crate::error::ValidationError;
use models::{course::CourseState, schedule::Section};
use serde::Serialize;
use uuid::Uuid;

/// The seat movement a course write causes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeatChange {
    /// Section that gets a seat back
    pub release: Option<Uuid>,
    /// Section that loses a seat
    pub take: Option<Uuid>,
}

impl SeatChange {
    /// Compares the seat held before and after a write; `old` is `None` on insert
    pub fn between(old: Option<&CourseState>, new: &CourseState) -> Self {
        let before = old.and_then(CourseState::seat);
        let after = new.seat();

        if before == after {
            Self::default()
        } else {
            Self {
                release: before,
                take: after,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.release.is_none() && self.take.is_none()
    }

    /// Sections whose counters this change touches
    pub fn sections(&self) -> impl Iterator<Item = Uuid> {
        self.release.into_iter().chain(self.take)
    }

    /// Moves the section's `current_capacity` by this change.
    ///
    /// Taking a seat in a full section is refused; releasing never drops below zero.
    pub fn apply_to(&self, section: &mut Section) -> Result<(), ValidationError> {
        let id = section.audit.id;

        if self.release == Some(id) {
            section.current_capacity = (section.current_capacity - 1).max(0);
        }

        if self.take == Some(id) {
            if section.is_full() {
                return Err(ValidationError::rule(format!(
                    "section {id} is full ({} of {} seats taken)",
                    section.current_capacity, section.max_capacity
                )));
            }
            section.current_capacity += 1;
        }

        Ok(())
    }
}
