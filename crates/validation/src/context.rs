use chrono::{DateTime, Utc};
use models::{
    course::Course,
    schedule::{Section, SlotKey, SpaceTime},
    subject::{Prerequisite, Subject},
    trimester::Trimester,
    user::{Faculty, Student},
};
use uuid::Uuid;

/// Read-only access to already persisted rows.
///
/// Implementations must answer from the same snapshot the pending write will
/// commit against, otherwise cycle and uniqueness checks can race.
pub trait Lookup {
    fn subject(&self, id: Uuid) -> Option<Subject>;
    fn subject_by_code(&self, code_name: &str) -> Option<Subject>;

    /// Edges where `subject_id` is the dependent subject
    fn prerequisites_of(&self, subject_id: Uuid) -> Vec<Prerequisite>;

    fn trimester(&self, id: Uuid) -> Option<Trimester>;
    fn trimester_by_code(&self, code: i32) -> Option<Trimester>;

    fn section(&self, id: Uuid) -> Option<Section>;
    fn sections_in_trimester(&self, trimester_id: Uuid) -> Vec<Section>;

    fn space_time(&self, id: Uuid) -> Option<SpaceTime>;
    /// Rows occupying the given room, day and slot
    fn space_times_at(&self, key: &SlotKey) -> Vec<SpaceTime>;

    /// The enrollment record of a student for a subject in a trimester
    fn course_for(&self, student_id: Uuid, subject_id: Uuid, trimester_id: Uuid)
    -> Option<Course>;

    fn student(&self, id: Uuid) -> Option<Student>;
    fn student_by_university_id(&self, university_id: i64) -> Option<Student>;
    fn faculty(&self, id: Uuid) -> Option<Faculty>;
}

/// Source of the current instant for calendar-dependent rules
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Everything a rule may consult besides the candidate itself
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub lookup: &'a dyn Lookup,
    pub now: DateTime<Utc>,
    /// Id of the stored row an update replaces; `None` on insert
    pub replacing: Option<Uuid>,
}

impl<'a> Context<'a> {
    pub fn new(lookup: &'a dyn Lookup, clock: &dyn Clock) -> Self {
        Self {
            lookup,
            now: clock.now(),
            replacing: None,
        }
    }

    pub fn replacing(self, id: Uuid) -> Self {
        Self {
            replacing: Some(id),
            ..self
        }
    }

    /// Whether a stored row with this id collides with the candidate.
    ///
    /// On insert every stored row does, including one with the candidate's own id.
    pub fn collides(&self, stored_id: Uuid) -> bool {
        self.replacing != Some(stored_id)
    }
}
