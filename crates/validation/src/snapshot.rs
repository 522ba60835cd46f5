use crate::context::Lookup;
use models::{
    Entity,
    course::Course,
    notification::Notification,
    schedule::{Section, SlotKey, SpaceTime},
    subject::{Prerequisite, Subject},
    trimester::Trimester,
    user::{Faculty, Student},
};
use std::collections::HashMap;
use uuid::Uuid;

/// An in-memory set of persisted rows that answers [`Lookup`] queries.
///
/// The database layer fills one inside the writing transaction; tests build
/// them by hand.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    subjects: HashMap<Uuid, Subject>,
    prerequisites: HashMap<Uuid, Prerequisite>,
    trimesters: HashMap<Uuid, Trimester>,
    sections: HashMap<Uuid, Section>,
    space_times: HashMap<Uuid, SpaceTime>,
    courses: HashMap<Uuid, Course>,
    notifications: HashMap<Uuid, Notification>,
    students: HashMap<Uuid, Student>,
    faculties: HashMap<Uuid, Faculty>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a row, keyed by its id
    pub fn insert(&mut self, entity: impl Into<Entity>) {
        match entity.into() {
            Entity::Subject(e) => {
                self.subjects.insert(e.audit.id, e);
            }
            Entity::Prerequisite(e) => {
                self.prerequisites.insert(e.audit.id, e);
            }
            Entity::Trimester(e) => {
                self.trimesters.insert(e.audit.id, e);
            }
            Entity::Section(e) => {
                self.sections.insert(e.audit.id, e);
            }
            Entity::SpaceTime(e) => {
                self.space_times.insert(e.audit.id, e);
            }
            Entity::Course(e) => {
                self.courses.insert(e.audit.id, e);
            }
            Entity::Notification(e) => {
                self.notifications.insert(e.audit.id, e);
            }
            Entity::Student(e) => {
                self.students.insert(e.audit.id, e);
            }
            Entity::Faculty(e) => {
                self.faculties.insert(e.audit.id, e);
            }
        }
    }

    pub fn with(mut self, entity: impl Into<Entity>) -> Self {
        self.insert(entity);
        self
    }

    pub fn extend<E: Into<Entity>>(&mut self, entities: impl IntoIterator<Item = E>) {
        for entity in entities {
            self.insert(entity);
        }
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
            + self.prerequisites.len()
            + self.trimesters.len()
            + self.sections.len()
            + self.space_times.len()
            + self.courses.len()
            + self.notifications.len()
            + self.students.len()
            + self.faculties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Lookup for Snapshot {
    fn subject(&self, id: Uuid) -> Option<Subject> {
        self.subjects.get(&id).cloned()
    }

    fn subject_by_code(&self, code_name: &str) -> Option<Subject> {
        self.subjects
            .values()
            .find(|s| s.code_name == code_name)
            .cloned()
    }

    fn prerequisites_of(&self, subject_id: Uuid) -> Vec<Prerequisite> {
        self.prerequisites
            .values()
            .filter(|p| p.subject_id == Some(subject_id))
            .cloned()
            .collect()
    }

    fn trimester(&self, id: Uuid) -> Option<Trimester> {
        self.trimesters.get(&id).cloned()
    }

    fn trimester_by_code(&self, code: i32) -> Option<Trimester> {
        self.trimesters.values().find(|t| t.code == code).cloned()
    }

    fn section(&self, id: Uuid) -> Option<Section> {
        self.sections.get(&id).cloned()
    }

    fn sections_in_trimester(&self, trimester_id: Uuid) -> Vec<Section> {
        self.sections
            .values()
            .filter(|s| s.trimester_id == Some(trimester_id))
            .cloned()
            .collect()
    }

    fn space_time(&self, id: Uuid) -> Option<SpaceTime> {
        self.space_times.get(&id).cloned()
    }

    fn space_times_at(&self, key: &SlotKey) -> Vec<SpaceTime> {
        self.space_times
            .values()
            .filter(|st| st.slot_key().as_ref() == Some(key))
            .cloned()
            .collect()
    }

    fn course_for(
        &self,
        student_id: Uuid,
        subject_id: Uuid,
        trimester_id: Uuid,
    ) -> Option<Course> {
        self.courses
            .values()
            .find(|c| {
                c.student_id == Some(student_id)
                    && c.subject_id == Some(subject_id)
                    && c.trimester_id == Some(trimester_id)
            })
            .cloned()
    }

    fn student(&self, id: Uuid) -> Option<Student> {
        self.students.get(&id).cloned()
    }

    fn student_by_university_id(&self, university_id: i64) -> Option<Student> {
        self.students
            .values()
            .find(|s| s.university_id == university_id)
            .cloned()
    }

    fn faculty(&self, id: Uuid) -> Option<Faculty> {
        self.faculties.get(&id).cloned()
    }
}
