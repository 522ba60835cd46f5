//! Fixtures shared by the validator tests

use crate::{context::FixedClock, snapshot::Snapshot};
use chrono::{DateTime, TimeZone, Utc};
use models::{
    Audit,
    course::{Course, CourseStatus},
    notification::{Notification, NotificationScope},
    schedule::{DayOfWeek, RoomType, Section, SpaceTime},
    subject::{Prerequisite, Subject, SubjectType},
    trimester::{Calendar, Season, Trimester, TrimesterCode, TrimesterStatus},
    user::{Faculty, Student, UserType},
};
use uuid::Uuid;

/// Noon on the given day of March 2024
pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

/// A clock stopped at `at(15)`
pub fn clock() -> FixedClock {
    FixedClock(at(15))
}

pub fn audit() -> Audit {
    Audit::new("registrar", at(1))
}

pub fn subject(code: &str) -> Subject {
    Subject {
        audit: audit(),
        code_name: code.to_string(),
        name: format!("Subject {code}"),
        credits: 3,
        subject_type: SubjectType::Theory,
    }
}

/// `subject` requires `required` with a C average
pub fn prerequisite(subject: &Subject, required: &Subject) -> Prerequisite {
    Prerequisite {
        audit: audit(),
        subject_id: Some(subject.audit.id),
        required_subject_id: Some(required.audit.id),
        min_grade: 2.0,
    }
}

/// A trimester whose calendar makes `status` legal at `clock()`
pub fn trimester(year: i32, season: Season, status: TrimesterStatus) -> Trimester {
    let [cs_start, cs_end, sr_start, sr_end] = match status {
        TrimesterStatus::Upcoming => [20, 22, 24, 26],
        TrimesterStatus::CourseSelection => [10, 20, 24, 26],
        TrimesterStatus::SectionCreation => [5, 10, 20, 25],
        TrimesterStatus::SectionSelection => [1, 5, 10, 20],
        TrimesterStatus::Ongoing | TrimesterStatus::Completed => [1, 3, 5, 10],
    };

    Trimester {
        audit: audit(),
        year,
        season,
        code: TrimesterCode::of(year, season).0,
        status,
        calendar: Calendar {
            course_selection_start: Some(at(cs_start)),
            course_selection_end: Some(at(cs_end)),
            section_registration_start: Some(at(sr_start)),
            section_registration_end: Some(at(sr_end)),
        },
    }
}

pub fn space_time(
    room_number: &str,
    day_of_week: DayOfWeek,
    room_type: RoomType,
    time_slot: Option<i16>,
) -> SpaceTime {
    SpaceTime {
        audit: audit(),
        room_number: room_number.to_string(),
        day_of_week,
        room_type,
        time_slot,
    }
}

/// A 30 seat section of `subject` in `trimester`, nobody enrolled yet
pub fn section(subject: &Subject, trimester: &Trimester, slots: &[&SpaceTime]) -> Section {
    Section {
        audit: audit(),
        subject_id: Some(subject.audit.id),
        trimester_id: Some(trimester.audit.id),
        max_capacity: 30,
        current_capacity: 0,
        space_time_ids: slots.iter().map(|slot| slot.audit.id).collect(),
        teacher_ids: vec![],
    }
}

/// A detached section with the given counters
pub fn section_with_capacity(max_capacity: i32, current_capacity: i32) -> Section {
    Section {
        audit: audit(),
        subject_id: Some(Uuid::new_v4()),
        trimester_id: Some(Uuid::new_v4()),
        max_capacity,
        current_capacity,
        space_time_ids: vec![Uuid::new_v4()],
        teacher_ids: vec![],
    }
}

/// A notification of `scope` with no relations set
pub fn notification(scope: NotificationScope) -> Notification {
    Notification {
        audit: audit(),
        scope,
        title: "Registration opens".to_string(),
        content: "Section registration opens on Monday.".to_string(),
        trimester_id: None,
        section_id: None,
        target_user_id: None,
    }
}

pub fn student(university_id: i64) -> Student {
    Student {
        audit: audit(),
        university_id,
        name: format!("Student {university_id}"),
        email: format!("s{university_id}@example.edu"),
    }
}

pub fn faculty(name: &str, user_type: UserType) -> Faculty {
    Faculty {
        audit: audit(),
        name: name.to_string(),
        email: format!("{}@example.edu", name.to_lowercase()),
        user_type,
    }
}

/// One student, subject, trimester in section selection and a section with free seats
pub struct World {
    pub snapshot: Snapshot,
    pub student: Student,
    pub subject: Subject,
    pub trimester: Trimester,
    pub section: Section,
}

impl World {
    pub fn new() -> Self {
        let student = student(1001);
        let subject = subject("CSE1111");
        let trimester = trimester(2024, Season::Spring, TrimesterStatus::SectionSelection);
        let slot = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(1));
        let section = section(&subject, &trimester, &[&slot]);

        let snapshot = Snapshot::new()
            .with(student.clone())
            .with(subject.clone())
            .with(trimester.clone())
            .with(slot)
            .with(section.clone());

        Self {
            snapshot,
            student,
            subject,
            trimester,
            section,
        }
    }

    /// A fresh course of the world's student, subject and trimester
    pub fn course(&self, status: CourseStatus, section: Option<Uuid>, grade: Option<f32>) -> Course {
        Course {
            audit: audit(),
            student_id: Some(self.student.audit.id),
            subject_id: Some(self.subject.audit.id),
            trimester_id: Some(self.trimester.audit.id),
            status,
            section_id: section,
            grade,
        }
    }
}
