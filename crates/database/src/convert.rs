//! Mapping between stored rows and domain entities.
//!
//! Enum columns hold the SCREAMING_SNAKE_CASE names the domain enums parse
//! from; an unknown name surfaces as [`DbErr::Type`].

use crate::entities::{
    courses, faculties, notifications, prerequisites, sections, space_times, students, subjects,
    trimesters,
};
use models::{
    Audit,
    course::Course,
    notification::Notification,
    schedule::{Section, SpaceTime},
    subject::{Prerequisite, Subject},
    trimester::{Calendar, Trimester},
    user::{Faculty, Student},
};
use sea_orm::{ActiveValue::Set, DbErr};
use std::str::FromStr;
use uuid::Uuid;

fn parse<T: FromStr>(value: &str, column: &str) -> Result<T, DbErr> {
    value
        .parse()
        .map_err(|_| DbErr::Type(format!("unknown {column} value {value:?}")))
}

/// Unwraps a reference the validator already required
fn required(value: Option<Uuid>, column: &str) -> Result<Uuid, DbErr> {
    value.ok_or_else(|| DbErr::Custom(format!("{column} must be set before writing")))
}

macro_rules! audit_of {
    ($model:expr) => {
        Audit {
            id: $model.id,
            created_at: $model.created_at,
            updated_at: $model.updated_at,
            created_by: $model.created_by,
            updated_by: $model.updated_by,
            version: $model.version,
        }
    };
}

/// Builds an active model with the audit columns of `$audit` plus the listed fields, all `Set`
macro_rules! active_model {
    ($module:ident, $audit:expr, { $($field:ident: $value:expr),* $(,)? }) => {
        $module::ActiveModel {
            id: Set($audit.id),
            created_at: Set($audit.created_at),
            updated_at: Set($audit.updated_at),
            created_by: Set($audit.created_by.clone()),
            updated_by: Set($audit.updated_by.clone()),
            version: Set($audit.version),
            $($field: Set($value),)*
        }
    };
}

impl TryFrom<subjects::Model> for Subject {
    type Error = DbErr;

    fn try_from(model: subjects::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            subject_type: parse(&model.subject_type, "subject_type")?,
            code_name: model.code_name,
            name: model.name,
            credits: model.credits,
            audit: audit_of!(model),
        })
    }
}

impl From<&Subject> for subjects::ActiveModel {
    fn from(subject: &Subject) -> Self {
        active_model!(subjects, subject.audit, {
            code_name: subject.code_name.clone(),
            name: subject.name.clone(),
            credits: subject.credits,
            subject_type: subject.subject_type.as_str().to_owned(),
        })
    }
}

impl From<prerequisites::Model> for Prerequisite {
    fn from(model: prerequisites::Model) -> Self {
        Self {
            subject_id: Some(model.subject_id),
            required_subject_id: Some(model.required_subject_id),
            min_grade: model.min_grade,
            audit: audit_of!(model),
        }
    }
}

impl TryFrom<&Prerequisite> for prerequisites::ActiveModel {
    type Error = DbErr;

    fn try_from(edge: &Prerequisite) -> Result<Self, Self::Error> {
        Ok(active_model!(prerequisites, edge.audit, {
            subject_id: required(edge.subject_id, "subject_id")?,
            required_subject_id: required(edge.required_subject_id, "required_subject_id")?,
            min_grade: edge.min_grade,
        }))
    }
}

impl TryFrom<trimesters::Model> for Trimester {
    type Error = DbErr;

    fn try_from(model: trimesters::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            season: parse(&model.season, "season")?,
            status: parse(&model.status, "status")?,
            year: model.year,
            code: model.code,
            calendar: Calendar {
                course_selection_start: model.course_selection_start,
                course_selection_end: model.course_selection_end,
                section_registration_start: model.section_registration_start,
                section_registration_end: model.section_registration_end,
            },
            audit: audit_of!(model),
        })
    }
}

impl From<&Trimester> for trimesters::ActiveModel {
    fn from(trimester: &Trimester) -> Self {
        let calendar = &trimester.calendar;
        active_model!(trimesters, trimester.audit, {
            year: trimester.year,
            season: trimester.season.as_str().to_owned(),
            code: trimester.code,
            status: trimester.status.as_str().to_owned(),
            course_selection_start: calendar.course_selection_start,
            course_selection_end: calendar.course_selection_end,
            section_registration_start: calendar.section_registration_start,
            section_registration_end: calendar.section_registration_end,
        })
    }
}

impl TryFrom<space_times::Model> for SpaceTime {
    type Error = DbErr;

    fn try_from(model: space_times::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            day_of_week: parse(&model.day_of_week, "day_of_week")?,
            room_type: parse(&model.room_type, "room_type")?,
            room_number: model.room_number,
            time_slot: Some(model.time_slot),
            audit: audit_of!(model),
        })
    }
}

impl TryFrom<&SpaceTime> for space_times::ActiveModel {
    type Error = DbErr;

    fn try_from(space_time: &SpaceTime) -> Result<Self, Self::Error> {
        let time_slot = space_time
            .time_slot
            .ok_or_else(|| DbErr::Custom("time_slot must be set before writing".to_string()))?;

        Ok(active_model!(space_times, space_time.audit, {
            room_number: space_time.room_number.clone(),
            day_of_week: space_time.day_of_week.as_str().to_owned(),
            room_type: space_time.room_type.as_str().to_owned(),
            time_slot: time_slot,
        }))
    }
}

/// A section row joined with its junction table ids
pub fn section_from(
    model: sections::Model,
    space_time_ids: Vec<Uuid>,
    teacher_ids: Vec<Uuid>,
) -> Section {
    Section {
        subject_id: Some(model.subject_id),
        trimester_id: Some(model.trimester_id),
        max_capacity: model.max_capacity,
        current_capacity: model.current_capacity,
        space_time_ids,
        teacher_ids,
        audit: audit_of!(model),
    }
}

impl TryFrom<&Section> for sections::ActiveModel {
    type Error = DbErr;

    fn try_from(section: &Section) -> Result<Self, Self::Error> {
        Ok(active_model!(sections, section.audit, {
            subject_id: required(section.subject_id, "subject_id")?,
            trimester_id: required(section.trimester_id, "trimester_id")?,
            max_capacity: section.max_capacity,
            current_capacity: section.current_capacity,
        }))
    }
}

impl TryFrom<courses::Model> for Course {
    type Error = DbErr;

    fn try_from(model: courses::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse(&model.status, "status")?,
            student_id: Some(model.student_id),
            subject_id: Some(model.subject_id),
            trimester_id: Some(model.trimester_id),
            section_id: model.section_id,
            grade: model.grade,
            audit: audit_of!(model),
        })
    }
}

impl TryFrom<&Course> for courses::ActiveModel {
    type Error = DbErr;

    fn try_from(course: &Course) -> Result<Self, Self::Error> {
        Ok(active_model!(courses, course.audit, {
            student_id: required(course.student_id, "student_id")?,
            subject_id: required(course.subject_id, "subject_id")?,
            trimester_id: required(course.trimester_id, "trimester_id")?,
            status: course.status.as_str().to_owned(),
            section_id: course.section_id,
            grade: course.grade,
        }))
    }
}

impl TryFrom<notifications::Model> for Notification {
    type Error = DbErr;

    fn try_from(model: notifications::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            scope: parse(&model.scope, "scope")?,
            title: model.title,
            content: model.content,
            trimester_id: model.trimester_id,
            section_id: model.section_id,
            target_user_id: model.target_user_id,
            audit: audit_of!(model),
        })
    }
}

impl From<&Notification> for notifications::ActiveModel {
    fn from(notification: &Notification) -> Self {
        active_model!(notifications, notification.audit, {
            scope: notification.scope.as_str().to_owned(),
            title: notification.title.clone(),
            content: notification.content.clone(),
            trimester_id: notification.trimester_id,
            section_id: notification.section_id,
            target_user_id: notification.target_user_id,
        })
    }
}

impl From<students::Model> for Student {
    fn from(model: students::Model) -> Self {
        Self {
            university_id: model.university_id,
            name: model.name,
            email: model.email,
            audit: audit_of!(model),
        }
    }
}

impl From<&Student> for students::ActiveModel {
    fn from(student: &Student) -> Self {
        active_model!(students, student.audit, {
            university_id: student.university_id,
            name: student.name.clone(),
            email: student.email.clone(),
        })
    }
}

impl TryFrom<faculties::Model> for Faculty {
    type Error = DbErr;

    fn try_from(model: faculties::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            user_type: parse(&model.user_type, "user_type")?,
            name: model.name,
            email: model.email,
            audit: audit_of!(model),
        })
    }
}

impl From<&Faculty> for faculties::ActiveModel {
    fn from(faculty: &Faculty) -> Self {
        active_model!(faculties, faculty.audit, {
            name: faculty.name.clone(),
            email: faculty.email.clone(),
            user_type: faculty.user_type.as_str().to_owned(),
        })
    }
}
